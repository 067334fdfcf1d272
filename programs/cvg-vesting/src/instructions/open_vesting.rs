use anchor_lang::prelude::*;

use crate::constants::VESTING_CONFIG_SEED;
use crate::state::VestingConfig;

pub fn open_vesting(ctx: Context<OpenVesting>) -> Result<()> {
    let config = &mut ctx.accounts.vesting_config;
    config.require_admin(&ctx.accounts.admin.key())?;

    let now = Clock::get()?.unix_timestamp;
    config.open(now)?;

    emit!(VestingOpened { start_ts: now });
    Ok(())
}

#[derive(Accounts)]
pub struct OpenVesting<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    pub admin: Signer<'info>,
}

#[event]
pub struct VestingOpened {
    pub start_ts: i64,
}
