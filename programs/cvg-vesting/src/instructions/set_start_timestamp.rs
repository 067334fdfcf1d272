use anchor_lang::prelude::*;

use crate::constants::{ROUND_SEED, VESTING_CONFIG_SEED};
use crate::state::{Cohort, SaleRound, VestingConfig};

/// Activates the IBO round at `start_ts`. During the first
/// `whitelist_duration` seconds deposits need a proof against `whitelist_root`.
pub fn set_start_timestamp(
    ctx: Context<SetStartTimestamp>,
    start_ts: i64,
    whitelist_root: [u8; 32],
    whitelist_duration: i64,
) -> Result<()> {
    ctx.accounts
        .vesting_config
        .require_admin(&ctx.accounts.admin.key())?;

    let round = &mut ctx.accounts.round;
    round.set_bond_start(start_ts, whitelist_root, whitelist_duration)?;
    msg!("ibo starts at {} (whitelist window {}s)", start_ts, whitelist_duration);

    emit!(BondStartSet {
        start_ts,
        whitelist_root,
        whitelist_duration,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetStartTimestamp<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &[Cohort::Ibo as u8]], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    pub admin: Signer<'info>,
}

#[event]
pub struct BondStartSet {
    pub start_ts: i64,
    pub whitelist_root: [u8; 32],
    pub whitelist_duration: i64,
}
