use anchor_lang::prelude::*;

use crate::constants::{POSITION_SEED, VESTING_CONFIG_SEED};
use crate::state::{Cohort, Position, VestingConfig};

pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, position_id: u64) -> Result<()> {
    let config = &ctx.accounts.vesting_config;
    let position = &ctx.accounts.position;
    let now = Clock::get()?.unix_timestamp;

    let elapsed = config.elapsed(now)?;
    let releasable_total = config.releasable_for(position, now)?;
    let due = config.due_for(position, now)?;

    emit!(VestingQuote {
        position_id,
        owner: position.owner,
        cohort: position.cohort,
        elapsed,
        releasable_total,
        amount_released: position.amount_released,
        due,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(position_id: u64)]
pub struct EmitVestingQuote<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(seeds = [POSITION_SEED, &position_id.to_le_bytes()], bump = position.bump)]
    pub position: Account<'info, Position>,
}

#[event]
pub struct VestingQuote {
    pub position_id: u64,
    pub owner: Pubkey,
    pub cohort: Cohort,
    pub elapsed: u64,
    pub releasable_total: u64,
    pub amount_released: u64,
    pub due: u64,
}
