use anchor_lang::prelude::*;

use crate::constants::{ROUND_SEED, VESTING_CONFIG_SEED};
use crate::state::{Cohort, RoundState, SaleRound, VestingConfig};

pub fn set_round_state(ctx: Context<SetRoundState>, new_state: RoundState) -> Result<()> {
    ctx.accounts
        .vesting_config
        .require_admin(&ctx.accounts.admin.key())?;

    let round = &mut ctx.accounts.round;
    let old_state = round.state;
    round.transition(new_state)?;
    msg!(
        "round {:?}: {:?} -> {:?}, total_cvg {}",
        round.cohort,
        old_state,
        new_state,
        round.total_cvg
    );

    emit!(RoundStateChanged {
        cohort: round.cohort,
        old_state,
        new_state,
        total_cvg: round.total_cvg,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetRoundState<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    pub admin: Signer<'info>,
}

#[event]
pub struct RoundStateChanged {
    pub cohort: Cohort,
    pub old_state: RoundState,
    pub new_state: RoundState,
    pub total_cvg: u64,
}
