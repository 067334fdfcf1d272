use anchor_lang::prelude::*;

use crate::constants::{ROUND_SEED, VESTING_CONFIG_SEED};
use crate::state::{Cohort, SaleRound, TierConfig, VestingConfig};

/// Configures tier S (0), M (1) or L (2) of a Merkle-gated round.
pub fn set_tier(
    ctx: Context<SetTier>,
    tier: u8,
    merkle_root: [u8; 32],
    min_stable: u64,
    max_stable: u64,
    accepted_assets: u8,
) -> Result<()> {
    ctx.accounts
        .vesting_config
        .require_admin(&ctx.accounts.admin.key())?;

    let round = &mut ctx.accounts.round;
    round.set_tier(
        tier,
        TierConfig {
            merkle_root,
            min_stable,
            max_stable,
            accepted_assets,
        },
    )?;

    emit!(TierSet {
        cohort: round.cohort,
        tier,
        merkle_root,
        min_stable,
        max_stable,
        accepted_assets,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetTier<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    pub admin: Signer<'info>,
}

#[event]
pub struct TierSet {
    pub cohort: Cohort,
    pub tier: u8,
    pub merkle_root: [u8; 32],
    pub min_stable: u64,
    pub max_stable: u64,
    pub accepted_assets: u8,
}
