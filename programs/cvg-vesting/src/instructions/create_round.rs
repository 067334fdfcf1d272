use anchor_lang::prelude::*;

use crate::constants::{MAX_SUPPLY_PRESEED_SEED, ROUND_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Cohort, Eligibility, SaleRound, VestingConfig, VestingState};

/// Creates the sale round of `cohort`. PRESEED_SEED and WL sell at a fixed
/// rate behind Merkle tiers; IBO sells through bonds.
pub fn create_round(
    ctx: Context<CreateRound>,
    cohort: Cohort,
    rate_numerator: u64,
    rate_denominator: u64,
    max_supply: u64,
) -> Result<()> {
    let config = &ctx.accounts.vesting_config;
    config.require_admin(&ctx.accounts.admin.key())?;
    require!(
        config.state == VestingState::NotSet,
        VestingError::VestingAlreadySet
    );
    require!(cohort.is_sale(), VestingError::InvalidCohort);

    let eligibility = match cohort {
        Cohort::Ibo => Eligibility::BondingCurve,
        _ => {
            require!(
                rate_numerator > 0 && rate_denominator > 0,
                VestingError::InvalidConfig
            );
            Eligibility::MerkleFixedRate
        }
    };
    if cohort == Cohort::PreseedSeed {
        require!(
            max_supply > 0 && max_supply <= MAX_SUPPLY_PRESEED_SEED,
            VestingError::InvalidConfig
        );
    }

    let round = &mut ctx.accounts.round;
    round.set_inner(SaleRound::new(
        cohort,
        eligibility,
        rate_numerator,
        rate_denominator,
        max_supply,
        ctx.bumps.round,
    ));

    emit!(RoundCreated {
        cohort,
        eligibility,
        rate_numerator,
        rate_denominator,
        max_supply,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(cohort: Cohort)]
pub struct CreateRound<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = admin,
        space = 8 + SaleRound::SIZE,
        seeds = [ROUND_SEED, &[cohort as u8]],
        bump
    )]
    pub round: Account<'info, SaleRound>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct RoundCreated {
    pub cohort: Cohort,
    pub eligibility: Eligibility,
    pub rate_numerator: u64,
    pub rate_denominator: u64,
    pub max_supply: u64,
}
