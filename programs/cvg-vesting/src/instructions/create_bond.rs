use anchor_lang::prelude::*;

use crate::constants::{BOND_SEED, ROUND_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Bond, BondParams, Cohort, RoundState, SaleRound, VestingConfig};

/// Registers a bond on the IBO round. Its payment mint must already be
/// accepted by the round.
pub fn create_bond(ctx: Context<CreateBond>, params: BondParams) -> Result<()> {
    ctx.accounts
        .vesting_config
        .require_admin(&ctx.accounts.admin.key())?;
    params.validate()?;

    let round_key = ctx.accounts.round.key();
    let round = &mut ctx.accounts.round;
    require!(round.cohort == Cohort::Ibo, VestingError::InvalidCohort);
    require!(
        round.state != RoundState::Finished,
        VestingError::PresaleRoundFinished
    );
    round.asset_index(&params.payment_mint)?;

    let bond_id = round.bond_count;
    round.bond_count = bond_id.checked_add(1).ok_or(VestingError::MathOverflow)?;

    let bond = &mut ctx.accounts.bond;
    bond.round = round_key;
    bond.bond_id = bond_id;
    bond.params = params;
    bond.total_minted = 0;
    bond.bump = ctx.bumps.bond;

    emit!(BondCreated { bond_id, params });
    Ok(())
}

#[derive(Accounts)]
pub struct CreateBond<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &[Cohort::Ibo as u8]], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        init,
        payer = admin,
        space = 8 + Bond::SIZE,
        seeds = [BOND_SEED, round.key().as_ref(), &round.bond_count.to_le_bytes()],
        bump
    )]
    pub bond: Account<'info, Bond>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct BondCreated {
    pub bond_id: u64,
    pub params: BondParams,
}
