use anchor_lang::prelude::*;

use crate::constants::VESTING_CONFIG_SEED;
use crate::error::VestingError;
use crate::state::VestingConfig;

pub fn initialize(
    ctx: Context<Initialize>,
    treasury: Pubkey,
    team: Pubkey,
    dao: Pubkey,
    dao_counts_voting_power: bool,
) -> Result<()> {
    require!(treasury != Pubkey::default(), VestingError::InvalidPubkey);
    require!(team != Pubkey::default(), VestingError::InvalidPubkey);
    require!(dao != Pubkey::default(), VestingError::InvalidPubkey);
    require!(team != dao, VestingError::InvalidConfig);

    let config = &mut ctx.accounts.vesting_config;
    config.init(
        ctx.accounts.admin.key(),
        treasury,
        team,
        dao,
        dao_counts_voting_power,
        ctx.bumps.vesting_config,
    );

    emit!(VestingInitialized {
        admin: config.admin,
        treasury,
        team,
        dao,
        dao_counts_voting_power,
    });

    Ok(())
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + VestingConfig::SIZE,
        seeds = [VESTING_CONFIG_SEED],
        bump
    )]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingInitialized {
    pub admin: Pubkey,
    pub treasury: Pubkey,
    pub team: Pubkey,
    pub dao: Pubkey,
    pub dao_counts_voting_power: bool,
}
