use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{VAULT_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{VestingConfig, VestingState};

/// Records the CVG mint and creates the vault it is released from.
pub fn set_cvg(ctx: Context<SetCvg>) -> Result<()> {
    let config = &mut ctx.accounts.vesting_config;
    config.require_admin(&ctx.accounts.admin.key())?;
    require!(
        config.cvg_mint == Pubkey::default(),
        VestingError::CvgAlreadySet
    );
    require!(
        config.state == VestingState::NotSet,
        VestingError::VestingAlreadySet
    );

    config.cvg_mint = ctx.accounts.cvg_mint.key();
    config.vault = ctx.accounts.vault.key();
    config.airdrop_reserve = ctx.accounts.airdrop_reserve.key();

    emit!(CvgSet {
        cvg_mint: config.cvg_mint,
        vault: config.vault,
        airdrop_reserve: config.airdrop_reserve,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetCvg<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        init,
        payer = admin,
        token::mint = cvg_mint,
        token::authority = vesting_config,
        seeds = [VAULT_SEED, vesting_config.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    pub cvg_mint: Account<'info, Mint>,

    /// CVG held for airdrops; excluded from emissions.
    #[account(constraint = airdrop_reserve.mint == cvg_mint.key() @ VestingError::InvalidTokenMint)]
    pub airdrop_reserve: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct CvgSet {
    pub cvg_mint: Pubkey,
    pub vault: Pubkey,
    pub airdrop_reserve: Pubkey,
}
