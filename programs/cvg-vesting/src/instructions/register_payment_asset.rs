use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{FUNDS_SEED, ROUND_SEED, VESTING_CONFIG_SEED};
use crate::state::{Cohort, SaleRound, VestingConfig};

/// Accepts `payment_mint` in a round and creates the vault collecting it.
pub fn register_payment_asset(ctx: Context<RegisterPaymentAsset>) -> Result<()> {
    ctx.accounts
        .vesting_config
        .require_admin(&ctx.accounts.admin.key())?;

    let round = &mut ctx.accounts.round;
    let index = round.register_payment_asset(ctx.accounts.payment_mint.key())?;

    emit!(PaymentAssetRegistered {
        cohort: round.cohort,
        payment_mint: ctx.accounts.payment_mint.key(),
        funds_vault: ctx.accounts.funds_vault.key(),
        index: index as u8,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct RegisterPaymentAsset<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        init,
        payer = admin,
        token::mint = payment_mint,
        token::authority = round,
        seeds = [FUNDS_SEED, round.key().as_ref(), payment_mint.key().as_ref()],
        bump
    )]
    pub funds_vault: Account<'info, TokenAccount>,

    pub payment_mint: Account<'info, Mint>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct PaymentAssetRegistered {
    pub cohort: Cohort,
    pub payment_mint: Pubkey,
    pub funds_vault: Pubkey,
    pub index: u8,
}
