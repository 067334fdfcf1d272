use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{FUNDS_SEED, ROUND_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Cohort, SaleRound, VestingConfig};

/// Sweeps the funds vault of an accepted payment asset to the treasury.
pub fn withdraw_funds(ctx: Context<WithdrawFunds>) -> Result<()> {
    let config = &ctx.accounts.vesting_config;
    require!(
        config.is_admin_or_treasury(&ctx.accounts.authority.key()),
        VestingError::Unauthorized
    );
    ctx.accounts.round.asset_index(&ctx.accounts.payment_mint.key())?;

    let amount = ctx.accounts.funds_vault.amount;
    sweep(
        &ctx.accounts.round,
        &ctx.accounts.funds_vault,
        &ctx.accounts.treasury_token_account,
        &ctx.accounts.token_program,
        amount,
    )
}

/// Sweeps any other token account held by a round (e.g. tokens sent by mistake).
pub fn withdraw_token(ctx: Context<WithdrawToken>) -> Result<()> {
    let config = &ctx.accounts.vesting_config;
    require!(
        config.is_admin_or_treasury(&ctx.accounts.authority.key()),
        VestingError::Unauthorized
    );

    let amount = ctx.accounts.source.amount;
    sweep(
        &ctx.accounts.round,
        &ctx.accounts.source,
        &ctx.accounts.treasury_token_account,
        &ctx.accounts.token_program,
        amount,
    )
}

fn sweep<'info>(
    round: &Account<'info, SaleRound>,
    source: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    token_program: &Program<'info, Token>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, VestingError::NoFunds);

    let cohort_seed = round.signer_seed_cohort();
    let signer_seeds: &[&[&[u8]]] = &[&[ROUND_SEED, &cohort_seed, &[round.bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: source.to_account_info(),
                to: destination.to_account_info(),
                authority: round.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(FundsWithdrawn {
        cohort: round.cohort,
        mint: source.mint,
        destination: destination.key(),
        amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawFunds<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    pub payment_mint: Account<'info, Mint>,

    #[account(
        mut,
        seeds = [FUNDS_SEED, round.key().as_ref(), payment_mint.key().as_ref()],
        bump,
    )]
    pub funds_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = payment_mint,
        constraint = treasury_token_account.owner == vesting_config.treasury @ VestingError::InvalidTokenAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct WithdrawToken<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        mut,
        constraint = source.owner == round.key() @ VestingError::InvalidTokenAccount,
    )]
    pub source: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = treasury_token_account.mint == source.mint @ VestingError::InvalidTokenMint,
        constraint = treasury_token_account.owner == vesting_config.treasury @ VestingError::InvalidTokenAccount,
    )]
    pub treasury_token_account: Account<'info, TokenAccount>,

    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct FundsWithdrawn {
    pub cohort: Cohort,
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}
