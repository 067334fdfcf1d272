use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{
    FUNDS_SEED, MAX_PROOF_DEPTH, POSITION_SEED, RECEIPT_SEED, ROUND_SEED, VESTING_CONFIG_SEED,
};
use crate::error::VestingError;
use crate::state::{Cohort, MintReceipt, Position, SaleRound, VestingConfig};

/// First purchase of a whitelisted address in a Merkle-gated round.
pub fn invest_mint(
    ctx: Context<InvestMint>,
    proof: Vec<[u8; 32]>,
    stable_amount: u64,
    tier: u8,
) -> Result<()> {
    require!(proof.len() <= MAX_PROOF_DEPTH, VestingError::InvalidProof);

    let investor = ctx.accounts.investor.key();
    let payment_mint = ctx.accounts.payment_mint.key();
    let round_key = ctx.accounts.round.key();

    let round = &mut ctx.accounts.round;
    let receipt = &mut ctx.accounts.receipt;
    let cvg_amount = round.invest(
        &investor,
        &proof,
        stable_amount,
        tier,
        &payment_mint,
        receipt.minted,
    )?;

    let position_id = ctx.accounts.vesting_config.take_position_id()?;
    let position = &mut ctx.accounts.position;
    position.open(position_id, investor, round.cohort, tier, ctx.bumps.position);
    position.credit(cvg_amount, stable_amount)?;

    receipt.mark(round_key, investor, position_id, ctx.bumps.receipt)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.investor_token_account.to_account_info(),
                to: ctx.accounts.funds_vault.to_account_info(),
                authority: ctx.accounts.investor.to_account_info(),
            },
        ),
        stable_amount,
    )?;

    emit!(PositionMinted {
        position_id,
        owner: investor,
        cohort: round.cohort,
        tier,
        payment_mint,
        stable_amount,
        cvg_amount,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InvestMint<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        init,
        payer = investor,
        space = 8 + Position::SIZE,
        seeds = [POSITION_SEED, &vesting_config.next_position_id.to_le_bytes()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        init_if_needed,
        payer = investor,
        space = 8 + MintReceipt::SIZE,
        seeds = [RECEIPT_SEED, round.key().as_ref(), investor.key().as_ref()],
        bump
    )]
    pub receipt: Account<'info, MintReceipt>,

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
        token::authority = investor,
    )]
    pub investor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct PositionMinted {
    pub position_id: u64,
    pub owner: Pubkey,
    pub cohort: Cohort,
    pub tier: u8,
    pub payment_mint: Pubkey,
    pub stable_amount: u64,
    pub cvg_amount: u64,
}
