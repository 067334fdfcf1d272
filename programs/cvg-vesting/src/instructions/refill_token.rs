use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{FUNDS_SEED, POSITION_SEED, ROUND_SEED};
use crate::state::{Position, SaleRound};

/// Adds to an existing position while its round is active, up to the tier max.
pub fn refill_token(ctx: Context<RefillToken>, position_id: u64, add_amount: u64) -> Result<()> {
    let caller = ctx.accounts.investor.key();
    let payment_mint = ctx.accounts.payment_mint.key();

    let round = &mut ctx.accounts.round;
    let position = &mut ctx.accounts.position;
    let cvg_added = round.refill(position, &caller, add_amount, &payment_mint)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.investor_token_account.to_account_info(),
                to: ctx.accounts.funds_vault.to_account_info(),
                authority: ctx.accounts.investor.to_account_info(),
            },
        ),
        add_amount,
    )?;

    emit!(PositionRefilled {
        position_id,
        owner: caller,
        payment_mint,
        add_amount,
        cvg_added,
        stable_invested: position.stable_invested,
        cvg_amount: position.cvg_amount,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(position_id: u64)]
pub struct RefillToken<'info> {
    #[account(mut, seeds = [ROUND_SEED, &round.signer_seed_cohort()], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        mut,
        seeds = [POSITION_SEED, &position_id.to_le_bytes()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

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

    pub investor: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct PositionRefilled {
    pub position_id: u64,
    pub owner: Pubkey,
    pub payment_mint: Pubkey,
    pub add_amount: u64,
    pub cvg_added: u64,
    pub stable_invested: u64,
    pub cvg_amount: u64,
}
