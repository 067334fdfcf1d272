use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{
    BOND_SEED, FUNDS_SEED, MAX_PROOF_DEPTH, POSITION_SEED, ROUND_SEED, VESTING_CONFIG_SEED,
};
use crate::error::VestingError;
use crate::state::{Bond, Cohort, Position, SaleRound, VestingConfig};

/// Buys CVG through a bond. `position_id` is either the next free id (a new
/// IBO position is opened) or an IBO position owned by the depositor.
pub fn deposit(
    ctx: Context<Deposit>,
    bond_id: u64,
    position_id: u64,
    stable_amount_in: u64,
    min_amount_out: u64,
    proof: Option<Vec<[u8; 32]>>,
) -> Result<()> {
    if let Some(p) = proof.as_ref() {
        require!(p.len() <= MAX_PROOF_DEPTH, VestingError::InvalidProof);
    }
    let now = Clock::get()?.unix_timestamp;
    let depositor = ctx.accounts.depositor.key();

    let round = &mut ctx.accounts.round;
    let elapsed = round.check_bond_deposit(&depositor, proof.as_deref(), now)?;

    let bond = &mut ctx.accounts.bond;
    let cvg_out = bond.deposit(stable_amount_in, min_amount_out, elapsed)?;
    round.record(cvg_out, stable_amount_in)?;

    let opened = ctx.accounts.position.open_or_augment_ibo(
        &mut ctx.accounts.vesting_config,
        position_id,
        depositor,
        cvg_out,
        ctx.bumps.position,
    )?;
    if opened {
        round.position_count = round
            .position_count
            .checked_add(1)
            .ok_or(VestingError::MathOverflow)?;
    }

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor_token_account.to_account_info(),
                to: ctx.accounts.funds_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        stable_amount_in,
    )?;

    emit!(BondDeposited {
        bond_id,
        position_id,
        owner: depositor,
        stable_amount_in,
        cvg_out,
        elapsed,
        bond_total_minted: bond.total_minted,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(bond_id: u64, position_id: u64)]
pub struct Deposit<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, seeds = [ROUND_SEED, &[Cohort::Ibo as u8]], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    #[account(
        mut,
        seeds = [BOND_SEED, round.key().as_ref(), &bond_id.to_le_bytes()],
        bump = bond.bump
    )]
    pub bond: Account<'info, Bond>,

    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + Position::SIZE,
        seeds = [POSITION_SEED, &position_id.to_le_bytes()],
        bump
    )]
    pub position: Account<'info, Position>,

    #[account(
        mut,
        seeds = [FUNDS_SEED, round.key().as_ref(), bond.params.payment_mint.as_ref()],
        bump,
    )]
    pub funds_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        token::mint = bond.params.payment_mint,
        token::authority = depositor,
    )]
    pub depositor_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct BondDeposited {
    pub bond_id: u64,
    pub position_id: u64,
    pub owner: Pubkey,
    pub stable_amount_in: u64,
    pub cvg_out: u64,
    pub elapsed: u64,
    pub bond_total_minted: u64,
}
