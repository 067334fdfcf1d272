use anchor_lang::prelude::*;

use crate::constants::{POSITION_SEED, ROUND_SEED};
use crate::state::{Position, SaleRound};

/// Hands the future claims of a position to `new_owner` once its round has finished.
pub fn transfer_position(
    ctx: Context<TransferPosition>,
    position_id: u64,
    new_owner: Pubkey,
) -> Result<()> {
    let previous_owner = ctx.accounts.owner.key();
    let position = &mut ctx.accounts.position;
    position.transfer(&ctx.accounts.round, &previous_owner, new_owner)?;

    emit!(PositionTransferred {
        position_id,
        previous_owner,
        new_owner,
        amount_released: position.amount_released,
    });
    Ok(())
}

#[derive(Accounts)]
#[instruction(position_id: u64)]
pub struct TransferPosition<'info> {
    #[account(
        mut,
        seeds = [POSITION_SEED, &position_id.to_le_bytes()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(seeds = [ROUND_SEED, &[position.cohort as u8]], bump = round.bump)]
    pub round: Account<'info, SaleRound>,

    pub owner: Signer<'info>,
}

#[event]
pub struct PositionTransferred {
    pub position_id: u64,
    pub previous_owner: Pubkey,
    pub new_owner: Pubkey,
    pub amount_released: u64,
}
