use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{POSITION_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Cohort, Position, VestingConfig};

/// Releases everything currently due on a sale position to its owner.
pub fn release(ctx: Context<Release>, position_id: u64) -> Result<()> {
    let config_ai = ctx.accounts.vesting_config.to_account_info();
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();

    let config = &mut ctx.accounts.vesting_config;
    let position = &mut ctx.accounts.position;
    let amount = config.release_position(position, &owner, now)?;

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.destination,
        config_ai,
        config.bump,
        amount,
    )?;

    emit!(TokensReleased {
        position_id,
        cohort: position.cohort,
        owner,
        amount,
        released_total: position.amount_released,
    });
    Ok(())
}

/// Releases the team or dao virtual position to its whitelisted address.
pub fn release_team_or_dao(ctx: Context<ReleaseTeamOrDao>, is_team: bool) -> Result<()> {
    let config_ai = ctx.accounts.vesting_config.to_account_info();
    let now = Clock::get()?.unix_timestamp;
    let owner = ctx.accounts.owner.key();

    let config = &mut ctx.accounts.vesting_config;
    let amount = config.release_team_or_dao(is_team, &owner, now)?;
    let (cohort, released_total) = if is_team {
        (Cohort::Team, config.team_position.amount_released)
    } else {
        (Cohort::Dao, config.dao_position.amount_released)
    };

    transfer_from_vault(
        &ctx.accounts.token_program,
        &ctx.accounts.vault,
        &ctx.accounts.destination,
        config_ai,
        config.bump,
        amount,
    )?;

    emit!(TokensReleased {
        position_id: u64::MAX,
        cohort,
        owner,
        amount,
        released_total,
    });
    Ok(())
}

fn transfer_from_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    authority: AccountInfo<'info>,
    bump: u8,
    amount: u64,
) -> Result<()> {
    let signer_seeds: &[&[&[u8]]] = &[&[VESTING_CONFIG_SEED, &[bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            token_program.to_account_info(),
            Transfer {
                from: vault.to_account_info(),
                to: destination.to_account_info(),
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

#[derive(Accounts)]
#[instruction(position_id: u64)]
pub struct Release<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(
        mut,
        seeds = [POSITION_SEED, &position_id.to_le_bytes()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    #[account(mut, address = vesting_config.vault @ VestingError::InvalidTokenAccount)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == vesting_config.cvg_mint @ VestingError::InvalidTokenMint,
        constraint = destination.owner == owner.key() @ VestingError::InvalidTokenAccount,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct ReleaseTeamOrDao<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(mut, address = vesting_config.vault @ VestingError::InvalidTokenAccount)]
    pub vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = destination.mint == vesting_config.cvg_mint @ VestingError::InvalidTokenMint,
        constraint = destination.owner == owner.key() @ VestingError::InvalidTokenAccount,
    )]
    pub destination: Account<'info, TokenAccount>,

    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

/// `position_id` is `u64::MAX` for the team and dao virtual positions.
#[event]
pub struct TokensReleased {
    pub position_id: u64,
    pub cohort: Cohort,
    pub owner: Pubkey,
    pub amount: u64,
    pub released_total: u64,
}
