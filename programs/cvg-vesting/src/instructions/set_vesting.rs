use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{ROUND_SEED, VESTING_CONFIG_SEED};
use crate::error::VestingError;
use crate::state::{Cohort, SaleRound, VestingConfig};

/// Freezes the cohort totals once every sale round is finished.
pub fn set_vesting(ctx: Context<SetVesting>) -> Result<()> {
    let vault_balance = ctx.accounts.vault.as_ref().map_or(0, |v| v.amount);

    let config = &mut ctx.accounts.vesting_config;
    config.require_admin(&ctx.accounts.admin.key())?;
    let totals = config.set_vesting(
        [
            &*ctx.accounts.preseed_seed_round,
            &*ctx.accounts.wl_round,
            &*ctx.accounts.ibo_round,
        ],
        vault_balance,
    )?;
    msg!("vesting set, vault holds {}", vault_balance);

    emit!(VestingSet {
        totals,
        vault_balance,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct SetVesting<'info> {
    #[account(mut, seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    #[account(seeds = [ROUND_SEED, &[Cohort::PreseedSeed as u8]], bump = preseed_seed_round.bump)]
    pub preseed_seed_round: Account<'info, SaleRound>,

    #[account(seeds = [ROUND_SEED, &[Cohort::Wl as u8]], bump = wl_round.bump)]
    pub wl_round: Account<'info, SaleRound>,

    #[account(seeds = [ROUND_SEED, &[Cohort::Ibo as u8]], bump = ibo_round.bump)]
    pub ibo_round: Account<'info, SaleRound>,

    /// Absent until `set_cvg` created it.
    #[account(address = vesting_config.vault @ VestingError::InvalidTokenAccount)]
    pub vault: Option<Account<'info, TokenAccount>>,

    pub admin: Signer<'info>,
}

#[event]
pub struct VestingSet {
    pub totals: [u64; Cohort::COUNT],
    pub vault_balance: u64,
}
