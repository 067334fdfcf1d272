use anchor_lang::prelude::*;

pub mod constants;
pub mod error;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{BondParams, Cohort, RoundState};

declare_id!("61EiRiRNSU4ZEhnn8JpC6L9VRHz6oKvD9YzSP6bNZNWp");

#[program]
pub mod cvg_vesting {
    use super::*;

    pub fn initialize(
        ctx: Context<Initialize>,
        treasury: Pubkey,
        team: Pubkey,
        dao: Pubkey,
        dao_counts_voting_power: bool,
    ) -> Result<()> {
        instructions::initialize::initialize(ctx, treasury, team, dao, dao_counts_voting_power)
    }

    pub fn set_cvg(ctx: Context<SetCvg>) -> Result<()> {
        instructions::set_cvg::set_cvg(ctx)
    }

    pub fn set_whitelist(
        ctx: Context<SetWhitelist>,
        role: WhitelistRole,
        address: Pubkey,
    ) -> Result<()> {
        instructions::set_whitelist::set_whitelist(ctx, role, address)
    }

    // Sale rounds.

    pub fn create_round(
        ctx: Context<CreateRound>,
        cohort: Cohort,
        rate_numerator: u64,
        rate_denominator: u64,
        max_supply: u64,
    ) -> Result<()> {
        instructions::create_round::create_round(
            ctx,
            cohort,
            rate_numerator,
            rate_denominator,
            max_supply,
        )
    }

    pub fn register_payment_asset(ctx: Context<RegisterPaymentAsset>) -> Result<()> {
        instructions::register_payment_asset::register_payment_asset(ctx)
    }

    pub fn set_tier(
        ctx: Context<SetTier>,
        tier: u8,
        merkle_root: [u8; 32],
        min_stable: u64,
        max_stable: u64,
        accepted_assets: u8,
    ) -> Result<()> {
        instructions::set_tier::set_tier(
            ctx,
            tier,
            merkle_root,
            min_stable,
            max_stable,
            accepted_assets,
        )
    }

    pub fn set_round_state(ctx: Context<SetRoundState>, new_state: RoundState) -> Result<()> {
        instructions::set_round_state::set_round_state(ctx, new_state)
    }

    pub fn invest_mint(
        ctx: Context<InvestMint>,
        proof: Vec<[u8; 32]>,
        stable_amount: u64,
        tier: u8,
    ) -> Result<()> {
        instructions::invest_mint::invest_mint(ctx, proof, stable_amount, tier)
    }

    pub fn refill_token(ctx: Context<RefillToken>, position_id: u64, add_amount: u64) -> Result<()> {
        instructions::refill_token::refill_token(ctx, position_id, add_amount)
    }

    pub fn withdraw_funds(ctx: Context<WithdrawFunds>) -> Result<()> {
        instructions::withdraw_funds::withdraw_funds(ctx)
    }

    pub fn withdraw_token(ctx: Context<WithdrawToken>) -> Result<()> {
        instructions::withdraw_funds::withdraw_token(ctx)
    }

    // Bonds.

    pub fn create_bond(ctx: Context<CreateBond>, params: BondParams) -> Result<()> {
        instructions::create_bond::create_bond(ctx, params)
    }

    pub fn set_start_timestamp(
        ctx: Context<SetStartTimestamp>,
        start_ts: i64,
        whitelist_root: [u8; 32],
        whitelist_duration: i64,
    ) -> Result<()> {
        instructions::set_start_timestamp::set_start_timestamp(
            ctx,
            start_ts,
            whitelist_root,
            whitelist_duration,
        )
    }

    pub fn deposit(
        ctx: Context<Deposit>,
        bond_id: u64,
        position_id: u64,
        stable_amount_in: u64,
        min_amount_out: u64,
        proof: Option<Vec<[u8; 32]>>,
    ) -> Result<()> {
        instructions::deposit::deposit(
            ctx,
            bond_id,
            position_id,
            stable_amount_in,
            min_amount_out,
            proof,
        )
    }

    // Vesting.

    pub fn set_vesting(ctx: Context<SetVesting>) -> Result<()> {
        instructions::set_vesting::set_vesting(ctx)
    }

    pub fn open_vesting(ctx: Context<OpenVesting>) -> Result<()> {
        instructions::open_vesting::open_vesting(ctx)
    }

    pub fn release(ctx: Context<Release>, position_id: u64) -> Result<()> {
        instructions::release::release(ctx, position_id)
    }

    pub fn release_team_or_dao(ctx: Context<ReleaseTeamOrDao>, is_team: bool) -> Result<()> {
        instructions::release::release_team_or_dao(ctx, is_team)
    }

    pub fn emit_vesting_quote(ctx: Context<EmitVestingQuote>, position_id: u64) -> Result<()> {
        instructions::emit_vesting_quote::emit_vesting_quote(ctx, position_id)
    }

    pub fn transfer_position(
        ctx: Context<TransferPosition>,
        position_id: u64,
        new_owner: Pubkey,
    ) -> Result<()> {
        instructions::transfer_position::transfer_position(ctx, position_id, new_owner)
    }

    pub fn calculate_vve_cvg(ctx: Context<CalculateVveCvg>, address: Pubkey) -> Result<u64> {
        instructions::calculate_vve_cvg::calculate_vve_cvg(ctx, address)
    }
}
