use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::constants::VESTING_CONFIG_SEED;
use crate::error::VestingError;
use crate::state::{Cohort, Position, VestingConfig, VestingState};
use crate::utils::voting_power;

/// Locked voting power of `address`, returned through Anchor return data.
///
/// The PRESEED_SEED positions of `address` are passed as remaining accounts.
/// Returns zero until vesting opens, before any token account is read.
pub fn calculate_vve_cvg(ctx: Context<CalculateVveCvg>, address: Pubkey) -> Result<u64> {
    let config = &ctx.accounts.vesting_config;
    if config.state != VestingState::Open {
        return Ok(0);
    }

    let balances = match (
        &ctx.accounts.cvg_mint,
        &ctx.accounts.vault,
        &ctx.accounts.airdrop_reserve,
    ) {
        (Some(mint), Some(vault), Some(reserve)) => Some((mint.supply, vault.amount, reserve.amount)),
        _ => None,
    };

    let mut positions = Vec::with_capacity(ctx.remaining_accounts.len());
    for info in ctx.remaining_accounts.iter() {
        require_keys_eq!(*info.owner, crate::ID, VestingError::InvalidPubkey);
        let data = info.try_borrow_data()?;
        let mut bytes: &[u8] = &data;
        positions.push((info.key(), Position::try_deserialize(&mut bytes)?));
    }

    let now = Clock::get()?.unix_timestamp;
    let vve_cvg = vve_cvg_of(config, &address, &positions, balances, now)?;
    msg!("vveCVG of {}: {}", address, vve_cvg);
    Ok(vve_cvg)
}

/// `balances` is `(cvg supply, vault balance, airdrop reserve balance)`.
fn vve_cvg_of(
    config: &VestingConfig,
    address: &Pubkey,
    positions: &[(Pubkey, Position)],
    balances: Option<(u64, u64, u64)>,
    now: i64,
) -> Result<u64> {
    if config.state != VestingState::Open {
        return Ok(0);
    }
    let (supply, vault_balance, airdrop_balance) =
        balances.ok_or(VestingError::InvalidTokenAccount)?;
    let seed_entitlement = seed_entitlement(address, positions)?;
    let emissions = voting_power::total_emissions(supply, vault_balance, airdrop_balance);
    config.vve_cvg(address, seed_entitlement, emissions, now)
}

/// Sums the PRESEED_SEED entitlement owned by `address`. Other positions are ignored.
fn seed_entitlement(address: &Pubkey, positions: &[(Pubkey, Position)]) -> Result<u64> {
    let mut seen: Vec<Pubkey> = Vec::with_capacity(positions.len());
    let mut total = 0u64;
    for (key, position) in positions {
        require!(!seen.contains(key), VestingError::DuplicatePosition);
        seen.push(*key);
        if position.owner != *address || position.cohort != Cohort::PreseedSeed {
            continue;
        }
        total = total
            .checked_add(position.cvg_amount)
            .ok_or(VestingError::MathOverflow)?;
    }
    Ok(total)
}

#[derive(Accounts)]
pub struct CalculateVveCvg<'info> {
    #[account(seeds = [VESTING_CONFIG_SEED], bump = vesting_config.bump)]
    pub vesting_config: Account<'info, VestingConfig>,

    /// The three token accounts exist only after `set_cvg`.
    #[account(address = vesting_config.cvg_mint @ VestingError::InvalidTokenMint)]
    pub cvg_mint: Option<Account<'info, Mint>>,

    #[account(address = vesting_config.vault @ VestingError::InvalidTokenAccount)]
    pub vault: Option<Account<'info, TokenAccount>>,

    #[account(address = vesting_config.airdrop_reserve @ VestingError::InvalidTokenAccount)]
    pub airdrop_reserve: Option<Account<'info, TokenAccount>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CVG_UNIT;
    use crate::test_utils::{self, assert_vesting_err, finished_round, key, vesting_config};

    const NOW: i64 = 1_700_000_000;

    fn position(owner: Pubkey, cohort: Cohort, cvg_amount: u64) -> Position {
        test_utils::position(0, owner, cohort, cvg_amount)
    }

    fn set_config() -> VestingConfig {
        let mut c = vesting_config(false);
        let r = [
            finished_round(Cohort::PreseedSeed, 2_000 * CVG_UNIT),
            finished_round(Cohort::Wl, 0),
            finished_round(Cohort::Ibo, 0),
        ];
        c.set_vesting([&r[0], &r[1], &r[2]], u64::MAX).unwrap();
        c
    }

    #[test]
    fn zero_before_open_without_token_accounts() {
        let positions = vec![(key(100), position(key(10), Cohort::PreseedSeed, 500))];
        let fresh = vesting_config(false);
        assert_eq!(vve_cvg_of(&fresh, &key(10), &positions, None, NOW).unwrap(), 0);
        let set = set_config();
        assert_eq!(vve_cvg_of(&set, &key(3), &positions, None, NOW).unwrap(), 0);
    }

    #[test]
    fn open_requires_token_balances() {
        let mut c = set_config();
        c.open(NOW).unwrap();
        assert_vesting_err(
            vve_cvg_of(&c, &key(10), &[], None, NOW),
            VestingError::InvalidTokenAccount,
        );

        let positions = vec![(key(100), position(key(10), Cohort::PreseedSeed, 2_000 * CVG_UNIT))];
        let balances = Some((40_000_000 * CVG_UNIT, 30_000_000 * CVG_UNIT, 5_000_000 * CVG_UNIT));
        let expected = voting_power::vve_cvg(5_000_000 * CVG_UNIT, 2_000 * CVG_UNIT).unwrap();
        assert_eq!(
            vve_cvg_of(&c, &key(10), &positions, balances, NOW).unwrap(),
            expected
        );
    }

    #[test]
    fn sums_only_owned_seed_positions() {
        let positions = vec![
            (key(100), position(key(10), Cohort::PreseedSeed, 500)),
            (key(101), position(key(10), Cohort::PreseedSeed, 250)),
            (key(102), position(key(10), Cohort::Wl, 1_000)),
            (key(103), position(key(11), Cohort::PreseedSeed, 4_000)),
        ];
        assert_eq!(seed_entitlement(&key(10), &positions).unwrap(), 750);
        assert_eq!(seed_entitlement(&key(12), &positions).unwrap(), 0);
    }

    #[test]
    fn duplicate_accounts_rejected() {
        let positions = vec![
            (key(100), position(key(10), Cohort::PreseedSeed, 500)),
            (key(100), position(key(10), Cohort::PreseedSeed, 500)),
        ];
        assert_vesting_err(
            seed_entitlement(&key(10), &positions),
            VestingError::DuplicatePosition,
        );
    }
}
