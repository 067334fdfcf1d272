//! Locked voting power (vveCVG).
//!
//! Weight is granted only to entitlements that are still wholly locked: a
//! cohort contributes in full before its cliff and nothing from the cliff on.

use crate::constants::{PRECISION, SHARE_VVECVG, TOTAL_VESTING_SUPPLY_SEED_TEAM};
use crate::error::VestingError;

/// CVG in circulation outside the vesting vault and the airdrop reserve.
pub fn total_emissions(
    circulating_supply: u64,
    vesting_balance: u64,
    airdrop_balance: u64,
) -> u64 {
    circulating_supply
        .saturating_sub(vesting_balance)
        .saturating_sub(airdrop_balance)
}

/// Entitlement of one cohort, counted only while `elapsed < before_cliff`.
pub fn locked_entitlement(amount: u64, elapsed: u64, before_cliff: u64) -> u64 {
    if elapsed >= before_cliff {
        0
    } else {
        amount
    }
}

/// `SHARE_VVECVG * emissions * entitlement / (TOTAL_VESTING_SUPPLY_SEED_TEAM * PRECISION)`
pub fn vve_cvg(total_emissions: u64, entitlement: u64) -> Result<u64, VestingError> {
    let numerator = SHARE_VVECVG
        .checked_mul(total_emissions as u128)
        .and_then(|v| v.checked_mul(entitlement as u128))
        .ok_or(VestingError::MathOverflow)?;
    let denominator = (TOTAL_VESTING_SUPPLY_SEED_TEAM as u128) * PRECISION;
    u64::try_from(numerator / denominator).map_err(|_| VestingError::MathOverflow)
}
