//! Cliff-then-linear release math.
//!
//! - before the cliff nothing is releasable
//! - at the cliff `drop_cliff_per_mille` of the entitlement unlocks at once
//! - the remainder unlocks linearly over `after_cliff` seconds
//! - from `before_cliff + after_cliff` on the full entitlement is releasable,
//!   so incremental claims always reconcile exactly at maturity
//!
//! All divisions floor, which biases every intermediate claim toward
//! under-release.

use crate::constants::PER_MILLE;
use crate::error::VestingError;

/// Timing parameters shared by every position of one cohort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CliffCurve {
    pub before_cliff: u64,
    pub after_cliff: u64,
    pub drop_cliff_per_mille: u16,
}

/// Total amount unlocked for `cvg_amount` after `elapsed` seconds.
pub fn releasable_total(
    curve: CliffCurve,
    cvg_amount: u64,
    elapsed: u64,
) -> Result<u64, VestingError> {
    if u64::from(curve.drop_cliff_per_mille) > PER_MILLE {
        return Err(VestingError::InvalidConfig);
    }
    if elapsed < curve.before_cliff {
        return Ok(0);
    }
    let cliff_end = curve
        .before_cliff
        .checked_add(curve.after_cliff)
        .ok_or(VestingError::MathOverflow)?;
    if elapsed >= cliff_end {
        return Ok(cvg_amount);
    }

    let cliff_amount = (cvg_amount as u128)
        .checked_mul(curve.drop_cliff_per_mille as u128)
        .ok_or(VestingError::MathOverflow)?
        / PER_MILLE as u128;
    // after_cliff > 0 here: elapsed >= before_cliff and elapsed < cliff_end.
    let linear = (cvg_amount as u128 - cliff_amount)
        .checked_mul((elapsed - curve.before_cliff) as u128)
        .ok_or(VestingError::MathOverflow)?
        / curve.after_cliff as u128;
    let total = cliff_amount
        .checked_add(linear)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(total.min(cvg_amount as u128)).map_err(|_| VestingError::MathOverflow)
}

/// Amount still due to a position that already received `amount_released`.
pub fn due_amount(
    curve: CliffCurve,
    cvg_amount: u64,
    amount_released: u64,
    elapsed: u64,
) -> Result<u64, VestingError> {
    let total = releasable_total(curve, cvg_amount, elapsed)?;
    Ok(total.saturating_sub(amount_released))
}
