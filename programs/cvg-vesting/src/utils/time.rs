//! Elapsed-time helpers over the shared vesting clock.
//!
//! Every computation reads `now` once per instruction; helpers here never
//! touch the `Clock` sysvar so they stay testable off-chain.

use crate::error::VestingError;

/// Seconds elapsed since `start_ts`, saturating at zero before the start.
pub fn elapsed_since(now_ts: i64, start_ts: i64) -> Result<u64, VestingError> {
    if start_ts < 0 {
        return Err(VestingError::InvalidTimestamp);
    }
    if now_ts <= start_ts {
        return Ok(0);
    }
    let diff = now_ts
        .checked_sub(start_ts)
        .ok_or(VestingError::MathOverflow)?;
    u64::try_from(diff).map_err(|_| VestingError::MathOverflow)
}

/// True while `now` lies in `[start_ts, start_ts + window)`.
pub fn within_window(now_ts: i64, start_ts: i64, window: i64) -> Result<bool, VestingError> {
    if now_ts < start_ts {
        return Ok(false);
    }
    let end = start_ts
        .checked_add(window)
        .ok_or(VestingError::MathOverflow)?;
    Ok(now_ts < end)
}
