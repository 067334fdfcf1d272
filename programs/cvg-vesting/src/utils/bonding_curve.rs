//! Time-based bond pricing.
//!
//! The ROI offered by a bond moves from `min_roi` to `max_roi` as time passes,
//! following the curve picked by `composed_function`. The curve maps the time
//! ratio `min(elapsed / gamma, 1)` onto `[0, 1]`; the ROI is floored to a
//! multiple of `scale` and clamped back into `[min_roi, max_roi]`.
//!
//! `price = base_price * (1 - roi)` and `cvg_out = amount_in / price`.

use crate::constants::{CURVE_PRECISION, CVG_UNIT, PER_MILLE, ROI_PRECISION};
use crate::error::VestingError;

/// Shape of a pricing curve over `[0, CURVE_PRECISION]`.
///
/// Implementations must be monotonic non-decreasing with `shape(0) == 0` and
/// `shape(CURVE_PRECISION) == CURVE_PRECISION`.
pub trait RoiCurve: Sync {
    fn shape(&self, ratio: u128) -> u128;
}

pub struct Linear;
pub struct Square;
pub struct SquareRoot;
pub struct Cubic;

impl RoiCurve for Linear {
    fn shape(&self, ratio: u128) -> u128 {
        ratio
    }
}

impl RoiCurve for Square {
    fn shape(&self, ratio: u128) -> u128 {
        ratio * ratio / CURVE_PRECISION
    }
}

impl RoiCurve for SquareRoot {
    fn shape(&self, ratio: u128) -> u128 {
        isqrt(ratio * CURVE_PRECISION)
    }
}

impl RoiCurve for Cubic {
    fn shape(&self, ratio: u128) -> u128 {
        ratio * ratio / CURVE_PRECISION * ratio / CURVE_PRECISION
    }
}

/// Curves indexed by `composed_function`. New shapes are appended here.
static CURVES: [&dyn RoiCurve; 4] = [&Linear, &Square, &SquareRoot, &Cubic];

pub fn curve_for(composed_function: u8) -> Result<&'static dyn RoiCurve, VestingError> {
    CURVES
        .get(composed_function as usize)
        .copied()
        .ok_or(VestingError::InvalidComposedFunction)
}

/// Pricing inputs copied out of a bond account.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BondPricing {
    pub composed_function: u8,
    pub gamma: u64,
    pub scale: u64,
    pub min_roi: u64,
    pub max_roi: u64,
    pub base_price: u64,
}

impl BondPricing {
    pub fn validate(&self) -> Result<(), VestingError> {
        curve_for(self.composed_function)?;
        if self.gamma == 0
            || self.scale == 0
            || self.base_price == 0
            || self.min_roi > self.max_roi
            || self.max_roi >= ROI_PRECISION
        {
            return Err(VestingError::InvalidConfig);
        }
        Ok(())
    }

    /// ROI (parts per `ROI_PRECISION`) after `elapsed` seconds.
    pub fn roi(&self, elapsed: u64) -> Result<u64, VestingError> {
        let curve = curve_for(self.composed_function)?;
        let ratio = ((elapsed as u128) * CURVE_PRECISION / self.gamma as u128).min(CURVE_PRECISION);
        let shaped = curve.shape(ratio).min(CURVE_PRECISION);

        let span = (self.max_roi - self.min_roi) as u128;
        let raw = self.min_roi as u128 + span * shaped / CURVE_PRECISION;
        let stepped = raw - raw % self.scale as u128;
        let roi = stepped.clamp(self.min_roi as u128, self.max_roi as u128);
        u64::try_from(roi).map_err(|_| VestingError::MathOverflow)
    }

    /// Raw payment units per whole CVG after `elapsed` seconds.
    pub fn price(&self, elapsed: u64) -> Result<u64, VestingError> {
        let roi = self.roi(elapsed)?;
        let price = (self.base_price as u128)
            .checked_mul((ROI_PRECISION - roi) as u128)
            .ok_or(VestingError::MathOverflow)?
            / ROI_PRECISION as u128;
        if price == 0 {
            return Err(VestingError::InvalidConfig);
        }
        u64::try_from(price).map_err(|_| VestingError::MathOverflow)
    }

    /// CVG out for `amount_in` payment units after `elapsed` seconds.
    pub fn cvg_out(&self, amount_in: u64, elapsed: u64) -> Result<u64, VestingError> {
        let price = self.price(elapsed)?;
        let out = (amount_in as u128)
            .checked_mul(CVG_UNIT as u128)
            .ok_or(VestingError::MathOverflow)?
            / price as u128;
        u64::try_from(out).map_err(|_| VestingError::MathOverflow)
    }
}

/// Largest amount a single deposit may mint.
pub fn max_per_deposit(max_cvg_to_mint: u64, percentage_max_cvg_to_mint: u16) -> u64 {
    ((max_cvg_to_mint as u128) * percentage_max_cvg_to_mint as u128 / PER_MILLE as u128) as u64
}

/// Integer square root (floor).
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = 1u128 << ((128 - n.leading_zeros()).div_ceil(2));
    loop {
        let y = (x + n / x) / 2;
        if y >= x {
            return x;
        }
        x = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing(composed_function: u8) -> BondPricing {
        BondPricing {
            composed_function,
            gamma: 10 * 86_400,
            scale: 5_000,
            min_roi: 50_000,
            max_roi: 150_000,
            // 0.40 USDC (6 decimals) per CVG.
            base_price: 400_000,
        }
    }

    #[test]
    fn isqrt_floors() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(CURVE_PRECISION * CURVE_PRECISION), CURVE_PRECISION);
        assert_eq!(isqrt(u128::MAX), u64::MAX as u128);
    }

    #[test]
    fn curves_hit_endpoints() {
        for id in 0..4u8 {
            let c = curve_for(id).unwrap();
            assert_eq!(c.shape(0), 0);
            assert_eq!(c.shape(CURVE_PRECISION), CURVE_PRECISION);
        }
        assert!(matches!(
            curve_for(4),
            Err(VestingError::InvalidComposedFunction)
        ));
    }

    #[test]
    fn roi_stays_in_bounds_and_is_monotonic() {
        for id in 0..4u8 {
            let p = pricing(id);
            let mut last = 0;
            for step in 0..40u64 {
                let roi = p.roi(step * 7_200 * 4).unwrap();
                assert!(roi >= p.min_roi && roi <= p.max_roi);
                assert!(roi >= last);
                assert_eq!(roi % p.scale, 0);
                last = roi;
            }
            assert_eq!(p.roi(0).unwrap(), p.min_roi);
            assert_eq!(p.roi(p.gamma).unwrap(), p.max_roi);
            assert_eq!(p.roi(p.gamma * 50).unwrap(), p.max_roi);
        }
    }

    #[test]
    fn same_elapsed_same_price() {
        let p = pricing(2);
        assert_eq!(p.price(123_456).unwrap(), p.price(123_456).unwrap());
    }

    #[test]
    fn linear_midpoint() {
        let p = pricing(0);
        // Halfway: 50_000 + 100_000 / 2.
        assert_eq!(p.roi(p.gamma / 2).unwrap(), 100_000);
        // 400_000 * 0.9
        assert_eq!(p.price(p.gamma / 2).unwrap(), 360_000);
        // 36 USDC buys 100 CVG.
        assert_eq!(p.cvg_out(36_000_000, p.gamma / 2).unwrap(), 100 * CVG_UNIT);
    }

    #[test]
    fn scale_floors_roi_but_not_below_min() {
        let mut p = pricing(0);
        p.min_roi = 52_000;
        p.scale = 10_000;
        assert_eq!(p.roi(0).unwrap(), 52_000);
        // raw 52_000 + 98_000 * 0.25 = 76_500 -> 70_000
        assert_eq!(p.roi(p.gamma / 4).unwrap(), 70_000);
    }

    #[test]
    fn invalid_parameters_rejected() {
        let mut p = pricing(0);
        p.max_roi = ROI_PRECISION;
        assert!(matches!(p.validate(), Err(VestingError::InvalidConfig)));
        let mut p = pricing(0);
        p.gamma = 0;
        assert!(matches!(p.validate(), Err(VestingError::InvalidConfig)));
        let mut p = pricing(0);
        p.min_roi = 200_000;
        assert!(matches!(p.validate(), Err(VestingError::InvalidConfig)));
        assert!(matches!(
            pricing(9).validate(),
            Err(VestingError::InvalidComposedFunction)
        ));
        assert!(pricing(3).validate().is_ok());
    }

    #[test]
    fn per_deposit_cap() {
        assert_eq!(max_per_deposit(1_000_000, 100), 100_000);
        assert_eq!(max_per_deposit(1_000_000, 1_000), 1_000_000);
    }
}
