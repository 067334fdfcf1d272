use anchor_lang::prelude::*;

use crate::constants::PER_MILLE;
use crate::error::VestingError;
use crate::utils::bonding_curve::{self, BondPricing};

/// Parameters of one bond sale.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BondParams {
    /// Curve selector, see `bonding_curve::curve_for`.
    pub composed_function: u8,
    /// Accepted payment mint.
    pub payment_mint: Pubkey,
    /// Seconds for the curve to reach `max_roi`.
    pub gamma: u64,
    /// ROI step.
    pub scale: u64,
    pub min_roi: u64,
    pub max_roi: u64,
    /// Per-deposit cap, per-mille of `max_cvg_to_mint`.
    pub percentage_max_cvg_to_mint: u16,
    pub max_cvg_to_mint: u64,
    /// Raw payment units per whole CVG before the ROI discount.
    pub base_price: u64,
}

impl BondParams {
    pub const SIZE: usize = 1 + 32 + 8 + 8 + 8 + 8 + 2 + 8 + 8;

    pub fn pricing(&self) -> BondPricing {
        BondPricing {
            composed_function: self.composed_function,
            gamma: self.gamma,
            scale: self.scale,
            min_roi: self.min_roi,
            max_roi: self.max_roi,
            base_price: self.base_price,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.pricing().validate()?;
        require!(
            self.payment_mint != Pubkey::default(),
            VestingError::InvalidPubkey
        );
        require!(self.max_cvg_to_mint > 0, VestingError::InvalidConfig);
        require!(
            self.percentage_max_cvg_to_mint > 0
                && u64::from(self.percentage_max_cvg_to_mint) <= PER_MILLE,
            VestingError::InvalidConfig
        );
        Ok(())
    }
}

#[account]
pub struct Bond {
    pub round: Pubkey,
    pub bond_id: u64,
    pub params: BondParams,
    /// Cumulative CVG minted through this bond, never above `max_cvg_to_mint`.
    pub total_minted: u64,
    pub bump: u8,
}

impl Bond {
    pub const SIZE: usize = 32 + 8 + BondParams::SIZE + 8 + 1;

    /// Prices `amount_in` at `elapsed` and books it against the bond caps.
    pub fn deposit(&mut self, amount_in: u64, min_amount_out: u64, elapsed: u64) -> Result<u64> {
        require!(amount_in > 0, VestingError::InvalidAmount);
        let cvg_out = self.params.pricing().cvg_out(amount_in, elapsed)?;
        require!(cvg_out > 0, VestingError::InvalidAmount);
        require!(cvg_out >= min_amount_out, VestingError::SlippageExceeded);
        require!(
            cvg_out
                <= bonding_curve::max_per_deposit(
                    self.params.max_cvg_to_mint,
                    self.params.percentage_max_cvg_to_mint
                ),
            VestingError::MaxPerDepositExceeded
        );

        let minted = self
            .total_minted
            .checked_add(cvg_out)
            .ok_or(VestingError::MathOverflow)?;
        require!(
            minted <= self.params.max_cvg_to_mint,
            VestingError::MaxCvgAlreadyMinted
        );
        self.total_minted = minted;
        Ok(cvg_out)
    }
}
