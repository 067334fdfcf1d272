use anchor_lang::prelude::*;

use crate::error::VestingError;
use crate::state::{Cohort, RoundState, SaleRound, VestingConfig};

/// One granted allocation. The record is never closed; `owner` is the only
/// field a transfer touches.
#[account]
pub struct Position {
    pub id: u64,
    pub owner: Pubkey,
    pub cohort: Cohort,
    /// Tier index for Merkle-gated rounds, unused for IBO.
    pub tier: u8,
    /// Entitlement, frozen once the round finishes.
    pub cvg_amount: u64,
    /// Cumulative release, never above `cvg_amount`.
    pub amount_released: u64,
    /// Payment units invested (fixed-rate rounds only).
    pub stable_invested: u64,
    pub bump: u8,
}

impl Position {
    pub const SIZE: usize =
        8 +  // id
        32 + // owner
        1 +  // cohort
        1 +  // tier
        8 +  // cvg_amount
        8 +  // amount_released
        8 +  // stable_invested
        1;   // bump

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    pub fn open(&mut self, id: u64, owner: Pubkey, cohort: Cohort, tier: u8, bump: u8) {
        self.id = id;
        self.owner = owner;
        self.cohort = cohort;
        self.tier = tier;
        self.cvg_amount = 0;
        self.amount_released = 0;
        self.stable_invested = 0;
        self.bump = bump;
    }

    pub fn credit(&mut self, cvg_amount: u64, stable_amount: u64) -> Result<()> {
        self.cvg_amount = self
            .cvg_amount
            .checked_add(cvg_amount)
            .ok_or(VestingError::MathOverflow)?;
        self.stable_invested = self
            .stable_invested
            .checked_add(stable_amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    /// Opens a new IBO position at the next free id, or tops up one the
    /// depositor already holds. Returns true when a position was opened.
    pub fn open_or_augment_ibo(
        &mut self,
        config: &mut VestingConfig,
        position_id: u64,
        depositor: Pubkey,
        cvg_amount: u64,
        bump: u8,
    ) -> Result<bool> {
        let opened = if self.is_initialized() {
            require_keys_eq!(self.owner, depositor, VestingError::NotOwned);
            require!(self.cohort == Cohort::Ibo, VestingError::InvalidCohort);
            false
        } else {
            require!(
                position_id == config.next_position_id,
                VestingError::InvalidPositionId
            );
            let id = config.take_position_id()?;
            self.open(id, depositor, Cohort::Ibo, 0, bump);
            true
        };
        self.credit(cvg_amount, 0)?;
        Ok(opened)
    }

    /// Reassigns future claim rights. Past releases stay with the record.
    ///
    /// Only allowed once the position's round is finished, so a holder never
    /// ends up with two positions in a round that still sells.
    pub fn transfer(&mut self, round: &SaleRound, caller: &Pubkey, new_owner: Pubkey) -> Result<()> {
        require_keys_eq!(self.owner, *caller, VestingError::NotOwned);
        require!(round.cohort == self.cohort, VestingError::InvalidCohort);
        require!(
            round.state == RoundState::Finished,
            VestingError::PresaleRoundNotFinished
        );
        require!(new_owner != Pubkey::default(), VestingError::InvalidPubkey);
        self.owner = new_owner;
        Ok(())
    }
}

/// Marks that `investor` already minted in `round`.
#[account]
pub struct MintReceipt {
    pub round: Pubkey,
    pub investor: Pubkey,
    pub position_id: u64,
    pub minted: bool,
    pub bump: u8,
}

impl MintReceipt {
    pub const SIZE: usize = 32 + 32 + 8 + 1 + 1;

    pub fn mark(&mut self, round: Pubkey, investor: Pubkey, position_id: u64, bump: u8) -> Result<()> {
        require!(!self.minted, VestingError::AlreadyMinted);
        self.round = round;
        self.investor = investor;
        self.position_id = position_id;
        self.minted = true;
        self.bump = bump;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CVG_UNIT;
    use crate::test_utils::{assert_vesting_err, finished_round, key, position, vesting_config};

    fn blank() -> Position {
        position(0, Pubkey::default(), Cohort::PreseedSeed, 0)
    }

    #[test]
    fn deposit_opens_at_next_id() {
        let mut config = vesting_config(false);
        config.next_position_id = 7;
        let mut p = blank();
        assert!(p
            .open_or_augment_ibo(&mut config, 7, key(10), 100 * CVG_UNIT, 254)
            .unwrap());
        assert_eq!(p.id, 7);
        assert_eq!(p.owner, key(10));
        assert_eq!(p.cohort, Cohort::Ibo);
        assert_eq!(p.cvg_amount, 100 * CVG_UNIT);
        assert_eq!(p.bump, 254);
        assert_eq!(config.next_position_id, 8);
    }

    #[test]
    fn deposit_rejects_stale_id() {
        let mut config = vesting_config(false);
        config.next_position_id = 7;
        let mut p = blank();
        assert_vesting_err(
            p.open_or_augment_ibo(&mut config, 6, key(10), CVG_UNIT, 0),
            VestingError::InvalidPositionId,
        );
        assert!(!p.is_initialized());
        assert_eq!(config.next_position_id, 7);
    }

    #[test]
    fn deposit_augments_own_ibo_position() {
        let mut config = vesting_config(false);
        let mut p = position(3, key(10), Cohort::Ibo, 100 * CVG_UNIT);
        assert!(!p
            .open_or_augment_ibo(&mut config, 3, key(10), 50 * CVG_UNIT, 0)
            .unwrap());
        assert_eq!(p.id, 3);
        assert_eq!(p.cvg_amount, 150 * CVG_UNIT);
        assert_eq!(config.next_position_id, 0);
    }

    #[test]
    fn deposit_cannot_augment_foreign_or_non_ibo() {
        let mut config = vesting_config(false);
        let mut other = position(3, key(11), Cohort::Ibo, 100 * CVG_UNIT);
        assert_vesting_err(
            other.open_or_augment_ibo(&mut config, 3, key(10), CVG_UNIT, 0),
            VestingError::NotOwned,
        );
        let mut wl = position(4, key(10), Cohort::Wl, 100 * CVG_UNIT);
        assert_vesting_err(
            wl.open_or_augment_ibo(&mut config, 4, key(10), CVG_UNIT, 0),
            VestingError::InvalidCohort,
        );
        assert_eq!(other.cvg_amount, 100 * CVG_UNIT);
        assert_eq!(wl.cvg_amount, 100 * CVG_UNIT);
    }

    #[test]
    fn transfer_waits_for_finished_round() {
        let mut round = finished_round(Cohort::Wl, 0);
        round.state = RoundState::Active;
        let mut p = position(0, key(10), Cohort::Wl, CVG_UNIT);
        assert_vesting_err(
            p.transfer(&round, &key(10), key(12)),
            VestingError::PresaleRoundNotFinished,
        );
        assert_eq!(p.owner, key(10));

        round.state = RoundState::Finished;
        assert_vesting_err(p.transfer(&round, &key(12), key(13)), VestingError::NotOwned);
        let seed = finished_round(Cohort::PreseedSeed, 0);
        assert_vesting_err(p.transfer(&seed, &key(10), key(12)), VestingError::InvalidCohort);
        p.transfer(&round, &key(10), key(12)).unwrap();
        assert_eq!(p.owner, key(12));
    }

    #[test]
    fn receipt_marks_once() {
        let mut r = MintReceipt {
            round: Pubkey::default(),
            investor: Pubkey::default(),
            position_id: 0,
            minted: false,
            bump: 0,
        };
        r.mark(key(1), key(10), 5, 253).unwrap();
        assert!(r.minted);
        assert_eq!(r.position_id, 5);
        assert_vesting_err(r.mark(key(1), key(10), 6, 253), VestingError::AlreadyMinted);
        assert_eq!(r.position_id, 5);
    }
}
