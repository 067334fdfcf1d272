use anchor_lang::prelude::*;

use crate::constants::{IBO_WHITELIST_MARKER, MAX_PAYMENT_ASSETS, TIER_COUNT};
use crate::error::VestingError;
use crate::state::{Cohort, Position};
use crate::utils::merkle::{self, Hash32};
use crate::utils::time;

/// Sale round lifecycle; transitions only move forward.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundState {
    NotStarted,
    Active,
    Finished,
}

/// How a round decides who may buy and at what price.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eligibility {
    /// Merkle-gated tiers, flat conversion rate.
    MerkleFixedRate,
    /// Open bonds priced by a time-based curve.
    BondingCurve,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TierConfig {
    pub merkle_root: Hash32,
    pub min_stable: u64,
    pub max_stable: u64,
    /// Bit `i` set when `payment_mints[i]` is accepted.
    pub accepted_assets: u8,
}

impl TierConfig {
    pub const SIZE: usize = 32 + 8 + 8 + 1;

    pub fn accepts(&self, asset_index: usize) -> bool {
        asset_index < 8 && self.accepted_assets & (1u8 << asset_index) != 0
    }
}

/// One sale round per sale cohort (PRESEED_SEED, WL, IBO).
#[account]
pub struct SaleRound {
    pub cohort: Cohort,
    pub eligibility: Eligibility,
    pub state: RoundState,
    /// `cvg = stable * rate_numerator / rate_denominator` (fixed-rate rounds).
    pub rate_numerator: u64,
    pub rate_denominator: u64,
    /// Cap on `total_cvg`; zero means uncapped.
    pub max_supply: u64,
    pub tiers: [TierConfig; TIER_COUNT],
    pub payment_mints: [Pubkey; MAX_PAYMENT_ASSETS],
    pub payment_asset_count: u8,
    /// Sum of `cvg_amount` minted through this round.
    pub total_cvg: u64,
    /// Sum of payment units received.
    pub total_stable: u64,
    pub position_count: u64,
    /// IBO deposits open at `start_ts`.
    pub start_ts: i64,
    /// IBO whitelist window: proofs required during `[start_ts, start_ts + whitelist_duration)`.
    pub whitelist_root: Hash32,
    pub whitelist_duration: i64,
    pub bond_count: u64,
    pub bump: u8,
}

impl SaleRound {
    pub const SIZE: usize =
        1 + 1 + 1 +                       // cohort, eligibility, state
        8 + 8 +                           // rate
        8 +                               // max_supply
        TierConfig::SIZE * TIER_COUNT +
        32 * MAX_PAYMENT_ASSETS + 1 +     // payment mints + count
        8 + 8 +                           // total_cvg, total_stable
        8 +                               // position_count
        8 + 32 + 8 +                      // start_ts, whitelist_root, whitelist_duration
        8 +                               // bond_count
        1;                                // bump

    pub fn new(
        cohort: Cohort,
        eligibility: Eligibility,
        rate_numerator: u64,
        rate_denominator: u64,
        max_supply: u64,
        bump: u8,
    ) -> Self {
        Self {
            cohort,
            eligibility,
            state: RoundState::NotStarted,
            rate_numerator,
            rate_denominator,
            max_supply,
            tiers: [TierConfig::default(); TIER_COUNT],
            payment_mints: [Pubkey::default(); MAX_PAYMENT_ASSETS],
            payment_asset_count: 0,
            total_cvg: 0,
            total_stable: 0,
            position_count: 0,
            start_ts: 0,
            whitelist_root: [0u8; 32],
            whitelist_duration: 0,
            bond_count: 0,
            bump,
        }
    }

    pub fn signer_seed_cohort(&self) -> [u8; 1] {
        [self.cohort as u8]
    }

    /// Entitlement minted by a fixed-rate round; feeds `set_vesting`.
    pub fn total_cvg(&self) -> u64 {
        self.total_cvg
    }

    /// Entitlement owed by all bonds of the IBO round; feeds `set_vesting`.
    pub fn total_cvg_due(&self) -> u64 {
        self.total_cvg
    }

    pub fn require_active(&self) -> Result<()> {
        match self.state {
            RoundState::NotStarted => err!(VestingError::PresaleNotStarted),
            RoundState::Finished => err!(VestingError::PresaleRoundFinished),
            RoundState::Active => Ok(()),
        }
    }

    pub fn transition(&mut self, next: RoundState) -> Result<()> {
        let allowed = matches!(
            (self.state, next),
            (RoundState::NotStarted, RoundState::Active) | (RoundState::Active, RoundState::Finished)
        );
        require!(allowed, VestingError::InvalidStateTransition);
        // Bond rounds start through `set_bond_start`, which records the start time.
        require!(
            !(self.eligibility == Eligibility::BondingCurve && next == RoundState::Active),
            VestingError::InvalidStateTransition
        );
        self.state = next;
        Ok(())
    }

    pub fn tier(&self, tier: u8) -> Result<&TierConfig> {
        self.tiers
            .get(tier as usize)
            .ok_or_else(|| error!(VestingError::InvalidTier))
    }

    pub fn set_tier(&mut self, tier: u8, config: TierConfig) -> Result<()> {
        require!(
            self.eligibility == Eligibility::MerkleFixedRate,
            VestingError::InvalidCohort
        );
        require!(
            self.state != RoundState::Finished,
            VestingError::PresaleRoundFinished
        );
        require!(
            config.min_stable > 0 && config.min_stable <= config.max_stable,
            VestingError::InvalidConfig
        );
        let slot = self
            .tiers
            .get_mut(tier as usize)
            .ok_or(VestingError::InvalidTier)?;
        *slot = config;
        Ok(())
    }

    pub fn register_payment_asset(&mut self, mint: Pubkey) -> Result<usize> {
        require!(mint != Pubkey::default(), VestingError::InvalidPubkey);
        let count = self.payment_asset_count as usize;
        require!(
            !self.payment_mints[..count].contains(&mint),
            VestingError::InvalidPaymentAsset
        );
        require!(count < MAX_PAYMENT_ASSETS, VestingError::PaymentAssetListFull);
        self.payment_mints[count] = mint;
        self.payment_asset_count += 1;
        Ok(count)
    }

    pub fn asset_index(&self, mint: &Pubkey) -> Result<usize> {
        self.payment_mints[..self.payment_asset_count as usize]
            .iter()
            .position(|m| m == mint)
            .ok_or_else(|| error!(VestingError::InvalidPaymentAsset))
    }

    fn require_tier_asset(&self, tier: &TierConfig, mint: &Pubkey) -> Result<()> {
        let index = self.asset_index(mint)?;
        require!(tier.accepts(index), VestingError::InvalidPaymentAsset);
        Ok(())
    }

    /// Flat conversion from payment units to CVG.
    pub fn quote_fixed_rate(&self, stable_amount: u64) -> Result<u64> {
        require!(self.rate_denominator > 0, VestingError::InvalidConfig);
        let cvg = (stable_amount as u128)
            .checked_mul(self.rate_numerator as u128)
            .ok_or(VestingError::MathOverflow)?
            / self.rate_denominator as u128;
        Ok(u64::try_from(cvg).map_err(|_| VestingError::MathOverflow)?)
    }

    /// Adds to the round aggregates, enforcing `max_supply`.
    pub fn record(&mut self, cvg_amount: u64, stable_amount: u64) -> Result<()> {
        let total = self
            .total_cvg
            .checked_add(cvg_amount)
            .ok_or(VestingError::MathOverflow)?;
        require!(
            self.max_supply == 0 || total <= self.max_supply,
            VestingError::RoundSupplyExceeded
        );
        self.total_cvg = total;
        self.total_stable = self
            .total_stable
            .checked_add(stable_amount)
            .ok_or(VestingError::MathOverflow)?;
        Ok(())
    }

    /// Validates a first-time Merkle-gated purchase and books it on the round.
    /// Returns the CVG entitlement of the new position.
    pub fn invest(
        &mut self,
        investor: &Pubkey,
        proof: &[Hash32],
        stable_amount: u64,
        tier: u8,
        payment_mint: &Pubkey,
        already_minted: bool,
    ) -> Result<u64> {
        require!(
            self.eligibility == Eligibility::MerkleFixedRate,
            VestingError::InvalidCohort
        );
        self.require_active()?;
        require!(stable_amount > 0, VestingError::InvalidAmount);

        let config = *self.tier(tier)?;
        require!(
            merkle::verify_wallet(proof, &config.merkle_root, investor, tier as u64),
            VestingError::InvalidProof
        );
        require!(
            stable_amount >= config.min_stable,
            VestingError::InsufficientAmount
        );
        require!(
            stable_amount <= config.max_stable,
            VestingError::TooMuchQWl
        );
        require!(!already_minted, VestingError::AlreadyMinted);
        self.require_tier_asset(&config, payment_mint)?;

        let cvg_amount = self.quote_fixed_rate(stable_amount)?;
        require!(cvg_amount > 0, VestingError::InvalidAmount);
        self.record(cvg_amount, stable_amount)?;
        self.position_count = self
            .position_count
            .checked_add(1)
            .ok_or(VestingError::MathOverflow)?;
        Ok(cvg_amount)
    }

    /// Tops up an existing position within its tier maximum.
    /// Returns the CVG added.
    pub fn refill(
        &mut self,
        position: &mut Position,
        caller: &Pubkey,
        add_amount: u64,
        payment_mint: &Pubkey,
    ) -> Result<u64> {
        require_keys_eq!(position.owner, *caller, VestingError::NotOwned);
        require!(position.cohort == self.cohort, VestingError::InvalidCohort);
        self.require_active()?;
        require!(add_amount > 0, VestingError::InvalidAmount);

        let config = *self.tier(position.tier)?;
        let invested = position
            .stable_invested
            .checked_add(add_amount)
            .ok_or(VestingError::MathOverflow)?;
        require!(invested <= config.max_stable, VestingError::TooMuchQWl);
        self.require_tier_asset(&config, payment_mint)?;

        let cvg_amount = self.quote_fixed_rate(add_amount)?;
        self.record(cvg_amount, add_amount)?;
        position.credit(cvg_amount, add_amount)?;
        Ok(cvg_amount)
    }

    pub fn set_bond_start(&mut self, start_ts: i64, whitelist_root: Hash32, whitelist_duration: i64) -> Result<()> {
        require!(
            self.eligibility == Eligibility::BondingCurve,
            VestingError::InvalidCohort
        );
        require!(start_ts > 0 && whitelist_duration >= 0, VestingError::InvalidTimestamp);
        require!(
            self.state == RoundState::NotStarted,
            VestingError::InvalidStateTransition
        );
        self.start_ts = start_ts;
        self.whitelist_root = whitelist_root;
        self.whitelist_duration = whitelist_duration;
        self.state = RoundState::Active;
        Ok(())
    }

    /// Gate for bond deposits. Returns seconds elapsed since the round start.
    pub fn check_bond_deposit(&self, depositor: &Pubkey, proof: Option<&[Hash32]>, now: i64) -> Result<u64> {
        require!(
            self.eligibility == Eligibility::BondingCurve,
            VestingError::InvalidCohort
        );
        self.require_active()?;
        require!(now >= self.start_ts, VestingError::PresaleNotStarted);

        if time::within_window(now, self.start_ts, self.whitelist_duration)? {
            let proof = proof.ok_or(VestingError::InvalidProof)?;
            require!(
                merkle::verify_wallet(proof, &self.whitelist_root, depositor, IBO_WHITELIST_MARKER),
                VestingError::InvalidProof
            );
        }
        Ok(time::elapsed_since(now, self.start_ts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CVG_UNIT;
    use crate::test_utils::{assert_vesting_err, key};
    use crate::utils::merkle::test_tree;

    const DAI: u8 = 50;
    const FRAX: u8 = 51;

    struct Fixture {
        round: SaleRound,
        proofs: Vec<Vec<Hash32>>,
    }

    /// WL round at 0.33 per CVG: 6-decimal stables to 9-decimal CVG.
    fn wl_fixture() -> Fixture {
        let mut round = SaleRound::new(Cohort::Wl, Eligibility::MerkleFixedRate, 100_000, 33, 0, 0);
        round.register_payment_asset(key(DAI)).unwrap();
        round.register_payment_asset(key(FRAX)).unwrap();

        let entries = [(key(10), 0u64), (key(11), 1), (key(12), 2), (key(13), 0)];
        let (root, proofs) = test_tree::build(&entries);
        let bounds = [(200, 770), (771, 2_000), (2_001, 5_000)];
        for (i, (min, max)) in bounds.iter().enumerate() {
            round
                .set_tier(
                    i as u8,
                    TierConfig {
                        merkle_root: root,
                        min_stable: min * 1_000_000,
                        max_stable: max * 1_000_000,
                        accepted_assets: if i == 2 { 0b01 } else { 0b11 },
                    },
                )
                .unwrap();
        }
        round.transition(RoundState::Active).unwrap();
        Fixture { round, proofs }
    }

    fn position_for(owner: Pubkey, tier: u8, cvg: u64, stable: u64) -> Position {
        Position {
            id: 0,
            owner,
            cohort: Cohort::Wl,
            tier,
            cvg_amount: cvg,
            amount_released: 0,
            stable_invested: stable,
            bump: 0,
        }
    }

    #[test]
    fn state_gates_investment() {
        let mut f = wl_fixture();
        f.round.state = RoundState::NotStarted;
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false),
            VestingError::PresaleNotStarted,
        );
        f.round.state = RoundState::Finished;
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false),
            VestingError::PresaleRoundFinished,
        );
    }

    #[test]
    fn invest_mint_happy_path() {
        let mut f = wl_fixture();
        let cvg = f
            .round
            .invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false)
            .unwrap();
        assert_eq!(cvg, 909_090_909_090);
        assert_eq!(f.round.total_cvg(), cvg);
        assert_eq!(f.round.total_stable, 300_000_000);
        assert_eq!(f.round.position_count, 1);
    }

    #[test]
    fn invest_mint_validation_order() {
        let mut f = wl_fixture();
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 0, 0, &key(DAI), false),
            VestingError::InvalidAmount,
        );
        // Proof for tier S used on tier M.
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 1_000_000_000, 1, &key(DAI), false),
            VestingError::InvalidProof,
        );
        // Someone else's proof.
        assert_vesting_err(
            f.round.invest(&key(99), &f.proofs[0], 300_000_000, 0, &key(DAI), false),
            VestingError::InvalidProof,
        );
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 199_999_999, 0, &key(DAI), false),
            VestingError::InsufficientAmount,
        );
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 770_000_001, 0, &key(DAI), false),
            VestingError::TooMuchQWl,
        );
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), true),
            VestingError::AlreadyMinted,
        );
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(77), false),
            VestingError::InvalidPaymentAsset,
        );
        // Tier L only accepts the first asset.
        assert_vesting_err(
            f.round.invest(&key(12), &f.proofs[2], 3_000_000_000, 2, &key(FRAX), false),
            VestingError::InvalidPaymentAsset,
        );
        assert_vesting_err(
            f.round.invest(&key(10), &f.proofs[0], 300_000_000, 3, &key(DAI), false),
            VestingError::InvalidTier,
        );
        assert_eq!(f.round.total_cvg(), 0);
        assert_eq!(f.round.position_count, 0);
    }

    #[test]
    fn tier_bounds_are_inclusive() {
        let mut f = wl_fixture();
        f.round
            .invest(&key(10), &f.proofs[0], 200_000_000, 0, &key(DAI), false)
            .unwrap();
        f.round
            .invest(&key(13), &f.proofs[3], 770_000_000, 0, &key(FRAX), false)
            .unwrap();
        assert_eq!(f.round.position_count, 2);
    }

    #[test]
    fn refill_up_to_tier_max() {
        let mut f = wl_fixture();
        let cvg = f
            .round
            .invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false)
            .unwrap();
        let mut p = position_for(key(10), 0, cvg, 300_000_000);

        let added = f.round.refill(&mut p, &key(10), 470_000_000, &key(FRAX)).unwrap();
        assert_eq!(p.stable_invested, 770_000_000);
        assert_eq!(p.cvg_amount, cvg + added);
        assert_eq!(f.round.total_cvg(), p.cvg_amount);
    }

    #[test]
    fn refill_over_tier_max_leaves_position_unchanged() {
        let mut f = wl_fixture();
        let cvg = f
            .round
            .invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false)
            .unwrap();
        let mut p = position_for(key(10), 0, cvg, 300_000_000);

        assert_vesting_err(
            f.round.refill(&mut p, &key(10), 470_000_001, &key(DAI)),
            VestingError::TooMuchQWl,
        );
        assert_eq!(p.stable_invested, 300_000_000);
        assert_eq!(p.cvg_amount, cvg);
        assert_eq!(f.round.total_cvg(), cvg);
    }

    #[test]
    fn refill_requires_owner_and_active_round() {
        let mut f = wl_fixture();
        let mut p = position_for(key(10), 0, 0, 300_000_000);
        assert_vesting_err(
            f.round.refill(&mut p, &key(11), 1, &key(DAI)),
            VestingError::NotOwned,
        );
        assert_vesting_err(
            f.round.refill(&mut p, &key(10), 0, &key(DAI)),
            VestingError::InvalidAmount,
        );
        f.round.transition(RoundState::Finished).unwrap();
        assert_vesting_err(
            f.round.refill(&mut p, &key(10), 1_000_000, &key(DAI)),
            VestingError::PresaleRoundFinished,
        );
    }

    #[test]
    fn round_supply_cap() {
        let mut f = wl_fixture();
        f.round.max_supply = 1_000 * CVG_UNIT;
        f.round
            .invest(&key(10), &f.proofs[0], 300_000_000, 0, &key(DAI), false)
            .unwrap();
        assert_vesting_err(
            f.round.invest(&key(13), &f.proofs[3], 300_000_000, 0, &key(DAI), false),
            VestingError::RoundSupplyExceeded,
        );
    }

    #[test]
    fn transitions_only_move_forward() {
        let mut round = SaleRound::new(Cohort::PreseedSeed, Eligibility::MerkleFixedRate, 1, 1, 0, 0);
        assert_vesting_err(round.transition(RoundState::Finished), VestingError::InvalidStateTransition);
        round.transition(RoundState::Active).unwrap();
        assert_vesting_err(round.transition(RoundState::NotStarted), VestingError::InvalidStateTransition);
        round.transition(RoundState::Finished).unwrap();
        assert_vesting_err(round.transition(RoundState::Active), VestingError::InvalidStateTransition);
    }

    #[test]
    fn payment_assets_capped_and_unique() {
        let mut round = SaleRound::new(Cohort::Wl, Eligibility::MerkleFixedRate, 1, 1, 0, 0);
        assert_eq!(round.register_payment_asset(key(DAI)).unwrap(), 0);
        assert_vesting_err(round.register_payment_asset(key(DAI)), VestingError::InvalidPaymentAsset);
        assert_eq!(round.register_payment_asset(key(FRAX)).unwrap(), 1);
        assert_vesting_err(round.register_payment_asset(key(52)), VestingError::PaymentAssetListFull);
    }

    #[test]
    fn bond_gate_and_whitelist_window() {
        let entries = [(key(10), IBO_WHITELIST_MARKER), (key(11), IBO_WHITELIST_MARKER)];
        let (root, proofs) = test_tree::build(&entries);
        let mut round = SaleRound::new(Cohort::Ibo, Eligibility::BondingCurve, 0, 1, 0, 0);
        assert_vesting_err(
            round.check_bond_deposit(&key(10), None, 1_000),
            VestingError::PresaleNotStarted,
        );
        assert_vesting_err(round.transition(RoundState::Active), VestingError::InvalidStateTransition);
        round.set_bond_start(1_000, root, 3_600).unwrap();

        assert_vesting_err(
            round.check_bond_deposit(&key(10), Some(&proofs[0]), 999),
            VestingError::PresaleNotStarted,
        );
        assert_eq!(round.check_bond_deposit(&key(10), Some(&proofs[0]), 1_000).unwrap(), 0);
        assert_vesting_err(
            round.check_bond_deposit(&key(12), None, 1_500),
            VestingError::InvalidProof,
        );
        assert_vesting_err(
            round.check_bond_deposit(&key(12), Some(&proofs[0]), 1_500),
            VestingError::InvalidProof,
        );
        // After the window anyone may deposit.
        assert_eq!(round.check_bond_deposit(&key(12), None, 4_600).unwrap(), 3_600);

        round.transition(RoundState::Finished).unwrap();
        assert_vesting_err(
            round.check_bond_deposit(&key(12), None, 5_000),
            VestingError::PresaleRoundFinished,
        );
    }
}
