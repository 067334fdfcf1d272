use anchor_lang::prelude::*;

use crate::constants::{
    DAO_SCHEDULE, IBO_SCHEDULE, MAX_SUPPLY_DAO, MAX_SUPPLY_TEAM, PRESEED_SEED_SCHEDULE,
    TEAM_SCHEDULE, WL_SCHEDULE,
};
use crate::error::VestingError;
use crate::state::{Position, RoundState, SaleRound};
use crate::utils::release::{self, CliffCurve};
use crate::utils::{time, voting_power};

/// Investor cohort. The discriminant doubles as the schedule index and, for
/// sale cohorts, as the round PDA seed byte.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cohort {
    PreseedSeed,
    Wl,
    Ibo,
    Team,
    Dao,
}

impl Cohort {
    pub const COUNT: usize = 5;
    pub const SALES: [Cohort; 3] = [Cohort::PreseedSeed, Cohort::Wl, Cohort::Ibo];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_sale(self) -> bool {
        matches!(self, Cohort::PreseedSeed | Cohort::Wl | Cohort::Ibo)
    }
}

/// Global vesting lifecycle.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum VestingState {
    NotSet,
    Set,
    Open,
}

/// Per-cohort schedule. Times are seconds relative to the shared start.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VestingSchedule {
    /// Fixed at `set_vesting`.
    pub total_amount: u64,
    /// Sum of `amount_released` over the cohort's positions.
    pub total_released: u64,
    pub before_cliff: i64,
    pub after_cliff: i64,
    /// Parts per thousand unlocked at the cliff.
    pub drop_cliff_per_mille: u16,
    /// Whether the cohort's locked entitlement carries vveCVG weight.
    pub counts_voting_power: bool,
}

impl VestingSchedule {
    pub const SIZE: usize = 8 + 8 + 8 + 8 + 2 + 1;

    fn from_defaults(schedule: (i64, i64, u16), counts_voting_power: bool) -> Self {
        Self {
            total_amount: 0,
            total_released: 0,
            before_cliff: schedule.0,
            after_cliff: schedule.1,
            drop_cliff_per_mille: schedule.2,
            counts_voting_power,
        }
    }

    pub fn curve(&self) -> CliffCurve {
        CliffCurve {
            before_cliff: self.before_cliff.max(0) as u64,
            after_cliff: self.after_cliff.max(0) as u64,
            drop_cliff_per_mille: self.drop_cliff_per_mille,
        }
    }
}

/// Claim right of the team or dao address, bound at `set_vesting`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VirtualPosition {
    pub cvg_amount: u64,
    pub amount_released: u64,
}

impl VirtualPosition {
    pub const SIZE: usize = 8 + 8;
}

/// Singleton PDA holding the vesting engine's configuration and schedules.
#[account]
pub struct VestingConfig {
    /// Owner authority.
    pub admin: Pubkey,
    /// Receives swept payment assets.
    pub treasury: Pubkey,
    /// CVG mint; default until `set_cvg`.
    pub cvg_mint: Pubkey,
    /// CVG vault owned by this PDA.
    pub vault: Pubkey,
    /// CVG token account excluded from emissions.
    pub airdrop_reserve: Pubkey,
    /// Whitelisted team address.
    pub team: Pubkey,
    /// Whitelisted dao address.
    pub dao: Pubkey,
    pub state: VestingState,
    /// Shared start, written once on `open_vesting`.
    pub start_ts: i64,
    pub schedules: [VestingSchedule; Cohort::COUNT],
    pub team_position: VirtualPosition,
    pub dao_position: VirtualPosition,
    /// Next free `Position` id.
    pub next_position_id: u64,
    pub bump: u8,
}

impl VestingConfig {
    pub const SIZE: usize =
        32 * 7 + // admin, treasury, cvg_mint, vault, airdrop_reserve, team, dao
        1 +      // state
        8 +      // start_ts
        VestingSchedule::SIZE * Cohort::COUNT +
        VirtualPosition::SIZE * 2 +
        8 +      // next_position_id
        1;       // bump

    pub fn init(
        &mut self,
        admin: Pubkey,
        treasury: Pubkey,
        team: Pubkey,
        dao: Pubkey,
        dao_counts_voting_power: bool,
        bump: u8,
    ) {
        self.admin = admin;
        self.treasury = treasury;
        self.cvg_mint = Pubkey::default();
        self.vault = Pubkey::default();
        self.airdrop_reserve = Pubkey::default();
        self.team = team;
        self.dao = dao;
        self.state = VestingState::NotSet;
        self.start_ts = 0;
        self.schedules = [
            VestingSchedule::from_defaults(PRESEED_SEED_SCHEDULE, true),
            VestingSchedule::from_defaults(WL_SCHEDULE, false),
            VestingSchedule::from_defaults(IBO_SCHEDULE, false),
            VestingSchedule::from_defaults(TEAM_SCHEDULE, true),
            VestingSchedule::from_defaults(DAO_SCHEDULE, dao_counts_voting_power),
        ];
        self.team_position = VirtualPosition::default();
        self.dao_position = VirtualPosition::default();
        self.next_position_id = 0;
        self.bump = bump;
    }

    pub fn require_admin(&self, key: &Pubkey) -> Result<()> {
        require_keys_eq!(*key, self.admin, VestingError::Unauthorized);
        Ok(())
    }

    pub fn is_admin_or_treasury(&self, key: &Pubkey) -> bool {
        *key == self.admin || *key == self.treasury
    }

    pub fn schedule(&self, cohort: Cohort) -> &VestingSchedule {
        &self.schedules[cohort.index()]
    }

    /// Seconds since the shared start; zero until vesting opens.
    pub fn elapsed(&self, now: i64) -> Result<u64> {
        if self.state != VestingState::Open {
            return Ok(0);
        }
        Ok(time::elapsed_since(now, self.start_ts)?)
    }

    pub fn take_position_id(&mut self) -> Result<u64> {
        let id = self.next_position_id;
        self.next_position_id = id.checked_add(1).ok_or(VestingError::MathOverflow)?;
        Ok(id)
    }

    /// `NotSet -> Set`: sizes every schedule from the finished rounds.
    ///
    /// `rounds` must be the PRESEED_SEED, WL and IBO rounds.
    pub fn set_vesting(&mut self, rounds: [&SaleRound; 3], vault_balance: u64) -> Result<[u64; Cohort::COUNT]> {
        require!(
            self.state == VestingState::NotSet,
            VestingError::VestingAlreadySet
        );
        for (round, cohort) in rounds.iter().zip(Cohort::SALES) {
            require!(round.cohort == cohort, VestingError::InvalidCohort);
            require!(
                round.state == RoundState::Finished,
                VestingError::PresaleRoundNotFinished
            );
        }
        require!(
            self.cvg_mint != Pubkey::default(),
            VestingError::CvgZero
        );

        let totals = [
            rounds[0].total_cvg(),
            rounds[1].total_cvg(),
            rounds[2].total_cvg_due(),
            MAX_SUPPLY_TEAM,
            MAX_SUPPLY_DAO,
        ];
        let sum = totals
            .iter()
            .try_fold(0u128, |acc, t| acc.checked_add(*t as u128))
            .ok_or(VestingError::MathOverflow)?;
        require!(
            vault_balance as u128 >= sum,
            VestingError::NotEnoughCvg
        );

        for (schedule, total) in self.schedules.iter_mut().zip(totals) {
            schedule.total_amount = total;
            schedule.total_released = 0;
        }
        self.team_position = VirtualPosition {
            cvg_amount: MAX_SUPPLY_TEAM,
            amount_released: 0,
        };
        self.dao_position = VirtualPosition {
            cvg_amount: MAX_SUPPLY_DAO,
            amount_released: 0,
        };
        self.state = VestingState::Set;
        Ok(totals)
    }

    /// `Set -> Open`: records the shared start.
    pub fn open(&mut self, now: i64) -> Result<()> {
        require!(
            self.state != VestingState::Open,
            VestingError::VestingAlreadyOpened
        );
        require!(self.state == VestingState::Set, VestingError::VestingNotSet);
        require!(now >= 0, VestingError::InvalidTimestamp);
        self.start_ts = now;
        self.state = VestingState::Open;
        Ok(())
    }

    /// Total unlocked for `position` at `now`; zero until vesting opens.
    pub fn releasable_for(&self, position: &Position, now: i64) -> Result<u64> {
        if self.state != VestingState::Open {
            return Ok(0);
        }
        let curve = self.schedule(position.cohort).curve();
        Ok(release::releasable_total(curve, position.cvg_amount, self.elapsed(now)?)?)
    }

    /// Amount still due to `position` at `now`, without mutating anything.
    pub fn due_for(&self, position: &Position, now: i64) -> Result<u64> {
        Ok(self
            .releasable_for(position, now)?
            .saturating_sub(position.amount_released))
    }

    /// Books the due amount of `position` and returns it; the caller transfers.
    pub fn release_position(&mut self, position: &mut Position, caller: &Pubkey, now: i64) -> Result<u64> {
        require_keys_eq!(position.owner, *caller, VestingError::NotOwned);
        require!(
            self.state == VestingState::Open,
            VestingError::VestingNotOpen
        );
        require!(position.cohort.is_sale(), VestingError::InvalidCohort);

        let due = self.due_for(position, now)?;
        require!(due > 0, VestingError::NotReleasable);

        let released = position
            .amount_released
            .checked_add(due)
            .ok_or(VestingError::MathOverflow)?;
        require!(released <= position.cvg_amount, VestingError::MathOverflow);

        let schedule = &mut self.schedules[position.cohort.index()];
        schedule.total_released = schedule
            .total_released
            .checked_add(due)
            .ok_or(VestingError::MathOverflow)?;
        position.amount_released = released;
        Ok(due)
    }

    /// Books the due amount of the team (`is_team`) or dao virtual position.
    pub fn release_team_or_dao(&mut self, is_team: bool, caller: &Pubkey, now: i64) -> Result<u64> {
        if is_team {
            require_keys_eq!(*caller, self.team, VestingError::NotTeam);
        } else {
            require_keys_eq!(*caller, self.dao, VestingError::NotDao);
        }
        require!(
            self.state == VestingState::Open,
            VestingError::VestingNotOpen
        );

        let cohort = if is_team { Cohort::Team } else { Cohort::Dao };
        let elapsed = self.elapsed(now)?;
        let curve = self.schedule(cohort).curve();
        let virtual_position = if is_team {
            &mut self.team_position
        } else {
            &mut self.dao_position
        };

        let due = release::due_amount(
            curve,
            virtual_position.cvg_amount,
            virtual_position.amount_released,
            elapsed,
        )?;
        require!(due > 0, VestingError::NotReleasable);
        virtual_position.amount_released = virtual_position
            .amount_released
            .checked_add(due)
            .ok_or(VestingError::MathOverflow)?;

        let schedule = &mut self.schedules[cohort.index()];
        schedule.total_released = schedule
            .total_released
            .checked_add(due)
            .ok_or(VestingError::MathOverflow)?;
        Ok(due)
    }

    /// Locked voting power of `address`.
    ///
    /// `seed_entitlement` is the summed `cvg_amount` of the PRESEED_SEED
    /// positions owned by `address`.
    pub fn vve_cvg(
        &self,
        address: &Pubkey,
        seed_entitlement: u64,
        total_emissions: u64,
        now: i64,
    ) -> Result<u64> {
        if self.state != VestingState::Open {
            return Ok(0);
        }
        let elapsed = self.elapsed(now)?;

        let mut bound: Vec<(Cohort, u64)> = vec![(Cohort::PreseedSeed, seed_entitlement)];
        if *address == self.team {
            bound.push((Cohort::Team, self.team_position.cvg_amount));
        }
        if *address == self.dao {
            bound.push((Cohort::Dao, self.dao_position.cvg_amount));
        }

        let mut entitlement = 0u64;
        for (cohort, amount) in bound {
            let schedule = self.schedule(cohort);
            if !schedule.counts_voting_power {
                continue;
            }
            let locked = voting_power::locked_entitlement(amount, elapsed, schedule.curve().before_cliff);
            entitlement = entitlement
                .checked_add(locked)
                .ok_or(VestingError::MathOverflow)?;
        }
        Ok(voting_power::vve_cvg(total_emissions, entitlement)?)
    }
}
