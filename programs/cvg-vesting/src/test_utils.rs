//! Test-only helpers.

use anchor_lang::error::Error;
use anchor_lang::prelude::Pubkey;

use crate::error::VestingError;
use crate::state::{
    Cohort, Eligibility, Position, RoundState, SaleRound, VestingConfig, VestingSchedule,
    VestingState, VirtualPosition,
};

pub fn key(seed: u8) -> Pubkey {
    Pubkey::new_from_array([seed; 32])
}

/// Numeric Anchor error code carried by `err`.
pub fn error_code(err: &Error) -> u32 {
    match err {
        Error::AnchorError(e) => e.error_code_number,
        Error::ProgramError(e) => panic!("unexpected program error: {:?}", e),
    }
}

#[track_caller]
pub fn assert_vesting_err<T: std::fmt::Debug>(res: anchor_lang::Result<T>, expected: VestingError) {
    match res {
        Ok(v) => panic!("expected {:?}, got Ok({:?})", expected, v),
        Err(e) => assert_eq!(error_code(&e), u32::from(expected), "got {:?}", e),
    }
}

/// Config after `initialize` (admin 1, treasury 2, team 3, dao 4) and `set_cvg` (mint 5).
pub fn vesting_config(dao_counts_voting_power: bool) -> VestingConfig {
    let mut c = VestingConfig {
        admin: Pubkey::default(),
        treasury: Pubkey::default(),
        cvg_mint: Pubkey::default(),
        vault: Pubkey::default(),
        airdrop_reserve: Pubkey::default(),
        team: Pubkey::default(),
        dao: Pubkey::default(),
        state: VestingState::NotSet,
        start_ts: 0,
        schedules: [VestingSchedule::default(); Cohort::COUNT],
        team_position: VirtualPosition::default(),
        dao_position: VirtualPosition::default(),
        next_position_id: 0,
        bump: 0,
    };
    c.init(key(1), key(2), key(3), key(4), dao_counts_voting_power, 255);
    c.cvg_mint = key(5);
    c
}

pub fn finished_round(cohort: Cohort, total_cvg: u64) -> SaleRound {
    let eligibility = if cohort == Cohort::Ibo {
        Eligibility::BondingCurve
    } else {
        Eligibility::MerkleFixedRate
    };
    let mut r = SaleRound::new(cohort, eligibility, 1, 1, 0, 0);
    r.total_cvg = total_cvg;
    r.state = RoundState::Finished;
    r
}

pub fn position(id: u64, owner: Pubkey, cohort: Cohort, cvg_amount: u64) -> Position {
    Position {
        id,
        owner,
        cohort,
        tier: 0,
        cvg_amount,
        amount_released: 0,
        stable_invested: 0,
        bump: 0,
    }
}
