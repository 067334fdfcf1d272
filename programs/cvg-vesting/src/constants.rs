//! Program-wide constants.

/// Seconds per day (UTC).
pub const SECONDS_PER_DAY: i64 = 86_400;

/// CVG mint decimals.
pub const CVG_DECIMALS: u8 = 9;

/// One whole CVG in raw units.
pub const CVG_UNIT: u64 = 1_000_000_000;

/// Denominator of every per-mille ratio (drop at cliff, per-deposit cap).
pub const PER_MILLE: u64 = 1_000;

/// Denominator of bond ROI values.
pub const ROI_PRECISION: u64 = 1_000_000;

/// Fixed-point unit used by the pricing curves.
pub const CURVE_PRECISION: u128 = 1_000_000_000_000;

// Cohort caps.
pub const MAX_SUPPLY_PRESEED_SEED: u64 = 7_500_000 * CVG_UNIT;
pub const MAX_SUPPLY_TEAM: u64 = 12_750_000 * CVG_UNIT;
pub const MAX_SUPPLY_DAO: u64 = 15_000_000 * CVG_UNIT;

// Locked voting power.
pub const SHARE_VVECVG: u128 = 33;
pub const PRECISION: u128 = 100;
pub const TOTAL_VESTING_SUPPLY_SEED_TEAM: u64 = MAX_SUPPLY_PRESEED_SEED + MAX_SUPPLY_TEAM;

// Default schedules: (seconds before cliff, seconds after cliff, drop at cliff per-mille).
pub const PRESEED_SEED_SCHEDULE: (i64, i64, u16) = (120 * SECONDS_PER_DAY, 450 * SECONDS_PER_DAY, 50);
pub const WL_SCHEDULE: (i64, i64, u16) = (0, 90 * SECONDS_PER_DAY, 330);
pub const IBO_SCHEDULE: (i64, i64, u16) = (0, 60 * SECONDS_PER_DAY, 0);
pub const TEAM_SCHEDULE: (i64, i64, u16) = (180 * SECONDS_PER_DAY, 540 * SECONDS_PER_DAY, 50);
pub const DAO_SCHEDULE: (i64, i64, u16) = (0, 540 * SECONDS_PER_DAY, 50);

/// Number of tiers (S, M, L) per Merkle-gated round.
pub const TIER_COUNT: usize = 3;

/// Max payment mints a round accepts.
pub const MAX_PAYMENT_ASSETS: usize = 2;

/// Leaf marker for the IBO whitelist window (tiers use 0..TIER_COUNT).
pub const IBO_WHITELIST_MARKER: u64 = 3;

/// Max Merkle proof depth accepted by instructions.
pub const MAX_PROOF_DEPTH: usize = 24;

// PDA seeds.
pub const VESTING_CONFIG_SEED: &[u8] = b"vesting_config";
pub const VAULT_SEED: &[u8] = b"vault";
pub const ROUND_SEED: &[u8] = b"round";
pub const FUNDS_SEED: &[u8] = b"funds";
pub const POSITION_SEED: &[u8] = b"position";
pub const RECEIPT_SEED: &[u8] = b"receipt";
pub const BOND_SEED: &[u8] = b"bond";
