pub mod bonding_curve;
pub mod merkle;
pub mod release;
pub mod time;
pub mod voting_power;
