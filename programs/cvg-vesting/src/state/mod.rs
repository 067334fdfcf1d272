pub mod bond;
pub mod position;
pub mod sale_round;
pub mod vesting_config;

pub use bond::*;
pub use position::*;
pub use sale_round::*;
pub use vesting_config::*;
