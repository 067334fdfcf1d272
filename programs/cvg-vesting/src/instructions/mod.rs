pub mod initialize;
pub mod set_cvg;
pub mod set_whitelist;
pub mod create_round;
pub mod register_payment_asset;
pub mod set_tier;
pub mod set_round_state;
pub mod invest_mint;
pub mod refill_token;
pub mod withdraw_funds;
pub mod create_bond;
pub mod set_start_timestamp;
pub mod deposit;
pub mod set_vesting;
pub mod open_vesting;
pub mod release;
pub mod emit_vesting_quote;
pub mod transfer_position;
pub mod calculate_vve_cvg;

pub use initialize::*;
pub use set_cvg::*;
pub use set_whitelist::*;
pub use create_round::*;
pub use register_payment_asset::*;
pub use set_tier::*;
pub use set_round_state::*;
pub use invest_mint::*;
pub use refill_token::*;
pub use withdraw_funds::*;
pub use create_bond::*;
pub use set_start_timestamp::*;
pub use deposit::*;
pub use set_vesting::*;
pub use open_vesting::*;
pub use release::*;
pub use emit_vesting_quote::*;
pub use transfer_position::*;
pub use calculate_vve_cvg::*;
