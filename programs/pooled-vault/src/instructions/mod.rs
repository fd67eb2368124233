pub mod configure;
pub mod deposit;
pub mod deposit_into_strategy;
pub mod enter_batch_burn;
pub mod exec_batch_burn;
pub mod exit_batch_burn;
pub mod harvest;
pub mod initialize;
pub mod manage_auth;
pub mod trust_strategy;
pub mod views;
pub mod withdraw_from_strategy;

pub use configure::*;
pub use deposit::*;
pub use deposit_into_strategy::*;
pub use enter_batch_burn::*;
pub use exec_batch_burn::*;
pub use exit_batch_burn::*;
pub use harvest::*;
pub use initialize::*;
pub use manage_auth::*;
pub use trust_strategy::*;
pub use views::*;
pub use withdraw_from_strategy::*;
