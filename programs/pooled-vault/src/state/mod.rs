pub mod auth;
pub mod batch_burn;
pub mod depositor;
pub mod strategy;
pub mod vault;

pub use auth::*;
pub use batch_burn::*;
pub use depositor::*;
pub use strategy::*;
pub use vault::*;
