//! Instruction handlers for bootstrap launches
//!
//! - `initialize` - Create a launch, its claim mint and vault
//! - `admin` - Owner settings: goals, fee, lock, pause
//! - `trade` - Add principal / remove claim units
//! - `views` - Read-only queries
//! - `spl` - Token program adapters used by the handlers

pub mod admin;
pub mod initialize;
pub mod spl;
pub mod trade;
pub mod views;

pub use admin::*;
pub use initialize::*;
pub use trade::*;
pub use views::*;
