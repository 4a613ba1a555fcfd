//! # Bootstrap Curve Math
//!
//! Everything in this module is pure arithmetic over plain structs. It knows
//! nothing about accounts, signers or token programs.
//!
//! ```text
//!   GoalConfig ──derive──▶ (α, β, K, y₀) ──▶ VirtualPair
//!                                              │
//!   add:     input ───────────────────▶ quote_add ──▶ claim out
//!   remove:  claim ──▶ FeeConfig ──▶ quote_remove ──▶ principal out
//!                 ╲
//!                  ╲── supply inflated? ──▶ proportional_share
//! ```
//!
//! - [`params`]: derive curve offsets from a funding goal and average price
//! - [`virtual_pair`]: the `(x + α)(y + β) = K` state and its invariant
//! - [`quote`]: side-effect-free add/remove quotes
//! - [`fee`]: basis-point withdrawal fee
//! - [`supply_guard`]: legitimate-supply tracking and redemption mode
//! - [`hooks`]: optional per-trade adjustments

pub mod fee;
pub mod hooks;
pub mod params;
pub mod quote;
pub mod supply_guard;
pub mod units;
pub mod virtual_pair;

pub use fee::*;
pub use hooks::*;
pub use params::*;
pub use quote::*;
pub use supply_guard::*;
pub use units::*;
pub use virtual_pair::*;
