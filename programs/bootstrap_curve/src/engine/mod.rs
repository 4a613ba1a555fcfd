//! # Settlement
//!
//! Wires the curve math in `amm` to a [`Launch`](crate::state::Launch) and
//! its token and vault collaborators.
//!
//! - [`collaborators`]: what the engine needs from the claim token and the vault
//! - [`guard`]: scoped reentrancy flag with rollback on error
//! - [`settlement`]: `add`, `remove` and the read-only query surface

pub mod collaborators;
pub mod guard;
#[cfg(test)]
pub mod mock;
pub mod settlement;

pub use collaborators::*;
pub use guard::*;
pub use settlement::*;
