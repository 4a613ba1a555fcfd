//! # Curve Quotes
//!
//! Pure functions over a [`VirtualPair`]; nothing here mutates state, so
//! calling them any number of times with the same inputs yields the same
//! answer.
//!
//! ```text
//! add:     new_x = x + input
//!          new_y = ⌊K / (new_x + α)⌋ − β
//!          out   = y − new_y
//!
//! remove:  new_y = y + bonding
//!          new_x = ⌈K / (new_y + β)⌉ − α
//!          out   = x − new_x
//! ```
//!
//! Both directions round against the trader: the add leg truncates the claim
//! leg it leaves behind, the remove leg rounds the principal leg it leaves
//! behind up. Each quote carries the divisor it used so the caller can
//! widen the pair's rounding bound when it settles.

use anchor_lang::prelude::*;

use super::units::{div_ceil, div_floor, Claim, Principal, U256};
use super::virtual_pair::VirtualPair;
use crate::error::CurveError;

/// A curve quote and the divisor that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveQuote<T> {
    pub amount: T,
    pub divisor: U256,
}

impl<T: Default> CurveQuote<T> {
    fn nothing() -> Self {
        Self { amount: T::default(), divisor: U256::zero() }
    }
}

/// Claim units issued for depositing `input` principal.
pub fn quote_add(pair: &VirtualPair, input: Principal) -> Result<CurveQuote<Claim>> {
    if input.is_zero() {
        return Ok(CurveQuote::nothing());
    }
    require!(pair.is_configured(), CurveError::GoalsNotSet);

    let new_x = pair
        .x
        .checked_add(input.0)
        .ok_or(CurveError::MathOverflow)?;
    require!(new_x <= pair.funding_goal, CurveError::FundingGoalExceeded);

    let divisor = U256::from(new_x) + U256::from(pair.alpha);
    let new_y = div_floor(pair.k(), divisor)?.saturating_sub(U256::from(pair.beta));
    let out = U256::from(pair.y).saturating_sub(new_y);

    Ok(CurveQuote { amount: Claim::narrow(out)?, divisor })
}

/// Principal released for returning `bonding` claim units to the curve.
pub fn quote_remove(pair: &VirtualPair, bonding: Claim) -> Result<CurveQuote<Principal>> {
    if bonding.is_zero() {
        return Ok(CurveQuote::nothing());
    }
    require!(pair.is_configured(), CurveError::GoalsNotSet);
    if pair.x == 0 {
        // Zero seed: nothing has been deposited, so nothing can come out.
        return Ok(CurveQuote::nothing());
    }

    let new_y = U256::from(pair.y) + bonding.widen();
    let divisor = new_y + U256::from(pair.beta);
    let new_x = div_ceil(pair.k(), divisor)?.saturating_sub(U256::from(pair.alpha));
    let out = U256::from(pair.x).saturating_sub(new_x);

    Ok(CurveQuote { amount: Principal::narrow(out)?, divisor })
}
