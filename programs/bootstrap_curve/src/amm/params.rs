//! # Curve Parameter Derivation
//!
//! A launch is configured with two economic goals instead of raw curve
//! parameters: how much principal it should raise (`G`) and the average price
//! buyers should pay over the whole raise (`P`, scaled by 10^18).
//!
//! ## Constraints
//!
//! ```text
//! (x + α)(y + β) = K                    virtual pair, zero seed: x₀ = 0
//! price(x)  = (x + α) / (y + β)         principal per claim unit
//! price(G)  = 1                         terminal price is the reference
//! G / (y₀ − y_G) = P                    realised average over the raise
//! y_G = 0                               claim leg is exhausted at the goal
//! ```
//!
//! ## Closed form
//!
//! ```text
//! α  = G·P / (1 − P)
//! β  = G + α                            so that price(G) = (G+α)/β = 1
//! y₀ = β² / α − β
//! K  = α · (y₀ + β)                     ≈ (G + α)² = G² / (1 − P)²
//! ```
//!
//! The opening price is `α / (y₀ + β) = α² / K = P²`, so the floor on `P`
//! bounds how cheap the first claim units can be.

use anchor_lang::prelude::*;

use super::units::{checked_add, checked_mul, div_floor, narrow_u128, Principal, U256};
use super::units::{MIN_AVERAGE_PRICE, PRICE_SCALE};
use crate::error::CurveError;

/// Output of [`derive`]: everything needed to seed a virtual pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParameters {
    pub alpha: u128,
    pub beta: u128,
    pub y_initial: u128,
    pub k: U256,
}

/// Solve the goal constraints for `(α, β, K)` and the opening claim leg `y₀`.
pub fn derive(funding_goal: Principal, desired_average_price: u128) -> Result<CurveParameters> {
    require!(!funding_goal.is_zero(), CurveError::InvalidFundingGoal);
    require!(
        desired_average_price > MIN_AVERAGE_PRICE && desired_average_price < PRICE_SCALE,
        CurveError::InvalidAveragePrice
    );

    let goal = funding_goal.widen();
    let price = U256::from(desired_average_price);
    let discount = U256::from(PRICE_SCALE - desired_average_price);

    let alpha = div_floor(representable(checked_mul(goal, price))?, discount)?;
    require!(!alpha.is_zero(), CurveError::DegenerateCurve);
    let beta = representable(checked_add(goal, alpha))?;

    let terminal_k = representable(checked_mul(beta, beta))?;
    let y_initial = div_floor(terminal_k, alpha)?.saturating_sub(beta);
    require!(!y_initial.is_zero(), CurveError::DegenerateCurve);

    let k = representable(checked_mul(alpha, representable(checked_add(y_initial, beta))?))?;

    Ok(CurveParameters {
        alpha: representable(narrow_u128(alpha))?,
        beta: representable(narrow_u128(beta))?,
        y_initial: representable(narrow_u128(y_initial))?,
        k,
    })
}

/// Goals whose offsets do not fit the pair's storage are a bad configuration.
fn representable<T>(value: Result<T>) -> Result<T> {
    value.map_err(|_| error!(CurveError::DegenerateCurve))
}
