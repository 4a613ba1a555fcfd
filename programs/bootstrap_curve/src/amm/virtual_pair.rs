//! # Virtual Pair
//!
//! The curve is priced by a synthetic two-leg pair that holds no real
//! liquidity:
//!
//! ```text
//!            (x + α) · (y + β) = K
//!
//!   x  virtual principal deposited through the curve (starts at 0)
//!   y  virtual claim units still issuable            (starts at y₀)
//!   α  principal-side offset
//!   β  claim-side offset
//! ```
//!
//! Integer division means the product only tracks `K` up to the largest
//! divisor any mutation has used since the pair was last configured; that
//! divisor is kept in `rounding_bound` and checked after every mutation.

use anchor_lang::prelude::*;

use super::params::CurveParameters;
use super::units::{checked_add, checked_mul, div_floor, narrow_u128, Claim, Principal, WideUint, U256};
use super::units::PRICE_SCALE;
use crate::error::CurveError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct VirtualPair {
    /// Virtual principal leg
    pub x: u128,
    /// Virtual claim leg
    pub y: u128,
    /// Claim leg at configuration time (y₀)
    pub y_initial: u128,
    /// Principal-side offset (α)
    pub alpha: u128,
    /// Claim-side offset (β)
    pub beta: u128,
    /// Invariant product (K)
    pub k: WideUint,
    /// Largest divisor used by a mutation since configuration
    pub rounding_bound: WideUint,
    /// Principal at which the claim leg is exhausted
    pub funding_goal: u128,
}

impl VirtualPair {
    /// A freshly configured pair at the zero seed: no principal, full claim leg.
    pub fn configured(funding_goal: Principal, params: &CurveParameters) -> Self {
        Self {
            x: 0,
            y: params.y_initial,
            y_initial: params.y_initial,
            alpha: params.alpha,
            beta: params.beta,
            k: params.k.into(),
            rounding_bound: WideUint::default(),
            funding_goal: funding_goal.0,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.k().is_zero()
    }

    pub fn k(&self) -> U256 {
        self.k.into()
    }

    pub fn rounding_bound(&self) -> U256 {
        self.rounding_bound.into()
    }

    /// `x + α` in virtual space.
    pub fn principal_leg(&self) -> Result<U256> {
        checked_add(U256::from(self.x), U256::from(self.alpha))
    }

    /// `y + β` in virtual space.
    pub fn claim_leg(&self) -> Result<U256> {
        checked_add(U256::from(self.y), U256::from(self.beta))
    }

    pub fn product(&self) -> Result<U256> {
        checked_mul(self.principal_leg()?, self.claim_leg()?)
    }

    /// Distance between the current product and `K`.
    pub fn drift(&self) -> Result<U256> {
        let product = self.product()?;
        let k = self.k();
        Ok(if product >= k { product - k } else { k - product })
    }

    pub fn check_invariant(&self) -> Result<()> {
        require!(self.drift()? <= self.rounding_bound(), CurveError::InvariantViolated);
        Ok(())
    }

    /// Principal raised through the curve and not yet redeemed through it.
    pub fn total_raised(&self) -> Principal {
        Principal(self.x)
    }

    /// Claim units issued by the curve and not yet returned to it.
    pub fn claims_issued(&self) -> Claim {
        Claim(self.y_initial.saturating_sub(self.y))
    }

    /// Principal the curve can still accept before hitting its goal.
    pub fn remaining_capacity(&self) -> Principal {
        Principal(self.funding_goal.saturating_sub(self.x))
    }

    /// Principal cost of one claim unit at the current state, scaled by 10^18.
    pub fn marginal_price(&self) -> Result<u128> {
        require!(self.is_configured(), CurveError::GoalsNotSet);
        let scaled = checked_mul(self.principal_leg()?, U256::from(PRICE_SCALE))?;
        narrow_u128(div_floor(scaled, self.claim_leg()?)?)
    }

    /// Realised average price of every claim unit currently issued, scaled by
    /// 10^18. Falls back to the marginal price while nothing is issued.
    pub fn average_price(&self) -> Result<u128> {
        let issued = self.claims_issued();
        if issued.is_zero() {
            return self.marginal_price();
        }
        let scaled = checked_mul(U256::from(self.x), U256::from(PRICE_SCALE))?;
        narrow_u128(div_floor(scaled, issued.widen())?)
    }

    fn widen_rounding_bound(&mut self, divisor: U256) {
        if divisor > self.rounding_bound() {
            self.rounding_bound = divisor.into();
        }
    }

    /// Record a deposit of `input` that issued `bonding_out` claim units.
    pub fn apply_add(&mut self, input: Principal, bonding_out: Claim, divisor: U256) -> Result<()> {
        self.x = self
            .x
            .checked_add(input.0)
            .ok_or(CurveError::MathOverflow)?;
        self.y = self
            .y
            .checked_sub(bonding_out.0)
            .ok_or(CurveError::MathOverflow)?;
        self.widen_rounding_bound(divisor);
        self.check_invariant()
    }

    /// Record `effective` claim units returned to the curve for `input_out`
    /// principal. The claim leg never grows past `y₀`.
    pub fn apply_remove(&mut self, effective: Claim, input_out: Principal, divisor: U256) -> Result<()> {
        let y = self
            .y
            .checked_add(effective.0)
            .ok_or(CurveError::MathOverflow)?;
        self.y = y.min(self.y_initial);
        self.x = self
            .x
            .checked_sub(input_out.0)
            .ok_or(CurveError::MathOverflow)?;
        self.widen_rounding_bound(divisor);
        self.check_invariant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::params::derive;

    const E18: u128 = PRICE_SCALE;

    fn reference_pair() -> VirtualPair {
        let goal = Principal(1_000_000 * E18);
        VirtualPair::configured(goal, &derive(goal, 9 * E18 / 10).unwrap())
    }

    #[test]
    fn unconfigured_pair_is_all_zero() {
        let pair = VirtualPair::default();
        assert!(!pair.is_configured());
        assert_eq!(pair.x, 0);
        assert_eq!(pair.y, 0);
        assert!(pair.marginal_price().is_err());
    }

    #[test]
    fn configured_pair_starts_at_zero_seed_on_the_curve() {
        let pair = reference_pair();
        assert!(pair.is_configured());
        assert_eq!(pair.x, 0);
        assert_eq!(pair.y, pair.y_initial);
        assert!(pair.drift().unwrap().is_zero());
        pair.check_invariant().unwrap();
    }

    #[test]
    fn opening_price_is_square_of_average() {
        let pair = reference_pair();
        // 0.9² = 0.81
        let price = pair.marginal_price().unwrap();
        assert!(price.abs_diff(81 * E18 / 100) <= E18 / 1_000_000, "price {price}");
        assert_eq!(pair.average_price().unwrap(), price);
    }

    #[test]
    fn drift_beyond_bound_is_rejected() {
        let mut pair = reference_pair();
        pair.y -= 1;
        assert!(pair.check_invariant().is_err());
        pair.rounding_bound = U256::from(pair.alpha).into();
        pair.check_invariant().unwrap();
    }

    #[test]
    fn remove_caps_claim_leg_at_opening_value() {
        let mut pair = reference_pair();
        pair.apply_remove(Claim(1_000), Principal::ZERO, pair.claim_leg().unwrap())
            .unwrap();
        assert_eq!(pair.y, pair.y_initial);
        assert!(pair.drift().unwrap().is_zero());
    }

    #[test]
    fn capacity_and_issuance_track_legs() {
        let mut pair = reference_pair();
        pair.x = 400_000 * E18;
        pair.y = pair.y_initial - 10;
        assert_eq!(pair.remaining_capacity(), Principal(600_000 * E18));
        assert_eq!(pair.claims_issued(), Claim(10));
        assert_eq!(pair.total_raised(), Principal(400_000 * E18));
    }
}
