//! Launch configuration
//!
//! Owner-controlled settings, kept apart from the curve itself so the math
//! in `amm` can be exercised without any authorization in the way.

use anchor_lang::prelude::*;

use crate::amm::{derive, Claim, CurveParameters, Principal};
use crate::error::CurveError;

/// The two economic goals a curve is derived from.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct GoalConfig {
    /// Principal raised when the curve saturates
    pub funding_goal: u128,

    /// Average price over the whole raise, scaled by 10^18
    pub desired_average_price: u128,
}

impl GoalConfig {
    pub fn is_set(&self) -> bool {
        self.funding_goal != 0
    }

    pub fn funding_goal(&self) -> Principal {
        Principal(self.funding_goal)
    }

    pub fn derive(&self) -> Result<CurveParameters> {
        derive(self.funding_goal(), self.desired_average_price)
    }
}

/// Who may administer a launch, and what pausing it costs.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct Governance {
    /// Sole account allowed to change goals, fees, lock and pause
    pub owner: Pubkey,

    /// Claim units the owner burns to trigger a pause
    pub pause_burn_amount: u128,
}

impl Governance {
    pub fn new(owner: Pubkey, pause_burn_amount: Claim) -> Self {
        Self {
            owner,
            pause_burn_amount: pause_burn_amount.0,
        }
    }

    pub fn authorize(&self, caller: &Pubkey) -> Result<()> {
        require_keys_eq!(*caller, self.owner, CurveError::Unauthorized);
        Ok(())
    }

    pub fn pause_burn_amount(&self) -> Claim {
        Claim(self.pause_burn_amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::PRICE_SCALE;
    use crate::error::assert_curve_error;

    #[test]
    fn only_owner_is_authorized() {
        let owner = Pubkey::new_unique();
        let governance = Governance::new(owner, Claim(10));
        governance.authorize(&owner).unwrap();
        assert_curve_error(
            governance.authorize(&Pubkey::new_unique()),
            CurveError::Unauthorized,
        );
    }

    #[test]
    fn unset_goals_do_not_derive() {
        let goals = GoalConfig::default();
        assert!(!goals.is_set());
        assert_curve_error(goals.derive(), CurveError::InvalidFundingGoal);
    }

    #[test]
    fn goals_derive_curve_parameters() {
        let goals = GoalConfig {
            funding_goal: 1_000 * PRICE_SCALE,
            desired_average_price: 95 * PRICE_SCALE / 100,
        };
        assert!(goals.is_set());
        let params = goals.derive().unwrap();
        assert!(params.alpha > 0 && params.beta > params.alpha);
    }
}
