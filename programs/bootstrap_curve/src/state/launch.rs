//! Launch State
//!
//! One account per principal mint. It owns the curve, the supply tracker and
//! every owner-controlled setting.

use anchor_lang::prelude::*;

use crate::amm::{BondingSupplyTracker, Claim, FeeConfig, Principal, VirtualPair};
use crate::engine::ClaimLedger;
use crate::error::CurveError;
use crate::state::{GoalConfig, Governance};

/// Bootstrap launch account
///
/// Seeds: ["launch", principal_mint]
#[account]
#[derive(InitSpace, Debug, Default, PartialEq, Eq)]
pub struct Launch {
    pub governance: Governance,
    pub goals: GoalConfig,
    pub fee: FeeConfig,
    pub curve: VirtualPair,
    pub supply: BondingSupplyTracker,

    /// Mint of the custodied asset
    pub principal_mint: Pubkey,

    /// Mint of the claim token (PDA, mint authority is this account)
    pub claim_mint: Pubkey,

    /// Token account holding custodied principal
    pub vault: Pubkey,

    /// Holder the vault credits deposits to (this account's address)
    pub custodian: Pubkey,

    /// Owner lock: blocks add and remove
    pub locked: bool,

    /// Emergency pause: blocks add and remove
    pub paused: bool,

    /// Set while an add or remove is in progress
    pub in_call: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Claim mint PDA bump seed
    pub claim_mint_bump: u8,
}

impl Launch {
    pub const SEED: &'static [u8] = b"launch";
    pub const CLAIM_MINT_SEED: &'static [u8] = b"claim_mint";

    /// Re-derive the curve from new goals. Resets the pair to the zero seed.
    pub fn set_goals(
        &mut self,
        caller: &Pubkey,
        funding_goal: Principal,
        desired_average_price: u128,
    ) -> Result<()> {
        self.governance.authorize(caller)?;

        let goals = GoalConfig {
            funding_goal: funding_goal.0,
            desired_average_price,
        };
        let params = goals.derive()?;

        let outstanding = self.supply.legitimate_supply();
        if !outstanding.is_zero() {
            msg!(
                "Warning: curve reset with {} claim units outstanding",
                outstanding.0
            );
        }

        self.goals = goals;
        self.curve = VirtualPair::configured(funding_goal, &params);

        msg!("Goals set: funding goal {}, average price {}", funding_goal.0, desired_average_price);
        msg!("alpha {}, beta {}, y0 {}", params.alpha, params.beta, params.y_initial);
        Ok(())
    }

    pub fn set_withdrawal_fee(&mut self, caller: &Pubkey, withdrawal_fee_bps: u16) -> Result<()> {
        self.governance.authorize(caller)?;
        self.fee = FeeConfig::new(withdrawal_fee_bps)?;
        msg!("Withdrawal fee: {} bps", withdrawal_fee_bps);
        Ok(())
    }

    pub fn lock(&mut self, caller: &Pubkey) -> Result<()> {
        self.governance.authorize(caller)?;
        self.locked = true;
        msg!("Launch locked");
        Ok(())
    }

    pub fn unlock(&mut self, caller: &Pubkey) -> Result<()> {
        self.governance.authorize(caller)?;
        self.locked = false;
        msg!("Launch unlocked");
        Ok(())
    }

    /// Pause trading. The owner burns the configured pause amount of claim
    /// units to do so; the burn is counted against legitimate supply.
    pub fn pause<L: ClaimLedger>(&mut self, caller: &Pubkey, ledger: &mut L) -> Result<Claim> {
        self.governance.authorize(caller)?;
        require!(!self.paused, CurveError::Paused);

        let burn_amount = self.governance.pause_burn_amount();
        if !burn_amount.is_zero() {
            require!(
                ledger.balance_of(caller)? >= burn_amount,
                CurveError::InsufficientBalance
            );
            ledger.burn(caller, burn_amount)?;
            self.supply.record_burn(burn_amount);
        }

        self.paused = true;
        msg!("Launch paused, {} claim units burned", burn_amount.0);
        Ok(burn_amount)
    }

    pub fn unpause(&mut self, caller: &Pubkey) -> Result<()> {
        self.governance.authorize(caller)?;
        require!(self.paused, CurveError::NotPaused);
        self.paused = false;
        msg!("Launch unpaused");
        Ok(())
    }

    pub fn ensure_tradable(&self) -> Result<()> {
        require!(!self.locked, CurveError::Locked);
        require!(!self.paused, CurveError::Paused);
        require!(self.curve.is_configured(), CurveError::GoalsNotSet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::PRICE_SCALE;
    use crate::engine::mock::MockLedger;
    use crate::engine::ClaimSupply;
    use crate::error::assert_curve_error;

    const E18: u128 = PRICE_SCALE;

    fn launch(owner: Pubkey) -> Launch {
        Launch {
            governance: Governance::new(owner, Claim(5 * E18)),
            ..Launch::default()
        }
    }

    #[test]
    fn fresh_launch_is_not_tradable() {
        let launch = launch(Pubkey::new_unique());
        assert_curve_error(launch.ensure_tradable(), CurveError::GoalsNotSet);
    }

    #[test]
    fn set_goals_configures_zero_seed_curve() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch
            .set_goals(&owner, Principal(1_000_000 * E18), 9 * E18 / 10)
            .unwrap();

        assert!(launch.goals.is_set());
        assert_eq!(launch.curve.x, 0);
        assert_eq!(launch.curve.y, launch.curve.y_initial);
        assert!(launch.curve.alpha > 0 && launch.curve.beta > 0);
        launch.ensure_tradable().unwrap();
    }

    #[test]
    fn set_goals_resets_curve_but_keeps_tracker() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch.set_goals(&owner, Principal(1_000 * E18), 9 * E18 / 10).unwrap();
        launch.curve.x = 10 * E18;
        launch.supply.last_known_legitimate_supply = 7;

        launch.set_goals(&owner, Principal(2_000 * E18), 95 * E18 / 100).unwrap();
        assert_eq!(launch.curve.x, 0);
        assert!(launch.curve.rounding_bound().is_zero());
        assert_eq!(launch.curve.funding_goal, 2_000 * E18);
        assert_eq!(launch.supply.legitimate_supply(), Claim(7));
    }

    #[test]
    fn invalid_goals_leave_launch_untouched() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch.set_goals(&owner, Principal(1_000 * E18), 9 * E18 / 10).unwrap();
        let before = launch.clone();

        assert_curve_error(
            launch.set_goals(&owner, Principal::ZERO, 9 * E18 / 10),
            CurveError::InvalidFundingGoal,
        );
        assert_curve_error(
            launch.set_goals(&owner, Principal(1_000 * E18), E18),
            CurveError::InvalidAveragePrice,
        );
        assert_eq!(launch, before);
    }

    #[test]
    fn admin_operations_require_owner() {
        let owner = Pubkey::new_unique();
        let stranger = Pubkey::new_unique();
        let mut launch = launch(owner);
        let mut ledger = MockLedger::default();

        assert_curve_error(
            launch.set_goals(&stranger, Principal(1_000 * E18), 9 * E18 / 10),
            CurveError::Unauthorized,
        );
        assert_curve_error(launch.set_withdrawal_fee(&stranger, 10), CurveError::Unauthorized);
        assert_curve_error(launch.lock(&stranger), CurveError::Unauthorized);
        assert_curve_error(launch.unlock(&stranger), CurveError::Unauthorized);
        assert_curve_error(launch.pause(&stranger, &mut ledger), CurveError::Unauthorized);
        assert_curve_error(launch.unpause(&stranger), CurveError::Unauthorized);
        assert_eq!(launch, self::launch(owner));
    }

    #[test]
    fn withdrawal_fee_is_bounded() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch.set_withdrawal_fee(&owner, 10_000).unwrap();
        assert_eq!(launch.fee.withdrawal_fee_bps, 10_000);
        assert_curve_error(
            launch.set_withdrawal_fee(&owner, 10_001),
            CurveError::InvalidFeeBasisPoints,
        );
        assert_eq!(launch.fee.withdrawal_fee_bps, 10_000);
    }

    #[test]
    fn lock_blocks_trading() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch.set_goals(&owner, Principal(1_000 * E18), 9 * E18 / 10).unwrap();

        launch.lock(&owner).unwrap();
        assert_curve_error(launch.ensure_tradable(), CurveError::Locked);
        launch.unlock(&owner).unwrap();
        launch.ensure_tradable().unwrap();
    }

    #[test]
    fn pause_burns_owner_claims() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        launch.set_goals(&owner, Principal(1_000 * E18), 9 * E18 / 10).unwrap();
        launch.supply.record_mint(Claim(8 * E18)).unwrap();

        let mut ledger = MockLedger::default();
        ledger.credit(&owner, Claim(8 * E18));

        let burned = launch.pause(&owner, &mut ledger).unwrap();
        assert_eq!(burned, Claim(5 * E18));
        assert!(launch.paused);
        assert_eq!(ledger.holding(&owner), Claim(3 * E18));
        assert_eq!(ledger.total_supply().unwrap(), Claim(3 * E18));
        assert_eq!(launch.supply.legitimate_supply(), Claim(3 * E18));
        assert_curve_error(launch.ensure_tradable(), CurveError::Paused);

        assert_curve_error(launch.pause(&owner, &mut ledger), CurveError::Paused);
        launch.unpause(&owner).unwrap();
        assert_curve_error(launch.unpause(&owner), CurveError::NotPaused);
        launch.ensure_tradable().unwrap();
    }

    #[test]
    fn pause_without_enough_claims_fails() {
        let owner = Pubkey::new_unique();
        let mut launch = launch(owner);
        let mut ledger = MockLedger::default();
        ledger.credit(&owner, Claim(E18));

        assert_curve_error(launch.pause(&owner, &mut ledger), CurveError::InsufficientBalance);
        assert!(!launch.paused);
        assert_eq!(ledger.holding(&owner), Claim(E18));
    }
}
