//! # Supply Guard
//!
//! The curve only knows about claim units it minted itself. If the claim
//! token's supply grows through any other path, curve pricing would let
//! whoever holds the extra units redeem against principal that other holders
//! paid for. The guard compares the two supplies on every redemption:
//!
//! ```text
//! observed ≤ legitimate  →  Curve         fee + curve quote
//! observed > legitimate  →  Proportional  amount × vault / observed
//! ```
//!
//! In proportional mode every holder, including whoever inflated the supply,
//! gets exactly their pro-rata share of custodied principal. Redeeming all
//! supply can never pay out more than the vault holds. The mode is chosen
//! fresh on each call and never stored.

use anchor_lang::prelude::*;

use super::units::{Claim, Principal};
use crate::error::CurveError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct BondingSupplyTracker {
    /// Claim units minted through the add path and not yet burned
    pub last_known_legitimate_supply: u128,
}

/// How a single redemption is priced.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RedemptionMode {
    /// Through the withdrawal fee and the virtual pair
    Curve,
    /// Pro-rata share of the vault, bypassing the virtual pair
    Proportional {
        observed_supply: u128,
        vault_balance: u128,
    },
}

impl BondingSupplyTracker {
    pub fn legitimate_supply(&self) -> Claim {
        Claim(self.last_known_legitimate_supply)
    }

    /// Pick the redemption mode for supply and vault balances observed now.
    pub fn select_mode(&self, observed_supply: Claim, vault_balance: Principal) -> RedemptionMode {
        if observed_supply.0 > self.last_known_legitimate_supply {
            RedemptionMode::Proportional {
                observed_supply: observed_supply.0,
                vault_balance: vault_balance.0,
            }
        } else {
            RedemptionMode::Curve
        }
    }

    pub fn record_mint(&mut self, amount: Claim) -> Result<()> {
        self.last_known_legitimate_supply = self
            .last_known_legitimate_supply
            .checked_add(amount.0)
            .ok_or(CurveError::MathOverflow)?;
        Ok(())
    }

    /// Saturates at zero: a proportional redemption may burn units the
    /// tracker never counted.
    pub fn record_burn(&mut self, amount: Claim) {
        self.last_known_legitimate_supply =
            self.last_known_legitimate_supply.saturating_sub(amount.0);
    }
}

/// `⌊amount × vault / supply⌋`
pub fn proportional_share(amount: Claim, vault_balance: Principal, observed_supply: Claim) -> Result<Principal> {
    require!(!observed_supply.is_zero(), CurveError::MathOverflow);
    let share = amount.widen() * vault_balance.widen() / observed_supply.widen();
    Principal::narrow(share)
}
