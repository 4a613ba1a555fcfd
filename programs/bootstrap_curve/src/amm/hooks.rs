//! Optional per-trade adjustments layered on top of the base curve quote.
//!
//! A hook sees the base amounts the curve produced and returns a fee and a
//! signed delta. The settled amount is
//!
//! ```text
//! clamp(base − fee + delta, 0, base)
//! ```
//!
//! The fee comes off first and the delta applies after it. A hook can take
//! value from a trade but never grant more than the curve itself quoted.
//! For sells, `base` is the curve output for the amount left *after* the
//! withdrawal fee. The curve always moves by the base amounts. Whatever a
//! hook withholds stays in the launch, the same way the withdrawal fee does.
//!
//! Without a hook the settlement engine skips this step entirely.

use anchor_lang::prelude::*;

/// What a hook wants done to a base amount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HookAdjustment {
    pub fee: u128,
    pub delta: i128,
}

impl HookAdjustment {
    pub fn settle(&self, base: u128) -> u128 {
        let after_fee = base.saturating_sub(self.fee);
        let adjusted = if self.delta >= 0 {
            after_fee.saturating_add(self.delta.unsigned_abs())
        } else {
            after_fee.saturating_sub(self.delta.unsigned_abs())
        };
        adjusted.min(base)
    }
}

pub trait TradeHook {
    /// Called after a buy is quoted: `base_bonding_out` claim units for
    /// `base_input_in` principal.
    fn on_buy(&self, buyer: &Pubkey, base_bonding_out: u128, base_input_in: u128) -> Result<HookAdjustment>;

    /// Called after a curve-mode sell is quoted: `base_input_out` principal
    /// for `base_bonding_in` claim units (post withdrawal fee).
    fn on_sell(&self, seller: &Pubkey, base_input_out: u128, base_bonding_in: u128) -> Result<HookAdjustment>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_adjustment_keeps_base() {
        assert_eq!(HookAdjustment::default().settle(1_000), 1_000);
    }

    #[test]
    fn fee_applies_before_delta() {
        // 1000 − 100 = 900, then + 50 = 950
        let adj = HookAdjustment { fee: 100, delta: 50 };
        assert_eq!(adj.settle(1_000), 950);

        // Negative delta after fee: 1000 − 100 − 300 = 600
        let adj = HookAdjustment { fee: 100, delta: -300 };
        assert_eq!(adj.settle(1_000), 600);
    }

    #[test]
    fn result_never_exceeds_base() {
        let adj = HookAdjustment { fee: 10, delta: 1_000_000 };
        assert_eq!(adj.settle(1_000), 1_000);
    }

    #[test]
    fn result_floors_at_zero() {
        assert_eq!(HookAdjustment { fee: 5_000, delta: 0 }.settle(1_000), 0);
        assert_eq!(HookAdjustment { fee: 0, delta: i128::MIN }.settle(1_000), 0);
    }
}
