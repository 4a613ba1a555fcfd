//! # Withdrawal Fee
//!
//! A basis-point fee taken from the claim amount *before* it is quoted
//! against the curve:
//!
//! ```text
//! fee       = ⌊amount × bps / 10000⌋
//! effective = amount − fee
//! ```
//!
//! The fee is never paid out anywhere. The claim units it covers are burned
//! without moving the curve, so the principal they would have released stays
//! behind as unredeemed virtual liquidity.
//!
//! Two edge cases are intentional:
//! - `amount × bps < 10000` charges nothing (dust is exempt)
//! - `bps == 10000` forfeits the whole position; removal pays zero instead
//!   of failing

use anchor_lang::prelude::*;

use super::units::{Claim, BPS_DENOMINATOR, U256};
use crate::error::CurveError;

/// Highest configurable withdrawal fee (100%).
pub const MAX_WITHDRAWAL_FEE_BPS: u16 = 10_000;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct FeeConfig {
    /// Withdrawal fee in basis points (100 = 1%)
    pub withdrawal_fee_bps: u16,
}

impl FeeConfig {
    pub fn new(withdrawal_fee_bps: u16) -> Result<Self> {
        require!(
            withdrawal_fee_bps <= MAX_WITHDRAWAL_FEE_BPS,
            CurveError::InvalidFeeBasisPoints
        );
        Ok(Self { withdrawal_fee_bps })
    }

    pub fn apply(&self, amount: Claim) -> Result<FeeSplit> {
        apply_fee(amount, self.withdrawal_fee_bps)
    }
}

/// A claim amount split into the part that reaches the curve and the fee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeSplit {
    pub effective: Claim,
    pub fee: Claim,
}

pub fn apply_fee(amount: Claim, fee_bps: u16) -> Result<FeeSplit> {
    require!(fee_bps <= MAX_WITHDRAWAL_FEE_BPS, CurveError::InvalidFeeBasisPoints);

    let fee = amount.widen() * U256::from(fee_bps) / U256::from(BPS_DENOMINATOR);
    let fee = Claim::narrow(fee)?;
    Ok(FeeSplit {
        effective: amount.checked_sub(fee)?,
        fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::assert_curve_error;
    use proptest::prelude::*;

    #[test]
    fn zero_fee_passes_everything_through() {
        let split = apply_fee(Claim(12_345), 0).unwrap();
        assert_eq!(split, FeeSplit { effective: Claim(12_345), fee: Claim::ZERO });
    }

    #[test]
    fn one_percent_fee() {
        let split = apply_fee(Claim(1_000_000), 100).unwrap();
        assert_eq!(split.fee, Claim(10_000));
        assert_eq!(split.effective, Claim(990_000));
    }

    #[test]
    fn full_fee_forfeits_position() {
        let split = apply_fee(Claim(987_654_321), MAX_WITHDRAWAL_FEE_BPS).unwrap();
        assert_eq!(split.effective, Claim::ZERO);
        assert_eq!(split.fee, Claim(987_654_321));
    }

    #[test]
    fn dust_is_exempt() {
        // 33 × 300 = 9900 < 10000
        assert_eq!(apply_fee(Claim(33), 300).unwrap().fee, Claim::ZERO);
        // 34 × 300 = 10200 ≥ 10000
        assert_eq!(apply_fee(Claim(34), 300).unwrap().fee, Claim(1));
    }

    #[test]
    fn fee_above_hundred_percent_is_rejected() {
        assert_curve_error(apply_fee(Claim(1), 10_001), CurveError::InvalidFeeBasisPoints);
        assert_curve_error(FeeConfig::new(10_001), CurveError::InvalidFeeBasisPoints);
        assert_eq!(FeeConfig::new(250).unwrap().withdrawal_fee_bps, 250);
    }

    #[test]
    fn large_amounts_do_not_overflow() {
        let split = apply_fee(Claim(u128::MAX), 5_000).unwrap();
        assert_eq!(split.fee.0 + split.effective.0, u128::MAX);
    }

    proptest! {
        #[test]
        fn dust_never_pays_fee(
            (bps, amount) in (1u16..=10_000)
                .prop_flat_map(|bps| (Just(bps), 0u128..=(9_999 / u128::from(bps))))
        ) {
            prop_assert!(amount * u128::from(bps) < 10_000);
            prop_assert_eq!(apply_fee(Claim(amount), bps).unwrap().fee, Claim::ZERO);
        }

        #[test]
        fn split_conserves_amount(amount in any::<u64>(), bps in 0u16..=10_000) {
            let split = apply_fee(Claim::from(amount), bps).unwrap();
            prop_assert_eq!(split.effective.0 + split.fee.0, u128::from(amount));
        }
    }
}
