//! # Units
//!
//! Two kinds of numbers flow through the curve and they must never be mixed:
//!
//! ```text
//!   monetary amounts          virtual curve space
//!   ────────────────          ───────────────────
//!   Principal(u128)  ──widen──▶  U256  ──narrow──▶  Claim(u128)
//!   Claim(u128)      ──widen──▶  U256  ──narrow──▶  Principal(u128)
//! ```
//!
//! Monetary amounts are base units of a mint. All curve arithmetic happens in
//! 256-bit virtual space, and coming back out is a checked narrowing.

use anchor_lang::prelude::*;

use crate::error::CurveError;

mod wide {
    use uint::construct_uint;

    construct_uint! {
        /// 256-bit unsigned integer for curve-internal products.
        pub struct U256(4);
    }
}

pub use wide::U256;

/// Fixed-point scale of every price. The reference unit price is exactly this.
pub const PRICE_SCALE: u128 = 1_000_000_000_000_000_000;

/// Basis-point denominator (10000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// ⌈√0.75 · 10^18⌉: the lowest desired average price a launch may target.
///
/// The opening marginal price of a curve is the square of its average price,
/// so this floor keeps the opening price at or above 75% of the reference.
pub const MIN_AVERAGE_PRICE: u128 = 866_025_403_784_438_647;

macro_rules! amount_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq,
            PartialOrd, Ord, Hash,
        )]
        pub struct $name(pub u128);

        impl $name {
            pub const ZERO: Self = Self(0);

            pub fn is_zero(self) -> bool {
                self.0 == 0
            }

            /// Lift into virtual curve space.
            pub fn widen(self) -> U256 {
                U256::from(self.0)
            }

            /// Leave virtual curve space, failing if the value does not fit.
            pub fn narrow(value: U256) -> Result<Self> {
                Ok(Self(narrow_u128(value)?))
            }

            pub fn checked_add(self, other: Self) -> Result<Self> {
                self.0
                    .checked_add(other.0)
                    .map(Self)
                    .ok_or_else(|| error!(CurveError::MathOverflow))
            }

            pub fn checked_sub(self, other: Self) -> Result<Self> {
                self.0
                    .checked_sub(other.0)
                    .map(Self)
                    .ok_or_else(|| error!(CurveError::MathOverflow))
            }

            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }

            /// Narrow to an SPL token amount.
            pub fn to_token_amount(self) -> Result<u64> {
                u64::try_from(self.0).map_err(|_| error!(CurveError::MathOverflow))
            }
        }

        impl From<u64> for $name {
            fn from(amount: u64) -> Self {
                Self(u128::from(amount))
            }
        }
    };
}

amount_type!(
    /// Base units of the custodied principal mint.
    Principal
);

amount_type!(
    /// Base units of the claim (bonding) token.
    Claim
);

/// Fixed-width storage form of a [`U256`] (little-endian limbs).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct WideUint {
    pub limbs: [u64; 4],
}

impl From<U256> for WideUint {
    fn from(value: U256) -> Self {
        Self { limbs: value.0 }
    }
}

impl From<WideUint> for U256 {
    fn from(value: WideUint) -> Self {
        U256(value.limbs)
    }
}

pub fn narrow_u128(value: U256) -> Result<u128> {
    require!(value.bits() <= 128, CurveError::MathOverflow);
    Ok(value.low_u128())
}

pub fn checked_add(a: U256, b: U256) -> Result<U256> {
    a.checked_add(b).ok_or_else(|| error!(CurveError::MathOverflow))
}

pub fn checked_mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b).ok_or_else(|| error!(CurveError::MathOverflow))
}

/// Truncating division (rounds toward zero).
pub fn div_floor(a: U256, b: U256) -> Result<U256> {
    a.checked_div(b).ok_or_else(|| error!(CurveError::MathOverflow))
}

/// Division rounding up; used wherever truncation would favour the trader.
pub fn div_ceil(a: U256, b: U256) -> Result<U256> {
    require!(!b.is_zero(), CurveError::MathOverflow);
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        checked_add(quotient, U256::one())
    }
}
