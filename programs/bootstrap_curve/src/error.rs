//! Error codes for the bootstrap curve program
//!
//! Every failure aborts the whole call. Variants are grouped by the class of
//! problem they report; [`CurveError::category`] exposes that grouping.

use anchor_lang::prelude::*;

#[error_code]
pub enum CurveError {
    // Configuration
    #[msg("Funding goal must be greater than zero")]
    InvalidFundingGoal,
    #[msg("Desired average price must lie strictly between sqrt(0.75) and 1")]
    InvalidAveragePrice,
    #[msg("Derived curve offsets are not positive")]
    DegenerateCurve,
    #[msg("Withdrawal fee cannot exceed 10000 basis points")]
    InvalidFeeBasisPoints,

    // State
    #[msg("Funding goal and average price have not been set")]
    GoalsNotSet,
    #[msg("Launch is locked")]
    Locked,
    #[msg("Launch is paused")]
    Paused,
    #[msg("Launch is not paused")]
    NotPaused,
    #[msg("Reentrant call rejected")]
    ReentrantCall,
    #[msg("Deposit would take the curve past its funding goal")]
    FundingGoalExceeded,
    #[msg("Account does not belong to this launch")]
    AccountMismatch,
    #[msg("Vault was credited less than the deposited amount")]
    DepositShortfall,

    // Arithmetic
    #[msg("Amount must be greater than zero")]
    ZeroAmount,
    #[msg("Arithmetic overflow")]
    MathOverflow,
    #[msg("Virtual pair drifted beyond its rounding bound")]
    InvariantViolated,

    // Slippage
    #[msg("Slippage tolerance exceeded")]
    SlippageExceeded,

    // Authorization
    #[msg("Caller is not the launch owner")]
    Unauthorized,

    // Balances
    #[msg("Caller balance is insufficient")]
    InsufficientBalance,
    #[msg("Vault balance is insufficient")]
    InsufficientVaultBalance,
}

/// Coarse classification of [`CurveError`] codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    State,
    Arithmetic,
    Slippage,
    Authorization,
    InsufficientBalance,
}

impl CurveError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CurveError::InvalidFundingGoal
            | CurveError::InvalidAveragePrice
            | CurveError::DegenerateCurve
            | CurveError::InvalidFeeBasisPoints => ErrorCategory::Configuration,
            CurveError::GoalsNotSet
            | CurveError::Locked
            | CurveError::Paused
            | CurveError::NotPaused
            | CurveError::ReentrantCall
            | CurveError::FundingGoalExceeded
            | CurveError::AccountMismatch
            | CurveError::DepositShortfall => ErrorCategory::State,
            CurveError::ZeroAmount | CurveError::MathOverflow | CurveError::InvariantViolated => {
                ErrorCategory::Arithmetic
            }
            CurveError::SlippageExceeded => ErrorCategory::Slippage,
            CurveError::Unauthorized => ErrorCategory::Authorization,
            CurveError::InsufficientBalance | CurveError::InsufficientVaultBalance => {
                ErrorCategory::InsufficientBalance
            }
        }
    }
}

/// Asserts that `result` failed with exactly `expected`.
#[cfg(test)]
pub(crate) fn assert_curve_error<T: std::fmt::Debug>(result: Result<T>, expected: CurveError) {
    let err = result.expect_err("call should have failed");
    assert_eq!(err, Error::from(expected));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(CurveError::InvalidAveragePrice.category(), ErrorCategory::Configuration);
        assert_eq!(CurveError::Paused.category(), ErrorCategory::State);
        assert_eq!(CurveError::MathOverflow.category(), ErrorCategory::Arithmetic);
        assert_eq!(CurveError::SlippageExceeded.category(), ErrorCategory::Slippage);
        assert_eq!(CurveError::Unauthorized.category(), ErrorCategory::Authorization);
        assert_eq!(
            CurveError::InsufficientVaultBalance.category(),
            ErrorCategory::InsufficientBalance
        );
    }

    #[test]
    fn errors_compare_by_code() {
        let a: Error = CurveError::SlippageExceeded.into();
        let b: Error = CurveError::SlippageExceeded.into();
        let c: Error = CurveError::Locked.into();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
