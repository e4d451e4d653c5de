//! Validation errors raised while turning user input into an expense record.

/// A user-entered value that cannot become an [`ExpenseRecord`](crate::ExpenseRecord).
///
/// These are reported back to the user; the operation that raised one is
/// aborted before anything is written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// No amount was entered.
    #[error("please enter an amount")]
    MissingAmount,

    /// The amount text is not a number.
    #[error("\"{0}\" is not a valid amount")]
    NonNumericAmount(String),

    /// Zero or negative amounts are not expenses.
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),

    /// NaN or infinity slipped through as an amount.
    #[error("amount must be a finite number")]
    NonFiniteAmount,

    #[error("please select an expense type")]
    MissingCategory,

    #[error("please select a person")]
    MissingPerson,
}
