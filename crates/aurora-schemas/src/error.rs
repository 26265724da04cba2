use thiserror::Error;

/// Errors THE CORE (`aurora-features`, `aurora-baseline`, `aurora-score`)
/// can return. Both variants are programmatic-misuse errors, not "normal"
/// outcomes — a missing or excluded feature is not an error, it is recorded
/// in `BMIResult::excluded_features` / `BaselineStatus` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// A `FeatureInputs` field was non-finite, negative where it must not
    /// be, or a percentage outside `[0, 100]`.
    #[error("insufficient input: {detail}")]
    InsufficientInput { detail: String },

    /// History rows were out of order, or contained a non-finite raw value.
    #[error("history consistency violation: {detail}")]
    HistoryConsistency { detail: String },
}
