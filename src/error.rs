//! # Errors
//!
//! $$
//! \text{Input} \to \text{Result}\langle\text{Output},\ \text{AnalyticsError}\rangle
//! $$
//!
//! Error taxonomy shared by every analytics operation. All failures are
//! reported synchronously to the immediate caller; the library performs no
//! retries and no silent recovery.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, AnalyticsError>;

/// Failures raised by the return, simulation, selection and attribution
/// operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
  /// A series has too few observations to compute a return.
  #[error("series `{symbol}` has {observations} observation(s), at least {required} required")]
  EmptySeries {
    /// Offending symbol.
    symbol: String,
    /// Observations actually present.
    observations: usize,
    /// Observations required by the operation.
    required: usize,
  },

  /// Ill-conditioned simulation or regression input.
  #[error("degenerate input: {reason}")]
  DegenerateInput {
    /// Human-readable description of the defect.
    reason: String,
  },

  /// Extremal selection was attempted over no eligible candidates.
  #[error("selection over an empty candidate set")]
  EmptyResultSet,

  /// Regression is under-determined after listwise deletion.
  #[error(
    "{usable} usable observation(s) after listwise deletion for {regressors} regressor(s); \
     regression is under-determined"
  )]
  InsufficientObservations {
    /// Rows surviving listwise deletion.
    usable: usize,
    /// Regressor count including the intercept.
    regressors: usize,
  },

  /// Input rows violate the schema expected at the library boundary.
  #[error("invalid input: {reason}")]
  InvalidInput {
    /// Human-readable description of the violation.
    reason: String,
  },
}

impl AnalyticsError {
  pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
    Self::DegenerateInput {
      reason: reason.into(),
    }
  }

  pub(crate) fn invalid(reason: impl Into<String>) -> Self {
    Self::InvalidInput {
      reason: reason.into(),
    }
  }
}
