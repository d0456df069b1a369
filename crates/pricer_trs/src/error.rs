//! Error types for scenario evaluation.

use thiserror::Error;

/// Errors raised while validating scenario parameters.
///
/// Degenerate move ranges are not errors: a zero step or a step pointing
/// away from the stop produces an empty grid instead.
///
/// # Examples
/// ```
/// use pricer_trs::TrsError;
///
/// let err = TrsError::InvalidCollateral(0.0);
/// assert_eq!(format!("{}", err), "Invalid collateral: 0 (must be positive and finite)");
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrsError {
    /// A numeric parameter is NaN or infinite.
    #[error("Invalid parameter '{name}': {value} (must be finite)")]
    InvalidParameter {
        /// Parameter name as it appears on the command line
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Collateral would make the return on collateral undefined.
    #[error("Invalid collateral: {0} (must be positive and finite)")]
    InvalidCollateral(f64),

    /// The move range would produce more points than can be evaluated.
    #[error("Scenario grid too large: {points} points (limit {limit})")]
    GridTooLarge {
        /// Points the range would produce
        points: usize,
        /// Maximum supported points
        limit: usize,
    },
}

impl TrsError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: &'static str, value: f64) -> Self {
        Self::InvalidParameter { name, value }
    }
}

/// Result alias for scenario evaluation.
pub type Result<T> = std::result::Result<T, TrsError>;
