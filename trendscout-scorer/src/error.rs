//! Error types raised while configuring the scorer.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised when a weight table is unusable.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum WeightsError {
    /// A weight was NaN or infinite.
    #[error("weight '{component}' must be finite")]
    NonFinite {
        /// Name of the offending component.
        component: &'static str,
    },
    /// A weight was below zero.
    #[error("weight '{component}' must not be negative (got {value})")]
    Negative {
        /// Name of the offending component.
        component: &'static str,
        /// Value supplied for the component.
        value: f64,
    },
    /// The weights did not add up to one.
    #[error("weights must sum to 1.0 (got {total})")]
    BadTotal {
        /// Sum of the supplied weights.
        total: f64,
    },
}
