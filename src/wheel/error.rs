//! Engine errors.
//!
//! Every error here is local and recoverable. A refused request leaves the
//! wheel exactly as it was.

use thiserror::Error;

/// Why a weight map could not be turned into a distribution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightFault {
    /// An entry resolved to a negative weight.
    #[error("entry `{entry}` has negative weight {weight}")]
    Negative {
        /// Entry name.
        entry: String,
        /// Offending weight.
        weight: f64,
    },

    /// An entry resolved to NaN or an infinity.
    #[error("entry `{entry}` has non-finite weight {weight}")]
    NonFinite {
        /// Entry name.
        entry: String,
        /// Offending weight.
        weight: f64,
    },

    /// Weights were individually valid but all of them are zero.
    #[error("weights sum to {total}, expected a positive total")]
    BadTotal {
        /// The computed total.
        total: f64,
    },
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    /// Weight map failed validation.
    #[error("invalid weight: {0}")]
    InvalidWeight(#[from] WeightFault),

    /// Not enough entries to spin.
    #[error("need at least {required} entries, got {count}")]
    InsufficientEntries {
        /// Entries supplied.
        count: usize,
        /// Entries required.
        required: usize,
    },

    /// A spin is already in flight.
    #[error("wheel is already spinning")]
    AlreadySpinning,
}
