//! Error types for slot-engine operations.

use thiserror::Error;

/// Errors raised by the validating entry points.
///
/// The core [`IntervalTree`](crate::IntervalTree) and [`subtract`](fn@crate::subtract)
/// never fail; only the checked constructors and the schedule layer report errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// An interval whose start is after its end (or, for schedule input,
    /// not strictly before it).
    #[error("Invalid interval in {context}: start {start} is not before end {end}")]
    InvalidInterval {
        context: String,
        start: String,
        end: String,
    },

    #[error("At least one party is required")]
    NoParties,

    #[error("Invalid limit: {0} (must be at least 1)")]
    InvalidLimit(usize),
}

pub type Result<T> = std::result::Result<T, SlotError>;
