//! Error types for itinerary optimization.
//!
//! Hard failures are detected before a run starts and returned to the
//! caller as-is. Routes that run out of calendar time are *not* errors:
//! they stay scoreable and surface as dropped stops in an
//! [`Evaluation`](crate::evaluate::Evaluation).

use thiserror::Error;

/// Result type alias for itinerary operations.
pub type Result<T> = std::result::Result<T, ItineraryError>;

/// Hard errors raised by the optimizer, evaluator and MST analyzer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ItineraryError {
    /// Malformed input route: empty, wrong start venue, or duplicate ids.
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Matrix or venue table sizes disagree, or an id lies outside them.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// Spanning tree requested over a graph with no vertices.
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Calendar window violates its own invariants.
    #[error("invalid calendar window: {0}")]
    InvalidWindow(String),

    /// Search or cost configuration rejected by `validate()`.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
