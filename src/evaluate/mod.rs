//! Route evaluation against opening hours.
//!
//! [`RouteEvaluator`] walks a visit order through calendar time, waiting
//! for opening when early and rolling over to the next day when a stop is
//! reached after closing. Stops that no longer fit are dropped and
//! penalized rather than rejected, so infeasible orders stay comparable
//! during search.

mod config;
mod evaluator;
mod types;

pub use config::{CalendarWindow, CostWeights};
pub use evaluator::RouteEvaluator;
pub use types::{Evaluation, Itinerary, ItineraryDay, StopSchedule};
