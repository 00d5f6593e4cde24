//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently applied moves, preventing cycling
//! and encouraging exploration of new regions of the search space.
//!
//! The engine ([`TabuRunner`]) is generic over [`TabuProblem`];
//! [`RouteOptimizer`] instantiates it for visit orders scored by a
//! [`RouteEvaluator`](crate::evaluate::RouteEvaluator).
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod list;
mod route;
mod runner;
mod types;

pub use config::{Neighborhood, TabuConfig};
pub use list::TabuList;
pub use route::{validate_route, MoveKey, OptimizedRoute, RouteMove, RouteOptimizer, RouteProblem};
pub use runner::{TabuResult, TabuRunner};
pub use types::{TabuMove, TabuProblem};
