//! Multi-day itinerary optimization under opening-hour constraints.
//!
//! Plans the order in which a traveller visits a set of venues, a
//! time-constrained variant of the traveling salesperson problem:
//!
//! - **Route evaluation**: simulates a visit order through calendar time
//!   (waiting for opening, rolling over to the next day after closing,
//!   dropping what no longer fits) and scores it.
//! - **Tabu Search (TS)**: searches visit orders with a pinned start venue,
//!   using short-term memory (tabu list) to escape local optima.
//! - **Minimum spanning tree (MST)**: Kruskal over the distance matrix,
//!   giving a lower bound on any closed tour for benchmark reporting.
//!
//! # Architecture
//!
//! Venue table and travel matrices ([`matrix::TravelData`]) are loaded once
//! by the caller and shared read-only; every optimization run owns its own
//! route and tabu list. Everything is synchronous and deterministic for a
//! given input and configuration.
//!
//! # Examples
//!
//! ```
//! use chrono::{NaiveDate, NaiveTime};
//! use u_itinerary::evaluate::{CalendarWindow, CostWeights};
//! use u_itinerary::matrix::{SquareMatrix, TravelData, Venue};
//! use u_itinerary::mst::Kruskal;
//! use u_itinerary::report::Benchmark;
//! use u_itinerary::tabu::{RouteOptimizer, TabuConfig};
//!
//! let venues = (0..5).map(|i| Venue::new(i, format!("bar {i}"))).collect();
//! let dist = SquareMatrix::from_fn(5, |i, j| (i as f64 - j as f64).abs());
//! let time = SquareMatrix::from_fn(5, |i, j| 10.0 * (i as f64 - j as f64).abs());
//! let data = TravelData::new(venues, dist, time).unwrap();
//!
//! let day = NaiveDate::from_ymd_opt(2025, 11, 25).unwrap();
//! let window = CalendarWindow::new(
//!     day,
//!     day.succ_opt().unwrap(),
//!     NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
//!     NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
//! );
//! let optimizer =
//!     RouteOptimizer::new(&data, window, CostWeights::default(), TabuConfig::default()).unwrap();
//!
//! let route = data.initial_route(0, None).unwrap();
//! let best = optimizer.optimize(0, &route).unwrap();
//! let itinerary = best.itinerary();
//! assert_eq!(itinerary.stop_count(), 5);
//!
//! let mst = Kruskal::run(data.distance()).unwrap();
//! let report = Benchmark::compare(&mst, &best, data.distance());
//! assert!(report.tour_distance >= report.mst_weight);
//! ```

pub mod error;
pub mod evaluate;
pub mod matrix;
pub mod mst;
pub mod report;
pub mod tabu;

pub use error::{ItineraryError, Result};
