//! Read-only travel inputs shared across optimization runs.
//!
//! A [`TravelData`] bundles the venue table with its distance and time
//! matrices. It is built once by the data layer and then handed to every
//! run by reference (or behind an `Arc`); nothing in this crate mutates it.

mod types;

pub use types::{SquareMatrix, TravelData, Venue};
