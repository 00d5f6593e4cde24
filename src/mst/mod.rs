//! Minimum spanning tree analysis.
//!
//! The MST weight of the full distance graph bounds from below the length
//! of any closed tour over the same venues: dropping one edge of a tour
//! leaves a spanning path, which is no cheaper than the MST. The bound is
//! used for reporting only and never feeds back into the search.

mod kruskal;
mod union_find;

pub use kruskal::{ForestDisplay, Kruskal, MstEdge, SpanningForest};
pub use union_find::DisjointSet;
