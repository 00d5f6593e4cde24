//! Comparison of an optimized route against the MST lower bound.

use std::fmt;

use crate::matrix::SquareMatrix;
use crate::mst::SpanningForest;
use crate::tabu::OptimizedRoute;

/// How far a solution sits above the MST bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    /// Less than 20 % above the bound.
    Excellent,
    /// Less than 40 %.
    Good,
    /// Less than 60 %.
    Fair,
    NeedsImprovement,
}

impl Quality {
    /// Tier for a gap given in percent.
    pub fn from_gap_percent(gap: f64) -> Self {
        if gap < 20.0 {
            Quality::Excellent
        } else if gap < 40.0 {
            Quality::Good
        } else if gap < 60.0 {
            Quality::Fair
        } else {
            Quality::NeedsImprovement
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Excellent => "excellent",
            Quality::Good => "good",
            Quality::Fair => "fair",
            Quality::NeedsImprovement => "needs improvement",
        };
        f.write_str(label)
    }
}

/// Tabu result next to the MST bound.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Benchmark {
    pub mst_weight: f64,
    pub mst_edges: usize,
    pub mst_mean_degree: f64,
    pub mst_leaves: usize,
    /// False when the MST is a forest; gaps are then not a valid bound.
    pub mst_spanning: bool,
    pub route_cost: f64,
    pub route_stops: usize,
    /// Length of the route closed back to its start.
    pub tour_distance: f64,
    pub cost_gap: f64,
    pub cost_gap_percent: f64,
    pub distance_gap: f64,
    pub distance_gap_percent: f64,
    /// Tier of `cost_gap_percent`.
    pub quality: Quality,
}

impl Benchmark {
    /// Compares `route` against `mst`, measuring the closed tour on
    /// `distance`.
    ///
    /// Percentages are 0 when the MST weight is not positive.
    pub fn compare(mst: &SpanningForest, route: &OptimizedRoute, distance: &SquareMatrix) -> Self {
        let tour_distance = distance.path_length(&route.route, true);
        let cost_gap = route.cost - mst.total_weight;
        let distance_gap = tour_distance - mst.total_weight;
        let cost_gap_percent = percent_of(cost_gap, mst.total_weight);

        Self {
            mst_weight: mst.total_weight,
            mst_edges: mst.edges.len(),
            mst_mean_degree: mst.mean_degree(),
            mst_leaves: mst.leaves().len(),
            mst_spanning: mst.is_spanning(),
            route_cost: route.cost,
            route_stops: route.route.len(),
            tour_distance,
            cost_gap,
            cost_gap_percent,
            distance_gap,
            distance_gap_percent: percent_of(distance_gap, mst.total_weight),
            quality: Quality::from_gap_percent(cost_gap_percent),
        }
    }
}

fn percent_of(gap: f64, base: f64) -> f64 {
    if base > 0.0 {
        gap / base * 100.0
    } else {
        0.0
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MST vs tabu search")?;
        writeln!(
            f,
            "  MST (lower bound): {:>10.2}  edges {}  mean degree {:.2}  leaves {}",
            self.mst_weight, self.mst_edges, self.mst_mean_degree, self.mst_leaves
        )?;
        if !self.mst_spanning {
            writeln!(f, "  warning: distance graph is disconnected, bound does not hold")?;
        }
        writeln!(f, "  tabu cost:         {:>10.2}  stops {}", self.route_cost, self.route_stops)?;
        writeln!(f, "  tour distance:     {:>10.2}", self.tour_distance)?;
        writeln!(
            f,
            "  cost gap:          {:>10.2} ({:.2}% above)",
            self.cost_gap, self.cost_gap_percent
        )?;
        writeln!(
            f,
            "  distance gap:      {:>10.2} ({:.2}% above)",
            self.distance_gap, self.distance_gap_percent
        )?;
        write!(f, "  quality: {}", self.quality)
    }
}
