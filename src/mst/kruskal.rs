//! Kruskal's minimum spanning tree over a distance matrix.
//!
//! # Algorithm
//!
//! 1. Collect edges `(i, j, d[i][j])` for `i < j`, skipping non-finite weights
//! 2. Sort ascending by weight (stable, so equal weights keep `(i, j)` order)
//! 3. Scan, keeping an edge whenever its endpoints lie in different
//!    components, until `n - 1` edges are kept or edges run out
//!
//! # Reference
//!
//! Kruskal, J. B. (1956). "On the shortest spanning subtree of a graph and
//! the traveling salesman problem", *Proc. AMS* 7(1), 48-50.

use std::fmt;

use super::union_find::DisjointSet;
use crate::error::{ItineraryError, Result};
use crate::matrix::{SquareMatrix, Venue};

/// An undirected edge of the spanning forest.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MstEdge {
    pub u: usize,
    pub v: usize,
    pub weight: f64,
}

/// Minimum spanning forest with structural statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanningForest {
    pub vertex_count: usize,
    /// Selected edges in the order Kruskal accepted them.
    pub edges: Vec<MstEdge>,
    pub total_weight: f64,
    /// Number of selected edges incident to each vertex.
    pub degrees: Vec<usize>,
    /// Connected components after the scan; 1 for a spanning tree.
    pub components: usize,
}

impl SpanningForest {
    /// Whether the edges connect every vertex (`n - 1` edges, one component).
    pub fn is_spanning(&self) -> bool {
        self.components == 1
    }

    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Vertices of degree 1.
    pub fn leaves(&self) -> Vec<usize> {
        self.degrees
            .iter()
            .enumerate()
            .filter(|&(_, &deg)| deg == 1)
            .map(|(v, _)| v)
            .collect()
    }

    pub fn mean_degree(&self) -> f64 {
        if self.vertex_count == 0 {
            return 0.0;
        }
        self.degrees.iter().sum::<usize>() as f64 / self.vertex_count as f64
    }

    /// Lower bound on any closed tour over all vertices, or `None` when the
    /// graph is disconnected and the forest bounds nothing.
    pub fn lower_bound(&self) -> Option<f64> {
        self.is_spanning().then_some(self.total_weight)
    }

    /// Plain-text listing of the edges, named after `venues` where known.
    pub fn render(&self, venues: &[Venue]) -> String {
        self.display(venues).to_string()
    }

    /// [`fmt::Display`] adapter behind [`render`](Self::render).
    pub fn display<'f>(&'f self, venues: &'f [Venue]) -> ForestDisplay<'f> {
        ForestDisplay {
            forest: self,
            venues,
        }
    }
}

/// Edge listing of a [`SpanningForest`] with venue names.
pub struct ForestDisplay<'f> {
    forest: &'f SpanningForest,
    venues: &'f [Venue],
}

impl ForestDisplay<'_> {
    fn write_vertex(&self, f: &mut fmt::Formatter<'_>, id: usize) -> fmt::Result {
        match self.venues.get(id) {
            Some(venue) => f.write_str(&venue.name),
            None => write!(f, "#{id}"),
        }
    }
}

impl fmt::Display for ForestDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let forest = self.forest;
        writeln!(f, "MINIMUM SPANNING TREE (Kruskal)")?;
        writeln!(
            f,
            "vertices: {}  edges: {}  components: {}",
            forest.vertex_count,
            forest.edges.len(),
            forest.components
        )?;
        writeln!(f, "total weight: {:.2}", forest.total_weight)?;
        writeln!(
            f,
            "mean degree: {:.2}  leaves: {}",
            forest.mean_degree(),
            forest.leaves().len()
        )?;
        for (k, e) in forest.edges.iter().enumerate() {
            write!(f, "{:>4}. ", k + 1)?;
            self.write_vertex(f, e.u)?;
            f.write_str(" -- ")?;
            self.write_vertex(f, e.v)?;
            writeln!(f, ": {:.2}", e.weight)?;
        }
        Ok(())
    }
}

/// Kruskal MST builder.
pub struct Kruskal;

impl Kruskal {
    /// Builds the minimum spanning forest of `distance`.
    ///
    /// Only the upper triangle is read, so for an asymmetric matrix the
    /// edge `{i, j}` weighs `d[i][j]` with `i < j`. Weights are not
    /// validated; a disconnected graph (infinite entries) yields a forest
    /// that [`SpanningForest::is_spanning`] reports as such.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_itinerary::matrix::SquareMatrix;
    /// use u_itinerary::mst::Kruskal;
    ///
    /// let d = SquareMatrix::from_rows(vec![vec![0.0, 5.0], vec![5.0, 0.0]]).unwrap();
    /// let mst = Kruskal::run(&d).unwrap();
    /// assert_eq!(mst.edges.len(), 1);
    /// assert_eq!(mst.total_weight, 5.0);
    /// ```
    pub fn run(distance: &SquareMatrix) -> Result<SpanningForest> {
        let n = distance.len();
        if n == 0 {
            return Err(ItineraryError::EmptyGraph);
        }

        let mut candidates: Vec<MstEdge> = (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .map(|(u, v)| MstEdge {
                u,
                v,
                weight: distance.get(u, v),
            })
            .filter(|e| e.weight.is_finite())
            .collect();
        candidates.sort_by(|a, b| a.weight.total_cmp(&b.weight));

        let mut set = DisjointSet::new(n);
        let mut edges = Vec::with_capacity(n - 1);
        let mut degrees = vec![0; n];
        let mut total_weight = 0.0;

        for edge in candidates {
            if edges.len() == n - 1 {
                break;
            }
            if set.union(edge.u, edge.v) {
                degrees[edge.u] += 1;
                degrees[edge.v] += 1;
                total_weight += edge.weight;
                edges.push(edge);
            }
        }

        let forest = SpanningForest {
            vertex_count: n,
            edges,
            total_weight,
            degrees,
            components: set.components(),
        };
        if !forest.is_spanning() {
            tracing::warn!(
                vertices = n,
                edges = forest.edges.len(),
                components = forest.components,
                "distance graph is disconnected; result is a spanning forest"
            );
        }
        Ok(forest)
    }
}
