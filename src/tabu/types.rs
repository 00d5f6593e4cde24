//! Core trait for Tabu Search problems.

use std::hash::Hash;

use rand::Rng;

/// A scored candidate move.
///
/// `key` identifies the move in the tabu list. Moves with the same key are
/// considered equivalent (e.g. swapping venues 3 and 7 in either order).
#[derive(Debug, Clone)]
pub struct TabuMove<M, K> {
    /// What to apply to the current solution.
    pub action: M,
    /// Tabu signature of this move.
    pub key: K,
    /// Cost of the solution the move leads to.
    pub cost: f64,
}

/// Defines a combinatorial optimization problem for Tabu Search.
///
/// Implementors describe how to score a solution, how to enumerate and
/// score the moves around it, and how to apply a chosen move in place.
/// The runner owns the search state; the problem itself stays immutable.
pub trait TabuProblem: Send + Sync {
    /// The solution type.
    type Solution: Clone + Send;

    /// A move that transforms one solution into a neighbor.
    type Move: Clone + Send;

    /// Tabu signature of a move.
    type Key: Clone + Eq + Hash + Send;

    /// Evaluates the cost of a solution (lower is better).
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Enumerates and scores the neighborhood of `solution`.
    ///
    /// The order of the returned moves matters: on equal cost the runner
    /// picks the earliest one. `rng` is seeded by the runner, so sampled
    /// neighborhoods stay reproducible.
    fn neighbors<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Vec<TabuMove<Self::Move, Self::Key>>;

    /// Applies `action` to `solution` in place.
    fn apply(&self, solution: &mut Self::Solution, action: &Self::Move);
}
