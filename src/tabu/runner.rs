//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Start from the caller's solution; it is also the initial best
//! 2. At each of exactly `max_iterations` iterations:
//!    a. Generate and score the neighborhood
//!    b. Select the cheapest admissible move (not tabu, or tabu but beating
//!    the best cost when aspiration is on); if none is admissible, the
//!    cheapest move overall
//!    c. Apply the move, ban its key, age the other bans
//!    d. Update the global best if strictly improved
//! 3. Return the best solution seen, including the starting one
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::TabuConfig;
use super::list::TabuList;
use super::types::{TabuMove, TabuProblem};

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S: Clone> {
    /// Best solution found.
    pub best: S,
    /// Cost of the best solution.
    pub best_cost: f64,
    /// Cost of the starting solution.
    pub initial_cost: f64,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found (0 = the start).
    pub best_iteration: usize,
    /// Best cost after each iteration, starting with the initial cost.
    pub cost_history: Vec<f64>,
}

/// Tabu Search runner.
pub struct TabuRunner;

impl TabuRunner {
    /// Executes Tabu Search from `initial`.
    ///
    /// The run is deterministic: the only randomness comes from an RNG
    /// seeded with `config.seed` and handed to
    /// [`TabuProblem::neighbors`].
    pub fn run<P: TabuProblem>(
        problem: &P,
        initial: P::Solution,
        config: &TabuConfig,
    ) -> TabuResult<P::Solution> {
        let mut rng = StdRng::seed_from_u64(config.seed);

        let mut current = initial;
        let initial_cost = problem.cost(&current);
        let mut best = current.clone();
        let mut best_cost = initial_cost;
        let mut best_iteration = 0;

        let mut tabu = TabuList::new(config.tabu_tenure);
        let mut cost_history = Vec::with_capacity(config.max_iterations + 1);
        cost_history.push(best_cost);

        for iteration in 1..=config.max_iterations {
            let neighbors = problem.neighbors(&current, &mut rng);

            if let Some(mv) = select_move(&neighbors, &tabu, best_cost, config.aspiration) {
                problem.apply(&mut current, &mv.action);
                tabu.ban(mv.key.clone());

                if mv.cost < best_cost {
                    best = current.clone();
                    best_cost = mv.cost;
                    best_iteration = iteration;
                }
                tracing::trace!(iteration, cost = mv.cost, best_cost, "tabu move applied");
            }

            cost_history.push(best_cost);
        }

        TabuResult {
            best,
            best_cost,
            initial_cost,
            iterations: config.max_iterations,
            best_iteration,
            cost_history,
        }
    }
}

/// Picks the move to apply, or `None` for an empty neighborhood.
///
/// Ties go to the earliest move.
pub(crate) fn select_move<'m, M, K: Eq + std::hash::Hash>(
    moves: &'m [TabuMove<M, K>],
    tabu: &TabuList<K>,
    best_cost: f64,
    aspiration: bool,
) -> Option<&'m TabuMove<M, K>> {
    let admissible = |mv: &TabuMove<M, K>| {
        !tabu.is_tabu(&mv.key) || (aspiration && mv.cost < best_cost)
    };
    cheapest(moves.iter().filter(|&mv| admissible(mv))).or_else(|| cheapest(moves.iter()))
}

fn cheapest<'m, M, K>(
    moves: impl Iterator<Item = &'m TabuMove<M, K>>,
) -> Option<&'m TabuMove<M, K>>
where
    M: 'm,
    K: 'm,
{
    let mut chosen: Option<&TabuMove<M, K>> = None;
    for mv in moves {
        if chosen.map_or(true, |c| mv.cost < c.cost) {
            chosen = Some(mv);
        }
    }
    chosen
}
