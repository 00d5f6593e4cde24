//! Tabu Search over visit orders with a fixed start venue.

use rand::Rng;

use super::config::{Neighborhood, TabuConfig};
use super::runner::TabuRunner;
use super::types::{TabuMove, TabuProblem};
use crate::error::{ItineraryError, Result};
use crate::evaluate::{CalendarWindow, CostWeights, Evaluation, Itinerary, RouteEvaluator};
use crate::matrix::TravelData;

/// A move between two non-start positions `i < j`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMove {
    pub kind: Neighborhood,
    pub i: usize,
    pub j: usize,
}

impl RouteMove {
    /// Applies the move in place. Both move kinds are their own inverse.
    pub fn apply(&self, route: &mut [usize]) {
        match self.kind {
            Neighborhood::Swap => route.swap(self.i, self.j),
            Neighborhood::Reverse => route[self.i..=self.j].reverse(),
        }
    }

    /// Tabu signature of this move on `route` (before applying it).
    pub fn key(&self, route: &[usize]) -> MoveKey {
        match self.kind {
            Neighborhood::Swap => {
                let (a, b) = (route[self.i], route[self.j]);
                MoveKey::Swap(a.min(b), a.max(b))
            }
            Neighborhood::Reverse => MoveKey::Reverse(self.i, self.j),
        }
    }
}

/// Tabu signature of a [`RouteMove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    /// Unordered venue-id pair, smaller id first.
    Swap(usize, usize),
    /// Position pair.
    Reverse(usize, usize),
}

/// Visit-order problem: position 0 is pinned, every other position can move.
pub struct RouteProblem<'e, 'a> {
    evaluator: &'e RouteEvaluator<'a>,
    neighborhood: Neighborhood,
    candidate_sample: Option<usize>,
    parallel: bool,
}

impl<'e, 'a> RouteProblem<'e, 'a> {
    pub fn new(evaluator: &'e RouteEvaluator<'a>, config: &TabuConfig) -> Self {
        Self {
            evaluator,
            neighborhood: config.neighborhood,
            candidate_sample: config.candidate_sample,
            parallel: config.parallel,
        }
    }

    /// All moves around a route of length `len`, in `(i, j)` order.
    fn moves(&self, len: usize) -> Vec<RouteMove> {
        let kind = self.neighborhood;
        (1..len)
            .flat_map(|i| ((i + 1)..len).map(move |j| RouteMove { kind, i, j }))
            .collect()
    }

    /// Keeps `k` moves drawn without replacement, in their original order.
    fn sample<R: Rng>(moves: Vec<RouteMove>, k: usize, rng: &mut R) -> Vec<RouteMove> {
        if k >= moves.len() {
            return moves;
        }
        let mut picked = rand::seq::index::sample(rng, moves.len(), k).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|idx| moves[idx]).collect()
    }

    fn score(&self, route: &[usize], moves: Vec<RouteMove>) -> Vec<TabuMove<RouteMove, MoveKey>> {
        if self.parallel {
            if let Some(scored) = self.score_parallel(route, &moves) {
                return scored;
            }
        }

        let mut scratch = route.to_vec();
        moves
            .into_iter()
            .map(|mv| {
                mv.apply(&mut scratch);
                let cost = self.evaluator.cost(&scratch);
                mv.apply(&mut scratch);
                TabuMove {
                    key: mv.key(route),
                    cost,
                    action: mv,
                }
            })
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn score_parallel(
        &self,
        route: &[usize],
        moves: &[RouteMove],
    ) -> Option<Vec<TabuMove<RouteMove, MoveKey>>> {
        use rayon::prelude::*;

        let scored = moves
            .par_iter()
            .map(|&mv| {
                let mut candidate = route.to_vec();
                mv.apply(&mut candidate);
                TabuMove {
                    key: mv.key(route),
                    cost: self.evaluator.cost(&candidate),
                    action: mv,
                }
            })
            .collect();
        Some(scored)
    }

    #[cfg(not(feature = "parallel"))]
    fn score_parallel(
        &self,
        _route: &[usize],
        _moves: &[RouteMove],
    ) -> Option<Vec<TabuMove<RouteMove, MoveKey>>> {
        None
    }
}

impl TabuProblem for RouteProblem<'_, '_> {
    type Solution = Vec<usize>;
    type Move = RouteMove;
    type Key = MoveKey;

    fn cost(&self, route: &Vec<usize>) -> f64 {
        self.evaluator.cost(route)
    }

    fn neighbors<R: Rng>(&self, route: &Vec<usize>, rng: &mut R) -> Vec<TabuMove<RouteMove, MoveKey>> {
        let mut moves = self.moves(route.len());
        if let Some(k) = self.candidate_sample {
            moves = Self::sample(moves, k, rng);
        }
        self.score(route, moves)
    }

    fn apply(&self, route: &mut Vec<usize>, action: &RouteMove) {
        action.apply(route);
    }
}

/// Best visit order found by [`RouteOptimizer::optimize`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizedRoute {
    /// Best order found; starts with the requested start venue.
    pub route: Vec<usize>,
    pub cost: f64,
    /// Cost of the order passed in.
    pub initial_cost: f64,
    pub iterations: usize,
    pub best_iteration: usize,
    pub cost_history: Vec<f64>,
    /// Simulated schedule of `route`.
    pub evaluation: Evaluation,
}

impl OptimizedRoute {
    /// Visited stops of the best route grouped by day.
    pub fn itinerary(&self) -> Itinerary {
        Itinerary::from_evaluation(self.evaluation.clone())
    }
}

/// Checks a caller-supplied route before any search starts.
///
/// `route[0]` must be `start`, every id must index an `n`-venue table, and
/// no id may repeat.
pub fn validate_route(route: &[usize], start: usize, n: usize) -> Result<()> {
    let Some(&first) = route.first() else {
        return Err(ItineraryError::InvalidRoute("route is empty".into()));
    };
    if let Some(id) = route.iter().find(|&&id| id >= n) {
        return Err(ItineraryError::Dimension(format!(
            "venue {id} outside {n}x{n} matrices"
        )));
    }
    if first != start {
        return Err(ItineraryError::InvalidRoute(format!(
            "route must start at venue {start}, starts at {first}"
        )));
    }
    let mut seen = vec![false; n];
    for &id in route {
        if std::mem::replace(&mut seen[id], true) {
            return Err(ItineraryError::InvalidRoute(format!("venue {id} appears twice")));
        }
    }
    Ok(())
}

/// Tabu Search over visit orders, scored by a [`RouteEvaluator`].
///
/// Borrows the shared [`TravelData`]; all mutable search state lives
/// inside a single [`optimize`](Self::optimize) call, so one optimizer can
/// serve concurrent callers.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_itinerary::evaluate::{CalendarWindow, CostWeights};
/// use u_itinerary::matrix::{SquareMatrix, TravelData, Venue};
/// use u_itinerary::tabu::{RouteOptimizer, TabuConfig};
///
/// let venues = (0..4).map(|i| Venue::new(i, format!("bar {i}"))).collect();
/// let dist = SquareMatrix::from_fn(4, |i, j| (i as f64 - j as f64).abs());
/// let time = SquareMatrix::from_fn(4, |i, j| 5.0 * (i as f64 - j as f64).abs());
/// let data = TravelData::new(venues, dist, time).unwrap();
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let window = CalendarWindow::new(
///     day,
///     day,
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
/// );
/// let optimizer =
///     RouteOptimizer::new(&data, window, CostWeights::default(), TabuConfig::default()).unwrap();
/// let result = optimizer.optimize(0, &[0, 3, 1, 2]).unwrap();
/// assert_eq!(result.route[0], 0);
/// assert!(result.cost <= result.initial_cost);
/// ```
#[derive(Debug, Clone)]
pub struct RouteOptimizer<'a> {
    evaluator: RouteEvaluator<'a>,
    config: TabuConfig,
}

impl<'a> RouteOptimizer<'a> {
    /// Creates an optimizer, validating window, weights and search config.
    pub fn new(
        data: &'a TravelData,
        window: CalendarWindow,
        weights: CostWeights,
        config: TabuConfig,
    ) -> Result<Self> {
        config.validate().map_err(ItineraryError::InvalidConfig)?;
        Ok(Self {
            evaluator: RouteEvaluator::new(data, window, weights)?,
            config,
        })
    }

    pub fn evaluator(&self) -> &RouteEvaluator<'a> {
        &self.evaluator
    }

    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Searches for a cheaper order of `route`, keeping `start` first.
    ///
    /// Fails before searching if the route is empty, does not begin with
    /// `start`, repeats a venue, or names a venue outside the matrices.
    #[tracing::instrument(level = "debug", skip_all, fields(start = start, stops = route.len()))]
    pub fn optimize(&self, start: usize, route: &[usize]) -> Result<OptimizedRoute> {
        validate_route(route, start, self.evaluator.data().len())?;

        let problem = RouteProblem::new(&self.evaluator, &self.config);
        let result = TabuRunner::run(&problem, route.to_vec(), &self.config);
        let evaluation = self.evaluator.evaluate(&result.best);

        tracing::info!(
            initial_cost = result.initial_cost,
            best_cost = result.best_cost,
            best_iteration = result.best_iteration,
            dropped = evaluation.violations(),
            "tabu search finished"
        );

        Ok(OptimizedRoute {
            route: result.best,
            cost: result.best_cost,
            initial_cost: result.initial_cost,
            iterations: result.iterations,
            best_iteration: result.best_iteration,
            cost_history: result.cost_history,
            evaluation,
        })
    }
}
