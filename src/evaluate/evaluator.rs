//! Timed walk of a visit order through the calendar.
//!
//! # Algorithm
//!
//! A clock starts at the window's start instant. For each stop:
//!
//! 1. before opening: wait until opening (free)
//! 2. after closing: jump to the next day's opening, or stop the walk if
//!    no day is left; the remaining stops are dropped
//! 3. arrive, stay `visit_minutes`
//! 4. travel to the next stop; travel and visit minutes are charged
//!
//! `cost = alpha * charged minutes + beta * dropped stops`.

use chrono::{NaiveDateTime, TimeDelta};

use super::config::{CalendarWindow, CostWeights};
use super::types::{Evaluation, Itinerary, StopSchedule};
use crate::error::{ItineraryError, Result};
use crate::matrix::TravelData;

/// Scores visit orders against a calendar window.
///
/// Holds a shared borrow of the travel data; building one evaluator per
/// run is cheap.
#[derive(Debug, Clone)]
pub struct RouteEvaluator<'a> {
    data: &'a TravelData,
    window: CalendarWindow,
    weights: CostWeights,
}

/// Totals of one walk.
struct Walk {
    elapsed_minutes: f64,
    distance: f64,
    visited: usize,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator, validating window and weights.
    pub fn new(data: &'a TravelData, window: CalendarWindow, weights: CostWeights) -> Result<Self> {
        window.validate().map_err(ItineraryError::InvalidWindow)?;
        weights.validate().map_err(ItineraryError::InvalidConfig)?;
        Ok(Self {
            data,
            window,
            weights,
        })
    }

    pub fn data(&self) -> &'a TravelData {
        self.data
    }

    pub fn window(&self) -> &CalendarWindow {
        &self.window
    }

    pub fn weights(&self) -> CostWeights {
        self.weights
    }

    /// Checks that every id in `route` indexes the travel matrices.
    pub fn check_route(&self, route: &[usize]) -> Result<()> {
        let n = self.data.len();
        match route.iter().find(|&&id| id >= n) {
            Some(id) => Err(ItineraryError::Dimension(format!(
                "venue {id} outside {n}x{n} matrices"
            ))),
            None => Ok(()),
        }
    }

    /// Cost of `route`. Does not allocate.
    ///
    /// Ids must be in range (see [`check_route`](Self::check_route)).
    pub fn cost(&self, route: &[usize]) -> f64 {
        let walk = self.walk(route, |_| {});
        self.score(&walk, route.len())
    }

    /// Simulates `route` and records the schedule of its feasible prefix.
    pub fn evaluate(&self, route: &[usize]) -> Evaluation {
        let mut stops = Vec::with_capacity(route.len());
        let walk = self.walk(route, |stop| stops.push(stop));
        Evaluation {
            cost: self.score(&walk, route.len()),
            elapsed_minutes: walk.elapsed_minutes,
            travel_distance: walk.distance,
            stops,
            dropped: route[walk.visited..].to_vec(),
        }
    }

    /// Simulates `route` and groups the visited stops by day.
    pub fn itinerary(&self, route: &[usize]) -> Itinerary {
        Itinerary::from_evaluation(self.evaluate(route))
    }

    fn score(&self, walk: &Walk, len: usize) -> f64 {
        let dropped = (len - walk.visited) as f64;
        self.weights.alpha * walk.elapsed_minutes + self.weights.beta * dropped
    }

    fn walk(&self, route: &[usize], mut on_stop: impl FnMut(StopSchedule)) -> Walk {
        let visit = self.window.visit_duration();
        let visit_minutes = self.window.visit_minutes as f64;
        let time = self.data.time();

        let mut clock = self.window.start;
        let mut elapsed_minutes = 0.0;
        let mut distance = 0.0;
        let mut leg_distance = 0.0;

        for (pos, &venue) in route.iter().enumerate() {
            let Some(arrival) = self.open_slot(clock) else {
                return Walk {
                    elapsed_minutes,
                    distance,
                    visited: pos,
                };
            };
            let Some(departure) = arrival.checked_add_signed(visit) else {
                return Walk {
                    elapsed_minutes,
                    distance,
                    visited: pos,
                };
            };
            distance += leg_distance;
            let next = route.get(pos + 1).copied();
            let travel = next.map(|next| time.get(venue, next));

            on_stop(StopSchedule {
                venue,
                arrival,
                departure,
                travel_to_next_minutes: travel,
            });

            if let (Some(next), Some(travel)) = (next, travel) {
                // unreachable leg, or one past the representable date range
                let Some(next_clock) = minutes(travel).and_then(|d| departure.checked_add_signed(d))
                else {
                    return Walk {
                        elapsed_minutes,
                        distance,
                        visited: pos + 1,
                    };
                };
                clock = next_clock;
                elapsed_minutes += visit_minutes + travel;
                leg_distance = self.data.distance().get(venue, next);
            }
        }

        Walk {
            elapsed_minutes,
            distance,
            visited: route.len(),
        }
    }

    /// Earliest instant at or after `clock` inside an opening window, or
    /// `None` when the calendar is exhausted.
    fn open_slot(&self, clock: NaiveDateTime) -> Option<NaiveDateTime> {
        let w = &self.window;
        let today = clock.date();
        if today > w.end_date {
            return None;
        }
        let time_of_day = clock.time();
        if time_of_day < w.opening {
            return Some(today.and_time(w.opening));
        }
        if time_of_day > w.closing {
            let tomorrow = today.succ_opt()?;
            if tomorrow > w.end_date {
                return None;
            }
            return Some(tomorrow.and_time(w.opening));
        }
        Some(clock)
    }
}

/// `None` for non-finite or unrepresentable durations.
fn minutes(m: f64) -> Option<TimeDelta> {
    let ms = (m * 60_000.0).round();
    if !ms.is_finite() || ms.abs() >= i64::MAX as f64 {
        return None;
    }
    TimeDelta::try_milliseconds(ms as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{SquareMatrix, Venue};
    use chrono::{NaiveDate, NaiveTime};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        d(day).and_time(t(h, m))
    }

    /// `n` venues, uniform travel time and unit distance between distinct venues.
    fn uniform(n: usize, travel: f64) -> TravelData {
        let venues = (0..n).map(|i| Venue::new(i, format!("bar {i}"))).collect();
        let dist = SquareMatrix::from_fn(n, |i, j| if i == j { 0.0 } else { 1.0 });
        let time = SquareMatrix::from_fn(n, |i, j| if i == j { 0.0 } else { travel });
        TravelData::new(venues, dist, time).unwrap()
    }

    fn evening(first: u32, last: u32) -> CalendarWindow {
        CalendarWindow::new(d(first), d(last), t(18, 0), t(23, 0))
    }

    #[test]
    fn test_single_evening_three_stops() {
        let data = uniform(3, 10.0);
        let ev = RouteEvaluator::new(&data, evening(15, 15), CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1, 2]);

        let arrivals: Vec<_> = eval.stops.iter().map(|s| s.arrival).collect();
        let departures: Vec<_> = eval.stops.iter().map(|s| s.departure).collect();
        assert_eq!(arrivals, vec![at(15, 18, 0), at(15, 19, 10), at(15, 20, 20)]);
        assert_eq!(departures, vec![at(15, 19, 0), at(15, 20, 10), at(15, 21, 20)]);
        assert!(eval.is_feasible());
        assert_eq!(eval.violations(), 0);
        assert!((eval.elapsed_minutes - 140.0).abs() < 1e-9);
        assert!((eval.cost - 140.0).abs() < 1e-9);
        assert!((eval.travel_distance - 2.0).abs() < 1e-9);
        assert_eq!(eval.stops[0].travel_to_next_minutes, Some(10.0));
        assert_eq!(eval.stops[2].travel_to_next_minutes, None);
    }

    #[test]
    fn test_early_arrival_waits_for_opening() {
        let data = uniform(2, 10.0);
        let window = evening(15, 15).with_start(at(15, 16, 30));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1]);

        assert_eq!(eval.stops[0].arrival, at(15, 18, 0));
        assert_eq!(eval.stops[1].arrival, at(15, 19, 10));
        assert!(eval.is_feasible());
        // waiting is not charged
        assert!((eval.cost - 70.0).abs() < 1e-9);
    }

    #[test]
    fn test_arrival_at_closing_is_allowed() {
        let data = uniform(2, 0.0);
        let window = evening(15, 15).with_start(at(15, 22, 0));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1]);
        assert_eq!(eval.stops[1].arrival, at(15, 23, 0));
        assert!(eval.is_feasible());
    }

    #[test]
    fn test_rolls_over_to_next_day() {
        let data = uniform(4, 10.0);
        let window = CalendarWindow::new(d(15), d(16), t(18, 0), t(20, 0));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1, 2, 3]);

        assert!(eval.is_feasible());
        assert_eq!(eval.stops[2].arrival, at(16, 18, 0));
        assert_eq!(eval.stops[3].arrival, at(16, 19, 10));
        // the overnight jump is not charged
        assert!((eval.elapsed_minutes - 210.0).abs() < 1e-9);

        let it = ev.itinerary(&[0, 1, 2, 3]);
        assert_eq!(it.day_count(), 2);
        assert_eq!(it.days[0].stops.len(), 2);
        assert_eq!(it.days[1].stops.len(), 2);
    }

    #[test]
    fn test_past_midnight_waits_for_next_opening() {
        let data = uniform(2, 40.0);
        let window = evening(15, 16).with_start(at(15, 22, 50));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1]);
        // leave 23:50, arrive 00:30, wait until 18:00
        assert_eq!(eval.stops[1].arrival, at(16, 18, 0));
        assert!(eval.is_feasible());
    }

    #[test]
    fn test_past_midnight_after_last_day_truncates() {
        let data = uniform(2, 40.0);
        let window = evening(15, 15).with_start(at(15, 22, 50));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1]);
        assert_eq!(eval.dropped, vec![1]);
    }

    #[test]
    fn test_truncates_when_calendar_exhausted() {
        let data = uniform(4, 10.0);
        let window = CalendarWindow::new(d(15), d(15), t(18, 0), t(20, 0));
        let ev = RouteEvaluator::new(&data, window, CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1, 2, 3]);

        assert_eq!(eval.visited(), vec![0, 1]);
        assert_eq!(eval.dropped, vec![2, 3]);
        // two legs charged, two stops penalized
        assert!((eval.elapsed_minutes - 140.0).abs() < 1e-9);
        assert!((eval.cost - (140.0 + 2.0 * 25.0)).abs() < 1e-9);
        assert!((ev.cost(&[0, 1, 2, 3]) - eval.cost).abs() < 1e-12);
    }

    #[test]
    fn test_first_leg_beyond_calendar_drops_everything_after_start() {
        let data = uniform(4, 10_000.0);
        let ev = RouteEvaluator::new(&data, evening(15, 16), CostWeights::default()).unwrap();
        let eval = ev.evaluate(&[0, 1, 2, 3]);
        assert_eq!(eval.visited(), vec![0]);
        assert_eq!(eval.violations(), 3);
    }

    #[test]
    fn test_unreachable_leg_truncates() {
        let venues = (0..3).map(|i| Venue::new(i, "v")).collect();
        let dist = SquareMatrix::from_fn(3, |_, _| 1.0);
        let time = SquareMatrix::from_fn(3, |i, j| if (i, j) == (1, 2) { f64::INFINITY } else { 5.0 });
        let data = TravelData::new(venues, dist, time).unwrap();
        let ev = RouteEvaluator::new(&data, evening(15, 16), CostWeights::default()).unwrap();

        let eval = ev.evaluate(&[0, 1, 2]);
        assert_eq!(eval.dropped, vec![2]);
        assert!(eval.cost.is_finite());
        assert!(ev.evaluate(&[0, 2, 1]).is_feasible());
    }

    #[test]
    fn test_huge_finite_leg_truncates() {
        for huge in [1.0e12, f64::MAX] {
            let venues = (0..3).map(|i| Venue::new(i, "v")).collect();
            let dist = SquareMatrix::from_fn(3, |_, _| 1.0);
            let time = SquareMatrix::from_fn(3, |i, j| if (i, j) == (0, 2) { huge } else { 5.0 });
            let data = TravelData::new(venues, dist, time).unwrap();
            let ev = RouteEvaluator::new(&data, evening(15, 16), CostWeights::default()).unwrap();

            let eval = ev.evaluate(&[0, 2, 1]);
            assert_eq!(eval.visited(), vec![0]);
            assert_eq!(eval.dropped, vec![2, 1]);
            assert!(eval.cost.is_finite());
            assert!((ev.cost(&[0, 2, 1]) - eval.cost).abs() < 1e-12);
            assert!(ev.evaluate(&[0, 1, 2]).is_feasible());
        }
    }

    #[test]
    fn test_accessors_expose_construction_inputs() {
        let data = uniform(3, 10.0);
        let weights = CostWeights::default().with_beta(40.0);
        let ev = RouteEvaluator::new(&data, evening(15, 16), weights).unwrap();
        assert_eq!(ev.data().len(), 3);
        assert_eq!(ev.window().end_date, d(16));
        assert_eq!(ev.weights().beta, 40.0);
    }

    #[test]
    fn test_empty_route_costs_nothing() {
        let data = uniform(3, 10.0);
        let ev = RouteEvaluator::new(&data, evening(15, 15), CostWeights::default()).unwrap();
        assert_eq!(ev.cost(&[]), 0.0);
        let eval = ev.evaluate(&[]);
        assert!(eval.stops.is_empty());
        assert!(eval.dropped.is_empty());
    }

    #[test]
    fn test_weights_scale_terms() {
        let data = uniform(4, 10.0);
        let window = CalendarWindow::new(d(15), d(15), t(18, 0), t(20, 0));
        let weights = CostWeights::default().with_alpha(0.5).with_beta(100.0);
        let ev = RouteEvaluator::new(&data, window, weights).unwrap();
        assert!((ev.cost(&[0, 1, 2, 3]) - (70.0 + 200.0)).abs() < 1e-9);
    }

    #[test]
    fn test_new_rejects_bad_window() {
        let data = uniform(2, 10.0);
        let window = CalendarWindow::new(d(15), d(15), t(23, 0), t(18, 0));
        assert!(matches!(
            RouteEvaluator::new(&data, window, CostWeights::default()),
            Err(ItineraryError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_check_route_out_of_range() {
        let data = uniform(3, 10.0);
        let ev = RouteEvaluator::new(&data, evening(15, 15), CostWeights::default()).unwrap();
        assert!(ev.check_route(&[0, 2, 1]).is_ok());
        assert!(matches!(ev.check_route(&[0, 3]), Err(ItineraryError::Dimension(_))));
    }
}
