//! Simulation output: per-stop schedule, evaluation and day-grouped itinerary.

use chrono::{NaiveDate, NaiveDateTime};

/// Simulated timing of one visited stop.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StopSchedule {
    /// Venue id.
    pub venue: usize,
    pub arrival: NaiveDateTime,
    pub departure: NaiveDateTime,
    /// Travel time to the next stop of the route, if there is one.
    pub travel_to_next_minutes: Option<f64>,
}

/// Full result of simulating a route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// `alpha * elapsed_minutes + beta * dropped.len()`.
    pub cost: f64,
    /// Travel plus visit minutes of every leg actually taken.
    pub elapsed_minutes: f64,
    /// Distance between consecutive visited stops.
    pub travel_distance: f64,
    /// The feasible prefix of the route, in visiting order.
    pub stops: Vec<StopSchedule>,
    /// Stops that did not fit in the calendar (time-window violations).
    pub dropped: Vec<usize>,
}

impl Evaluation {
    /// Whether every stop of the route was scheduled.
    pub fn is_feasible(&self) -> bool {
        self.dropped.is_empty()
    }

    /// Number of time-window violations.
    pub fn violations(&self) -> usize {
        self.dropped.len()
    }

    /// Venue ids of the feasible prefix.
    pub fn visited(&self) -> Vec<usize> {
        self.stops.iter().map(|s| s.venue).collect()
    }
}

/// Stops that begin on one calendar day.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItineraryDay {
    pub date: NaiveDate,
    /// 1-based position of this day among the days with visits.
    pub day_number: usize,
    pub stops: Vec<StopSchedule>,
}

/// Visited stops grouped by day, with route totals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
    pub total_distance: f64,
    pub total_duration_minutes: f64,
    pub cost: f64,
}

impl Itinerary {
    /// Groups an evaluation's stops by arrival date.
    ///
    /// Stops are already in chronological order, so a new day starts
    /// whenever the arrival date changes.
    pub fn from_evaluation(evaluation: Evaluation) -> Self {
        let mut days: Vec<ItineraryDay> = Vec::new();
        for stop in evaluation.stops {
            let date = stop.arrival.date();
            match days.last_mut() {
                Some(day) if day.date == date => day.stops.push(stop),
                _ => days.push(ItineraryDay {
                    date,
                    day_number: days.len() + 1,
                    stops: vec![stop],
                }),
            }
        }
        Self {
            days,
            total_distance: evaluation.travel_distance,
            total_duration_minutes: evaluation.elapsed_minutes,
            cost: evaluation.cost,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.days.iter().map(|d| d.stops.len()).sum()
    }

    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// All stops in visiting order.
    pub fn stops(&self) -> impl Iterator<Item = &StopSchedule> {
        self.days.iter().flat_map(|d| d.stops.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(venue: usize, day: u32, hour: u32) -> StopSchedule {
        let arrival = NaiveDate::from_ymd_opt(2025, 11, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        StopSchedule {
            venue,
            arrival,
            departure: arrival + chrono::TimeDelta::hours(1),
            travel_to_next_minutes: Some(10.0),
        }
    }

    #[test]
    fn test_itinerary_groups_by_day() {
        let eval = Evaluation {
            cost: 100.0,
            elapsed_minutes: 210.0,
            travel_distance: 3.5,
            stops: vec![stop(0, 25, 18), stop(4, 25, 20), stop(2, 26, 18)],
            dropped: vec![1],
        };
        assert!(!eval.is_feasible());
        assert_eq!(eval.visited(), vec![0, 4, 2]);

        let it = Itinerary::from_evaluation(eval);
        assert_eq!(it.day_count(), 2);
        assert_eq!(it.stop_count(), 3);
        assert_eq!(it.days[0].day_number, 1);
        assert_eq!(it.days[0].stops.len(), 2);
        assert_eq!(it.days[1].day_number, 2);
        assert_eq!(it.days[1].date, NaiveDate::from_ymd_opt(2025, 11, 26).unwrap());
        assert_eq!(it.stops().map(|s| s.venue).collect::<Vec<_>>(), vec![0, 4, 2]);
        assert!((it.total_duration_minutes - 210.0).abs() < 1e-12);
    }

    #[test]
    fn test_itinerary_empty() {
        let it = Itinerary::from_evaluation(Evaluation {
            cost: 0.0,
            elapsed_minutes: 0.0,
            travel_distance: 0.0,
            stops: vec![],
            dropped: vec![],
        });
        assert_eq!(it.day_count(), 0);
        assert_eq!(it.stop_count(), 0);
    }
}
