//! Calendar window and cost weights.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// The calendar a route is simulated against.
///
/// Every day in `[start.date(), end_date]` is open from `opening` to
/// `closing`, and every visit lasts `visit_minutes`.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use u_itinerary::evaluate::CalendarWindow;
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let window = CalendarWindow::new(
///     day,
///     day,
///     NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(23, 0, 0).unwrap(),
/// )
/// .with_visit_minutes(60);
/// assert!(window.validate().is_ok());
/// assert_eq!(window.start, day.and_hms_opt(18, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarWindow {
    /// Instant the first visit may begin.
    pub start: NaiveDateTime,
    /// Last calendar day on which a visit may begin.
    pub end_date: NaiveDate,
    /// Daily opening time.
    pub opening: NaiveTime,
    /// Daily closing time. A stop reached after this is pushed to the next day.
    pub closing: NaiveTime,
    /// Duration of every visit, in minutes.
    pub visit_minutes: i64,
}

impl CalendarWindow {
    /// Creates a window starting at `start_date` opening time, with the
    /// default one-hour visit.
    pub fn new(
        start_date: NaiveDate,
        end_date: NaiveDate,
        opening: NaiveTime,
        closing: NaiveTime,
    ) -> Self {
        Self {
            start: start_date.and_time(opening),
            end_date,
            opening,
            closing,
            visit_minutes: 60,
        }
    }

    /// Overrides the start instant.
    pub fn with_start(mut self, start: NaiveDateTime) -> Self {
        self.start = start;
        self
    }

    /// Sets the visit duration.
    pub fn with_visit_minutes(mut self, minutes: i64) -> Self {
        self.visit_minutes = minutes;
        self
    }

    pub fn visit_duration(&self) -> TimeDelta {
        TimeDelta::minutes(self.visit_minutes)
    }

    /// Closing time of the last day: the latest instant a visit may begin.
    pub fn last_instant(&self) -> NaiveDateTime {
        self.end_date.and_time(self.closing)
    }

    /// Validates the window.
    pub fn validate(&self) -> Result<(), String> {
        if self.opening >= self.closing {
            return Err(format!(
                "opening time {} must be before closing time {}",
                self.opening, self.closing
            ));
        }
        if self.start > self.last_instant() {
            return Err(format!(
                "start {} is after the end of the range {}",
                self.start,
                self.last_instant()
            ));
        }
        if !(0..=24 * 60).contains(&self.visit_minutes) {
            return Err(format!(
                "visit_minutes must be within one day, got {}",
                self.visit_minutes
            ));
        }
        Ok(())
    }
}

/// Weights of the two cost terms.
///
/// `cost = alpha * minutes consumed + beta * dropped stops`. Raising `beta`
/// relative to `alpha` makes the search favour routes that fit the calendar
/// over routes that merely travel less.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostWeights {
    /// Weight per minute of travel and visit time.
    pub alpha: f64,
    /// Weight per stop that could not be scheduled.
    pub beta: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 25.0,
        }
    }
}

impl CostWeights {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Validates the weights.
    pub fn validate(&self) -> Result<(), String> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(format!("alpha must be finite and non-negative, got {}", self.alpha));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(format!("beta must be finite and non-negative, got {}", self.beta));
        }
        Ok(())
    }
}
