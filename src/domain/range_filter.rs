//! Inclusive date-range filtering over date-sorted observations.

use chrono::NaiveDate;

use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::observation::Observation;

/// A closed calendar-date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::invalid_range(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Every date the dataset covers.
    pub fn spanning(dataset: &Dataset) -> Self {
        Self {
            start: dataset.min_date(),
            end: dataset.max_date(),
        }
    }

    /// Builds a range from the dates picked in a two-ended date control.
    ///
    /// Exactly two dates are required; a lone date is rejected rather than
    /// guessed at.
    pub fn from_picked(dates: &[NaiveDate]) -> Result<Self, DashboardError> {
        match dates {
            [start, end] => Self::new(*start, *end),
            [_] => Err(DashboardError::invalid_range(
                "select both a start and an end date",
            )),
            [] => Err(DashboardError::invalid_range("no dates selected")),
            _ => Err(DashboardError::invalid_range(format!(
                "expected two dates, got {}",
                dates.len()
            ))),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The contiguous run of `observations` inside the range. Input must be
    /// sorted by date.
    pub fn slice<'a>(&self, observations: &'a [Observation]) -> &'a [Observation] {
        let lo = observations.partition_point(|o| o.date < self.start);
        let hi = observations.partition_point(|o| o.date <= self.end);
        &observations[lo..hi.max(lo)]
    }
}

/// Rows of `observations` with `start <= date <= end`, in their original order.
pub fn filter(
    observations: &[Observation],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<&[Observation], DashboardError> {
    let range = DateRange::new(start, end)?;
    Ok(range.slice(observations))
}
