//! The loaded, immutable table of observations.

use chrono::NaiveDate;

use crate::domain::error::DashboardError;
use crate::domain::observation::Observation;

/// Observations sorted by date, dates unique, at least one row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(mut observations: Vec<Observation>) -> Result<Self, DashboardError> {
        if observations.is_empty() {
            return Err(DashboardError::data_unavailable("dataset has no rows"));
        }

        observations.sort_by_key(|o| o.date);
        if let Some(pair) = observations.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(DashboardError::data_unavailable(format!(
                "duplicate date {}",
                pair[0].date
            )));
        }

        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false: construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn min_date(&self) -> NaiveDate {
        self.observations[0].date
    }

    pub fn max_date(&self) -> NaiveDate {
        self.observations[self.observations.len() - 1].date
    }
}

impl AsRef<[Observation]> for Dataset {
    fn as_ref(&self) -> &[Observation] {
        &self.observations
    }
}
