//! Selection resolver: which dataset column a selection refers to.

use std::fmt;

use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};

/// Name of one field of [`Observation`](crate::domain::observation::Observation).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(transparent))]
pub struct ColumnRef(String);

impl ColumnRef {
    /// Wraps an arbitrary name. Use [`resolve`] for names that are known to exist.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The (instrument, metric) pair this name denotes.
    pub fn field(&self) -> Result<(Instrument, MetricType), DashboardError> {
        Instrument::ALL
            .into_iter()
            .flat_map(|i| MetricType::ALL.into_iter().map(move |m| (i, m)))
            .find(|&(i, m)| resolve(i, m) == *self)
            .ok_or_else(|| DashboardError::UnknownColumn {
                column: self.0.clone(),
            })
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return selects the daily-return series; otherwise the level series,
/// which is a yield for the treasury note.
pub fn resolve(instrument: Instrument, metric: MetricType) -> ColumnRef {
    match metric {
        MetricType::Return => ColumnRef(format!("{} Daily Return", instrument.key())),
        MetricType::Price => ColumnRef(format!("{} {}", instrument.key(), instrument.level_name())),
    }
}
