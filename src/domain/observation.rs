//! One dated row of the dataset.

use chrono::NaiveDate;

use crate::domain::column::ColumnRef;
use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};

/// Level and daily return of one instrument on one date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    /// Price, or yield for the treasury note.
    pub level: f64,
    /// Absent on the first row of a series.
    pub daily_return: Option<f64>,
}

impl Quote {
    pub fn new(level: f64, daily_return: Option<f64>) -> Self {
        Self {
            level,
            daily_return,
        }
    }

    pub fn metric(&self, metric: MetricType) -> Option<f64> {
        match metric {
            MetricType::Price => Some(self.level),
            MetricType::Return => self.daily_return,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub gold: Quote,
    pub sp500: Quote,
    pub ten_year: Quote,
}

impl Observation {
    pub fn quote(&self, instrument: Instrument) -> &Quote {
        match instrument {
            Instrument::Gold => &self.gold,
            Instrument::SP500 => &self.sp500,
            Instrument::TenYearTNote => &self.ten_year,
        }
    }

    /// Value of the named field. `Ok(None)` is a null cell.
    pub fn value(&self, column: &ColumnRef) -> Result<Option<f64>, DashboardError> {
        let (instrument, metric) = column.field()?;
        Ok(self.quote(instrument).metric(metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::column::resolve;

    fn sample() -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2008, 9, 15).unwrap(),
            gold: Quote::new(780.0, Some(0.025)),
            sp500: Quote::new(1192.7, Some(-0.047)),
            ten_year: Quote::new(3.47, None),
        }
    }

    #[test]
    fn value_reads_each_field() {
        let obs = sample();
        assert_eq!(obs.value(&resolve(Instrument::Gold, MetricType::Price)).unwrap(), Some(780.0));
        assert_eq!(obs.value(&resolve(Instrument::Gold, MetricType::Return)).unwrap(), Some(0.025));
        assert_eq!(obs.value(&resolve(Instrument::SP500, MetricType::Price)).unwrap(), Some(1192.7));
        assert_eq!(obs.value(&resolve(Instrument::SP500, MetricType::Return)).unwrap(), Some(-0.047));
        assert_eq!(obs.value(&resolve(Instrument::TenYearTNote, MetricType::Price)).unwrap(), Some(3.47));
        assert_eq!(obs.value(&resolve(Instrument::TenYearTNote, MetricType::Return)).unwrap(), None);
    }

    #[test]
    fn value_rejects_unknown_column() {
        let err = sample().value(&ColumnRef::new("Silver Price")).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownColumn { column } if column == "Silver Price"));
    }
}
