//! CSV file dataset adapter.

use crate::domain::column::resolve;
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};
use crate::domain::observation::{Observation, Quote};
use crate::ports::data_port::DatasetPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

pub const DATE_COLUMN: &str = "Date";

pub struct CsvDatasetAdapter {
    path: PathBuf,
}

/// Header positions of one instrument's two columns.
#[derive(Debug, Clone, Copy)]
struct QuoteColumns {
    level: usize,
    daily_return: usize,
}

#[derive(Debug)]
struct Layout {
    date: usize,
    gold: QuoteColumns,
    sp500: QuoteColumns,
    ten_year: QuoteColumns,
}

impl CsvDatasetAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn layout(headers: &csv::StringRecord) -> Result<Layout, DashboardError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let date = position(DATE_COLUMN).ok_or_else(|| DashboardError::SchemaError {
            column: DATE_COLUMN.to_string(),
        })?;

        let quote_columns = |instrument: Instrument| -> Result<QuoteColumns, DashboardError> {
            let find = |metric: MetricType| {
                let canonical = resolve(instrument, metric);
                let suffix = &canonical.as_str()[instrument.key().len()..];
                instrument
                    .header_prefixes()
                    .iter()
                    .find_map(|prefix| position(&format!("{prefix}{suffix}")))
                    .ok_or_else(|| DashboardError::SchemaError {
                        column: canonical.to_string(),
                    })
            };
            Ok(QuoteColumns {
                level: find(MetricType::Price)?,
                daily_return: find(MetricType::Return)?,
            })
        };

        Ok(Layout {
            date,
            gold: quote_columns(Instrument::Gold)?,
            sp500: quote_columns(Instrument::SP500)?,
            ten_year: quote_columns(Instrument::TenYearTNote)?,
        })
    }

    fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                    .ok()
                    .map(|dt| dt.date())
            })
    }

    fn parse_quote(
        record: &csv::StringRecord,
        columns: QuoteColumns,
        line: u64,
    ) -> Result<Quote, DashboardError> {
        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

        let level_str = cell(columns.level);
        if level_str.is_empty() {
            return Err(DashboardError::data_unavailable(format!(
                "line {line}: empty price/yield value"
            )));
        }
        let level: f64 = level_str.parse().map_err(|e| {
            DashboardError::data_unavailable(format!(
                "line {line}: invalid price/yield value {level_str:?}: {e}"
            ))
        })?;
        if !level.is_finite() {
            return Err(DashboardError::data_unavailable(format!(
                "line {line}: non-finite price/yield value {level_str:?}"
            )));
        }

        let return_str = cell(columns.daily_return);
        let daily_return = if return_str.is_empty() || return_str.eq_ignore_ascii_case("nan") {
            None
        } else {
            let value = return_str.parse::<f64>().map_err(|e| {
                DashboardError::data_unavailable(format!(
                    "line {line}: invalid daily return {return_str:?}: {e}"
                ))
            })?;
            if value.is_infinite() {
                return Err(DashboardError::data_unavailable(format!(
                    "line {line}: non-finite daily return {return_str:?}"
                )));
            }
            Some(value)
        };

        Ok(Quote::new(level, daily_return))
    }
}

impl DatasetPort for CsvDatasetAdapter {
    fn load(&self) -> Result<Arc<Dataset>, DashboardError> {
        let file = File::open(&self.path).map_err(|e| {
            DashboardError::data_unavailable(format!(
                "failed to read {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let mut rdr = csv::Reader::from_reader(file);
        let headers = rdr
            .headers()
            .map_err(|e| DashboardError::data_unavailable(format!("CSV header error: {}", e)))?
            .clone();
        let layout = Self::layout(&headers)?;

        let mut observations = Vec::new();
        for result in rdr.records() {
            let record = result
                .map_err(|e| DashboardError::data_unavailable(format!("CSV parse error: {}", e)))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(layout.date).unwrap_or("");
            let date = Self::parse_date(date_str).ok_or_else(|| {
                DashboardError::data_unavailable(format!("line {line}: invalid date {date_str:?}"))
            })?;

            observations.push(Observation {
                date,
                gold: Self::parse_quote(&record, layout.gold, line)?,
                sp500: Self::parse_quote(&record, layout.sp500, line)?,
                ten_year: Self::parse_quote(&record, layout.ten_year, line)?,
            });
        }

        let dataset = Dataset::new(observations).map_err(|e| match e {
            DashboardError::DataUnavailable { reason } => DashboardError::data_unavailable(
                format!("{}: {}", self.path.display(), reason),
            ),
            other => other,
        })?;

        tracing::info!(
            path = %self.path.display(),
            rows = dataset.len(),
            from = %dataset.min_date(),
            to = %dataset.max_date(),
            "loaded dataset"
        );
        Ok(Arc::new(dataset))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
