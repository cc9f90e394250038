//! View renderer: projects filtered rows onto a line-chart specification.

use chrono::NaiveDate;

use crate::domain::column::ColumnRef;
use crate::domain::error::DashboardError;
use crate::domain::observation::Observation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
#[cfg_attr(feature = "web", serde(rename_all = "lowercase"))]
pub enum ChartKind {
    Line,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub struct ChartPoint {
    pub date: NaiveDate,
    /// `None` draws as a gap.
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "web", derive(serde::Serialize))]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_field: ColumnRef,
    pub points: Vec<ChartPoint>,
}

impl ChartSpec {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max) over non-null values.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }
}

pub fn chart_title(column: &ColumnRef) -> String {
    format!("{column} Trend")
}

/// Line chart of `column` against date over `rows`.
pub fn render(rows: &[Observation], column: &ColumnRef) -> Result<ChartSpec, DashboardError> {
    let (instrument, metric) = column.field()?;

    let points = rows
        .iter()
        .map(|o| ChartPoint {
            date: o.date,
            value: o.quote(instrument).metric(metric),
        })
        .collect();

    Ok(ChartSpec {
        kind: ChartKind::Line,
        title: chart_title(column),
        x_field: "Date".to_string(),
        y_field: column.clone(),
        points,
    })
}
