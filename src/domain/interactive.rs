//! The interactive-data pass: resolve the column, filter by date, render.

use crate::domain::chart::{render, ChartSpec};
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::session::Selection;

/// One synchronous pass from a selection to a chart.
pub fn interactive_chart(dataset: &Dataset, selection: &Selection) -> Result<ChartSpec, DashboardError> {
    let column = selection.column();
    let rows = selection.range.slice(dataset.observations());
    tracing::debug!(
        column = %column,
        start = %selection.range.start(),
        end = %selection.range.end(),
        rows = rows.len(),
        "rendering interactive chart"
    );
    render(rows, &column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instrument::{Instrument, MetricType};
    use crate::domain::observation::{Observation, Quote};
    use crate::domain::range_filter::DateRange;
    use chrono::NaiveDate;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn charts_only_the_selected_window() {
        let rows = (0..10)
            .map(|i| Observation {
                date: d("2008-12-26") + chrono::Duration::days(i),
                gold: Quote::new(860.0 + i as f64, None),
                sp500: Quote::new(870.0, None),
                ten_year: Quote::new(2.2, None),
            })
            .collect();
        let dataset = Dataset::new(rows).unwrap();
        let selection = Selection {
            instrument: Instrument::Gold,
            metric: MetricType::Price,
            range: DateRange::new(d("2009-01-01"), d("2009-01-03")).unwrap(),
        };

        let spec = interactive_chart(&dataset, &selection).unwrap();
        assert_eq!(spec.title, "Gold Price Trend");
        assert_eq!(spec.points.len(), 3);
        assert_eq!(spec.points[0].value, Some(866.0));
        assert_eq!(spec.date_range(), Some((d("2009-01-01"), d("2009-01-03"))));
    }
}
