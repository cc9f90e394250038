//! Per-session UI state: active page, interactive sub-tab and chart selection.

use chrono::NaiveDate;

use crate::domain::column::{resolve, ColumnRef};
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};
use crate::domain::range_filter::DateRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractiveTab {
    #[default]
    InteractiveData,
    Analysis,
    Charts,
}

impl InteractiveTab {
    pub const ALL: [InteractiveTab; 3] = [
        InteractiveTab::InteractiveData,
        InteractiveTab::Analysis,
        InteractiveTab::Charts,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InteractiveTab::InteractiveData => "data",
            InteractiveTab::Analysis => "analysis",
            InteractiveTab::Charts => "charts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InteractiveTab::InteractiveData => "Interactive Data",
            InteractiveTab::Analysis => "Analysis",
            InteractiveTab::Charts => "Charts",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// Navigation target. Only the interactive page carries a sub-tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Overview,
    Reflections,
    Sources,
    Interactive(InteractiveTab),
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Overview => "Financial Analysis Project",
            Page::Reflections => "Project Reflections",
            Page::Sources => "Data Sources",
            Page::Interactive(tab) => tab.label(),
        }
    }
}

/// What the interactive chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub instrument: Instrument,
    pub metric: MetricType,
    pub range: DateRange,
}

impl Selection {
    /// Gold price over the full dataset.
    pub fn default_for(dataset: &Dataset) -> Self {
        Self {
            instrument: Instrument::Gold,
            metric: MetricType::Price,
            range: DateRange::spanning(dataset),
        }
    }

    pub fn column(&self) -> ColumnRef {
        resolve(self.instrument, self.metric)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Page),
    SelectTab(InteractiveTab),
    SelectInstrument(Instrument),
    SelectMetric(MetricType),
    /// Dates picked in the range control, in pick order.
    SelectDates(Vec<NaiveDate>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    page: Page,
    selection: Selection,
    bounds: (NaiveDate, NaiveDate),
}

impl SessionState {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            page: Page::default(),
            selection: Selection::default_for(dataset),
            bounds: (dataset.min_date(), dataset.max_date()),
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        self.bounds
    }

    /// Applies one user action. A rejected action leaves the state untouched.
    pub fn apply(&mut self, action: Action) -> Result<(), DashboardError> {
        match action {
            Action::Navigate(page) => self.page = page,
            Action::SelectTab(tab) => {
                // Tabs only exist on the interactive page; picking one navigates there.
                self.page = Page::Interactive(tab);
            }
            Action::SelectInstrument(instrument) => self.selection.instrument = instrument,
            Action::SelectMetric(metric) => self.selection.metric = metric,
            Action::SelectDates(dates) => {
                let range = DateRange::from_picked(&dates)?;
                self.check_bounds(&range)?;
                self.selection.range = range;
            }
        }
        Ok(())
    }

    fn check_bounds(&self, range: &DateRange) -> Result<(), DashboardError> {
        let (min, max) = self.bounds;
        if range.start() < min || range.end() > max {
            return Err(DashboardError::invalid_range(format!(
                "dates must lie between {min} and {max}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::{Observation, Quote};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dataset() -> Dataset {
        let rows = ["2001-01-02", "2010-06-01", "2019-12-31"]
            .iter()
            .map(|s| Observation {
                date: d(s),
                gold: Quote::new(270.0, None),
                sp500: Quote::new(1300.0, None),
                ten_year: Quote::new(5.0, None),
            })
            .collect();
        Dataset::new(rows).unwrap()
    }

    #[test]
    fn starts_on_overview_with_full_range() {
        let state = SessionState::new(&dataset());
        assert_eq!(state.page(), Page::Overview);
        assert_eq!(state.selection().instrument, Instrument::Gold);
        assert_eq!(state.selection().metric, MetricType::Price);
        assert_eq!(state.selection().range.start(), d("2001-01-02"));
        assert_eq!(state.selection().range.end(), d("2019-12-31"));
        assert_eq!(state.selection().column().as_str(), "Gold Price");
    }

    #[test]
    fn navigation_moves_between_pages() {
        let mut state = SessionState::new(&dataset());
        state.apply(Action::Navigate(Page::Sources)).unwrap();
        assert_eq!(state.page(), Page::Sources);
        state.apply(Action::SelectTab(InteractiveTab::Charts)).unwrap();
        assert_eq!(state.page(), Page::Interactive(InteractiveTab::Charts));
        state.apply(Action::Navigate(Page::Overview)).unwrap();
        assert_eq!(state.page(), Page::Overview);
    }

    #[test]
    fn selection_changes_update_column() {
        let mut state = SessionState::new(&dataset());
        state.apply(Action::SelectInstrument(Instrument::TenYearTNote)).unwrap();
        assert_eq!(state.selection().column().as_str(), "TenYearTNote Yield");
        state.apply(Action::SelectMetric(MetricType::Return)).unwrap();
        assert_eq!(state.selection().column().as_str(), "TenYearTNote Daily Return");
    }

    #[test]
    fn valid_dates_replace_range() {
        let mut state = SessionState::new(&dataset());
        state
            .apply(Action::SelectDates(vec![d("2008-01-01"), d("2009-12-31")]))
            .unwrap();
        assert_eq!(state.selection().range.start(), d("2008-01-01"));
        assert_eq!(state.selection().range.end(), d("2009-12-31"));
    }

    #[test]
    fn rejected_dates_keep_previous_selection() {
        let mut state = SessionState::new(&dataset());
        let before = state.clone();

        let err = state
            .apply(Action::SelectDates(vec![d("2009-12-31"), d("2008-01-01")]))
            .unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(state, before);

        assert!(state.apply(Action::SelectDates(vec![d("2008-01-01")])).is_err());
        assert_eq!(state, before);

        assert!(
            state
                .apply(Action::SelectDates(vec![d("1990-01-01"), d("2009-12-31")]))
                .is_err()
        );
        assert_eq!(state, before);
    }

    #[test]
    fn tab_keys_round_trip() {
        for tab in InteractiveTab::ALL {
            assert_eq!(InteractiveTab::from_key(tab.key()), Some(tab));
        }
        assert_eq!(InteractiveTab::from_key("nope"), None);
    }

    #[test]
    fn page_titles() {
        assert_eq!(Page::default().title(), "Financial Analysis Project");
        assert_eq!(Page::Reflections.title(), "Project Reflections");
        assert_eq!(Page::Sources.title(), "Data Sources");
        assert_eq!(
            Page::Interactive(InteractiveTab::InteractiveData).title(),
            "Interactive Data"
        );
        assert_eq!(Page::Interactive(InteractiveTab::Charts).title(), "Charts");
    }
}
