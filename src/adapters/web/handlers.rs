//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use std::sync::Arc;

use crate::adapters::svg_chart::render_line_chart_svg;
use crate::domain::chart::ChartSpec;
use crate::domain::column::resolve;
use crate::domain::dataset::Dataset;
use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};
use crate::domain::interactive::interactive_chart;
use crate::domain::report::REPORT_IMAGES;
use crate::domain::session::{Action, InteractiveTab, Page, SessionState};

use super::templates::{
    render_sidebar, AnalysisTemplate, BasePage, ChartsTemplate, DatasetSummary,
    InteractiveDataTemplate, OverviewTemplate, ReflectionsTemplate, SelectOption,
    SourcesTemplate, TableRow,
};
use super::{is_htmx_request, AppState, WebError};

/// Content plus an out-of-band sidebar for htmx, otherwise the full page layout.
fn respond(headers: &HeaderMap, page: Page, content: String) -> Result<Response, WebError> {
    if is_htmx_request(headers) {
        let mut html = content;
        html.push_str(&render_sidebar(page, true)?);
        return Ok(Html(html).into_response());
    }
    let sidebar = render_sidebar(page, false)?;
    let html = BasePage {
        title: page.title(),
        sidebar: &sidebar,
        content: &content,
    }
    .render()?;
    Ok(Html(html).into_response())
}

pub async fn overview(headers: HeaderMap) -> Result<Response, WebError> {
    respond(&headers, Page::Overview, OverviewTemplate.render()?)
}

pub async fn reflections(headers: HeaderMap) -> Result<Response, WebError> {
    respond(&headers, Page::Reflections, ReflectionsTemplate.render()?)
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct SourcesQuery {
    #[serde(default)]
    pub show_all: bool,
}

fn format_cell(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub async fn sources(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SourcesQuery>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let columns: Vec<String> = Instrument::ALL
        .iter()
        .flat_map(|&i| MetricType::ALL.iter().map(move |&m| resolve(i, m).to_string()))
        .collect();

    // A load failure is reported inline; the rest of the page still renders.
    let (summary, load_error, rows) = match state.dataset.load() {
        Ok(dataset) => {
            let rows = if query.show_all {
                dataset
                    .observations()
                    .iter()
                    .map(|o| TableRow {
                        date: o.date.to_string(),
                        cells: Instrument::ALL
                            .iter()
                            .flat_map(|&i| {
                                MetricType::ALL.iter().map(move |&m| format_cell(o.quote(i).metric(m)))
                            })
                            .collect(),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            let summary = DatasetSummary {
                rows: dataset.len(),
                from: dataset.min_date().to_string(),
                to: dataset.max_date().to_string(),
            };
            (Some(summary), None, rows)
        }
        Err(e) => {
            tracing::warn!(error = %e, "sources page without dataset");
            (None, Some(e.to_string()), Vec::new())
        }
    };

    let source = state.dataset.describe();
    let content = SourcesTemplate {
        source: &source,
        summary,
        load_error,
        show_all: query.show_all,
        columns: &columns,
        rows: &rows,
    }
    .render()?;
    respond(&headers, Page::Sources, content)
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct InteractiveQuery {
    pub tab: Option<String>,
    pub instrument: Option<String>,
    pub metric: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl InteractiveQuery {
    fn tab(&self) -> Result<InteractiveTab, WebError> {
        match self.tab.as_deref().filter(|t| !t.is_empty()) {
            None => Ok(InteractiveTab::default()),
            Some(key) => InteractiveTab::from_key(key)
                .ok_or_else(|| WebError::not_found(format!("no such tab: {key}"))),
        }
    }

    fn actions(&self) -> Result<Vec<Action>, WebError> {
        let mut actions = Vec::new();
        if let Some(s) = self.instrument.as_deref().filter(|s| !s.is_empty()) {
            let instrument: Instrument = s.parse().map_err(WebError::bad_request)?;
            actions.push(Action::SelectInstrument(instrument));
        }
        if let Some(s) = self.metric.as_deref().filter(|s| !s.is_empty()) {
            let metric: MetricType = s.parse().map_err(WebError::bad_request)?;
            actions.push(Action::SelectMetric(metric));
        }
        Ok(actions)
    }

    /// Missing date fields are not picked; an unparseable one is an invalid range.
    fn picked_dates(&self) -> Result<Option<Vec<NaiveDate>>, DashboardError> {
        let picked: Vec<&str> = [self.start.as_deref(), self.end.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if picked.is_empty() {
            return Ok(None);
        }
        picked
            .into_iter()
            .map(|s| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .map_err(|_| DashboardError::invalid_range(format!("not a date: {s}")))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Session state for one request plus the message for a rejected date range.
fn session_for(
    state: &AppState,
    query: &InteractiveQuery,
    tab: InteractiveTab,
) -> Result<(Arc<Dataset>, SessionState, Option<String>), WebError> {
    let dataset = state.dataset.load()?;
    let mut session = SessionState::new(&dataset);
    session.apply(Action::SelectTab(tab))?;
    for action in query.actions()? {
        session.apply(action)?;
    }

    let dates = query.picked_dates().and_then(|picked| match picked {
        Some(dates) => session.apply(Action::SelectDates(dates)),
        None => Ok(()),
    });
    let notice = match dates {
        Ok(()) => None,
        Err(e) if e.is_recoverable() => {
            tracing::info!(error = %e, "keeping previous date range");
            Some(format!("{e}. Showing the previous selection."))
        }
        Err(e) => return Err(e.into()),
    };
    Ok((dataset, session, notice))
}

fn select_options<T: Copy + PartialEq>(
    all: &[T],
    current: T,
    value: fn(T) -> &'static str,
    label: fn(T) -> &'static str,
) -> Vec<SelectOption> {
    all.iter()
        .map(|&item| SelectOption {
            value: value(item),
            label: label(item),
            selected: item == current,
        })
        .collect()
}

pub async fn interactive(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InteractiveQuery>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let tab = query.tab()?;
    let page = Page::Interactive(tab);

    let content = match tab {
        InteractiveTab::Analysis => AnalysisTemplate::from_results().render()?,
        InteractiveTab::Charts => ChartsTemplate {
            images: &REPORT_IMAGES,
        }
        .render()?,
        InteractiveTab::InteractiveData => {
            let (dataset, session, notice) = session_for(&state, &query, tab)?;
            let selection = session.selection();
            let chart = interactive_chart(&dataset, selection)?;
            let svg = render_line_chart_svg(&chart);
            let (min, max) = session.bounds();

            InteractiveDataTemplate {
                instruments: &select_options(
                    &Instrument::ALL,
                    selection.instrument,
                    Instrument::key,
                    Instrument::label,
                ),
                metrics: &select_options(
                    &MetricType::ALL,
                    selection.metric,
                    MetricType::key,
                    MetricType::label,
                ),
                start: selection.range.start().to_string(),
                end: selection.range.end().to_string(),
                min_date: min.to_string(),
                max_date: max.to_string(),
                notice,
                chart_svg: &svg,
                row_count: chart.points.len(),
            }
            .render()?
        }
    };

    respond(&headers, page, content)
}

/// Chart for the query's selection. Unlike the page, an invalid range is an error here.
fn strict_chart(state: &AppState, query: &InteractiveQuery) -> Result<ChartSpec, WebError> {
    let (dataset, session, notice) =
        session_for(state, query, InteractiveTab::InteractiveData)?;
    if let Some(msg) = notice {
        return Err(WebError::bad_request(msg));
    }
    Ok(interactive_chart(&dataset, session.selection())?)
}

pub async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InteractiveQuery>,
) -> Result<Response, WebError> {
    let chart = strict_chart(&state, &query)?;
    Ok((
        [(header::CONTENT_TYPE, "image/svg+xml")],
        render_line_chart_svg(&chart),
    )
        .into_response())
}

pub async fn chart_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InteractiveQuery>,
) -> Result<Json<ChartSpec>, WebError> {
    strict_chart(&state, &query).map(Json)
}

pub async fn not_found() -> WebError {
    WebError::new(StatusCode::NOT_FOUND, "Page not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_cells_render_blank() {
        assert_eq!(format_cell(None), "");
        assert_eq!(format_cell(Some(266.5)), "266.5");
        assert_eq!(format_cell(Some(-0.0096)), "-0.0096");
    }

    #[test]
    fn select_options_mark_current() {
        let options = select_options(
            &Instrument::ALL,
            Instrument::SP500,
            Instrument::key,
            Instrument::label,
        );
        assert_eq!(options.len(), 3);
        let selected: Vec<&str> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["SP500"]);
        assert_eq!(options[1].label, "S&P 500");
    }

    #[test]
    fn query_picks_only_filled_dates() {
        let query = InteractiveQuery {
            start: Some("2008-01-01".into()),
            end: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(
            query.picked_dates().unwrap(),
            Some(vec![NaiveDate::from_ymd_opt(2008, 1, 1).unwrap()])
        );
        assert_eq!(InteractiveQuery::default().picked_dates().unwrap(), None);
    }
}
