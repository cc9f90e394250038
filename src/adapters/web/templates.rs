//! HTML templates using Askama.

use askama::Template;

use crate::domain::report::{
    ReportImage, Statistic, JOHANSEN, KENDALL, NORMALITY_P_VALUES, SIGNIFICANCE, SPEARMAN,
};
use crate::domain::session::{InteractiveTab, Page};

pub struct NavLink {
    pub href: String,
    pub label: &'static str,
    pub active: bool,
}

/// Sidebar page links, with `page` marked active.
pub fn nav_links(page: Page) -> Vec<NavLink> {
    [
        ("/", "Main Page", matches!(page, Page::Overview)),
        ("/reflections", "Project Reflections", matches!(page, Page::Reflections)),
        ("/sources", "Data Sources", matches!(page, Page::Sources)),
        (
            "/interactive",
            "Interactive Data / Analysis / Charts",
            matches!(page, Page::Interactive(_)),
        ),
    ]
    .into_iter()
    .map(|(href, label, active)| NavLink {
        href: href.to_string(),
        label,
        active,
    })
    .collect()
}

/// Sub-tab links; empty unless `page` is the interactive page.
pub fn tab_links(page: Page) -> Vec<NavLink> {
    let Page::Interactive(current) = page else {
        return Vec::new();
    };
    InteractiveTab::ALL
        .into_iter()
        .map(|tab| NavLink {
            href: format!("/interactive?tab={}", tab.key()),
            label: tab.label(),
            active: tab == current,
        })
        .collect()
}

/// Page links and sub-tabs. Sent out-of-band with htmx fragments so the
/// active marker and tab list follow the swapped content.
#[derive(Template)]
#[template(path = "sidebar.html")]
pub struct SidebarTemplate<'a> {
    pub nav: &'a [NavLink],
    pub tabs: &'a [NavLink],
    pub oob: bool,
}

pub fn render_sidebar(page: Page, oob: bool) -> Result<String, askama::Error> {
    SidebarTemplate {
        nav: &nav_links(page),
        tabs: &tab_links(page),
        oob,
    }
    .render()
}

#[derive(Template)]
#[template(path = "base.html")]
pub struct BasePage<'a> {
    pub title: &'a str,
    pub sidebar: &'a str,
    pub content: &'a str,
}

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate;

#[derive(Template)]
#[template(path = "reflections.html")]
pub struct ReflectionsTemplate;

pub struct DatasetSummary {
    pub rows: usize,
    pub from: String,
    pub to: String,
}

pub struct TableRow {
    pub date: String,
    pub cells: Vec<String>,
}

#[derive(Template)]
#[template(path = "sources.html")]
pub struct SourcesTemplate<'a> {
    pub source: &'a str,
    pub summary: Option<DatasetSummary>,
    pub load_error: Option<String>,
    pub show_all: bool,
    pub columns: &'a [String],
    pub rows: &'a [TableRow],
}

pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "interactive_data.html")]
pub struct InteractiveDataTemplate<'a> {
    pub instruments: &'a [SelectOption],
    pub metrics: &'a [SelectOption],
    pub start: String,
    pub end: String,
    pub min_date: String,
    pub max_date: String,
    pub notice: Option<String>,
    pub chart_svg: &'a str,
    pub row_count: usize,
}

pub struct CorrelationRow {
    pub label: &'static str,
    pub spearman: f64,
    pub kendall: f64,
}

pub struct JohansenRow {
    pub rank: usize,
    pub eigenvalue: f64,
    pub trace: f64,
    pub critical: [f64; 3],
}

#[derive(Template)]
#[template(path = "analysis.html")]
pub struct AnalysisTemplate<'a> {
    pub normality: &'a [Statistic],
    pub significance: f64,
    pub correlations: Vec<CorrelationRow>,
    pub johansen_rows: Vec<JohansenRow>,
    pub cointegrating_ranks: usize,
}

impl AnalysisTemplate<'static> {
    pub fn from_results() -> Self {
        let correlations = SPEARMAN
            .iter()
            .zip(&KENDALL)
            .map(|(s, k)| CorrelationRow {
                label: s.label,
                spearman: s.value,
                kendall: k.value,
            })
            .collect();
        let johansen_rows = (0..JOHANSEN.trace.len())
            .map(|rank| JohansenRow {
                rank,
                eigenvalue: JOHANSEN.eigenvalues[rank],
                trace: JOHANSEN.trace[rank],
                critical: JOHANSEN.critical[rank],
            })
            .collect();
        Self {
            normality: &NORMALITY_P_VALUES,
            significance: SIGNIFICANCE,
            correlations,
            johansen_rows,
            cointegrating_ranks: JOHANSEN.cointegrating_ranks(),
        }
    }
}

#[derive(Template)]
#[template(path = "charts.html")]
pub struct ChartsTemplate<'a> {
    pub images: &'a [ReportImage],
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_nav_link_is_active() {
        for page in [
            Page::Overview,
            Page::Reflections,
            Page::Sources,
            Page::Interactive(InteractiveTab::Analysis),
        ] {
            assert_eq!(nav_links(page).iter().filter(|l| l.active).count(), 1);
        }
    }

    #[test]
    fn tabs_only_on_interactive_page() {
        assert!(tab_links(Page::Sources).is_empty());
        let tabs = tab_links(Page::Interactive(InteractiveTab::Charts));
        assert_eq!(tabs.len(), 3);
        assert!(tabs[2].active);
        assert_eq!(tabs[2].href, "/interactive?tab=charts");
    }

    #[test]
    fn out_of_band_sidebar_carries_tabs() {
        let html = render_sidebar(Page::Interactive(InteractiveTab::InteractiveData), true).unwrap();
        assert!(html.contains("hx-swap-oob=\"true\""));
        assert!(html.contains("tab=analysis"));
        assert!(html.contains("tab=charts"));

        let html = render_sidebar(Page::Overview, false).unwrap();
        assert!(!html.contains("hx-swap-oob"));
        assert!(!html.contains("Select Tab"));
    }

    #[test]
    fn analysis_lists_every_result() {
        let html = AnalysisTemplate::from_results().render().unwrap();
        assert!(html.contains("5.0869134941937023e-51"));
        assert!(html.contains("-0.8320977905265164"));
        assert!(html.contains("0.4101357525652475"));
        assert!(html.contains("5.43287361"));
        assert!(html.contains("35.4628"));
        assert_eq!(html.matches("<tr><td>r &lt;=").count(), 3);
        assert!(html.contains("no evidence of cointegration"));
    }

    #[test]
    fn error_template_shows_status() {
        let html = ErrorTemplate {
            message: "dataset missing",
            status: 503,
        }
        .render()
        .unwrap();
        assert!(html.contains("503"));
        assert!(html.contains("dataset missing"));
    }
}
