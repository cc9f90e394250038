//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::csv_adapter::CsvDatasetAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::svg_chart::render_line_chart_svg;
use crate::domain::chart::ChartSpec;
use crate::domain::column::resolve;
use crate::domain::config::{DashboardConfig, DEFAULT_LOG_LEVEL};
use crate::domain::error::DashboardError;
use crate::domain::instrument::{Instrument, MetricType};
use crate::domain::interactive::interactive_chart;
use crate::domain::session::{Action, InteractiveTab, SessionState};
use crate::ports::data_port::DatasetPort;

#[derive(Parser, Debug)]
#[command(name = "marketdash", about = "Gold, S&P 500 and 10-year Treasury dashboard")]
pub struct Cli {
    /// Log filter when RUST_LOG is unset (overrides the config file)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the web dashboard
    Serve {
        #[arg(short, long)]
        config: PathBuf,
        /// Dataset CSV, overriding [data] path
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Show row count and date range of the dataset
    Info {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render one interactive chart to SVG
    Chart {
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = "gold")]
        instrument: String,
        #[arg(short, long, default_value = "price")]
        metric: String,
        /// First date, YYYY-MM-DD
        #[arg(long)]
        start: Option<String>,
        /// Last date, YYYY-MM-DD
        #[arg(long)]
        end: Option<String>,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Serve { config, data } => run_serve(&config, data, cli.log_level.as_deref()),
        Command::Info { data, config } => {
            init_logging(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            run_info(data.as_deref(), config.as_deref())
        }
        Command::Chart {
            data,
            config,
            instrument,
            metric,
            start,
            end,
            output,
        } => {
            init_logging(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL));
            run_chart(
                data.as_deref(),
                config.as_deref(),
                &instrument,
                &metric,
                start.as_deref(),
                end.as_deref(),
                output.as_deref(),
            )
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Already installed when called twice (tests); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn load_config(path: &Path) -> Result<DashboardConfig, DashboardError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    DashboardConfig::from_config(&adapter)
}

/// `--data` wins; otherwise `[data] path` from `--config`.
pub fn resolve_data_path(
    data: Option<&Path>,
    config: Option<&Path>,
) -> Result<PathBuf, DashboardError> {
    match (data, config) {
        (Some(path), _) => Ok(path.to_path_buf()),
        (None, Some(config)) => Ok(load_config(config)?.data_path),
        (None, None) => Err(DashboardError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        }),
    }
}

pub fn parse_cli_date(value: &str) -> Result<NaiveDate, DashboardError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DashboardError::invalid_range(format!("not a date: {value}")))
}

/// Resolves the selection exactly like the interactive tab and renders it.
pub fn run_chart_pipeline(
    port: &dyn DatasetPort,
    instrument: Instrument,
    metric: MetricType,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<ChartSpec, DashboardError> {
    let dataset = port.load()?;
    let mut session = SessionState::new(&dataset);
    session.apply(Action::SelectTab(InteractiveTab::InteractiveData))?;
    session.apply(Action::SelectInstrument(instrument))?;
    session.apply(Action::SelectMetric(metric))?;

    let picked: Vec<NaiveDate> = [start, end].into_iter().flatten().collect();
    if !picked.is_empty() {
        session.apply(Action::SelectDates(picked))?;
    }

    interactive_chart(&dataset, session.selection())
}

fn run_info(data: Option<&Path>, config: Option<&Path>) -> Result<(), DashboardError> {
    let path = resolve_data_path(data, config)?;
    let dataset = CsvDatasetAdapter::new(path.clone()).load()?;

    println!("Dataset: {}", path.display());
    println!("Rows:    {}", dataset.len());
    println!("From:    {}", dataset.min_date());
    println!("To:      {}", dataset.max_date());
    println!("Columns:");
    for instrument in Instrument::ALL {
        for metric in MetricType::ALL {
            println!("  {}", resolve(instrument, metric));
        }
    }
    Ok(())
}

fn run_chart(
    data: Option<&Path>,
    config: Option<&Path>,
    instrument: &str,
    metric: &str,
    start: Option<&str>,
    end: Option<&str>,
    output: Option<&Path>,
) -> Result<(), DashboardError> {
    let instrument: Instrument = instrument.parse().map_err(|reason| DashboardError::ConfigInvalid {
        section: "cli".into(),
        key: "instrument".into(),
        reason,
    })?;
    let metric: MetricType = metric.parse().map_err(|reason| DashboardError::ConfigInvalid {
        section: "cli".into(),
        key: "metric".into(),
        reason,
    })?;
    let start = start.map(parse_cli_date).transpose()?;
    let end = end.map(parse_cli_date).transpose()?;

    let path = resolve_data_path(data, config)?;
    let port = CsvDatasetAdapter::new(path);
    let chart = run_chart_pipeline(&port, instrument, metric, start, end)?;
    tracing::info!(title = %chart.title, points = chart.points.len(), "chart rendered");

    let svg = render_line_chart_svg(&chart);
    match output {
        Some(path) => {
            fs::write(path, svg)?;
            eprintln!("Wrote {} to {}", chart.title, path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

fn run_serve(
    config_path: &Path,
    data_override: Option<PathBuf>,
    log_level: Option<&str>,
) -> Result<(), DashboardError> {
    let config = load_config(config_path)?;
    init_logging(log_level.unwrap_or(&config.log_level));
    tracing::info!(config = %config_path.display(), "loaded config");

    #[cfg(feature = "web")]
    {
        use crate::adapters::cached_dataset::CachedDatasetPort;
        use crate::adapters::web::{build_router, AppState};
        use std::sync::Arc;

        let data_path = data_override.unwrap_or_else(|| config.data_path.clone());
        let dataset = Arc::new(CachedDatasetPort::new(CsvDatasetAdapter::new(data_path)));

        // Warm the cache; on failure the dashboard still serves its other pages.
        if let Err(e) = dataset.load() {
            tracing::warn!(error = %e, "dataset unavailable at startup");
        }

        let state = AppState {
            dataset,
            static_dir: config.static_dir.clone(),
        };
        let router = build_router(state);
        let addr = config.listen;

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(%addr, "serving dashboard");
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = data_override;
        Err(DashboardError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: "built without the web feature".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_command() {
        let cli = Cli::try_parse_from(["marketdash", "serve", "--config", "dash.ini"]).unwrap();
        assert!(matches!(cli.command, Command::Serve { config, data: None } if config == PathBuf::from("dash.ini")));
    }

    #[test]
    fn parses_chart_command_with_defaults() {
        let cli = Cli::try_parse_from(["marketdash", "chart", "--data", "d.csv"]).unwrap();
        match cli.command {
            Command::Chart {
                instrument,
                metric,
                start,
                end,
                ..
            } => {
                assert_eq!(instrument, "gold");
                assert_eq!(metric, "price");
                assert!(start.is_none() && end.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn data_path_needs_a_source() {
        assert!(matches!(
            resolve_data_path(None, None),
            Err(DashboardError::ConfigMissing { .. })
        ));
        assert_eq!(
            resolve_data_path(Some(Path::new("x.csv")), None).unwrap(),
            PathBuf::from("x.csv")
        );
    }

    #[test]
    fn cli_dates_are_iso() {
        assert_eq!(
            parse_cli_date("2008-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2008, 1, 1).unwrap()
        );
        assert!(matches!(
            parse_cli_date("01/01/2008"),
            Err(DashboardError::InvalidRange { .. })
        ));
    }
}
