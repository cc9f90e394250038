#![allow(dead_code)]

use chrono::NaiveDate;
use marketdash::domain::dataset::Dataset;
use marketdash::domain::error::DashboardError;
pub use marketdash::domain::observation::{Observation, Quote};
use marketdash::ports::data_port::DatasetPort;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const CSV_HEADER: &str = "Date,Gold Price,Gold Daily Return,SP500 Price,SP500 Daily Return,TenYearTNote Yield,TenYearTNote Daily Return";

/// In-memory dataset source that counts loads, or always fails.
pub struct MockDatasetPort {
    pub dataset: Option<Arc<Dataset>>,
    pub loads: AtomicUsize,
}

impl MockDatasetPort {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset: Some(Arc::new(dataset)),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            dataset: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl DatasetPort for MockDatasetPort {
    fn load(&self) -> Result<Arc<Dataset>, DashboardError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.dataset
            .clone()
            .ok_or_else(|| DashboardError::data_unavailable("mock dataset is missing"))
    }

    fn describe(&self) -> String {
        "mock".to_string()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// One row per calendar day from `start` to `end` inclusive. Levels climb by
/// one per day; returns are null on the first row.
pub fn daily_observations(start: &str, end: &str) -> Vec<Observation> {
    let start = parse_date(start);
    let end = parse_date(end);
    start
        .iter_days()
        .take_while(|d| *d <= end)
        .enumerate()
        .map(|(i, d)| {
            let ret = if i == 0 { None } else { Some(0.001) };
            Observation {
                date: d,
                gold: Quote::new(250.0 + i as f64, ret),
                sp500: Quote::new(1200.0 + i as f64, ret),
                ten_year: Quote::new(5.0 - i as f64 * 0.0001, ret),
            }
        })
        .collect()
}

pub fn daily_dataset(start: &str, end: &str) -> Dataset {
    Dataset::new(daily_observations(start, end)).unwrap()
}

fn cell(v: Option<f64>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

/// Writes `rows` as a dataset CSV into `dir` and returns its path.
pub fn write_dataset_csv(dir: &Path, rows: &[Observation]) -> PathBuf {
    let mut content = format!("{CSV_HEADER}\n");
    for o in rows {
        content.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            o.date,
            o.gold.level,
            cell(o.gold.daily_return),
            o.sp500.level,
            cell(o.sp500.daily_return),
            o.ten_year.level,
            cell(o.ten_year.daily_return),
        ));
    }
    let path = dir.join("final_data.csv");
    std::fs::write(&path, content).unwrap();
    path
}
