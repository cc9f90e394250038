//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod cached_dataset;
pub mod file_config_adapter;
pub mod svg_chart;
#[cfg(feature = "web")]
pub mod web;
