//! Core domain types and logic.

pub mod instrument;
pub mod observation;
pub mod dataset;
pub mod column;
pub mod range_filter;
pub mod chart;
pub mod session;
pub mod interactive;
pub mod report;
pub mod config;
pub mod error;
