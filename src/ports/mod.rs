//! Port traits (hexagonal architecture boundaries).

pub mod data_port;
pub mod config_port;
