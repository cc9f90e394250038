//! Dashboard settings read through [`ConfigPort`].

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::error::DashboardError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub listen: SocketAddr,
    pub static_dir: PathBuf,
    pub log_level: String,
}

impl DashboardConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, DashboardError> {
        let data_path = config
            .get_string("data", "path")
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| DashboardError::ConfigMissing {
                section: "data".into(),
                key: "path".into(),
            })?;

        let listen_str = config
            .get_string("web", "listen")
            .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen = listen_str
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| DashboardError::ConfigInvalid {
                section: "web".into(),
                key: "listen".into(),
                reason: format!("{listen_str:?}: {e}"),
            })?;

        let static_dir = config
            .get_string("web", "static_dir")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string());

        let log_level = config
            .get_string("log", "level")
            .map(|l| l.trim().to_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            return Err(DashboardError::ConfigInvalid {
                section: "log".into(),
                key: "level".into(),
                reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
            });
        }

        Ok(Self {
            data_path: PathBuf::from(data_path.trim()),
            listen,
            static_dir: PathBuf::from(static_dir.trim()),
            log_level,
        })
    }
}
