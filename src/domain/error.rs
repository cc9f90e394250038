//! Domain error types.

/// Top-level error type for marketdash.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("data unavailable: {reason}")]
    DataUnavailable { reason: String },

    #[error("schema error: missing column {column:?}")]
    SchemaError { column: String },

    #[error("invalid date range: {reason}")]
    InvalidRange { reason: String },

    #[error("unknown column {column:?}")]
    UnknownColumn { column: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DashboardError {
    pub fn data_unavailable(reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            reason: reason.into(),
        }
    }

    pub fn invalid_range(reason: impl Into<String>) -> Self {
        Self::InvalidRange {
            reason: reason.into(),
        }
    }

    /// True for errors the user can fix by changing their selection.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }
}

impl From<&DashboardError> for std::process::ExitCode {
    fn from(err: &DashboardError) -> Self {
        let code: u8 = match err {
            DashboardError::Io(_) => 1,
            DashboardError::ConfigParse { .. }
            | DashboardError::ConfigMissing { .. }
            | DashboardError::ConfigInvalid { .. } => 2,
            DashboardError::DataUnavailable { .. } | DashboardError::SchemaError { .. } => 3,
            DashboardError::InvalidRange { .. } => 4,
            DashboardError::UnknownColumn { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_invalid_range_is_recoverable() {
        assert!(DashboardError::invalid_range("start after end").is_recoverable());
        assert!(!DashboardError::data_unavailable("gone").is_recoverable());
        assert!(
            !DashboardError::UnknownColumn {
                column: "Silver Price".into()
            }
            .is_recoverable()
        );
    }

    #[test]
    fn messages_name_the_problem() {
        let err = DashboardError::SchemaError {
            column: "Gold Price".into(),
        };
        assert_eq!(err.to_string(), "schema error: missing column \"Gold Price\"");

        let err = DashboardError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        };
        assert_eq!(err.to_string(), "missing config key [data] path");
    }
}
