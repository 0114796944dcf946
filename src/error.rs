use std::io;

/// Errors raised inside the console. None of them are fatal at runtime:
/// callers turn them into a visible state change and carry on.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Request to {url} failed: {message}")]
    NetworkFailure { url: String, message: String },

    #[error("Unknown panel '{id}'")]
    InvalidPanel { id: String },

    #[error("Stored settings could not be parsed: {source}")]
    StorageParseFailure {
        #[source]
        source: serde_json::Error,
    },

    #[error("Settings storage failed: {source}")]
    Storage {
        #[from]
        source: io::Error,
    },

    #[error("Terminal error: {source}")]
    Terminal {
        #[source]
        source: io::Error,
    },
}

impl DashboardError {
    /// Stable code for log records.
    pub fn error_code(&self) -> &'static str {
        match self {
            DashboardError::NetworkFailure { .. } => "NETWORK_FAILURE",
            DashboardError::InvalidPanel { .. } => "INVALID_PANEL",
            DashboardError::StorageParseFailure { .. } => "STORAGE_PARSE_FAILURE",
            DashboardError::Storage { .. } => "STORAGE_IO",
            DashboardError::Terminal { .. } => "TERMINAL",
        }
    }

    pub(crate) fn network(url: &str, err: impl ToString) -> Self {
        DashboardError::NetworkFailure {
            url: url.to_string(),
            message: err.to_string(),
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        let err = DashboardError::InvalidPanel { id: "nope".into() };
        assert_eq!(err.error_code(), "INVALID_PANEL");
        assert_eq!(err.to_string(), "Unknown panel 'nope'");

        let err = DashboardError::network("http://x/health", "connection refused");
        assert_eq!(err.error_code(), "NETWORK_FAILURE");
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn parse_failure_wraps_serde_error() {
        let source = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DashboardError::StorageParseFailure { source };
        assert_eq!(err.error_code(), "STORAGE_PARSE_FAILURE");
    }

    #[test]
    fn io_errors_default_to_storage() {
        let err: DashboardError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.error_code(), "STORAGE_IO");

        let err = DashboardError::Terminal {
            source: io::Error::other("no tty"),
        };
        assert_eq!(err.error_code(), "TERMINAL");
        assert_eq!(err.to_string(), "Terminal error: no tty");
    }
}
