//! Custom error types for custinsight
//!
//! Library code returns these structured errors; the binary wraps them in
//! anyhow at the command boundary.

use thiserror::Error;

/// Main error type for custinsight
#[derive(Error, Debug)]
pub enum InsightError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Value formatting errors
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Dataset loading and lookup errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the configuration directory")]
    DirectoryUnavailable,

    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration file: {0}")]
    SaveFailed(String),
}

/// Errors raised while turning raw amounts into display strings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Cannot format non-finite amount: {0}")]
    NonFinite(f64),
}

/// Dataset errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset file {path}: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to parse dataset file {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Chart {index} does not exist in report '{report}' ({available} charts)")]
    ChartOutOfRange {
        report: String,
        index: usize,
        available: usize,
    },
}

/// Result type alias for custinsight
pub type Result<T> = std::result::Result<T, InsightError>;

impl From<anyhow::Error> for InsightError {
    fn from(err: anyhow::Error) -> Self {
        InsightError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InsightError::Format(FormatError::NonFinite(f64::NAN));
        assert!(err.to_string().contains("non-finite"));

        let err = InsightError::Config(ConfigError::DirectoryUnavailable);
        assert!(err.to_string().contains("configuration directory"));
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InsightError = io_err.into();
        assert!(matches!(err, InsightError::Io(_)));

        let err: InsightError = FormatError::NonFinite(f64::INFINITY).into();
        assert!(matches!(err, InsightError::Format(_)));
    }

    #[test]
    fn test_chart_out_of_range_message() {
        let err = DatasetError::ChartOutOfRange {
            report: "Duration of Relationship".to_string(),
            index: 7,
            available: 2,
        };
        let text = err.to_string();
        assert!(text.contains("Chart 7"));
        assert!(text.contains("2 charts"));
    }
}
