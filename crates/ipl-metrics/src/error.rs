use thiserror::Error;

/// Rejected analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{analysis}: {field} must be greater than zero")]
    ZeroCount {
        analysis: &'static str,
        field: &'static str,
    },
    #[error("{analysis}: {field} must be strictly increasing")]
    NotIncreasing {
        analysis: &'static str,
        field: &'static str,
    },
    #[error("{analysis}: {field} must not be empty")]
    Empty {
        analysis: &'static str,
        field: &'static str,
    },
    #[error("{analysis}: {message}")]
    Invalid {
        analysis: &'static str,
        message: String,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("unknown analysis: {0}")]
    UnknownAnalysis(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
