use thiserror::Error;

/// Top-level error type used across the entire dashboard.
#[derive(Debug, Error)]
pub enum DashError {
    #[error("config error: {0}")]
    Config(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("chart error: {0}")]
    Chart(String),

    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
