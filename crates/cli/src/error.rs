//! CLI error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// The event log rejected the operation.
    #[error(transparent)]
    EventLog(#[from] eventlog::Error),

    /// The `--json` payload is not valid JSON.
    #[error("invalid --json payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
