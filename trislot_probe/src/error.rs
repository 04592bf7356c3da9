//! Error types for probe runs

use thiserror::Error;
use trislot_common::config::ConfigError;

/// Errors that can occur while setting up or running a delivery probe
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A writer or reader thread panicked
    #[error("{role} thread panicked")]
    WorkerPanicked {
        /// Which side of the exchange the thread drove
        role: &'static str,
    },

    /// Failed to spawn a worker thread
    #[error("Failed to spawn {role} thread: {source}")]
    Spawn {
        /// Which side of the exchange the thread would drive
        role: &'static str,
        /// Source IO error
        source: std::io::Error,
    },

    /// Writing the report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for probe operations
pub type ProbeResult<T> = Result<T, ProbeError>;
