//! Error types for slot status decoding

use thiserror::Error;

/// Errors that can occur when interpreting a raw slot status tag
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    /// Tag value outside the `Empty`/`Full`/`Busy` range
    #[error("Unknown slot status tag: {tag}")]
    Unknown {
        /// Raw tag value
        tag: u8,
    },
}

/// Result type for status decoding
pub type StatusResult<T> = Result<T, StatusError>;
