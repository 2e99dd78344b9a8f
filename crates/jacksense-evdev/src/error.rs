//! Evdev error types.

use std::path::PathBuf;

use thiserror::Error;

/// Evdev error type.
#[derive(Debug, Error)]
pub enum EvdevError {
    #[error("Failed to open event device {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read from event device: {0}")]
    Read(#[source] std::io::Error),

    #[error("Failed to fetch switch state snapshot: {0}")]
    Snapshot(#[source] std::io::Error),
}

/// Result type for evdev operations.
pub type EvdevResult<T> = Result<T, EvdevError>;
