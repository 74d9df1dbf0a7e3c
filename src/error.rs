//! Error types for the fallible edges of the crate.
//!
//! Synthesis itself never fails; these cover configuration, state snapshots
//! and the files the CLI reads and writes.

use thiserror::Error;

/// Errors raised outside the synthesis pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid synthesis config: {0}")]
    Config(String),

    #[error("malformed state snapshot: {0}")]
    State(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WAV encoding failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
