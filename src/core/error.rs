//! Error types for snapshot handling.
//!
//! Pile and slot mutations never fail; missing targets are silent no-ops.
//! Only the string transforms can fail.

use thiserror::Error;

/// Errors surfaced by the snapshot transforms.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid board snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    #[error("failed to serialize board: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
