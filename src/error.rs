//! Error types for the host bridge
//!
//! Everything else in the crate is best-effort and reports through
//! `anyhow` at the binary edge.

use thiserror::Error;

/// Errors that can occur while handing coordinates to the host
#[derive(Error, Debug)]
pub enum BridgeError {
    /// No host channel was configured
    #[error("no host channel is configured")]
    NoChannel,

    /// The channel spec in config or on the command line is malformed
    #[error("invalid channel: {0}")]
    InvalidChannel(String),

    /// IO error while writing to the channel
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Message encoding failed
    #[error("JSON encode error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
