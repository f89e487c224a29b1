//! Error types for token cache backends

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the cache module
pub type Result<T> = std::result::Result<T, TokenCacheError>;

/// Errors that can occur while saving or loading a token
///
/// A missing token is not an error: `get_token` reports it as `Ok(None)`.
#[derive(Debug, Error)]
pub enum TokenCacheError {
    /// The token file could not be written (missing or read-only directory)
    #[error("Failed to write token file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The token file exists but could not be read
    #[error("Failed to read token file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The token file does not contain valid JSON
    #[error("Malformed token file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The token file holds JSON whose top-level value is not an object
    #[error("Token file {} does not contain a JSON object (found {found})", .path.display())]
    NotAnObject { path: PathBuf, found: &'static str },

    /// The token could not be encoded as JSON
    #[error("Failed to encode token: {0}")]
    Encode(#[source] serde_json::Error),
}
