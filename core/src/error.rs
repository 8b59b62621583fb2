//! Error types for the agent entry widget
//!
//! None of these ever reach the host page as a failure: the controller logs
//! them and degrades to "show nothing" or to the last resolved data. They
//! exist so the fallible pieces (HTTP fetch, storage, env config) can be
//! tested and composed with `?`.

use thiserror::Error;

/// Errors raised while fetching the remote agent list
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("Failed to request agent list: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Agent endpoint returned status {0}")]
    Status(u16),

    /// The body was not valid JSON
    #[error("Failed to decode agent list: {0}")]
    Decode(#[from] serde_json::Error),

    /// The fetch task never reported back (runtime shut down or task panicked)
    #[error("Fetch task aborted: {0}")]
    Aborted(String),
}

/// Errors raised by a persistent key-value store
#[derive(Error, Debug)]
pub enum StorageError {
    /// File I/O error
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Storage JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored file has an unknown format version
    #[error("Unsupported storage version: {0}")]
    UnsupportedVersion(u32),
}

/// Errors raised while reading configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("Invalid value for {name}: {reason}")]
    InvalidValue {
        /// Environment variable name
        name: &'static str,
        /// Parser message
        reason: String,
    },
}

/// Umbrella error for hosts that want a single type
#[derive(Error, Debug)]
pub enum WidgetError {
    /// Remote fetch failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Persistence failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration was invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The background runtime could not be started
    #[error("Failed to start fetch runtime: {0}")]
    Runtime(std::io::Error),
}
