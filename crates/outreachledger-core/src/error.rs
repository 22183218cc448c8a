//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur in core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Settings could not be resolved.
    #[error("Settings error: {0}")]
    Settings(#[from] crate::settings::SettingsError),

    /// Contact document could not be read or written.
    #[error("Store error: {0}")]
    Store(#[from] crate::contacts::StoreError),

    /// Mail provider API call failed.
    #[error("API error: {0}")]
    Api(#[from] outreachledger_graph::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
