//! Error types for tradeline operations.
//!
//! The resolvers themselves never surface these: upstream failures degrade to
//! defaults and unresolvable queries come back as `None`. Errors are returned
//! by collaborator adapters, configuration loading and the ledger.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for tradeline operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A collaborator fetch failed.
    #[error("Upstream {source_name} unavailable: {message}")]
    Upstream {
        /// Which collaborator failed (e.g. "rosters", "draft")
        source_name: &'static str,
        /// Failure detail
        message: String,
    },

    /// The manual trade ledger rejected an operation.
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// A league snapshot file could not be loaded.
    #[error("Snapshot {} could not be loaded: {message}", .path.display())]
    Snapshot {
        /// Snapshot file path
        path: PathBuf,
        /// Failure detail
        message: String,
    },
}

impl Error {
    /// Shorthand for an [`Error::Upstream`] failure.
    pub fn upstream(source_name: &'static str, message: impl Into<String>) -> Self {
        Self::Upstream {
            source_name,
            message: message.into(),
        }
    }
}

/// A specialized Result type for tradeline operations.
pub type Result<T> = std::result::Result<T, Error>;
