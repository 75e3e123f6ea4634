use std::path::PathBuf;

use thiserror::Error;

/// Text shown in place of the result table when loading fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load data.";

/// Failure while fetching or decoding a data source.
///
/// Every variant is the same failure from the user's point of view; the
/// variants only differ in the diagnostics they carry for the log.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    /// The request never produced a response.
    #[error("network error fetching {location}: {message}")]
    Network { location: String, message: String },

    /// The server answered with a non-success status.
    #[error("{location} responded with HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {location}: {source}")]
    Json {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// An adapter received fewer documents than it declared.
    #[error("expected {expected} documents, received {received}")]
    MissingDocument { expected: usize, received: usize },

    /// A load was attempted after an earlier one failed.
    #[error("data already failed to load; restart to retry")]
    PreviouslyFailed,
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(location: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            location: location.into(),
            source,
        }
    }

    /// Message suitable for display in the result table.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILED_MESSAGE
    }
}

pub type Result<T> = std::result::Result<T, LoadError>;
