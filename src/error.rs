// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Network-side failure: page fetch or notification post.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl TransportError {
    /// Classify a reqwest failure; timeouts get their own variant.
    pub fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            Self::Timeout { url: s!(url) }
        } else {
            Self::Http { url: s!(url), source }
        }
    }
}

/// Snapshot store read/write failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{context} {}: {source}", path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    pub fn io(context: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { context, path: path.into(), source }
    }
}

/// Why a monitor run ended in the errored state.
/// Store failures never end a run; they are logged where they happen.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("fetch failed: {0}")]
    Transport(#[from] TransportError),

    #[error("no version sections matching {marker:?} found")]
    Extraction { marker: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid heading selector {selector:?}: {message}")]
    Selector { selector: String, message: String },
}
