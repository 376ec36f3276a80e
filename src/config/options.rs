// src/config/options.rs
use std::path::PathBuf;
use super::consts::*;

/// Everything one monitor run needs to know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorOptions {
    pub source: SourceOptions,
    pub notify: NotifyOptions,
    pub store: StoreOptions,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            notify: NotifyOptions::default(),
            store: StoreOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    pub url: String,
    pub heading: String,
    pub marker: String,
    pub limit: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            url: s!(RELEASE_NOTES_URL),
            heading: s!(HEADING_SELECTOR),
            marker: s!(VERSION_MARKER),
            limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyOptions {
    pub enabled: bool,
    pub server: String,
    pub topic: String,
}

impl Default for NotifyOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            server: s!(NTFY_SERVER),
            topic: s!(DEFAULT_TOPIC),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub data_dir: PathBuf,
    /// Monitor identity; names the snapshot documents.
    pub key: String,
    pub history_cap: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            key: s!(DEFAULT_KEY),
            history_cap: HISTORY_CAP,
        }
    }
}
