// src/config/consts.rs

// Source page
pub const PRODUCT: &str = "n8n";
pub const RELEASE_NOTES_URL: &str = "https://docs.n8n.io/release-notes";
pub const VERSION_MARKER: &str = "n8n@";
pub const HEADING_SELECTOR: &str = "h2";
pub const DEFAULT_LIMIT: usize = 1;

// Net config
pub const USER_AGENT: &str = concat!("n8n_watch/", env!("CARGO_PKG_VERSION"));
pub const FETCH_TIMEOUT_SECS: u64 = 30;
pub const NOTIFY_TIMEOUT_SECS: u64 = 10;

// Notifications
pub const NTFY_SERVER: &str = "https://ntfy.sh";
pub const DEFAULT_TOPIC: &str = "jksr_notifications";
pub const HIGHLIGHT_COUNT: usize = 2;
pub const HIGHLIGHT_MIN_LEN: usize = 10; // exclusive
pub const HIGHLIGHT_WIDTH: usize = 80;
pub const DATE_LABEL: &str = "Release date:";
pub const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M UTC";

// Console report
pub const REPORT_ITEMS: usize = 3;
pub const REPORT_WIDTH: usize = 100;
pub const SHOW_ITEMS: usize = 2;
pub const SHOW_WIDTH: usize = 80;

// Local store
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_KEY: &str = "latest";
pub const HISTORY_CAP: usize = 50;
