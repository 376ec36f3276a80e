// src/cli.rs
use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::{Parser, builder::RangedU64ValueParser};

use crate::{
    config::{consts::*, options::MonitorOptions},
    core::net::{Fetch, HttpFetcher},
    core::sanitize::truncate_display,
    error::MonitorError,
    notify::{Notify, NtfySink},
    progress::Progress,
    runner::{self, Monitor, RunOutcome, RunState},
    store::{JsonStore, SnapshotStore},
};

#[derive(Debug, Parser)]
#[command(name = "n8n_watch", version)]
#[command(about = "n8n release monitor with ntfy notifications")]
pub struct Cli {
    /// Fetch, compare with the stored snapshot, persist and notify on change.
    #[arg(long, conflicts_with = "test")]
    pub monitor: bool,

    /// Send one test notification and exit.
    #[arg(long)]
    pub test: bool,

    /// Disable notifications (env: N8N_NO_NOTIFY=1|true|yes).
    #[arg(long)]
    pub no_notify: bool,

    /// ntfy topic.
    #[arg(long, env = "N8N_NTFY_TOPIC", default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Directory holding snapshot documents.
    #[arg(long, env = "N8N_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// How many releases to extract from the page (monitor compares the newest).
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
    pub limit: usize,

    /// Release-notes page.
    #[arg(long, default_value = RELEASE_NOTES_URL)]
    pub url: String,

    /// ntfy server base URL.
    #[arg(long, default_value = NTFY_SERVER)]
    pub ntfy_server: String,

    /// Monitor identity; names the snapshot files.
    #[arg(long, default_value = DEFAULT_KEY)]
    pub key: String,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> MonitorOptions {
        let mut opts = MonitorOptions::default();
        opts.source.url = self.url.clone();
        opts.source.limit = self.limit;
        opts.notify.enabled = !(self.no_notify || env_flag("N8N_NO_NOTIFY"));
        opts.notify.server = self.ntfy_server.clone();
        opts.notify.topic = self.topic.clone();
        opts.store.data_dir = self.data_dir.clone();
        opts.store.key = self.key.clone();
        opts
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Console frontend for a monitor run.
struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn state(&mut self, state: RunState) {
        if state == RunState::Fetching {
            println!("🔍 Fetching {PRODUCT} releases...");
        }
    }

    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }

    fn finish(&mut self, outcome: &RunOutcome) {
        match outcome {
            RunOutcome::Changed { release, notified, .. } => {
                if let Some(ok) = notified {
                    println!("📤 Notification: {}", if *ok { "✅ Sent" } else { "❌ Failed" });
                }
                println!("\n🎉 {}", release.version);
                for item in release.fragments().take(REPORT_ITEMS) {
                    println!("  {}", truncate_display(item, REPORT_WIDTH));
                }
            }
            RunOutcome::Unchanged { .. } => {}
            RunOutcome::Failed { error, .. } => println!("❌ {error}"),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    let opts = cli.options();

    if cli.test {
        return test_mode(&opts);
    }

    let fetcher = match HttpFetcher::new(Duration::from_secs(FETCH_TIMEOUT_SECS)) {
        Ok(f) => f,
        Err(e) => return report_setup(e),
    };
    let sink = match NtfySink::new(&opts.notify.server, Duration::from_secs(NOTIFY_TIMEOUT_SECS)) {
        Ok(s) => s,
        Err(e) => return report_setup(e),
    };
    let store = JsonStore::new(&opts.store.data_dir);

    let mut monitor = match Monitor::new(opts, fetcher, store, sink) {
        Ok(m) => m,
        Err(e) => return report_setup(e),
    };

    if cli.monitor {
        let outcome = monitor.run(Some(&mut ConsoleProgress));
        return ExitCode::from(outcome.exit_code());
    }
    show_latest(&monitor)
}

fn test_mode(opts: &MonitorOptions) -> ExitCode {
    println!("🧪 Testing ntfy notifications...");
    let sink = match NtfySink::new(&opts.notify.server, Duration::from_secs(NOTIFY_TIMEOUT_SECS)) {
        Ok(s) => s,
        Err(e) => return report_setup(e),
    };
    let ok = runner::send_test(&sink, &opts.notify.topic);
    println!("{}", if ok { "✅ Success" } else { "❌ Failed" });
    if ok {
        println!("Check: {}", sink.topic_url(&opts.notify.topic));
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// Default mode: print the newest release, exit 0 even if nothing came back.
fn show_latest<F: Fetch, S: SnapshotStore, N: Notify>(monitor: &Monitor<F, S, N>) -> ExitCode {
    match monitor.latest() {
        Ok(releases) => {
            if let Some(release) = releases.first() {
                println!("Latest: {}", release.version);
                for item in release.fragments().take(SHOW_ITEMS) {
                    println!("  {}", truncate_display(item, SHOW_WIDTH));
                }
            }
        }
        Err(MonitorError::Extraction { .. }) => logw!("No releases found"),
        Err(e) => loge!("{e}"),
    }
    ExitCode::SUCCESS
}

fn report_setup(e: impl std::fmt::Display) -> ExitCode {
    loge!("Setup failed: {e}");
    eprintln!("Error: {e}");
    ExitCode::FAILURE
}
