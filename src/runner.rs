// src/runner.rs
//
// One monitor run: Fetching → Extracting → Detecting → Persisting → Notifying → Done.
// Any failure goes to Errored. Nothing escapes `run`; the outcome carries
// the exit status.
//
// Persist strictly before notify: if we die in between, the next run sees
// the new state and reports no change. One missed notification, no lost state.

use std::fmt;

use chrono::Utc;

use crate::{
    config::options::MonitorOptions,
    core::net::Fetch,
    detect::{ChangeResult, detect},
    error::{ConfigError, MonitorError},
    notify::{Notify, format},
    progress::Progress,
    release::Release,
    specs::release_notes::ReleaseNotesSpec,
    store::SnapshotStore,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Fetching,
    Extracting,
    Detecting,
    Persisting,
    Notifying,
    Done,
    Errored,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunState::Fetching => "fetching",
            RunState::Extracting => "extracting",
            RunState::Detecting => "detecting",
            RunState::Persisting => "persisting",
            RunState::Notifying => "notifying",
            RunState::Done => "done",
            RunState::Errored => "errored",
        };
        f.write_str(s)
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    Unchanged {
        release: Release,
    },
    Changed {
        release: Release,
        change: ChangeResult,
        /// Snapshot write went through.
        saved: bool,
        /// `None` when notifications are off.
        notified: Option<bool>,
    },
    Failed {
        error: MonitorError,
        /// `None` when notifications are off.
        error_notified: Option<bool>,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed { .. })
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

pub struct Monitor<F, S, N> {
    opts: MonitorOptions,
    spec: ReleaseNotesSpec,
    fetcher: F,
    store: S,
    sink: N,
}

impl<F: Fetch, S: SnapshotStore, N: Notify> Monitor<F, S, N> {
    pub fn new(opts: MonitorOptions, fetcher: F, store: S, sink: N) -> Result<Self, ConfigError> {
        let spec = ReleaseNotesSpec::from_options(&opts.source)?;
        Ok(Self { opts, spec, fetcher, store, sink })
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn sink(&self) -> &N { &self.sink }

    /// Fetch and extract up to `limit` releases without touching state.
    pub fn latest(&self) -> Result<Vec<Release>, MonitorError> {
        let doc = self.fetcher.fetch(&self.opts.source.url)?;
        let releases = self.spec.extract(&doc, Some(self.opts.source.limit));
        if releases.is_empty() {
            return Err(MonitorError::Extraction { marker: s!(self.spec.marker()) });
        }
        Ok(releases)
    }

    /// Run once. `progress` can be None (no UI updates) or Some(&mut impl Progress).
    pub fn run(&mut self, mut progress: Option<&mut dyn Progress>) -> RunOutcome {
        let outcome = self.run_inner(&mut progress);
        let end = if outcome.is_success() { RunState::Done } else { RunState::Errored };
        step(&mut progress, end);
        if let Some(p) = progress.as_deref_mut() {
            p.finish(&outcome);
        }
        outcome
    }

    fn run_inner(&mut self, progress: &mut Option<&mut dyn Progress>) -> RunOutcome {
        let key = self.opts.store.key.clone();

        step(progress, RunState::Fetching);
        let doc = match self.fetcher.fetch(&self.opts.source.url) {
            Ok(doc) => doc,
            Err(e) => return self.fail(MonitorError::Transport(e)),
        };

        step(progress, RunState::Extracting);
        let releases = self.spec.extract(&doc, Some(self.opts.source.limit));
        logd!("{} release(s) extracted", releases.len());
        let Some(current) = releases.into_iter().next() else {
            return self.fail(MonitorError::Extraction { marker: s!(self.spec.marker()) });
        };

        step(progress, RunState::Detecting);
        let previous = match self.store.load(&key) {
            Ok(prev) => prev,
            Err(e) => {
                logw!("Snapshot unreadable, treating as first run: {e}");
                None
            }
        };
        let change = detect(&current, previous.as_ref());

        if !change.changed {
            logf!("{} ({})", change.reason, current.version);
            log_line(progress, &change.reason.to_string());
            return RunOutcome::Unchanged { release: current };
        }
        logf!("Changes detected: {}", change.reason);
        log_line(progress, &format!("Changes detected: {}", change.reason));

        step(progress, RunState::Persisting);
        let saved = match self.store.save(&key, &current) {
            Ok(()) => {
                log_line(progress, &format!("Snapshot saved for {key:?}"));
                true
            }
            Err(e) => {
                loge!("Snapshot save failed: {e}");
                false
            }
        };
        match self.store.append_history(&key, &current, self.opts.store.history_cap) {
            Ok(true) => logd!("History head is now {}", current.version),
            Ok(false) => logd!("History already starts with {}", current.version),
            Err(e) => loge!("History update failed: {e}"),
        }

        let notified = if self.opts.notify.enabled {
            step(progress, RunState::Notifying);
            let note = format::release_notification(
                &current,
                &change.reason,
                &self.opts.source.url,
                Utc::now(),
            );
            let ok = match self.sink.send(&self.opts.notify.topic, &note) {
                Ok(()) => true,
                Err(e) => {
                    loge!("Notification failed: {e}");
                    false
                }
            };
            log_line(progress, if ok { "Notification sent" } else { "Notification failed" });
            Some(ok)
        } else {
            None
        };

        RunOutcome::Changed { release: current, change, saved, notified }
    }

    // Errored: one best-effort alert, whose own failure goes no further than the log.
    fn fail(&self, error: MonitorError) -> RunOutcome {
        loge!("Run failed: {error}");
        let error_notified = self.opts.notify.enabled.then(|| {
            match self.sink.send(&self.opts.notify.topic, &format::error_notification()) {
                Ok(()) => true,
                Err(e) => {
                    logw!("Error notification failed too: {e}");
                    false
                }
            }
        });
        RunOutcome::Failed { error, error_notified }
    }
}

/// Test mode: one fixed message. True if delivered.
pub fn send_test<N: Notify>(sink: &N, topic: &str) -> bool {
    match sink.send(topic, &format::test_notification(Utc::now())) {
        Ok(()) => true,
        Err(e) => {
            loge!("Test notification failed: {e}");
            false
        }
    }
}

fn step(progress: &mut Option<&mut dyn Progress>, state: RunState) {
    logd!("-> {state}");
    if let Some(p) = progress.as_deref_mut() {
        p.state(state);
    }
}

fn log_line(progress: &mut Option<&mut dyn Progress>, msg: &str) {
    if let Some(p) = progress.as_deref_mut() {
        p.log(msg);
    }
}
