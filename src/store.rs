// src/store.rs
//
// Snapshot persistence keyed by monitor identity.
//
// JsonStore layout under the data dir:
//   <key>.json          last-seen release
//   <key>.history.json  distinct versions, newest first, capped
//
// One run reads then maybe writes. Overlapping runs on the same key are
// assumed not to happen (the scheduler serializes them); there is no lock.

use std::{collections::HashMap, fs, path::{Path, PathBuf}};

use serde::{Serialize, de::DeserializeOwned};

use crate::core::sanitize::sanitize_key;
use crate::error::PersistenceError;
use crate::release::Release;

pub trait SnapshotStore {
    /// Last-seen release, `None` before the first successful run.
    fn load(&self, key: &str) -> Result<Option<Release>, PersistenceError>;

    /// Unconditional overwrite.
    fn save(&mut self, key: &str, release: &Release) -> Result<(), PersistenceError>;

    /// Newest first.
    fn history(&self, key: &str) -> Result<Vec<Release>, PersistenceError>;

    fn write_history(&mut self, key: &str, list: &[Release]) -> Result<(), PersistenceError>;

    /// Record `release` at the head unless it already is the head.
    /// Any older entry for the same version is dropped so each version
    /// appears once. Returns whether the history changed.
    fn append_history(
        &mut self,
        key: &str,
        release: &Release,
        max_entries: usize,
    ) -> Result<bool, PersistenceError> {
        let mut list = self.history(key)?;
        if list.first().is_some_and(|head| head.version == release.version) {
            return Ok(false);
        }
        list.retain(|r| r.version != release.version);
        list.insert(0, release.clone());
        list.truncate(max_entries);
        self.write_history(key, &list)?;
        Ok(true)
    }
}

/* ---------- on-disk JSON ---------- */

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn snapshot_path(&self, key: &str) -> PathBuf {
        self.dir.join(join!(&sanitize_key(key), ".json"))
    }

    pub fn history_path(&self, key: &str) -> PathBuf {
        self.dir.join(join!(&sanitize_key(key), ".history.json"))
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, PersistenceError> {
        let text = match fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io("reading", path, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| PersistenceError::Json { path: path.to_path_buf(), source })
    }

    fn write<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PersistenceError::io("creating", &self.dir, e))?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| PersistenceError::Json { path: path.to_path_buf(), source })?;
        fs::write(path, json).map_err(|e| PersistenceError::io("writing", path, e))?;
        logd!("Wrote {}", path.display());
        Ok(())
    }
}

impl SnapshotStore for JsonStore {
    fn load(&self, key: &str) -> Result<Option<Release>, PersistenceError> {
        Self::read(&self.snapshot_path(key))
    }

    fn save(&mut self, key: &str, release: &Release) -> Result<(), PersistenceError> {
        let path = self.snapshot_path(key);
        self.write(&path, release)
    }

    fn history(&self, key: &str) -> Result<Vec<Release>, PersistenceError> {
        Ok(Self::read(&self.history_path(key))?.unwrap_or_default())
    }

    fn write_history(&mut self, key: &str, list: &[Release]) -> Result<(), PersistenceError> {
        let path = self.history_path(key);
        self.write(&path, list)
    }
}

/* ---------- in-memory (tests, dry runs) ---------- */

#[derive(Default)]
pub struct MemoryStore {
    latest: HashMap<String, Release>,
    history: HashMap<String, Vec<Release>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(key: &str, release: Release) -> Self {
        let mut store = Self::default();
        store.latest.insert(s!(key), release);
        store
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Release>, PersistenceError> {
        Ok(self.latest.get(key).cloned())
    }

    fn save(&mut self, key: &str, release: &Release) -> Result<(), PersistenceError> {
        self.latest.insert(s!(key), release.clone());
        Ok(())
    }

    fn history(&self, key: &str) -> Result<Vec<Release>, PersistenceError> {
        Ok(self.history.get(key).cloned().unwrap_or_default())
    }

    fn write_history(&mut self, key: &str, list: &[Release]) -> Result<(), PersistenceError> {
        self.history.insert(s!(key), list.to_vec());
        Ok(())
    }
}
