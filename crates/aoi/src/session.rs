//! Dashboard session state: the single active AOI plus the chosen date range.
//!
//! The session is mirrored into a [`KeyValueStore`] under [`SESSION_KEY`] so it
//! can be restored later. Updates are whole-value replacements; callers
//! serialize concurrent edits themselves.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::import::import_aoi;
use crate::region::AoiRecord;

/// Storage key for the serialized session.
pub const SESSION_KEY: &str = "rospin_dashboard";

/// String key-value storage for session snapshots.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// Application state for one dashboard user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSession {
    region: Option<AoiRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<String>,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn region(&self) -> Option<&AoiRecord> {
        self.region.as_ref()
    }

    /// Replace the active region wholesale.
    pub fn set_region(&mut self, record: AoiRecord) {
        self.region = Some(record);
    }

    pub fn clear_region(&mut self) {
        self.region = None;
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }

    pub fn set_dates(&mut self, start: impl Into<String>, end: impl Into<String>) {
        self.start = Some(start.into());
        self.end = Some(end.into());
    }

    /// A region and both dates are set, so a download can be submitted.
    pub fn is_ready(&self) -> bool {
        self.region.is_some()
            && self.start.as_deref().is_some_and(|s| !s.is_empty())
            && self.end.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Import pasted text as the new region.
    ///
    /// Returns `Ok(true)` if the region was replaced, `Ok(false)` for blank
    /// input. On error the current region is left untouched.
    pub fn apply_import(&mut self, text: &str) -> Result<bool> {
        match import_aoi(text)? {
            Some(record) => {
                self.region = Some(record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        let snapshot = serde_json::to_string(self)?;
        store.set(SESSION_KEY, &snapshot)?;
        debug!(has_region = self.region.is_some(), "Saved dashboard session");
        Ok(())
    }

    /// Load the saved session. A corrupt snapshot is discarded, not an error.
    pub fn restore(store: &impl KeyValueStore) -> Result<Self> {
        let Some(snapshot) = store.get(SESSION_KEY)? else {
            return Ok(Self::default());
        };

        match serde_json::from_str(&snapshot) {
            Ok(session) => Ok(session),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable dashboard session");
                Ok(Self::default())
            }
        }
    }
}
