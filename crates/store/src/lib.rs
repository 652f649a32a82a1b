//! Durable session store - JSON file backed key-value map
//!
//! Best score and total moves have to survive process restarts. This crate
//! keeps the whole key-value map in one small JSON document:
//!
//! ```json
//! {
//!   "version": 1,
//!   "entries": { "bestScore": "80", "totalMoveCount": "231" }
//! }
//! ```
//!
//! Every `set` rewrites the document through a temporary file and a rename, so
//! a crash mid-write leaves the previous document intact. After a failed write
//! the store stays dirty and the next `set` writes again, even for an
//! unchanged value. A missing file is
//! an empty store; a corrupt one is logged and treated as empty.
//!
//! # Environment Variables
//!
//! - `MEMORY_MATCH_STORE_PATH`: Location of the JSON document (default: "memory-match.json")
//! - `MEMORY_MATCH_STORE_DISABLED`: Set to "1" or "true" (any case) to keep stats in memory only

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use memory_match_core as core;

use crate::core::{MemoryStore, SessionStore, StoreError};

const FILE_VERSION: u32 = 1;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Key-value store persisted as a JSON document
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    /// In-memory entries differ from the last successful write
    dirty: bool,
}

impl JsonFileStore {
    /// Open the store at `path`, reading any existing document.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_document(&path) {
            Ok(Some(doc)) => doc.entries,
            Ok(None) => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable store; starting empty");
                BTreeMap::new()
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "store opened");
        Self {
            path,
            entries,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let doc = StoreDocument {
            version: FILE_VERSION,
            entries: self.entries.clone(),
        };
        let json = serde_json::to_vec_pretty(&doc).map_err(|err| StoreError::Encoding {
            message: err.to_string(),
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SessionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if !self.dirty && self.entries.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.flush()?;
        self.dirty = false;
        Ok(())
    }
}

fn read_document(path: &Path) -> Result<Option<StoreDocument>, StoreError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|err| StoreError::Encoding {
            message: err.to_string(),
        })
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub disabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("memory-match.json"),
            disabled: false,
        }
    }
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let path = env::var("MEMORY_MATCH_STORE_PATH").ok();
        let disabled = env::var("MEMORY_MATCH_STORE_DISABLED").ok();
        Self::from_vars(path.as_deref(), disabled.as_deref())
    }

    /// Build from raw variable values; `None` means unset.
    pub fn from_vars(path: Option<&str>, disabled: Option<&str>) -> Self {
        let path = path
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| Self::default().path);

        let disabled = disabled
            .map(str::trim)
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Self { path, disabled }
    }

    /// Open the configured store; in-memory when persistence is disabled.
    pub fn open(&self) -> Box<dyn SessionStore + Send> {
        if self.disabled {
            debug!("persistence disabled; using in-memory store");
            return Box::new(MemoryStore::new());
        }
        Box::new(JsonFileStore::open(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SessionStats, BEST_SCORE_KEY, TOTAL_MOVE_COUNT_KEY};

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("stats.json"));
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");

        let mut store = JsonFileStore::open(&path);
        SessionStats {
            best_score: 40,
            total_move_count: 17,
        }
        .save(&mut store)
        .unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path);
        assert_eq!(
            SessionStats::load(&reopened).unwrap(),
            SessionStats {
                best_score: 40,
                total_move_count: 17
            }
        );
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn document_layout_is_versioned() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = JsonFileStore::open(&path);
        store.set(TOTAL_MOVE_COUNT_KEY, "3").unwrap();

        let value: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["entries"][TOTAL_MOVE_COUNT_KEY], "3");
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, b"{ not json").unwrap();

        let mut store = JsonFileStore::open(&path);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap(), None);

        // The next write replaces the corrupt document.
        store.set(BEST_SCORE_KEY, "20").unwrap();
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("stats.json");
        let mut store = JsonFileStore::open(&path);
        store.set(BEST_SCORE_KEY, "10").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_location_reports_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();

        let mut store = JsonFileStore::open(blocker.join("stats.json"));
        let err = store.set(BEST_SCORE_KEY, "10").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        // The in-memory value is still readable.
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn same_value_is_rewritten_after_failed_write() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"").unwrap();
        let path = blocker.join("stats.json");

        let mut store = JsonFileStore::open(&path);
        assert!(store.set(BEST_SCORE_KEY, "10").is_err());
        // Same value again, still unwritable: the error is reported again.
        assert!(store.set(BEST_SCORE_KEY, "10").is_err());

        fs::remove_file(&blocker).unwrap();
        store.set(BEST_SCORE_KEY, "10").unwrap();
        assert!(path.exists());
        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("10"));
    }

    #[test]
    fn unchanged_value_skips_write_once_clean() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut store = JsonFileStore::open(&path);
        store.set(BEST_SCORE_KEY, "10").unwrap();

        fs::remove_file(&path).unwrap();
        store.set(BEST_SCORE_KEY, "10").unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn disabled_config_opens_memory_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            path: dir.path().join("stats.json"),
            disabled: true,
        };
        let mut store = config.open();
        store.set(BEST_SCORE_KEY, "30").unwrap();
        assert!(!config.path.exists());
    }

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.path, PathBuf::from("memory-match.json"));
        assert!(!config.disabled);
        assert_eq!(StoreConfig::from_vars(None, None), config);
    }

    #[test]
    fn config_path_from_vars() {
        let config = StoreConfig::from_vars(Some(" /var/lib/mm/stats.json "), None);
        assert_eq!(config.path, PathBuf::from("/var/lib/mm/stats.json"));
        assert!(!config.disabled);

        let blank = StoreConfig::from_vars(Some("   "), None);
        assert_eq!(blank.path, PathBuf::from("memory-match.json"));
    }

    #[test]
    fn config_disabled_from_vars() {
        for raw in ["1", "true", "TRUE", "True", " true "] {
            assert!(StoreConfig::from_vars(None, Some(raw)).disabled, "{raw:?}");
        }
        for raw in ["0", "false", "", "yes", "2"] {
            assert!(!StoreConfig::from_vars(None, Some(raw)).disabled, "{raw:?}");
        }
    }
}
