//! Record persistence behind a small trait.
//!
//! The aggregator only ever sees a snapshot `Vec<DatedRecord>`; where that
//! snapshot comes from is up to a [`RecordStore`]. [`MemoryStore`] keeps
//! collections in process, [`JsonFileStore`] keeps one JSON array file per
//! collection in a data directory.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{info, warn};

use crate::config;
use crate::error::{LedgerError, Result};
use crate::models::DatedRecord;

/// Source of truth for dated records, keyed by collection name
/// (see [`config::collection_files`]).
pub trait RecordStore {
    /// Load every record in `collection`, in insertion order.
    fn load(&self, collection: &str) -> Result<Vec<DatedRecord>>;

    /// Replace the contents of `collection`.
    fn save(&self, collection: &str, records: &[DatedRecord]) -> Result<()>;

    /// Append one record to `collection`.
    fn append(&self, collection: &str, record: DatedRecord) -> Result<()> {
        let mut records = self.load(collection)?;
        records.push(record);
        self.save(collection, &records)
    }

    /// Human-readable description for `Display` output.
    fn describe(&self) -> String;
}

fn check_collection(collection: &str) -> Result<&'static str> {
    config::collection_files()
        .get(collection)
        .copied()
        .ok_or_else(|| LedgerError::NotFound(format!("Unknown collection: {}", collection)))
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store, used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RefCell<HashMap<String, Vec<DatedRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing anything already there.
    pub fn with_records(self, collection: &str, records: Vec<DatedRecord>) -> Result<Self> {
        check_collection(collection)?;
        self.collections
            .borrow_mut()
            .insert(collection.to_string(), records);
        Ok(self)
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, collection: &str) -> Result<Vec<DatedRecord>> {
        check_collection(collection)?;
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    fn save(&self, collection: &str, records: &[DatedRecord]) -> Result<()> {
        check_collection(collection)?;
        self.collections
            .borrow_mut()
            .insert(collection.to_string(), records.to_vec());
        Ok(())
    }

    fn append(&self, collection: &str, record: DatedRecord) -> Result<()> {
        check_collection(collection)?;
        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(record);
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

// ---------------------------------------------------------------------------
// JsonFileStore
// ---------------------------------------------------------------------------

/// One pretty-printed JSON array file per collection.
///
/// Writes go to a temp file in the same directory which is then persisted
/// over the target, so an interrupted write never leaves a partial file.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Directory holding the collection files.
    pub data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a store rooted at `data_dir`.
    ///
    /// If `data_dir` is `None`, uses the platform data directory
    /// (e.g. `~/.local/share/farm-ledger` on Linux).
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = data_dir.unwrap_or_else(config::default_data_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self { data_dir: dir })
    }

    /// Path of the file backing `collection`.
    pub fn path_for(&self, collection: &str) -> Result<PathBuf> {
        let filename = check_collection(collection)?;
        Ok(self.data_dir.join(filename))
    }

    fn read_file(path: &Path) -> Result<Vec<DatedRecord>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&contents).map_err(|source| {
            warn!(path = %path.display(), error = %source, "corrupt store file");
            LedgerError::CorruptStore {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    /// Remove every collection file, keeping the directory.
    pub fn clear(&self) -> Result<()> {
        for filename in config::collection_files().values() {
            let path = self.data_dir.join(filename);
            if path.exists() {
                fs::remove_file(&path)?;
            }
        }
        info!(dir = %self.data_dir.display(), "cleared record store");
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, collection: &str) -> Result<Vec<DatedRecord>> {
        let path = self.path_for(collection)?;
        Self::read_file(&path)
    }

    fn save(&self, collection: &str, records: &[DatedRecord]) -> Result<()> {
        let path = self.path_for(collection)?;
        let json = serde_json::to_string_pretty(records)?;

        let mut tmp = NamedTempFile::new_in(&self.data_dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&path)?;

        info!(
            collection,
            records = records.len(),
            path = %path.display(),
            "saved collection"
        );
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json:{}", self.data_dir.display())
    }
}
