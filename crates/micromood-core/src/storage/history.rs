//! Durable mood history.
//!
//! The whole history is written out after every mutation and read back in
//! one piece at startup. Failures never abort the session: the in-memory
//! [`MoodHistory`] stays authoritative and the error is handed back to the
//! caller to show as a notice.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::data_dir;
use crate::entry::MoodEntry;
use crate::error::StorageError;

/// Default history file name inside the data directory.
pub const HISTORY_FILE: &str = "mood_data.json";

/// Where the history is persisted.
pub trait HistoryBackend {
    /// Read the stored history. `Ok(None)` means nothing was ever stored.
    fn read(&self) -> Result<Option<Vec<MoodEntry>>, StorageError>;

    /// Replace the stored history with `entries`.
    fn write(&self, entries: &[MoodEntry]) -> Result<(), StorageError>;
}

/// Pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend for `file_name` inside [`data_dir`].
    pub fn in_data_dir(file_name: &str) -> Result<Self, StorageError> {
        Ok(Self::new(data_dir()?.join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl HistoryBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<Vec<MoodEntry>>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let entries = serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(entries))
    }

    fn write(&self, entries: &[MoodEntry]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(entries).map_err(StorageError::Encode)?;
        let write_failed = |source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_failed)?;
        }
        // Write a sibling then rename so readers never see a half-written file.
        let tmp = self.temp_path();
        std::fs::write(&tmp, content).map_err(write_failed)?;
        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            write_failed(e)
        })?;
        Ok(())
    }
}

/// Session-owned, insertion-ordered list of entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoodHistory {
    entries: Vec<MoodEntry>,
}

impl MoodHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&MoodEntry> {
        self.entries.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MoodEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a MoodHistory {
    type Item = &'a MoodEntry;
    type IntoIter = std::slice::Iter<'a, MoodEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Outcome of [`MoodStore::load`].
#[derive(Debug)]
pub struct Loaded {
    pub history: MoodHistory,
    /// Set when the stored history could not be used and an empty one was
    /// substituted.
    pub notice: Option<StorageError>,
}

/// First step of clearing the history. Dropping it clears nothing.
#[derive(Debug)]
#[must_use = "a clear request does nothing until acknowledged"]
pub struct ClearRequest {
    entries: usize,
}

impl ClearRequest {
    /// Number of entries that would be deleted.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// The user has acknowledged that all data will be deleted.
    pub fn acknowledge(self) -> ClearConfirmation {
        ClearConfirmation { _private: () }
    }
}

/// Proof that a [`ClearRequest`] was acknowledged.
#[derive(Debug)]
pub struct ClearConfirmation {
    _private: (),
}

/// Write-through store for a [`MoodHistory`].
#[derive(Debug, Clone)]
pub struct MoodStore<B: HistoryBackend = JsonFileBackend> {
    backend: B,
}

impl MoodStore<JsonFileBackend> {
    /// Store backed by `file_name` in the data directory.
    pub fn open(file_name: &str) -> Result<Self, StorageError> {
        Ok(Self::new(JsonFileBackend::in_data_dir(file_name)?))
    }
}

impl<B: HistoryBackend> MoodStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Read the durable history.
    ///
    /// A missing store yields an empty history quietly; an unreadable or
    /// corrupt one yields an empty history plus a notice.
    pub fn load(&self) -> Loaded {
        match self.backend.read() {
            Ok(Some(entries)) => {
                info!(entries = entries.len(), "loaded mood history");
                Loaded {
                    history: MoodHistory::from_entries(entries),
                    notice: None,
                }
            }
            Ok(None) => Loaded {
                history: MoodHistory::new(),
                notice: None,
            },
            Err(err) => {
                warn!(error = %err, "could not load mood history, starting empty");
                Loaded {
                    history: MoodHistory::new(),
                    notice: Some(err),
                }
            }
        }
    }

    /// Append `entry` and write the full history.
    ///
    /// The entry stays in `history` even when the write fails; the error is
    /// returned so it can be reported. No retry is attempted.
    pub fn append_and_persist(
        &self,
        history: &mut MoodHistory,
        entry: MoodEntry,
    ) -> Result<(), StorageError> {
        history.entries.push(entry);
        info!(entries = history.len(), "appended mood entry");
        self.backend.write(&history.entries).map_err(|err| {
            warn!(error = %err, "could not persist mood history, keeping it in memory");
            err
        })
    }

    /// Start the two-step clear.
    pub fn request_clear(&self, history: &MoodHistory) -> ClearRequest {
        ClearRequest {
            entries: history.len(),
        }
    }

    /// Empty both the durable and in-memory history.
    ///
    /// The durable copy is emptied first; if that fails, `history` is left
    /// untouched. Returns the number of deleted entries.
    pub fn clear(
        &self,
        history: &mut MoodHistory,
        _confirmation: ClearConfirmation,
    ) -> Result<usize, StorageError> {
        self.backend.write(&[])?;
        let removed = history.len();
        history.entries.clear();
        info!(removed, "cleared mood history");
        Ok(removed)
    }
}
