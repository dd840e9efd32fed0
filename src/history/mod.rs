//! History of generated codes and user preferences.
//!
//! The history is a JSON array stored under [`HISTORY_KEY`], newest first
//! and capped at [`MAX_HISTORY`] entries. The dark-mode preference lives
//! under [`DARK_MODE_KEY`].

mod store;

pub use store::{FileStore, KvStore, MemoryStore, StoreError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::payload::{ContentRecord, ContentType};
use crate::qr::QrConfig;

/// Storage key of the serialized history.
pub const HISTORY_KEY: &str = "qrstudio_history";

/// Storage key of the dark-mode flag.
pub const DARK_MODE_KEY: &str = "qrstudio_dark";

/// Number of entries kept.
pub const MAX_HISTORY: usize = 20;

/// A saved code. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Creation time in milliseconds, unique within a history
    pub id: i64,
    /// Content type and field snapshot, as `type` and `data`
    #[serde(flatten)]
    pub content: ContentRecord,
    pub config: QrConfig,
    pub encoded: String,
    pub label: String,
    pub timestamp: DateTime<Utc>,
    /// Small SVG preview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl HistoryEntry {
    /// Snapshots `content` and `config` as of now.
    pub fn new(content: ContentRecord, config: QrConfig, thumbnail: Option<String>) -> Self {
        let timestamp = Utc::now();
        Self {
            id: timestamp.timestamp_millis(),
            encoded: content.encode(),
            label: content.label(),
            content,
            config,
            timestamp,
            thumbnail,
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }
}

/// Saved codes backed by a [`KvStore`].
pub struct History<S: KvStore> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KvStore> History<S> {
    /// Loads the history from `store`.
    ///
    /// A missing key yields an empty history, and so does unreadable
    /// data; the latter is logged and overwritten by the next save.
    pub fn load(store: S) -> Result<Self, StoreError> {
        let entries = match store.get(HISTORY_KEY)? {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY);
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "discarding unreadable history");
                    Vec::new()
                }
            },
        };
        debug!(entries = entries.len(), "history loaded");
        Ok(Self { store, entries })
    }

    /// Newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Adds `entry` at the front, evicting the oldest beyond the cap.
    ///
    /// The id is bumped if needed so ids stay strictly decreasing from
    /// front to back. Returns the stored entry.
    pub fn push(&mut self, mut entry: HistoryEntry) -> Result<&HistoryEntry, StoreError> {
        if let Some(newest) = self.entries.first() {
            entry.id = entry.id.max(newest.id + 1);
        }
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY);
        self.persist()?;
        Ok(&self.entries[0])
    }

    /// Removes the entry with `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: i64) -> Result<bool, StoreError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        self.store.remove(HISTORY_KEY)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.entries)?;
        self.store.set(HISTORY_KEY, &json)
    }
}

/// User preferences kept next to the history.
pub struct Preferences<S: KvStore> {
    store: S,
}

impl<S: KvStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The saved dark-mode choice, `None` if the user never picked one.
    pub fn dark_mode(&self) -> Result<Option<bool>, StoreError> {
        Ok(self
            .store
            .get(DARK_MODE_KEY)?
            .and_then(|v| v.trim().parse::<bool>().ok()))
    }

    pub fn set_dark_mode(&mut self, dark: bool) -> Result<(), StoreError> {
        self.store
            .set(DARK_MODE_KEY, if dark { "true" } else { "false" })
    }
}
