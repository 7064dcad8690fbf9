//! Catalog document persistence
//!
//! The whole catalog lives in one JSON document on disk. Every operation
//! loads the document fresh and every mutation rewrites it entirely; there
//! is no cache, no partial update and no index.
//!
//! Mutating handlers must serialize their read-modify-write cycle through
//! [`CatalogStore::lock_for_write`]. Reads take no lock.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use shared::models::{Product, User};
use tokio::sync::{Mutex, MutexGuard};

/// The persisted catalog: insertion-ordered products and users.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Store errors. Note that *load* failures never surface here: a missing or
/// corrupt document yields an empty catalog by design.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write catalog document: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to serialize catalog document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed catalog store.
pub struct CatalogStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Acquire the single-writer lock.
    ///
    /// Hold the returned guard across the whole load → mutate → save cycle;
    /// this is what removes the lost-update race between concurrent writers.
    pub async fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Load the catalog document.
    ///
    /// Fails soft: a missing or unparseable file yields an empty catalog.
    /// Callers cannot distinguish "empty" from "unreadable"; the condition
    /// is logged at warn level.
    pub fn load(&self) -> CatalogDocument {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %self.path.display(), error = %e, "Catalog document unreadable, starting empty");
                }
                return CatalogDocument::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Catalog document corrupt, starting empty");
                CatalogDocument::default()
            }
        }
    }

    /// Rewrite the whole document.
    pub fn save(&self, doc: &CatalogDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(doc)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Next record id: the current unix-millis timestamp, bumped past the
    /// largest existing id so ids stay unique and monotonic even under
    /// rapid creation or a clock that moved backwards.
    pub fn next_id(&self, doc: &CatalogDocument) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let max_existing = doc
            .products
            .iter()
            .map(|p| p.id)
            .chain(doc.users.iter().map(|u| u.id))
            .max()
            .unwrap_or(0);
        now.max(max_existing + 1)
    }
}
