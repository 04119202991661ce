//! Persistence Adapter
//!
//! Whole-store load and overwrite. The tracker treats any load failure as an
//! empty store and reports save failures without retrying.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::history::StoreSnapshot;
use crate::utils::atomic::{atomic_write, cleanup_stale_temp};

/// Errors from loading or saving the store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed history data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable storage for the whole store
pub trait Persistence: Send + Sync {
    /// Read the stored mapping; a missing store is `Ok` and empty
    fn load(&self) -> Result<StoreSnapshot, PersistenceError>;

    /// Overwrite the stored mapping
    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), PersistenceError>;

    /// Human-readable location for logs
    fn location(&self) -> String;
}

/// JSON file storage: `{ "<actor id>": [event, ...], ... }`
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> Result<StoreSnapshot, PersistenceError> {
        if let Ok(true) = cleanup_stale_temp(&self.path) {
            tracing::warn!(path = %self.path.display(), "removed temp file from an interrupted save");
        }

        if !self.path.exists() {
            return Ok(StoreSnapshot::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        if content.trim().is_empty() {
            return Ok(StoreSnapshot::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, snapshot: &StoreSnapshot) -> Result<(), PersistenceError> {
        let content = serde_json::to_string_pretty(snapshot)?;
        atomic_write(&self.path, &content).map_err(|e| self.io_error(e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
