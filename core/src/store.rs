use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{PantryItem, StoredItem};

/// Flat-file JSON store for the whole pantry collection.
///
/// There are no partial reads or writes: `load` returns every persisted
/// record and `save` replaces the file contents outright. Records come back
/// in raw form; callers run them through [`crate::models::normalize`] before
/// touching them.
pub struct Store {
    path: PathBuf,
}

impl Store {
    #[must_use]
    pub fn open(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full collection. A missing file, or one that does not parse
    /// as an array of item records, yields an empty collection instead of an
    /// error. Other I/O failures (e.g. permissions) are reported.
    pub fn load(&self) -> Result<Vec<StoredItem>> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read pantry file: {}", self.path.display())
                });
            }
        };
        match serde_json::from_str(&data) {
            Ok(items) => Ok(items),
            Err(e) => {
                eprintln!(
                    "Warning: ignoring unreadable pantry file {}: {e}",
                    self.path.display()
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the persisted collection with `items`.
    pub fn save(&self, items: &[PantryItem]) -> Result<()> {
        let data =
            serde_json::to_string_pretty(items).context("Failed to serialize pantry items")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write pantry file: {}", self.path.display()))
    }
}
