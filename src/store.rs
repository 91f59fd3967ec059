//! This module is responsible for reading and writing the records datastore.
//!
//! The datastore is a single JSON file holding the full ordered sequence of
//! records. Every mutation rewrites it wholesale; there is exactly one writer
//! and no partial-write or locking story is needed.

use crate::model::Records;
use crate::{utils, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The persistence port. `load` is infallible by design: an unreadable or
/// corrupt datastore degrades to an empty collection instead of failing the
/// application. `save` propagates real I/O errors.
///
/// The trait exists so the storage medium can be swapped (file, embedded
/// database, remote sync) without touching the normalization layer.
pub trait Store {
    fn load(&self) -> Records;
    fn save(&self, records: &Records) -> Result<()>;
}

/// A `Store` over one pretty-printed JSON file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for JsonStore {
    /// Loads the full collection. A missing file, unreadable file, or content
    /// that is not a JSON array of records all load as an empty collection.
    fn load(&self) -> Records {
        if !self.path.is_file() {
            return Records::default();
        }
        let content = match utils::read(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Starting with an empty record list: {e:#}");
                return Records::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Datastore at {} is not a valid record list ({e}), starting empty",
                    self.path.display()
                );
                Records::default()
            }
        }
    }

    fn save(&self, records: &Records) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        utils::write(&self.path, json)
    }
}
