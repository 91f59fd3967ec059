//! Backup management for the records datastore.
//!
//! Before each mutating save, the current `records.json` is copied into the
//! backups directory so a bad edit or deletion can be recovered by hand.

use crate::{utils, Config, Result};
use anyhow::Context;
use chrono::Local;
use std::path::PathBuf;
use tracing::debug;

/// Prefix for datastore snapshot files.
const RECORDS: &str = "records";

/// Manages backup file creation and rotation.
///
/// The `Backup` struct is immutable and owns copies of the paths and settings
/// it needs. Create a new instance via `Config::backup()` or `Backup::new()`.
#[derive(Debug, Clone)]
pub struct Backup {
    backups_dir: PathBuf,
    backup_copies: u32,
    records_path: PathBuf,
}

impl Backup {
    /// Creates a new `Backup` instance from a `Config`.
    pub fn new(config: &Config) -> Self {
        Self {
            backups_dir: config.backups().to_path_buf(),
            backup_copies: config.backup_copies(),
            records_path: config.records_path().to_path_buf(),
        }
    }

    /// Copies the current datastore file to the backups directory.
    ///
    /// The filename format is `records.YYYY-MM-DD-NNN.json` where NNN is a
    /// per-day sequence number. Automatically rotates old backups, keeping
    /// only `backup_copies` files. A missing datastore (nothing saved yet) is
    /// a no-op.
    ///
    /// Returns the path to the created backup file, if one was created.
    pub fn snapshot(&self) -> Result<Option<PathBuf>> {
        if !self.records_path.is_file() {
            return Ok(None);
        }

        let date = today();
        let seq = self.next_sequence_number(&date)?;
        let filename = format!("{RECORDS}.{date}-{seq:03}.json");
        let path = self.backups_dir.join(&filename);

        utils::copy(&self.records_path, &path)?;
        debug!("Backed up datastore to {}", path.display());

        self.rotate()?;

        Ok(Some(path))
    }

    /// Scans the backups directory for existing snapshots with today's date
    /// and returns the next sequence number.
    fn next_sequence_number(&self, date: &str) -> Result<u32> {
        let mut max_seq: u32 = 0;
        for name in self.backup_file_names()? {
            if let Some(seq) = parse_sequence_number(&name, date) {
                max_seq = max_seq.max(seq);
            }
        }
        Ok(max_seq + 1)
    }

    /// Rotates old backup files, keeping only `backup_copies` files.
    fn rotate(&self) -> Result<()> {
        let mut names = self.backup_file_names()?;

        // The filename format sorts by date and sequence number.
        names.sort();

        let to_delete = names.len().saturating_sub(self.backup_copies as usize);
        for name in names.into_iter().take(to_delete) {
            utils::remove(self.backups_dir.join(name))?;
        }

        Ok(())
    }

    fn backup_file_names(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.backups_dir).with_context(|| {
            format!(
                "Unable to read the backups directory {}",
                self.backups_dir.display()
            )
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let name = entry.file_name().to_string_lossy().to_string();
            if is_backup_file(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// Returns today's date in YYYY-MM-DD format.
fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

/// Parses the sequence number from a backup filename for the given date.
/// Returns None if the filename doesn't match the expected pattern.
fn parse_sequence_number(filename: &str, date: &str) -> Option<u32> {
    // Pattern: records.{date}-{NNN}.json
    let expected_start = format!("{RECORDS}.{date}-");
    let remainder = filename.strip_prefix(&expected_start)?;
    let seq_str = remainder.strip_suffix(".json")?;
    seq_str.parse().ok()
}

/// Checks if a filename is a datastore snapshot.
fn is_backup_file(filename: &str) -> bool {
    filename.starts_with(&format!("{RECORDS}.")) && filename.ends_with(".json")
}
