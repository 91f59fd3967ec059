//! Configuration file handling for drivelog.
//!
//! The configuration file is stored at `$DRIVELOG_HOME/config.json` and
//! contains settings for the application, currently just the backup rotation
//! depth. `Config` also resolves the paths of everything else that lives in
//! the home directory.

use crate::backup::Backup;
use crate::store::JsonStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "drivelog";
const CONFIG_VERSION: u8 = 1;
const BACKUP_COPIES: u32 = 5;
const BACKUPS: &str = ".backups";
const CONFIG_JSON: &str = "config.json";
const RECORDS_JSON: &str = "records.json";

/// The `Config` object represents the configuration of the app. You
/// instantiate it by providing the path to `$DRIVELOG_HOME` and from there it
/// loads `$DRIVELOG_HOME/config.json`. It provides paths to the other items
/// expected in known locations within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    backups: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    records_path: PathBuf,
}

impl Config {
    /// Creates the data directory and its contents:
    /// - an initial `config.json` with default settings
    /// - an empty `records.json` datastore
    /// - the `.backups` subdirectory
    ///
    /// # Errors
    /// - Returns an error if any file operation fails.
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the drivelog home directory")?;
        let root = canonicalize(&maybe_relative)?;

        let backups_dir = root.join(BACKUPS);
        utils::make_dir(&backups_dir)?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path)?;

        let records_path = root.join(RECORDS_JSON);
        utils::write(&records_path, "[]").context("Unable to create the records datastore")?;

        Ok(Self {
            root,
            backups: backups_dir,
            config_path,
            config_file,
            records_path,
        })
    }

    /// This will
    /// - validate that `drivelog_home` and the config file exist
    /// - load and validate the config file
    /// - validate that the backups directory exists
    /// - return the loaded configuration object
    pub fn load(drivelog_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = drivelog_home.into();
        let root = canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'drivelog init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path)?;

        let config = Self {
            root: root.clone(),
            backups: root.join(BACKUPS),
            config_path,
            config_file,
            records_path: root.join(RECORDS_JSON),
        };
        if !config.backups.is_dir() {
            bail!(
                "The backups directory is missing '{}'",
                config.backups.display()
            )
        }
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups(&self) -> &Path {
        &self.backups
    }

    pub fn records_path(&self) -> &Path {
        &self.records_path
    }

    pub fn backup_copies(&self) -> u32 {
        self.config_file.backup_copies
    }

    /// The datastore over `records.json`.
    pub fn store(&self) -> JsonStore {
        JsonStore::new(self.records_path.clone())
    }

    /// Creates a new `Backup` instance for managing backup files.
    pub fn backup(&self) -> Backup {
        Backup::new(self)
    }
}

fn canonicalize(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path)
        .with_context(|| format!("Unable to canonicalize the path {}", path.display()))
}

/// Represents the serialization and deserialization format of the
/// configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "drivelog",
///   "config_version": 1,
///   "backup_copies": 5
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "drivelog"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Number of backup copies to keep
    backup_copies: u32,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            backup_copies: BACKUP_COPIES,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it was
    /// written by a different application.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path.as_ref(), data).context("Unable to write config file")
    }
}
