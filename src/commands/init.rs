use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and:
/// - an initial `config.json` file with default settings
/// - an empty `records.json` datastore
/// - the `.backups` subdirectory
///
/// # Arguments
/// - `drivelog_home` - The directory that will be the root of the data
///   directory, e.g. `$HOME/drivelog`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub fn init(drivelog_home: &Path) -> Result<Out<()>> {
    let config = Config::create(drivelog_home)
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the drivelog directory at {}",
        config.root().display()
    )
    .into())
}
