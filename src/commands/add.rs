//! Add command handler.

use crate::args::AddArgs;
use crate::commands::Out;
use crate::store::Store;
use crate::{Config, Result};

/// Adds a new daily record to the datastore.
///
/// Every numeric field goes through loose parsing; a unique record ID is
/// generated and returned on success. The previous datastore contents are
/// snapshotted to the backups directory before the save.
///
/// # Arguments
///
/// - `config` - The application configuration locating the datastore.
/// - `args` - The record fields. Everything is optional; a missing date
///   defaults to today.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message naming the new record's date.
/// - The generated record ID.
///
/// # Errors
///
/// - Returns an error if the datastore or a backup cannot be written.
pub fn add(config: Config, args: AddArgs) -> Result<Out<String>> {
    let record = args.fields.into_draft(None).normalize();
    let id = record.id.clone();
    let date = record.date.clone();

    let store = config.store();
    let mut records = store.load();
    config.backup().snapshot()?;
    records.upsert(record);
    store.save(&records)?;

    let message = format!("Added record for {date} with ID: {id}");
    Ok(Out::new(message, id))
}
