//! Edit command handler.

use crate::args::EditArgs;
use crate::commands::Out;
use crate::store::Store;
use crate::{Config, Result};
use anyhow::bail;

/// Replaces an existing record, identified by its ID.
///
/// This is a full replacement through the same normalization path as `add`:
/// field flags that were not provided are cleared, not preserved. The ID
/// itself never changes, and no other record is touched.
///
/// # Arguments
///
/// - `config` - The application configuration locating the datastore.
/// - `args` - The record ID and the replacement fields.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message naming the record's date.
/// - The record ID.
///
/// # Errors
///
/// - Returns an error if no record has the given ID.
/// - Returns an error if the datastore or a backup cannot be written.
pub fn edit(config: Config, args: EditArgs) -> Result<Out<String>> {
    let store = config.store();
    let mut records = store.load();

    if records.get(&args.id).is_none() {
        bail!("No record with ID '{}'", args.id);
    }

    let record = args.fields.into_draft(Some(args.id.clone())).normalize();
    let date = record.date.clone();

    config.backup().snapshot()?;
    records.upsert(record);
    store.save(&records)?;

    let message = format!("Updated record for {date} with ID: {}", args.id);
    Ok(Out::new(message, args.id))
}
