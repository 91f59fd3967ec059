//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::Out;
use crate::store::Store;
use crate::{Config, Result};
use anyhow::Context;
use std::io::{BufRead, Write};

/// Deletes a record, identified by its ID.
///
/// Deletion is immediate and there is no undo (beyond the datastore
/// snapshots in the backups directory), so unless `--yes` was passed the
/// user is asked to confirm against the record's date. Deleting an ID that
/// does not exist is a no-op, not an error.
///
/// # Returns
///
/// On success, returns an `Out` containing:
/// - A message describing what happened.
/// - The deleted record's ID, when something was deleted.
pub fn delete(config: Config, args: DeleteArgs) -> Result<Out<String>> {
    let store = config.store();
    let mut records = store.load();

    let Some(record) = records.get(&args.id) else {
        return Ok(format!("No record with ID '{}', nothing deleted", args.id).into());
    };
    let date = record.date.clone();

    if !args.yes && !confirm(&format!("Delete the record from {date}? This cannot be undone."))? {
        return Ok("Aborted, nothing deleted".into());
    }

    config.backup().snapshot()?;
    records.remove(&args.id);
    store.save(&records)?;

    let message = format!("Deleted record from {date} with ID: {}", args.id);
    Ok(Out::new(message, args.id))
}

/// Prompts on stderr and reads a single line from stdin. Only an explicit
/// "y" or "yes" counts as confirmation.
fn confirm(prompt: &str) -> Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{prompt} [y/N] ").context("Unable to write to stderr")?;
    stderr.flush().context("Unable to flush stderr")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Unable to read the confirmation answer")?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    fn yes(id: &str) -> DeleteArgs {
        DeleteArgs {
            id: id.to_string(),
            yes: true,
        }
    }

    #[test]
    fn test_delete_success() {
        let env = TestEnv::new();
        let record = env.insert_test_record("2024-01-15", "x");

        let out = delete(env.config(), yes(&record.id)).unwrap();

        assert!(out.message().contains("Deleted record from 2024-01-15"));
        assert_eq!(out.structure().unwrap(), &record.id);
        assert!(env.config().store().load().is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let env = TestEnv::new();
        let first = env.insert_test_record("2024-01-01", "first");
        let second = env.insert_test_record("2024-01-02", "second");

        delete(env.config(), yes(&first.id)).unwrap();

        let records = env.config().store().load();
        assert_eq!(records.len(), 1);
        assert!(records.get(&second.id).is_some());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let env = TestEnv::new();
        env.insert_test_record("2024-01-15", "x");

        let out = delete(env.config(), yes("no-such-id")).unwrap();

        assert!(out.message().contains("nothing deleted"));
        assert!(out.structure().is_none());
        assert_eq!(env.config().store().load().len(), 1);
    }

    #[test]
    fn test_delete_writes_backup_first() {
        let env = TestEnv::new();
        let record = env.insert_test_record("2024-01-15", "x");

        delete(env.config(), yes(&record.id)).unwrap();

        // The snapshot taken before the delete still holds the record.
        let backup = std::fs::read_dir(env.config().backups())
            .unwrap()
            .next()
            .unwrap()
            .unwrap();
        let content = std::fs::read_to_string(backup.path()).unwrap();
        assert!(content.contains(&record.id));
    }
}
