//! RecordStore: the durable, ordered expense log.
//!
//! Every mutation takes the current collection, builds the next one,
//! rewrites the whole backing file, and hands the new collection back. On any
//! error the caller's collection is untouched and, for validation and
//! identity errors, nothing is written.
//!
//! There is one writer by assumption. A second process writing the same file
//! silently overwrites the other's changes on its next persist, and a crash
//! mid-write can leave a truncated file.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use tally_core::{ExpenseDraft, ExpenseRecord, RecordId};

use crate::error::{Result, StoreError};
use crate::table::{read_table, write_table};

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole log. A missing file is an empty log.
    pub fn load(&self) -> Result<Vec<ExpenseRecord>> {
        let records = read_table(&self.path)?;
        debug!(path = %self.path.display(), rows = records.len(), "loaded expense log");
        Ok(records)
    }

    /// Overwrite the backing file with `records` in their current order.
    pub fn persist(&self, records: &[ExpenseRecord]) -> Result<()> {
        write_table(&self.path, records)?;
        debug!(path = %self.path.display(), rows = records.len(), "persisted expense log");
        Ok(())
    }

    /// Append a new expense. `now` stamps drafts without an explicit timestamp.
    pub fn insert(
        &self,
        records: &[ExpenseRecord],
        draft: ExpenseDraft,
        now: NaiveDateTime,
    ) -> Result<Vec<ExpenseRecord>> {
        let record = draft.validate(Some(now))?;

        let mut next = records.to_vec();
        next.push(record);
        self.persist(&next)?;

        info!(id = %RecordId(next.len() - 1), "added expense");
        Ok(next)
    }

    /// Replace every field of the record at `id`.
    ///
    /// A draft without a timestamp keeps the stored one.
    pub fn update(
        &self,
        records: &[ExpenseRecord],
        id: RecordId,
        draft: ExpenseDraft,
    ) -> Result<Vec<ExpenseRecord>> {
        let current = records.get(id.index()).ok_or(StoreError::IdentityOutOfRange {
            id,
            len: records.len(),
        })?;
        let record = draft.validate(current.timestamp)?;

        let mut next = records.to_vec();
        next[id.index()] = record;
        self.persist(&next)?;

        info!(%id, "updated expense");
        Ok(next)
    }

    /// Remove the record at `id`; later identities shift down by one.
    pub fn delete(&self, records: &[ExpenseRecord], id: RecordId) -> Result<Vec<ExpenseRecord>> {
        if id.index() >= records.len() {
            return Err(StoreError::IdentityOutOfRange {
                id,
                len: records.len(),
            });
        }

        let mut next = records.to_vec();
        next.remove(id.index());
        self.persist(&next)?;

        info!(%id, remaining = next.len(), "deleted expense");
        Ok(next)
    }

    /// Empty the log, keeping the header on disk.
    pub fn clear(&self) -> Result<Vec<ExpenseRecord>> {
        let next = Vec::new();
        self.persist(&next)?;
        info!(path = %self.path.display(), "cleared expense log");
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::ValidationError;

    fn may_first(h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_update_keeps_timestamp_without_explicit_one() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("expenses.csv"));

        let records = store
            .insert(&[], ExpenseDraft::new(250.0, "Food", "He"), may_first(10))
            .unwrap();
        let records = store
            .update(&records, RecordId(0), ExpenseDraft::new(300.0, "Groceries", "She"))
            .unwrap();

        assert_eq!(records[0].timestamp, Some(may_first(10)));
        assert_eq!(records[0].category, "Groceries");
        assert_eq!(store.load().unwrap(), records);
    }

    #[test]
    fn test_out_of_range_identity() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("expenses.csv"));

        let err = store.delete(&[], RecordId(0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IdentityOutOfRange { id: RecordId(0), len: 0 }
        ));

        let err = store
            .update(&[], RecordId(3), ExpenseDraft::new(1.0, "Food", "He"))
            .unwrap_err();
        assert!(matches!(err, StoreError::IdentityOutOfRange { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_invalid_update_leaves_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new(dir.path().join("expenses.csv"));
        let records = store
            .insert(&[], ExpenseDraft::new(250.0, "Food", "He"), may_first(10))
            .unwrap();
        let before = std::fs::read(store.path()).unwrap();

        let err = store
            .update(&records, RecordId(0), ExpenseDraft::new(-1.0, "Food", "He"))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::NonPositiveAmount(_))
        ));
        assert_eq!(std::fs::read(store.path()).unwrap(), before);
    }
}
