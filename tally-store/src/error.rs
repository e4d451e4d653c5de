use std::path::PathBuf;

use tally_core::{RecordId, ValidationError};

/// Errors raised by [`RecordStore`](crate::RecordStore).
///
/// A timestamp that fails to parse is deliberately absent here: it is read
/// as the null marker so one bad row does not block the rest of the log.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The submitted fields were rejected; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An update or delete addressed a record that is not in the collection.
    ///
    /// This points at a stale display-to-identity mapping in the caller.
    #[error("no expense {id} (the log holds {len})")]
    IdentityOutOfRange { id: RecordId, len: usize },

    /// A stored row could not be read back (e.g. a non-numeric amount).
    #[error("{}: row {row}: {reason}", .path.display())]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    /// The header lacks a required column.
    #[error("{}: missing \"{column}\" column", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("could not read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The backing file could not be written. Not retried.
    #[error("could not write {}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, StoreError>;
