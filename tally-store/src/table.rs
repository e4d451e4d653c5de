//! CSV encoding of the expense log.
//!
//! Header: `Amount,Type,Person,Description,Timestamp`. Columns are located by
//! name, so the older layout without `Description` still loads; it is written
//! back in the current layout on the next persist.

use serde::Serialize;
use std::fs;
use std::path::Path;

use tally_core::{ExpenseRecord, format_timestamp, parse_timestamp};
use tracing::warn;

use crate::error::{Result, StoreError};

pub const AMOUNT: &str = "Amount";
pub const TYPE: &str = "Type";
pub const PERSON: &str = "Person";
pub const DESCRIPTION: &str = "Description";
pub const TIMESTAMP: &str = "Timestamp";

/// Column order written on persist.
pub const HEADER: [&str; 5] = [AMOUNT, TYPE, PERSON, DESCRIPTION, TIMESTAMP];

#[derive(Serialize)]
struct Row<'a> {
    amount: f64,
    category: &'a str,
    person: &'a str,
    description: &'a str,
    timestamp: String,
}

impl<'a> From<&'a ExpenseRecord> for Row<'a> {
    fn from(r: &'a ExpenseRecord) -> Self {
        Self {
            amount: r.amount,
            category: &r.category,
            person: &r.person,
            description: r.description.as_deref().unwrap_or(""),
            timestamp: r.timestamp.map(format_timestamp).unwrap_or_default(),
        }
    }
}

struct Columns {
    amount: usize,
    category: usize,
    person: usize,
    description: Option<usize>,
    timestamp: usize,
}

impl Columns {
    fn locate(path: &Path, headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require = |column: &'static str| {
            find(column).ok_or_else(|| StoreError::MissingColumn {
                path: path.to_path_buf(),
                column,
            })
        };

        Ok(Self {
            amount: require(AMOUNT)?,
            category: require(TYPE)?,
            person: require(PERSON)?,
            description: find(DESCRIPTION),
            timestamp: require(TIMESTAMP)?,
        })
    }
}

/// Read every row of the table at `path`.
///
/// A missing or zero-length file is an empty log.
pub fn read_table(path: &Path) -> Result<Vec<ExpenseRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let read_err = |source: csv::Error| StoreError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(read_err)?;

    let headers = rdr.headers().map_err(read_err)?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Ok(Vec::new());
    }
    let cols = Columns::locate(path, &headers)?;

    let mut records = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let row = result.map_err(read_err)?;
        // 1-based, counting the header line
        let row_no = i + 2;
        let field = |idx: usize| row.get(idx).unwrap_or("").trim();

        let raw_amount = field(cols.amount);
        let amount: f64 = raw_amount.parse().map_err(|_| StoreError::MalformedRow {
            path: path.to_path_buf(),
            row: row_no,
            reason: format!("amount \"{raw_amount}\" is not a number"),
        })?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StoreError::MalformedRow {
                path: path.to_path_buf(),
                row: row_no,
                reason: format!("amount \"{raw_amount}\" must be a positive number"),
            });
        }

        let raw_ts = field(cols.timestamp);
        let timestamp = parse_timestamp(raw_ts);
        if timestamp.is_none() && !raw_ts.is_empty() {
            warn!(row = row_no, value = raw_ts, "unparseable timestamp, keeping row without one");
        }

        let description = cols
            .description
            .map(field)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        records.push(ExpenseRecord {
            amount,
            category: field(cols.category).to_string(),
            person: field(cols.person).to_string(),
            description,
            timestamp,
        });
    }

    Ok(records)
}

/// Overwrite the table at `path` with `records`, header first.
pub fn write_table(path: &Path, records: &[ExpenseRecord]) -> Result<()> {
    let persist_err = |source: csv::Error| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persist_err(e.into()))?;
    }

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(persist_err)?;

    wtr.write_record(HEADER).map_err(persist_err)?;
    for r in records {
        wtr.serialize(Row::from(r)).map_err(persist_err)?;
    }
    wtr.flush().map_err(|e| persist_err(e.into()))?;
    Ok(())
}
