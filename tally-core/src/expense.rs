//! Expense record types: the persisted record, its positional identity,
//! and the unvalidated draft a form submits.

use chrono::NaiveDateTime;
use std::fmt;

use crate::error::ValidationError;

/// Expense types offered by the entry form unless the config overrides them.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Entertainment",
    "Medical",
    "Shopping",
    "Groceries",
    "Travel",
];

/// Participants offered by the entry form unless the config overrides them.
pub const DEFAULT_PEOPLE: [&str; 2] = ["He", "She"];

/// A single logged expense.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    /// Money spent, always > 0 once validated
    pub amount: f64,
    /// Expense type: a configured category or custom text
    pub category: String,
    /// Who spent it
    pub person: String,
    /// Optional free-text note
    pub description: Option<String>,
    /// When it happened. `None` marks a persisted value that failed to parse.
    pub timestamp: Option<NaiveDateTime>,
}

impl ExpenseRecord {
    /// Calendar date of the timestamp, if there is one.
    pub fn date(&self) -> Option<chrono::NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// Position of a record in the persisted collection.
///
/// Only meaningful within one load/mutate cycle: deleting a record shifts
/// every later identity down by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(pub usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Field values as entered in a form, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseDraft {
    pub amount: f64,
    pub category: String,
    pub person: String,
    pub description: Option<String>,
    /// Explicit date-time; `None` means "use the default" (see [`ExpenseDraft::validate`]).
    pub timestamp: Option<NaiveDateTime>,
}

impl ExpenseDraft {
    pub fn new(amount: f64, category: impl Into<String>, person: impl Into<String>) -> Self {
        Self {
            amount,
            category: category.into(),
            person: person.into(),
            description: None,
            timestamp: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Pre-fill a draft from an existing record, for edit forms.
    pub fn from_record(record: &ExpenseRecord) -> Self {
        Self {
            amount: record.amount,
            category: record.category.clone(),
            person: record.person.clone(),
            description: record.description.clone(),
            timestamp: record.timestamp,
        }
    }

    /// Check the draft and turn it into a record.
    ///
    /// `default_timestamp` is used when the draft carries no explicit one:
    /// entry time for inserts, the stored timestamp for updates.
    pub fn validate(
        self,
        default_timestamp: Option<NaiveDateTime>,
    ) -> Result<ExpenseRecord, ValidationError> {
        if !self.amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount);
        }
        if self.amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let person = self.person.trim();
        if person.is_empty() {
            return Err(ValidationError::MissingPerson);
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(ExpenseRecord {
            amount: self.amount,
            category: category.to_string(),
            person: person.to_string(),
            description,
            timestamp: self.timestamp.or(default_timestamp),
        })
    }
}
