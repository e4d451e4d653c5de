//! tally-core: expense record types, input validation, and the summary engine

pub mod amount;
pub mod error;
pub mod expense;
pub mod summary;
pub mod time;

pub use amount::{format_amount, parse_amount};
pub use error::ValidationError;
pub use expense::{DEFAULT_CATEGORIES, DEFAULT_PEOPLE, ExpenseDraft, ExpenseRecord, RecordId};
pub use summary::{
    DisplayRow, Summary, display_view, resolve_display_index, spent_in_month, spent_on, total_spent,
};
pub use time::{format_timestamp, local_now, parse_timestamp, parse_timezone};
