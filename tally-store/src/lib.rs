//! tally-store: the CSV-backed expense log

pub mod error;
pub mod store;
pub mod table;

pub use error::StoreError;
pub use store::RecordStore;
