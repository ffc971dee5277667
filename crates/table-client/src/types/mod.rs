//! Wire types for the tabular store REST API.

mod query;
mod record;

pub use query::{ListQuery, SortDirection, SortSpec};
pub use record::{CreateRecords, CreatedRecords, Fields, NewRecord, Record, RecordPage};
