//! Record types as returned and accepted by the store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque column-name to value map of a record.
pub type Fields = Map<String, Value>;

/// A generic record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Store-assigned identifier (e.g., "recXXXXXXXXXXXXXX").
    pub id: String,

    /// Store-assigned creation timestamp (RFC 3339).
    #[serde(default)]
    pub created_time: String,

    /// Column values. Empty cells are omitted by the store.
    #[serde(default)]
    pub fields: Fields,
}

impl Record {
    /// Create a record with the given identifier and creation time.
    pub fn new(id: impl Into<String>, created_time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            created_time: created_time.into(),
            fields: Fields::new(),
        }
    }

    /// Set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value by column name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// One page of a list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordPage {
    /// Records on this page, in server order.
    #[serde(default)]
    pub records: Vec<Record>,

    /// Continuation token. Absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
}

impl RecordPage {
    /// Create a final page (no continuation token).
    pub fn last(records: Vec<Record>) -> Self {
        Self {
            records,
            offset: None,
        }
    }

    /// Create a page followed by another one.
    pub fn with_offset(records: Vec<Record>, offset: impl Into<String>) -> Self {
        Self {
            records,
            offset: Some(offset.into()),
        }
    }
}

/// A record to be created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
    pub fields: Fields,
}

impl NewRecord {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecords {
    pub records: Vec<NewRecord>,

    /// Ask the store to coerce values to each column's type.
    #[serde(default)]
    pub typecast: bool,
}

impl CreateRecords {
    /// Create a single record with typecasting enabled.
    pub fn typecast(fields: Fields) -> Self {
        Self {
            records: vec![NewRecord::new(fields)],
            typecast: true,
        }
    }
}

/// Response of a create request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatedRecords {
    #[serde(default)]
    pub records: Vec<Record>,
}
