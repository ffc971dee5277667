//! Requests captured by mock stores.

use table_client::{CreateRecords, ListQuery};

/// A request a mock store received.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    /// A page listing.
    List { table: String, query: ListQuery },
    /// A record creation.
    Create { table: String, request: CreateRecords },
}

impl RecordedRequest {
    /// Table the request targeted.
    pub fn table(&self) -> &str {
        match self {
            RecordedRequest::List { table, .. } | RecordedRequest::Create { table, .. } => table,
        }
    }

    /// The list query, if this is a listing.
    pub fn query(&self) -> Option<&ListQuery> {
        match self {
            RecordedRequest::List { query, .. } => Some(query),
            RecordedRequest::Create { .. } => None,
        }
    }

    /// The create body, if this is a creation.
    pub fn create_body(&self) -> Option<&CreateRecords> {
        match self {
            RecordedRequest::Create { request, .. } => Some(request),
            RecordedRequest::List { .. } => None,
        }
    }
}
