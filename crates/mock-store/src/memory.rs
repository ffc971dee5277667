//! In-memory record store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use table_client::{
    CreateRecords, ListQuery, Record, RecordPage, RecordStore, SortDirection, StoreError, TableRef,
};

use crate::formula::{value_text, FindFormula};
use crate::request::RecordedRequest;

/// Page size the real store uses when none is requested.
const DEFAULT_PAGE_SIZE: usize = 100;

/// Creation timestamps of inserted records start here, one second apart.
const CLOCK_START: &str = "2024-01-01T00:00:00Z";

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Record>>,
    requests: Vec<RecordedRequest>,
    next_id: u64,
    failure: Option<(u16, String)>,
    fail_filtered: bool,
}

/// A record store holding tables in memory.
///
/// Listing honours `sort`, `pageSize` and `offset`, and evaluates the
/// thread membership formula. Creation assigns ids and creation times.
pub struct MemoryStore {
    state: Mutex<State>,
    page_size: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty store serving at most `page_size` records per page.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            state: Mutex::new(State::default()),
            page_size: page_size.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a record as-is into a table.
    pub fn insert(&self, table: &str, record: Record) {
        self.lock()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(record);
    }

    /// All records of a table in insertion order.
    pub fn records(&self, table: &str) -> Vec<Record> {
        self.lock().tables.get(table).cloned().unwrap_or_default()
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Make every subsequent request fail with the given status and message.
    pub fn fail_with(&self, status: u16, message: impl Into<String>) {
        self.lock().failure = Some((status, message.into()));
    }

    /// Make listings that carry a filter formula fail.
    pub fn fail_filtered_lists(&self) {
        self.lock().fail_filtered = true;
    }

    /// Stop injecting failures.
    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failure = None;
        state.fail_filtered = false;
    }
}

fn api_error(status: u16, kind: &str, message: &str) -> StoreError {
    let body = serde_json::json!({ "error": { "type": kind, "message": message } });
    StoreError::from_response(status, &body.to_string())
}

fn compare_field(a: &Record, b: &Record, field: &str) -> Ordering {
    match (a.field(field), b.field(field)) {
        (Some(x), Some(y)) => value_text(x).cmp(&value_text(y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_page(
        &self,
        table: &TableRef,
        query: &ListQuery,
    ) -> Result<RecordPage, StoreError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest::List {
            table: table.table.clone(),
            query: query.clone(),
        });

        if let Some((status, message)) = &state.failure {
            return Err(api_error(*status, "MOCK_FAILURE", message));
        }

        let mut records = state.tables.get(&table.table).cloned().unwrap_or_default();

        if let Some(text) = &query.filter_by_formula {
            if state.fail_filtered {
                return Err(api_error(422, "INVALID_FILTER_BY_FORMULA", "The formula is invalid"));
            }
            let formula = FindFormula::parse(text).ok_or_else(|| {
                api_error(422, "INVALID_FILTER_BY_FORMULA", "The formula is invalid")
            })?;
            records.retain(|r| formula.matches(r));
        }

        // Stable sort, least significant key first.
        for spec in query.sort.iter().rev() {
            records.sort_by(|a, b| {
                let ord = compare_field(a, b, &spec.field);
                match spec.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let start = match &query.offset {
            None => 0,
            Some(token) => token
                .strip_prefix("itr")
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| *n <= records.len())
                .ok_or_else(|| {
                    api_error(
                        422,
                        "LIST_RECORDS_ITERATOR_NOT_AVAILABLE",
                        "The offset is no longer valid",
                    )
                })?,
        };

        let size = query
            .page_size
            .map(|s| (s as usize).clamp(1, self.page_size))
            .unwrap_or(self.page_size);
        let end = (start + size).min(records.len());

        let page: Vec<Record> = records[start..end].to_vec();
        Ok(if end < records.len() {
            RecordPage::with_offset(page, format!("itr{}", end))
        } else {
            RecordPage::last(page)
        })
    }

    async fn create_records(
        &self,
        table: &TableRef,
        request: CreateRecords,
    ) -> Result<Vec<Record>, StoreError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest::Create {
            table: table.table.clone(),
            request: request.clone(),
        });

        if let Some((status, message)) = &state.failure {
            return Err(api_error(*status, "MOCK_FAILURE", message));
        }

        let clock = DateTime::parse_from_rfc3339(CLOCK_START)
            .map(|t| t.with_timezone(&Utc))
            .unwrap_or_default();

        let mut created = Vec::with_capacity(request.records.len());
        for new in request.records {
            state.next_id += 1;
            let id = format!("rec{:014}", state.next_id);
            let created_time = (clock + Duration::seconds(state.next_id as i64))
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string();

            let record = Record {
                id,
                created_time,
                fields: new.fields,
            };
            state
                .tables
                .entry(table.table.clone())
                .or_default()
                .push(record.clone());
            created.push(record);
        }

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use table_client::{fetch_all, Fields};

    fn table(name: &str) -> TableRef {
        TableRef::new("key", "appTest", name)
    }

    #[tokio::test]
    async fn test_create_assigns_ids_and_times() {
        let store = MemoryStore::new();
        let mut fields = Fields::new();
        fields.insert("Name".to_string(), json!("Acme"));

        let created = store
            .create_records(&table("Leads"), CreateRecords::typecast(fields))
            .await
            .unwrap();

        assert_eq!(created.len(), 1);
        assert_eq!(created[0].id, "rec00000000000001");
        assert_eq!(created[0].created_time, "2024-01-01T00:00:01.000Z");
        assert_eq!(store.records("Leads").len(), 1);
        assert_eq!(store.request_count(), 1);
    }

    #[tokio::test]
    async fn test_pages_follow_offsets() {
        let store = MemoryStore::with_page_size(2);
        for i in 0..5 {
            store.insert("Leads", Record::new(format!("rec{}", i), ""));
        }

        let first = store.list_page(&table("Leads"), &ListQuery::new()).await.unwrap();
        assert_eq!(first.records.len(), 2);
        assert_eq!(first.offset.as_deref(), Some("itr2"));

        let all = fetch_all(&store, &table("Leads"), &ListQuery::new()).await.unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["rec0", "rec1", "rec2", "rec3", "rec4"]);
    }

    #[tokio::test]
    async fn test_sort_descending_puts_missing_last() {
        let store = MemoryStore::new();
        store.insert("Leads", Record::new("a", "").with_field("Updated", "2024-01-01"));
        store.insert("Leads", Record::new("b", ""));
        store.insert("Leads", Record::new("c", "").with_field("Updated", "2024-03-01"));

        let page = store
            .list_page(&table("Leads"), &ListQuery::new().sort_desc("Updated"))
            .await
            .unwrap();
        let ids: Vec<_> = page.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_filter_formula() {
        let store = MemoryStore::new();
        store.insert("Comments", Record::new("c1", "").with_field("Lead", json!(["rec1"])));
        store.insert("Comments", Record::new("c2", "").with_field("Lead", json!(["rec2"])));

        let query = ListQuery::new().filter("FIND('rec1', ARRAYJOIN({Lead}))");
        let page = store.list_page(&table("Comments"), &query).await.unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].id, "c1");

        let bad = ListQuery::new().filter("{Lead} = 'rec1'");
        let err = store.list_page(&table("Comments"), &bad).await.unwrap_err();
        assert_eq!(err.status(), Some(422));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = MemoryStore::new();
        store.fail_filtered_lists();

        let filtered = ListQuery::new().filter("FIND('rec1', ARRAYJOIN({Lead}))");
        assert!(store.list_page(&table("Comments"), &filtered).await.is_err());
        assert!(store.list_page(&table("Comments"), &ListQuery::new()).await.is_ok());

        store.fail_with(503, "Service unavailable");
        let err = store
            .list_page(&table("Comments"), &ListQuery::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Service unavailable");

        store.clear_failures();
        assert!(store.list_page(&table("Comments"), &filtered).await.is_ok());
    }
}
