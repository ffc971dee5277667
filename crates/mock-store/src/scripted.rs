//! Scripted record store - replays queued responses.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use table_client::{
    CreateRecords, ListQuery, Record, RecordPage, RecordStore, StoreError, TableRef,
};

use crate::request::RecordedRequest;

#[derive(Default)]
struct Script {
    lists: VecDeque<Result<RecordPage, StoreError>>,
    creates: VecDeque<Result<Vec<Record>, StoreError>>,
    requests: Vec<RecordedRequest>,
    echoed: u64,
}

/// A store that answers from queues, in order.
///
/// When the list queue is empty an empty final page is returned. When the
/// create queue is empty the submitted records are echoed back with
/// generated ids.
#[derive(Default)]
pub struct ScriptedStore {
    script: Mutex<Script>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a page for the next listing.
    pub fn push_page(&self, page: RecordPage) -> &Self {
        self.lock().lists.push_back(Ok(page));
        self
    }

    /// Queue a failure for the next listing.
    pub fn push_list_error(&self, error: StoreError) -> &Self {
        self.lock().lists.push_back(Err(error));
        self
    }

    /// Queue the records returned by the next creation.
    pub fn push_created(&self, records: Vec<Record>) -> &Self {
        self.lock().creates.push_back(Ok(records));
        self
    }

    /// Queue a failure for the next creation.
    pub fn push_create_error(&self, error: StoreError) -> &Self {
        self.lock().creates.push_back(Err(error));
        self
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn list_page(
        &self,
        table: &TableRef,
        query: &ListQuery,
    ) -> Result<RecordPage, StoreError> {
        let mut script = self.lock();
        script.requests.push(RecordedRequest::List {
            table: table.table.clone(),
            query: query.clone(),
        });
        script
            .lists
            .pop_front()
            .unwrap_or_else(|| Ok(RecordPage::default()))
    }

    async fn create_records(
        &self,
        table: &TableRef,
        request: CreateRecords,
    ) -> Result<Vec<Record>, StoreError> {
        let mut script = self.lock();
        script.requests.push(RecordedRequest::Create {
            table: table.table.clone(),
            request: request.clone(),
        });

        if let Some(response) = script.creates.pop_front() {
            return response;
        }

        let mut created = Vec::with_capacity(request.records.len());
        for new in request.records {
            script.echoed += 1;
            created.push(Record {
                id: format!("recEcho{:010}", script.echoed),
                created_time: "2024-01-01T00:00:00.000Z".to_string(),
                fields: new.fields,
            });
        }
        Ok(created)
    }
}
