//! Fetching complete result sets across pages.

use tracing::debug;

use crate::config::TableRef;
use crate::error::StoreError;
use crate::store::RecordStore;
use crate::types::{ListQuery, Record};

/// Fetch every record matching `query`, following continuation tokens.
///
/// Pages are requested one after another, each carrying the `offset` of the
/// previous response, until a response omits it. Records are returned in
/// server order. The first failed page aborts the whole fetch; no partial
/// result is returned.
pub async fn fetch_all<S>(
    store: &S,
    table: &TableRef,
    query: &ListQuery,
) -> Result<Vec<Record>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let mut records = Vec::new();
    let mut offset = query.offset.clone();
    let mut page = 0u32;

    loop {
        page += 1;
        let current = query.at_offset(offset.take());
        let response = store.list_page(table, &current).await?;

        debug!(
            table = %table.table,
            page,
            count = response.records.len(),
            more = response.offset.is_some(),
            "Fetched page"
        );

        records.extend(response.records);

        match response.offset {
            Some(next) => offset = Some(next),
            None => break,
        }
    }

    Ok(records)
}
