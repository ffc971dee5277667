//! Comment thread operations.

use serde_json::Value;
use table_client::{fetch_all, CreateRecords, ListQuery, Record, RecordStore};
use tracing::{debug, info, warn};

use crate::config::{SyncConfig, ENV_COMMENT_LEAD_FIELD, ENV_COMMENT_TEXT_FIELD};
use crate::error::{Result, SyncError};
use crate::mapper::{decode_comment, encode_message};
use crate::models::{Comment, Lead};
use crate::validation::validate_message;

/// Whether the comment thread feature is configured.
pub fn is_messaging_configured(config: &SyncConfig) -> bool {
    config.is_messaging_configured()
}

/// Post a message to a lead's thread.
pub async fn send_message(
    store: &dyn RecordStore,
    config: &SyncConfig,
    lead: &Lead,
    text: &str,
) -> Result<()> {
    send_message_to(store, config, &lead.id, text).await
}

/// Post a message to the thread of the lead with the given identifier.
///
/// The record links to exactly that lead. When an author column is
/// configured it is stamped with the operator's label.
pub async fn send_message_to(
    store: &dyn RecordStore,
    config: &SyncConfig,
    lead_id: &str,
    text: &str,
) -> Result<()> {
    validate_message(text)?;
    let table = config.comments_table()?;

    let fields = encode_message(lead_id, text, &config.comment_fields).ok_or_else(|| {
        SyncError::MissingConfig(vec![ENV_COMMENT_TEXT_FIELD, ENV_COMMENT_LEAD_FIELD])
    })?;

    store
        .create_records(&table, CreateRecords::typecast(fields))
        .await?;

    info!(lead_id, "Sent message");
    Ok(())
}

/// Escape a value for a single-quoted formula string.
fn quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Escape a column name for a `{..}` formula reference.
fn brace(column: &str) -> String {
    column.replace('\\', "\\\\").replace('}', "\\}")
}

/// Formula matching records whose link column mentions `lead_id`.
///
/// `ARRAYJOIN` flattens linked-record arrays and leaves plain strings
/// untouched, so both column shapes match.
pub fn thread_formula(link_column: &str, lead_id: &str) -> String {
    format!("FIND('{}', ARRAYJOIN({{{}}}))", quote(lead_id), brace(link_column))
}

/// Whether any field of the record contains or links to `lead_id`.
pub fn record_links_to(record: &Record, lead_id: &str) -> bool {
    if lead_id.is_empty() {
        return false;
    }

    record.fields.values().any(|value| match value {
        Value::String(s) => s.contains(lead_id),
        Value::Array(items) => items.iter().any(|item| match item {
            Value::String(s) => s == lead_id,
            Value::Object(map) => map.get("id").and_then(Value::as_str) == Some(lead_id),
            _ => false,
        }),
        _ => false,
    })
}

/// Fetch a lead's thread, oldest first.
///
/// The store-side filter is tried first. If it fails or finds nothing, the
/// whole comment table is fetched and filtered locally on any field that
/// contains or links to the lead. Comments without text are dropped. Errors
/// of the local scan propagate. Reading works without a configured text
/// column.
pub async fn fetch_comments_for_lead(
    store: &dyn RecordStore,
    config: &SyncConfig,
    lead_id: &str,
) -> Result<Vec<Comment>> {
    let table = config.thread_table()?;
    let link_column = config
        .comment_fields
        .lead
        .as_deref()
        .ok_or_else(|| SyncError::MissingConfig(vec![ENV_COMMENT_LEAD_FIELD]))?;

    let filtered = ListQuery::new().filter(thread_formula(link_column, lead_id));
    let mut records = match fetch_all(store, &table, &filtered).await {
        Ok(records) => records,
        Err(e) => {
            warn!(lead_id, error = %e, "Filtered comment query failed");
            Vec::new()
        }
    };

    if records.is_empty() {
        debug!(lead_id, "Scanning all comments");
        records = fetch_all(store, &table, &ListQuery::new())
            .await?
            .into_iter()
            .filter(|r| record_links_to(r, lead_id))
            .collect();
    }

    let mut comments: Vec<Comment> = records
        .iter()
        .map(|r| decode_comment(r, &config.comment_fields))
        .filter(|c| !c.text.trim().is_empty())
        .collect();
    comments.sort_by_key(|c| c.created_at);

    Ok(comments)
}
