//! Lead operations.

use table_client::{fetch_all, CreateRecords, ListQuery, RecordStore};
use tracing::{debug, info, warn};

use crate::comment;
use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::mapper::{decode_lead, encode_new_lead};
use crate::models::{Lead, NewLeadInput};

/// List all leads, most recently updated first.
///
/// Every page is fetched. Order is whatever the store returns for a
/// descending sort on the latest-update column; when that column is not
/// mapped, the store's default order is kept.
pub async fn list_leads(store: &dyn RecordStore, config: &SyncConfig) -> Result<Vec<Lead>> {
    let table = config.leads_table()?;

    let mut query = ListQuery::new();
    if let Some(column) = &config.lead_fields.last_updated {
        query = query.sort_desc(column.clone());
    }

    let records = fetch_all(store, &table, &query).await?;
    debug!(count = records.len(), "Listed leads");

    Ok(records.iter().map(|r| decode_lead(r, config)).collect())
}

/// Create a lead and return it as stored.
///
/// `input` must already be trimmed (see [`NewLeadInput::trimmed`]); it is
/// validated as given and rejected before any request when a required field
/// is empty. The store is asked to typecast values. When the input carries
/// an initial message and the thread feature is configured, the message is
/// posted to the new lead's thread; a failure there is logged and does not
/// fail the creation.
pub async fn create_lead(
    store: &dyn RecordStore,
    config: &SyncConfig,
    input: &NewLeadInput,
) -> Result<Lead> {
    input.validate()?;
    let table = config.leads_table()?;

    let fields = encode_new_lead(input, config);
    let created = store
        .create_records(&table, CreateRecords::typecast(fields))
        .await?;

    let record = created.first().ok_or(SyncError::NotCreated)?;
    let lead = decode_lead(record, config);
    info!(lead_id = %lead.id, "Created lead");

    if let Some(message) = input.initial_message.as_deref() {
        if config.is_messaging_configured() {
            if let Err(e) = comment::send_message(store, config, &lead, message).await {
                warn!(lead_id = %lead.id, error = %e, "Failed to post initial message");
            }
        }
    }

    Ok(lead)
}
