//! Configuration for lead synchronization.
//!
//! Settings are read once at startup. Missing required settings are not an
//! error at read time; every operation that needs them fails with
//! [`SyncError::MissingConfig`] naming exactly what is absent.

use std::env;

use table_client::config::DEFAULT_API_URL;
use table_client::{StoreConfig, TableRef};

use crate::error::{Result, SyncError};

pub const ENV_API_KEY: &str = "AIRTABLE_API_KEY";
pub const ENV_BASE_ID: &str = "AIRTABLE_BASE_ID";
pub const ENV_LEADS_TABLE: &str = "AIRTABLE_LEADS_TABLE";
pub const ENV_API_URL: &str = "AIRTABLE_API_URL";
pub const ENV_COMMENTS_TABLE: &str = "AIRTABLE_COMMENTS_TABLE";

pub const ENV_FIELD_NAME: &str = "AIRTABLE_FIELD_NAME";
pub const ENV_FIELD_STATUS: &str = "AIRTABLE_FIELD_STATUS";
pub const ENV_FIELD_REP_EMAIL: &str = "AIRTABLE_FIELD_REP_EMAIL";
pub const ENV_FIELD_LAST_UPDATED: &str = "AIRTABLE_FIELD_LAST_UPDATED";
pub const ENV_FIELD_PARTNER_COMMENT_COUNT: &str = "AIRTABLE_FIELD_PARTNER_COMMENT_COUNT";
pub const ENV_FIELD_PARTNER_COMMENT_UPDATED: &str = "AIRTABLE_FIELD_PARTNER_COMMENT_UPDATED";
pub const ENV_FIELD_LEAD_EMAIL: &str = "AIRTABLE_FIELD_LEAD_EMAIL";
pub const ENV_FIELD_LEAD_PHONE: &str = "AIRTABLE_FIELD_LEAD_PHONE";
pub const ENV_FIELD_NOTES: &str = "AIRTABLE_FIELD_NOTES";
pub const ENV_FIELD_AFFILIATE_COMMENTS: &str = "AIRTABLE_FIELD_AFFILIATE_COMMENTS";

pub const ENV_COMMENT_TEXT_FIELD: &str = "AIRTABLE_COMMENT_TEXT_FIELD";
pub const ENV_COMMENT_LEAD_FIELD: &str = "AIRTABLE_COMMENT_LEAD_FIELD";
pub const ENV_COMMENT_AUTHOR_FIELD: &str = "AIRTABLE_COMMENT_AUTHOR_FIELD";

/// Default comment table name.
pub const DEFAULT_COMMENTS_TABLE: &str = "Affiliate Comments";

/// Column names of the lead table.
///
/// `None` means the column is not mapped: it is never read or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFields {
    pub name: String,
    pub status: String,
    pub rep_email: String,
    pub last_updated: Option<String>,
    pub partner_comment_count: Option<String>,
    pub partner_comment_updated: Option<String>,
    pub lead_email: Option<String>,
    pub lead_phone: Option<String>,
    pub notes: Option<String>,
    pub affiliate_comments: Option<String>,
}

impl Default for LeadFields {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            status: "Status".to_string(),
            rep_email: "Rep Email".to_string(),
            last_updated: Some("Last Updated".to_string()),
            partner_comment_count: Some("Partner Comment Count".to_string()),
            partner_comment_updated: Some("Partner Comment Updated".to_string()),
            lead_email: Some("Lead Email".to_string()),
            lead_phone: Some("Lead Phone".to_string()),
            notes: Some("Notes".to_string()),
            affiliate_comments: Some("Affiliate Comments".to_string()),
        }
    }
}

/// Column names of the comment table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    /// Message body column.
    pub text: Option<String>,
    /// Link-to-lead column.
    pub lead: Option<String>,
    /// Author column. When unset, authors are probed from common names.
    pub author: Option<String>,
}

impl Default for CommentFields {
    fn default() -> Self {
        Self {
            text: Some("Comment".to_string()),
            lead: Some("Lead".to_string()),
            author: None,
        }
    }
}

/// Process-wide synchronization settings.
#[derive(Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// API root of the store.
    pub api_url: String,
    /// Bearer credential.
    pub api_key: Option<String>,
    /// Base identifier.
    pub base_id: Option<String>,
    /// Lead table identifier.
    pub leads_table: Option<String>,
    /// Comment table identifier.
    pub comments_table: Option<String>,
    /// Lead column mapping.
    pub lead_fields: LeadFields,
    /// Comment column mapping.
    pub comment_fields: CommentFields,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            base_id: None,
            leads_table: None,
            comments_table: Some(DEFAULT_COMMENTS_TABLE.to_string()),
            lead_fields: LeadFields::default(),
            comment_fields: CommentFields::default(),
        }
    }
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_id", &self.base_id)
            .field("leads_table", &self.leads_table)
            .field("comments_table", &self.comments_table)
            .field("lead_fields", &self.lead_fields)
            .field("comment_fields", &self.comment_fields)
            .finish()
    }
}

/// A required setting: absent or blank is `None`.
fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// An optional column: unset takes the default, blank means not mapped.
fn mapped(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: Option<String>,
) -> Option<String> {
    match lookup(key) {
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(v.trim().to_string()),
        None => default,
    }
}

/// A column that is always written: unset or blank takes the default.
fn always(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: String) -> String {
    required(lookup, key).unwrap_or(default)
}

impl SyncConfig {
    /// Create configuration from environment variables.
    ///
    /// Required (checked per operation, not here):
    /// - `AIRTABLE_API_KEY`, `AIRTABLE_BASE_ID`, `AIRTABLE_LEADS_TABLE`
    ///
    /// Optional:
    /// - `AIRTABLE_API_URL` (default: https://api.airtable.com)
    /// - `AIRTABLE_COMMENTS_TABLE` (default: Affiliate Comments)
    /// - `AIRTABLE_FIELD_*` and `AIRTABLE_COMMENT_*` column overrides
    ///
    /// Setting an optional column variable to an empty string unmaps it.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = LeadFields::default();
        let lead_fields = LeadFields {
            name: always(&lookup, ENV_FIELD_NAME, defaults.name),
            status: always(&lookup, ENV_FIELD_STATUS, defaults.status),
            rep_email: always(&lookup, ENV_FIELD_REP_EMAIL, defaults.rep_email),
            last_updated: mapped(&lookup, ENV_FIELD_LAST_UPDATED, defaults.last_updated),
            partner_comment_count: mapped(
                &lookup,
                ENV_FIELD_PARTNER_COMMENT_COUNT,
                defaults.partner_comment_count,
            ),
            partner_comment_updated: mapped(
                &lookup,
                ENV_FIELD_PARTNER_COMMENT_UPDATED,
                defaults.partner_comment_updated,
            ),
            lead_email: mapped(&lookup, ENV_FIELD_LEAD_EMAIL, defaults.lead_email),
            lead_phone: mapped(&lookup, ENV_FIELD_LEAD_PHONE, defaults.lead_phone),
            notes: mapped(&lookup, ENV_FIELD_NOTES, defaults.notes),
            affiliate_comments: mapped(
                &lookup,
                ENV_FIELD_AFFILIATE_COMMENTS,
                defaults.affiliate_comments,
            ),
        };

        let defaults = CommentFields::default();
        let comment_fields = CommentFields {
            text: mapped(&lookup, ENV_COMMENT_TEXT_FIELD, defaults.text),
            lead: mapped(&lookup, ENV_COMMENT_LEAD_FIELD, defaults.lead),
            author: mapped(&lookup, ENV_COMMENT_AUTHOR_FIELD, defaults.author),
        };

        Self {
            api_url: always(&lookup, ENV_API_URL, DEFAULT_API_URL.to_string()),
            api_key: required(&lookup, ENV_API_KEY),
            base_id: required(&lookup, ENV_BASE_ID),
            leads_table: required(&lookup, ENV_LEADS_TABLE),
            comments_table: mapped(
                &lookup,
                ENV_COMMENTS_TABLE,
                Some(DEFAULT_COMMENTS_TABLE.to_string()),
            ),
            lead_fields,
            comment_fields,
        }
    }

    /// Create a new config builder.
    pub fn builder() -> SyncConfigBuilder {
        SyncConfigBuilder::default()
    }

    /// HTTP client configuration for the store.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.api_url.clone())
    }

    /// Whether the comment thread feature can be used.
    ///
    /// True only when the comment table and both its text and link columns
    /// are configured. Callers check this before offering message composition.
    pub fn is_messaging_configured(&self) -> bool {
        self.comments_table.is_some()
            && self.comment_fields.text.is_some()
            && self.comment_fields.lead.is_some()
    }

    /// Resolve the lead table, or name every missing setting.
    pub fn leads_table(&self) -> Result<TableRef> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.base_id.is_none() {
            missing.push(ENV_BASE_ID);
        }
        if self.leads_table.is_none() {
            missing.push(ENV_LEADS_TABLE);
        }

        match (&self.api_key, &self.base_id, &self.leads_table) {
            (Some(key), Some(base), Some(table)) => Ok(TableRef::new(key, base, table)),
            _ => Err(SyncError::MissingConfig(missing)),
        }
    }

    /// Resolve the comment table for reading a thread.
    ///
    /// Needs the link column for the store-side filter. The text column is
    /// not needed: decoding probes well-known column names when it is unset.
    pub fn thread_table(&self) -> Result<TableRef> {
        self.comment_table_with(&[(ENV_COMMENT_LEAD_FIELD, self.comment_fields.lead.is_some())])
    }

    /// Resolve the comment table for writing messages, or name every
    /// missing setting.
    pub fn comments_table(&self) -> Result<TableRef> {
        self.comment_table_with(&[
            (ENV_COMMENT_TEXT_FIELD, self.comment_fields.text.is_some()),
            (ENV_COMMENT_LEAD_FIELD, self.comment_fields.lead.is_some()),
        ])
    }

    fn comment_table_with(&self, columns: &[(&'static str, bool)]) -> Result<TableRef> {
        let mut missing = Vec::new();
        if self.api_key.is_none() {
            missing.push(ENV_API_KEY);
        }
        if self.base_id.is_none() {
            missing.push(ENV_BASE_ID);
        }
        if self.comments_table.is_none() {
            missing.push(ENV_COMMENTS_TABLE);
        }
        missing.extend(columns.iter().filter(|(_, set)| !set).map(|(key, _)| *key));

        match (&self.api_key, &self.base_id, &self.comments_table) {
            (Some(key), Some(base), Some(table)) if missing.is_empty() => {
                Ok(TableRef::new(key, base, table))
            }
            _ => Err(SyncError::MissingConfig(missing)),
        }
    }
}

/// Builder for SyncConfig.
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    config: SyncConfig,
}

impl SyncConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the base identifier.
    pub fn base_id(mut self, base: impl Into<String>) -> Self {
        self.config.base_id = Some(base.into());
        self
    }

    /// Set the lead table.
    pub fn leads_table(mut self, table: impl Into<String>) -> Self {
        self.config.leads_table = Some(table.into());
        self
    }

    /// Set the comment table.
    pub fn comments_table(mut self, table: impl Into<String>) -> Self {
        self.config.comments_table = Some(table.into());
        self
    }

    /// Disable the comment table.
    pub fn without_comments(mut self) -> Self {
        self.config.comments_table = None;
        self
    }

    /// Set the API root.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    /// Set the lead column mapping.
    pub fn lead_fields(mut self, fields: LeadFields) -> Self {
        self.config.lead_fields = fields;
        self
    }

    /// Set the comment column mapping.
    pub fn comment_fields(mut self, fields: CommentFields) -> Self {
        self.config.comment_fields = fields;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SyncConfig {
        self.config
    }
}
