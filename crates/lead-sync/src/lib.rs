//! Lead and comment-thread synchronization for a hosted tabular store.
//!
//! This crate maps the store's generic records onto typed leads and
//! comments and exposes the operations a dashboard needs:
//!
//! - [`lead::list_leads`] / [`lead::create_lead`]
//! - [`comment::send_message`] / [`comment::fetch_comments_for_lead`]
//! - [`SyncConfig::is_messaging_configured`]
//!
//! All state lives in the store. Every operation takes the store and the
//! configuration explicitly.
//!
//! # Example
//!
//! ```no_run
//! use lead_sync::{lead, NewLeadInput, SyncConfig};
//! use table_client::TableClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SyncConfig::from_env();
//!     let store = TableClient::new(config.store_config())?;
//!
//!     let input = NewLeadInput::new(" Acme Corp ", "rep@example.com").trimmed();
//!     let created = lead::create_lead(&store, &config, &input).await?;
//!     println!("Created {}", created.id);
//!
//!     for lead in lead::list_leads(&store, &config).await? {
//!         println!("{} ({})", lead.name, lead.status);
//!     }
//!     Ok(())
//! }
//! ```

pub mod comment;
pub mod config;
pub mod error;
pub mod lead;
pub mod mapper;
pub mod models;
pub mod validation;

pub use comment::{fetch_comments_for_lead, is_messaging_configured, send_message, send_message_to};
pub use config::{CommentFields, LeadFields, SyncConfig};
pub use error::{Result, SyncError};
pub use lead::{create_lead, list_leads};
pub use models::{Comment, Lead, LeadStatus, NewLeadInput, SELF_AUTHOR};
pub use validation::ValidationError;
