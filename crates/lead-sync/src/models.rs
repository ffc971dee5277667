//! Domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{trim_optional, validate_required, ValidationError};

/// Author label that marks a comment as written by the operator.
pub const SELF_AUTHOR: &str = "Affiliate";

/// Status literal written on every newly created lead.
pub const INITIAL_STATUS: &str = "New";

/// Pipeline status of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
    /// Any raw value that is missing or not one of the known literals.
    Unknown,
}

impl LeadStatus {
    /// Parse a raw status label, case-insensitively and ignoring surrounding
    /// whitespace. Unrecognized labels map to [`LeadStatus::Unknown`].
    pub fn from_label(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "new" => LeadStatus::New,
            "contacted" => LeadStatus::Contacted,
            "qualified" => LeadStatus::Qualified,
            "converted" => LeadStatus::Converted,
            "lost" => LeadStatus::Lost,
            _ => LeadStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
            LeadStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sales lead submitted by an affiliate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned record identifier.
    pub id: String,
    /// Lead name.
    pub name: String,
    /// Pipeline status.
    pub status: LeadStatus,
    /// Store-assigned creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Time of the latest update to the lead.
    pub last_updated: Option<DateTime<Utc>>,
    /// Affiliate (rep) email.
    pub rep_email: Option<String>,
    /// Number of partner comments on the lead.
    pub partner_comment_count: u32,
    /// Time of the latest partner comment.
    pub partner_comment_updated: Option<DateTime<Utc>>,
    /// Lead contact email.
    pub lead_email: Option<String>,
    /// Lead contact phone.
    pub lead_phone: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Aggregated affiliate comments, for stores without a comment table.
    pub affiliate_comments: Option<String>,
}

/// One message in a lead's conversation thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned record identifier.
    pub id: String,
    /// Message body.
    pub text: String,
    /// Store-assigned creation time.
    pub created_at: Option<DateTime<Utc>>,
    /// Author label, if any.
    pub author: Option<String>,
}

impl Comment {
    /// Whether the operator wrote this comment.
    ///
    /// Any other author, including none, is the partner team.
    pub fn is_from_self(&self) -> bool {
        self.author
            .as_deref()
            .map(|a| a.eq_ignore_ascii_case(SELF_AUTHOR))
            .unwrap_or(false)
    }
}

/// User-entered fields for a new lead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLeadInput {
    pub name: String,
    pub rep_email: String,
    #[serde(default)]
    pub lead_email: Option<String>,
    #[serde(default)]
    pub lead_phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// First message of the lead's thread.
    #[serde(default)]
    pub initial_message: Option<String>,
}

impl NewLeadInput {
    /// Create input with the two required fields.
    pub fn new(name: impl Into<String>, rep_email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rep_email: rep_email.into(),
            ..Default::default()
        }
    }

    pub fn with_lead_email(mut self, email: impl Into<String>) -> Self {
        self.lead_email = Some(email.into());
        self
    }

    pub fn with_lead_phone(mut self, phone: impl Into<String>) -> Self {
        self.lead_phone = Some(phone.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_initial_message(mut self, message: impl Into<String>) -> Self {
        self.initial_message = Some(message.into());
        self
    }

    /// Copy with every field trimmed and blank optionals dropped.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            rep_email: self.rep_email.trim().to_string(),
            lead_email: trim_optional(self.lead_email.as_deref()),
            lead_phone: trim_optional(self.lead_phone.as_deref()),
            notes: trim_optional(self.notes.as_deref()),
            initial_message: trim_optional(self.initial_message.as_deref()),
        }
    }

    /// Reject input missing a required field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_required("name", &self.name)?;
        validate_required("rep email", &self.rep_email)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_label() {
        assert_eq!(LeadStatus::from_label("NEW"), LeadStatus::New);
        assert_eq!(LeadStatus::from_label("new"), LeadStatus::New);
        assert_eq!(LeadStatus::from_label("New "), LeadStatus::New);
        assert_eq!(LeadStatus::from_label("Contacted"), LeadStatus::Contacted);
        assert_eq!(LeadStatus::from_label("qualified"), LeadStatus::Qualified);
        assert_eq!(LeadStatus::from_label("CONVERTED"), LeadStatus::Converted);
        assert_eq!(LeadStatus::from_label("Lost"), LeadStatus::Lost);
        assert_eq!(LeadStatus::from_label(""), LeadStatus::Unknown);
        assert_eq!(LeadStatus::from_label("unknown"), LeadStatus::Unknown);
        assert_eq!(LeadStatus::from_label("Won"), LeadStatus::Unknown);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::Qualified).unwrap(),
            "\"qualified\""
        );
        assert_eq!(LeadStatus::Lost.to_string(), "lost");
    }

    #[test]
    fn test_comment_from_self() {
        let mut comment = Comment {
            id: "rec1".to_string(),
            text: "hi".to_string(),
            created_at: None,
            author: Some("affiliate".to_string()),
        };
        assert!(comment.is_from_self());

        comment.author = Some("AFFILIATE".to_string());
        assert!(comment.is_from_self());

        comment.author = Some("Partner".to_string());
        assert!(!comment.is_from_self());

        comment.author = None;
        assert!(!comment.is_from_self());
    }

    #[test]
    fn test_new_lead_trimmed() {
        let input = NewLeadInput::new("  Acme Corp ", " rep@example.com")
            .with_lead_phone("   ")
            .with_notes(" warm lead ");

        let trimmed = input.trimmed();
        assert_eq!(trimmed.name, "Acme Corp");
        assert_eq!(trimmed.rep_email, "rep@example.com");
        assert_eq!(trimmed.lead_phone, None);
        assert_eq!(trimmed.notes, Some("warm lead".to_string()));
    }

    #[test]
    fn test_new_lead_validate() {
        assert!(NewLeadInput::new("Acme", "rep@example.com").validate().is_ok());
        assert_eq!(
            NewLeadInput::new("", "rep@example.com").validate(),
            Err(ValidationError::Empty("name".to_string()))
        );
        assert_eq!(
            NewLeadInput::new("Acme", "").validate(),
            Err(ValidationError::Empty("rep email".to_string()))
        );
        assert!(NewLeadInput::new("   ", "rep@example.com")
            .trimmed()
            .validate()
            .is_err());
    }
}
