//! Translation between generic store records and domain entities.
//!
//! Store columns are operator-renameable and loosely typed, so every decoder
//! here degrades to a fallback value (absent, zero or `Unknown`) instead of
//! failing. Nothing in this module performs I/O.

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use table_client::{Fields, Record};

use crate::config::{CommentFields, SyncConfig};
use crate::models::{Comment, Lead, LeadStatus, NewLeadInput, INITIAL_STATUS, SELF_AUTHOR};

/// Columns probed, after the configured one, for a comment's text.
pub const COMMENT_TEXT_CANDIDATES: &[&str] =
    &["Comment", "Message", "Text", "Body", "Content", "Notes"];

/// Columns probed for a comment's author when no author column is configured.
pub const COMMENT_AUTHOR_CANDIDATES: &[&str] = &["Author", "From", "Sender", "Created By", "Role"];

/// Look up a column that may be unmapped.
fn column<'a>(fields: &'a Fields, name: Option<&str>) -> Option<&'a Value> {
    name.and_then(|n| fields.get(n))
}

/// Textual form of a single value or linked item.
///
/// Collaborator-style objects render as their name, then email, then id.
fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => ["name", "email", "id"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// Decode a text cell.
///
/// Strings pass through, numbers are rendered, and arrays of linked items
/// are joined with `", "`. An empty array is absent.
pub fn decode_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(item_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        other => item_text(other),
    }
}

/// Decode a numeric cell. Non-numeric and non-finite values are absent.
pub fn decode_number(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Decode a count cell. Anything unusable, including negatives, is 0.
pub fn decode_count(value: Option<&Value>) -> u32 {
    match decode_number(value) {
        Some(n) if n >= 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

/// Decode a date or date-time cell (RFC 3339 or `YYYY-MM-DD`).
pub fn decode_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?.trim();
    parse_timestamp(raw).or_else(|| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    })
}

/// Parse an RFC 3339 timestamp.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Decode a status cell. Non-string and unrecognized values are `Unknown`.
pub fn decode_status(value: Option<&Value>) -> LeadStatus {
    match value {
        Some(Value::String(s)) => LeadStatus::from_label(s),
        _ => LeadStatus::Unknown,
    }
}

/// Decode a lead record.
pub fn decode_lead(record: &Record, config: &SyncConfig) -> Lead {
    let cols = &config.lead_fields;
    let fields = &record.fields;

    Lead {
        id: record.id.clone(),
        name: decode_text(fields.get(&cols.name)).unwrap_or_default(),
        status: decode_status(fields.get(&cols.status)),
        created_at: parse_timestamp(&record.created_time),
        last_updated: decode_date(column(fields, cols.last_updated.as_deref())),
        rep_email: decode_text(fields.get(&cols.rep_email)),
        partner_comment_count: decode_count(column(fields, cols.partner_comment_count.as_deref())),
        partner_comment_updated: decode_date(column(
            fields,
            cols.partner_comment_updated.as_deref(),
        )),
        lead_email: decode_text(column(fields, cols.lead_email.as_deref())),
        lead_phone: decode_text(column(fields, cols.lead_phone.as_deref())),
        notes: decode_text(column(fields, cols.notes.as_deref())),
        affiliate_comments: decode_text(column(fields, cols.affiliate_comments.as_deref())),
    }
}

/// First candidate column holding non-blank text.
fn probe_text<'a>(
    fields: &Fields,
    candidates: impl IntoIterator<Item = &'a str>,
) -> Option<String> {
    candidates
        .into_iter()
        .filter_map(|name| decode_text(fields.get(name)))
        .find(|text| !text.trim().is_empty())
}

/// Decode a comment record.
///
/// Text is empty when no candidate column yields any; such comments are
/// dropped by the thread repository.
pub fn decode_comment(record: &Record, cols: &CommentFields) -> Comment {
    let fields = &record.fields;

    let text_candidates = cols
        .text
        .as_deref()
        .into_iter()
        .chain(COMMENT_TEXT_CANDIDATES.iter().copied());
    let text = probe_text(fields, text_candidates).unwrap_or_default();

    let author = match cols.author.as_deref() {
        Some(name) => decode_text(fields.get(name)).filter(|a| !a.trim().is_empty()),
        None => probe_text(fields, COMMENT_AUTHOR_CANDIDATES.iter().copied()),
    };

    Comment {
        id: record.id.clone(),
        text,
        created_at: parse_timestamp(&record.created_time),
        author,
    }
}

/// Insert a value when both it and its destination column are present.
fn put_optional(fields: &mut Fields, column: Option<&str>, value: Option<&str>) {
    if let (Some(column), Some(value)) = (column, value) {
        if !value.is_empty() {
            fields.insert(column.to_string(), Value::String(value.to_string()));
        }
    }
}

/// Build the field map for a new lead.
///
/// Name, rep email and the initial status are always sent. Optional values
/// are sent only when non-empty and mapped. The initial message goes into
/// the aggregated comments column only when the thread feature is off.
pub fn encode_new_lead(input: &NewLeadInput, config: &SyncConfig) -> Fields {
    let cols = &config.lead_fields;
    let mut fields = Fields::new();

    fields.insert(cols.name.clone(), Value::String(input.name.clone()));
    fields.insert(cols.rep_email.clone(), Value::String(input.rep_email.clone()));
    fields.insert(cols.status.clone(), Value::String(INITIAL_STATUS.to_string()));

    put_optional(&mut fields, cols.lead_email.as_deref(), input.lead_email.as_deref());
    put_optional(&mut fields, cols.lead_phone.as_deref(), input.lead_phone.as_deref());
    put_optional(&mut fields, cols.notes.as_deref(), input.notes.as_deref());

    if !config.is_messaging_configured() {
        put_optional(
            &mut fields,
            cols.affiliate_comments.as_deref(),
            input.initial_message.as_deref(),
        );
    }

    fields
}

/// Build the field map for a message linked to a lead.
///
/// Returns `None` when the comment columns are not configured.
pub fn encode_message(lead_id: &str, text: &str, cols: &CommentFields) -> Option<Fields> {
    let text_column = cols.text.as_deref()?;
    let lead_column = cols.lead.as_deref()?;

    let mut fields = Fields::new();
    fields.insert(text_column.to_string(), Value::String(text.to_string()));
    fields.insert(
        lead_column.to_string(),
        Value::Array(vec![Value::String(lead_id.to_string())]),
    );
    if let Some(author) = cols.author.as_deref() {
        fields.insert(author.to_string(), Value::String(SELF_AUTHOR.to_string()));
    }

    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lead_record(fields: Value) -> Record {
        Record {
            id: "recLead1".to_string(),
            created_time: "2024-05-01T12:00:00.000Z".to_string(),
            fields: fields.as_object().cloned().unwrap_or_default(),
        }
    }

    #[test]
    fn test_decode_text_shapes() {
        assert_eq!(decode_text(Some(&json!("plain"))), Some("plain".to_string()));
        assert_eq!(decode_text(Some(&json!(42))), Some("42".to_string()));
        assert_eq!(decode_text(Some(&json!(2.5))), Some("2.5".to_string()));
        assert_eq!(
            decode_text(Some(&json!(["recA", "recB"]))),
            Some("recA, recB".to_string())
        );
        assert_eq!(
            decode_text(Some(&json!([{ "id": "usr1", "email": "a@x.co", "name": "Ann" }, 7]))),
            Some("Ann, 7".to_string())
        );
        assert_eq!(decode_text(Some(&json!([]))), None);
        assert_eq!(decode_text(Some(&json!(null))), None);
        assert_eq!(decode_text(Some(&json!(true))), None);
        assert_eq!(decode_text(None), None);
    }

    #[test]
    fn test_decode_status_fallbacks() {
        assert_eq!(decode_status(Some(&json!("NEW"))), LeadStatus::New);
        assert_eq!(decode_status(Some(&json!("new"))), LeadStatus::New);
        assert_eq!(decode_status(Some(&json!("New "))), LeadStatus::New);
        assert_eq!(decode_status(Some(&json!("Qualified"))), LeadStatus::Qualified);
        assert_eq!(decode_status(Some(&json!(""))), LeadStatus::Unknown);
        assert_eq!(decode_status(Some(&json!("Pending"))), LeadStatus::Unknown);
        assert_eq!(decode_status(Some(&json!(3))), LeadStatus::Unknown);
        assert_eq!(decode_status(Some(&json!(null))), LeadStatus::Unknown);
        assert_eq!(decode_status(Some(&json!(["New"]))), LeadStatus::Unknown);
        assert_eq!(decode_status(None), LeadStatus::Unknown);
    }

    #[test]
    fn test_decode_count() {
        assert_eq!(decode_count(Some(&json!(3))), 3);
        assert_eq!(decode_count(Some(&json!("12"))), 12);
        assert_eq!(decode_count(Some(&json!(" 4 "))), 4);
        assert_eq!(decode_count(Some(&json!("2.9"))), 2);
        assert_eq!(decode_count(Some(&json!("abc"))), 0);
        assert_eq!(decode_count(Some(&json!("NaN"))), 0);
        assert_eq!(decode_count(Some(&json!("inf"))), 0);
        assert_eq!(decode_count(Some(&json!(-5))), 0);
        assert_eq!(decode_count(Some(&json!(null))), 0);
        assert_eq!(decode_count(None), 0);
    }

    #[test]
    fn test_decode_number() {
        assert_eq!(decode_number(Some(&json!("1.5"))), Some(1.5));
        assert_eq!(decode_number(Some(&json!(7))), Some(7.0));
        assert_eq!(decode_number(Some(&json!("-infinity"))), None);
        assert_eq!(decode_number(Some(&json!({}))), None);
    }

    #[test]
    fn test_decode_date() {
        let dt = decode_date(Some(&json!("2024-05-01T12:30:00.000Z"))).unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let day = decode_date(Some(&json!("2024-05-01"))).unwrap();
        assert_eq!(day.to_rfc3339(), "2024-05-01T00:00:00+00:00");

        assert_eq!(decode_date(Some(&json!("yesterday"))), None);
        assert_eq!(decode_date(Some(&json!(1714564800))), None);
        assert_eq!(decode_date(None), None);
    }

    #[test]
    fn test_decode_full_lead() {
        let record = lead_record(json!({
            "Name": "Acme Corp",
            "Status": "Contacted",
            "Rep Email": "rep@example.com",
            "Last Updated": "2024-05-02T09:00:00.000Z",
            "Partner Comment Count": "3",
            "Lead Email": "buyer@acme.test",
            "Lead Phone": 5551234,
            "Notes": "warm",
        }));

        let lead = decode_lead(&record, &SyncConfig::default());
        assert_eq!(lead.id, "recLead1");
        assert_eq!(lead.name, "Acme Corp");
        assert_eq!(lead.status, LeadStatus::Contacted);
        assert!(lead.created_at.is_some());
        assert!(lead.last_updated.is_some());
        assert_eq!(lead.rep_email.as_deref(), Some("rep@example.com"));
        assert_eq!(lead.partner_comment_count, 3);
        assert_eq!(lead.partner_comment_updated, None);
        assert_eq!(lead.lead_email.as_deref(), Some("buyer@acme.test"));
        assert_eq!(lead.lead_phone.as_deref(), Some("5551234"));
        assert_eq!(lead.notes.as_deref(), Some("warm"));
        assert_eq!(lead.affiliate_comments, None);
    }

    #[test]
    fn test_decode_sparse_lead() {
        let record = Record::new("recEmpty", "not a timestamp");
        let lead = decode_lead(&record, &SyncConfig::default());

        assert_eq!(lead.name, "");
        assert_eq!(lead.status, LeadStatus::Unknown);
        assert_eq!(lead.created_at, None);
        assert_eq!(lead.partner_comment_count, 0);
        assert_eq!(lead.rep_email, None);
    }

    #[test]
    fn test_unmapped_field_is_always_absent() {
        let mut config = SyncConfig::default();
        config.lead_fields.notes = None;
        config.lead_fields.partner_comment_count = None;

        let record = lead_record(json!({ "Notes": "present", "Partner Comment Count": 9 }));
        let lead = decode_lead(&record, &config);

        assert_eq!(lead.notes, None);
        assert_eq!(lead.partner_comment_count, 0);
    }

    #[test]
    fn test_renamed_field() {
        let mut config = SyncConfig::default();
        config.lead_fields.name = "Company".to_string();

        let record = lead_record(json!({ "Company": "Renamed Inc", "Name": "ignored" }));
        assert_eq!(decode_lead(&record, &config).name, "Renamed Inc");
    }

    #[test]
    fn test_comment_text_falls_back_through_candidates() {
        let cols = CommentFields {
            text: None,
            ..CommentFields::default()
        };
        let record = Record::new("recC", "2024-05-01T12:00:00.000Z").with_field("Message", "hello");

        assert_eq!(decode_comment(&record, &cols).text, "hello");
    }

    #[test]
    fn test_comment_text_skips_blank_candidates() {
        let record = Record::new("recC", "")
            .with_field("Comment", "   ")
            .with_field("Body", "from body");
        assert_eq!(decode_comment(&record, &CommentFields::default()).text, "from body");
    }

    #[test]
    fn test_comment_configured_text_column_first() {
        let cols = CommentFields {
            text: Some("Reply".to_string()),
            ..CommentFields::default()
        };
        let record = Record::new("recC", "")
            .with_field("Comment", "fallback")
            .with_field("Reply", "configured");
        assert_eq!(decode_comment(&record, &cols).text, "configured");
    }

    #[test]
    fn test_comment_without_text_is_empty() {
        let record = Record::new("recC", "").with_field("Lead", json!(["recLead1"]));
        assert_eq!(decode_comment(&record, &CommentFields::default()).text, "");
    }

    #[test]
    fn test_comment_author_probing() {
        let record = Record::new("recC", "")
            .with_field("Comment", "hi")
            .with_field("From", "Affiliate");
        let comment = decode_comment(&record, &CommentFields::default());
        assert_eq!(comment.author.as_deref(), Some("Affiliate"));
        assert!(comment.is_from_self());
    }

    #[test]
    fn test_comment_author_configured_column_only() {
        let cols = CommentFields {
            author: Some("Written By".to_string()),
            ..CommentFields::default()
        };
        let record = Record::new("recC", "")
            .with_field("Comment", "hi")
            .with_field("Author", "Affiliate");
        let comment = decode_comment(&record, &cols);
        assert_eq!(comment.author, None);
        assert!(!comment.is_from_self());
    }

    #[test]
    fn test_encode_required_only() {
        let input = NewLeadInput::new("Acme", "rep@example.com");
        let fields = encode_new_lead(&input, &SyncConfig::default());

        assert_eq!(fields.len(), 3);
        assert_eq!(fields["Name"], json!("Acme"));
        assert_eq!(fields["Rep Email"], json!("rep@example.com"));
        assert_eq!(fields["Status"], json!("New"));
    }

    #[test]
    fn test_encode_skips_empty_and_unmapped() {
        let mut config = SyncConfig::default();
        config.lead_fields.lead_phone = None;

        let input = NewLeadInput::new("Acme", "rep@example.com")
            .with_lead_email("")
            .with_lead_phone("555-0100")
            .with_notes("call Tuesday");
        let fields = encode_new_lead(&input, &config);

        assert!(!fields.contains_key("Lead Email"));
        assert!(!fields.contains_key("Lead Phone"));
        assert_eq!(fields["Notes"], json!("call Tuesday"));
        assert!(fields.values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_encode_initial_message_without_thread() {
        let input = NewLeadInput::new("Acme", "rep@example.com").with_initial_message("first!");

        let with_thread = encode_new_lead(&input, &SyncConfig::default());
        assert!(!with_thread.contains_key("Affiliate Comments"));

        let config = SyncConfig::builder().without_comments().build();
        let without_thread = encode_new_lead(&input, &config);
        assert_eq!(without_thread["Affiliate Comments"], json!("first!"));
    }

    #[test]
    fn test_encode_message() {
        let fields = encode_message("recLead1", "hello", &CommentFields::default()).unwrap();
        assert_eq!(fields["Comment"], json!("hello"));
        assert_eq!(fields["Lead"], json!(["recLead1"]));
        assert!(!fields.contains_key("Author"));

        let cols = CommentFields {
            author: Some("Author".to_string()),
            ..CommentFields::default()
        };
        let fields = encode_message("recLead1", "hello", &cols).unwrap();
        assert_eq!(fields["Author"], json!("Affiliate"));

        let unmapped = CommentFields {
            lead: None,
            ..CommentFields::default()
        };
        assert!(encode_message("recLead1", "hello", &unmapped).is_none());
    }
}
