//! Display model for mailbox listings

use crate::types::RawMessage;
use crate::{MailError, MailResult};
use serde::Serialize;

/// A message trimmed down to what a listing shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailItem {
    pub id: i64,
    pub sender: String,
    pub subject: String,
    pub body: String,
}

impl MailItem {
    /// Shape a raw message record.
    ///
    /// The portal puts the correspondent in `recipientsData.recipients`; the
    /// first entry's name is shown, and an empty list means the recipients
    /// are hidden from this profile.
    pub fn from_raw(raw: &RawMessage) -> MailResult<Self> {
        let id = raw
            .get("id")
            .and_then(|v| v.as_i64())
            .ok_or_else(|| MailError::ParseError("message without id".to_string()))?;

        let recipients = raw
            .get("recipientsData")
            .and_then(|d| d.get("recipients"))
            .and_then(|r| r.as_array())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let sender = match recipients.first() {
            Some(first) => first
                .get("name")
                .and_then(|n| n.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or("Unknown")
                .to_string(),
            None => "Hidden recipients".to_string(),
        };

        Ok(Self {
            id,
            sender,
            subject: text_field(raw, "subject"),
            body: text_field(raw, "body"),
        })
    }
}

fn text_field(raw: &RawMessage, key: &str) -> String {
    raw.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
