use serde::{Deserialize, Serialize};

/// A message record exactly as the messages endpoint returns it
pub type RawMessage = serde_json::Value;

/// Draft type for a freshly composed message
pub const DRAFT_TYPE_NEW: &str = "mdt_new";

/// Recipient reference inside an outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipient {
    pub id: i64,
}

/// Message envelope for the send endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMessage {
    pub body: String,
    #[serde(rename = "draftType")]
    pub draft_type: String,
    pub recipients: Vec<Recipient>,
    pub subject: String,
}

impl OutgoingMessage {
    /// New message to `recipient_ids`. The portal rejects empty subjects and
    /// bodies, so both start out as ".".
    pub fn new(recipient_ids: &[i64]) -> Self {
        Self {
            body: ".".to_string(),
            draft_type: DRAFT_TYPE_NEW.to_string(),
            recipients: recipient_ids.iter().map(|&id| Recipient { id }).collect(),
            subject: ".".to_string(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }
}

/// Request body for the send endpoint
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub message: &'a OutgoingMessage,
}

/// Response from the send endpoint: either the bare id or a small object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SendResponse {
    Id(i64),
    Object {
        #[serde(rename = "messageId", alias = "id")]
        message_id: i64,
    },
}

impl SendResponse {
    pub fn message_id(&self) -> i64 {
        match self {
            SendResponse::Id(id) => *id,
            SendResponse::Object { message_id } => *message_id,
        }
    }
}

/// Request body for marking a message read
#[derive(Debug, Serialize)]
pub struct ReadRequest {
    #[serde(rename = "messageId")]
    pub message_id: i64,
}

/// Request body for the perform-action-on-messages endpoint
#[derive(Debug, Serialize)]
pub struct BulkActionRequest<'a> {
    pub action: String,
    #[serde(rename = "folderId")]
    pub folder_id: String,
    #[serde(rename = "messageIds")]
    pub message_ids: &'a [i64],
}
