use eklase_auth::AuthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{given} is not a valid folder. Valid folders: {valid}")]
    InvalidFolder { given: String, valid: String },

    #[error("{given} is not a valid mail action. Valid actions: {valid}")]
    InvalidAction { given: String, valid: String },

    #[error("Chunk size must be greater than zero")]
    InvalidChunkSize,

    #[error("Message not found: {0}")]
    MessageNotFound(i64),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("e-klase API error {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type MailResult<T> = Result<T, MailError>;
