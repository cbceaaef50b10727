//! Error types for the auth module

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors that can occur during the login handshake
#[derive(Debug, Error)]
pub enum AuthError {
    /// The portal asked for a profile choice but the page had no usable form
    #[error("Profile selection form not found")]
    ProfileFormNotFound,

    /// All redirects settled somewhere other than the logged-in home page
    #[error("Login failed")]
    LoginFailed,

    /// A login or form action URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure, including non-2xx responses
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<url::ParseError> for AuthError {
    fn from(e: url::ParseError) -> Self {
        AuthError::InvalidUrl(e.to_string())
    }
}
