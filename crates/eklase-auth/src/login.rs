//! Form-based login handshake
//!
//! The portal has no token endpoint. Logging in means posting the classic
//! ASP.NET login form, optionally answering a profile-selection page, and
//! then checking where the redirects ended up. Every outcome is read from the
//! final URL, so the markers below are effectively the wire protocol.

use crate::form::{FormExtractor, RegexFormExtractor};
use crate::{AuthError, AuthResult};
use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

/// Login page, relative to the portal root
pub const LOGIN_PATH: &str = "/?v=15";

/// Present in the final URL once the session is logged in
pub const LOGIN_SUCCESS_MARKER: &str = "Home?login=1";

/// Present in the URL of the intermediate profile-selection page
pub const PROFILE_SELECTION_MARKER: &str = "CheckForProfileSelection";

/// True when the portal stopped on the profile-selection page
pub fn needs_profile_selection(url: &str) -> bool {
    url.contains(PROFILE_SELECTION_MARKER)
}

/// True when the portal landed on the logged-in home page
pub fn is_logged_in(url: &str) -> bool {
    url.contains(LOGIN_SUCCESS_MARKER)
}

/// Where a form POST ended up after all redirects
#[derive(Debug, Clone)]
pub struct LoginPage {
    /// Final URL after redirects
    pub url: Url,
    /// Response body
    pub body: String,
}

/// Minimal transport the handshake needs: POST a form, follow redirects
#[async_trait]
pub trait LoginTransport: Send + Sync {
    /// POST urlencoded `fields` to `url`. Non-2xx responses are errors.
    async fn post_form(&self, url: &Url, fields: &[(String, String)]) -> AuthResult<LoginPage>;
}

#[async_trait]
impl LoginTransport for reqwest::Client {
    async fn post_form(&self, url: &Url, fields: &[(String, String)]) -> AuthResult<LoginPage> {
        let response = self
            .post(url.clone())
            .form(fields)
            .send()
            .await?
            .error_for_status()?;

        let url = response.url().clone();
        let body = response.text().await?;
        Ok(LoginPage { url, body })
    }
}

/// Runs the login handshake against one portal
pub struct Authenticator {
    base_url: Url,
    extractor: Box<dyn FormExtractor>,
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl Authenticator {
    /// Create an authenticator using the regex form extractor
    pub fn new(base_url: Url) -> Self {
        Self::with_extractor(base_url, Box::new(RegexFormExtractor))
    }

    /// Create an authenticator with a custom form extractor
    pub fn with_extractor(base_url: Url, extractor: Box<dyn FormExtractor>) -> Self {
        Self {
            base_url,
            extractor,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Log in. On success the transport's cookie jar holds the session.
    ///
    /// Transport failures come back as [`AuthError::Http`]; only a missing
    /// profile form or a wrong final URL are reported as auth failures.
    pub async fn login<T>(&self, transport: &T, username: &str, password: &str) -> AuthResult<()>
    where
        T: LoginTransport + ?Sized,
    {
        let login_url = self.base_url.join(LOGIN_PATH)?;
        let credentials = vec![
            ("fake_pass".to_string(), password.to_string()),
            ("UserName".to_string(), username.to_string()),
            ("Password".to_string(), password.to_string()),
            ("cmdLogin".to_string(), String::new()),
        ];

        debug!("eklase: posting login form for {}", username);
        let mut page = transport.post_form(&login_url, &credentials).await?;

        if needs_profile_selection(page.url.as_str()) {
            debug!("eklase: profile selection requested");
            let form = self
                .extractor
                .extract(&page.body)
                .ok_or(AuthError::ProfileFormNotFound)?;

            let action_url = self.base_url.join(&form.action)?;
            debug!(
                "eklase: submitting profile form to {} with {} fields",
                action_url,
                form.fields.len()
            );
            page = transport.post_form(&action_url, &form.fields).await?;
        }

        if !is_logged_in(page.url.as_str()) {
            warn!("eklase: login ended at {}", page.url);
            return Err(AuthError::LoginFailed);
        }

        info!("eklase: logged in as {}", username);
        Ok(())
    }
}
