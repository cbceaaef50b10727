//! Session configuration

use crate::{MailError, MailResult};
use eklase_auth::portal;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// How to reach the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Portal root, e.g. `https://my.e-klase.lv`
    pub base_url: String,
    /// Browser User-Agent sent with every request
    pub user_agent: String,
    /// Whole-request timeout; `None` keeps the HTTP client's default
    pub timeout_secs: Option<u64>,
    /// Connect timeout; `None` keeps the HTTP client's default
    pub connect_timeout_secs: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: portal::BASE_URL.to_string(),
            user_agent: portal::USER_AGENT.to_string(),
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `EKLASE_BASE_URL`, `EKLASE_USER_AGENT`,
    /// `EKLASE_TIMEOUT_SECS` and `EKLASE_CONNECT_TIMEOUT_SECS`
    pub fn from_env() -> MailResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> MailResult<Self> {
        let mut config = Self::default();
        if let Some(base_url) = lookup("EKLASE_BASE_URL") {
            config.base_url = base_url;
        }
        if let Some(user_agent) = lookup("EKLASE_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(secs) = lookup("EKLASE_TIMEOUT_SECS") {
            config.timeout_secs = Some(parse_secs("EKLASE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = lookup("EKLASE_CONNECT_TIMEOUT_SECS") {
            config.connect_timeout_secs = Some(parse_secs("EKLASE_CONNECT_TIMEOUT_SECS", &secs)?);
        }
        Ok(config)
    }

    /// Parsed portal root. Login and API paths are absolute on the portal,
    /// so a root with a path, query or fragment is rejected.
    pub fn parsed_base_url(&self) -> MailResult<Url> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            MailError::InvalidConfig(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(MailError::InvalidConfig(format!(
                "Base URL must be a bare origin, got {}",
                self.base_url
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_secs.map(Duration::from_secs)
    }
}

fn parse_secs(key: &str, value: &str) -> MailResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| {
            MailError::InvalidConfig(format!(
                "{} must be a number of seconds, got {:?}",
                key, value
            ))
        })
}
