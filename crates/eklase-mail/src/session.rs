use crate::config::SessionConfig;
use crate::folder::{validate_folder, Folder, MailAction};
use crate::pagination::{self, MailApi};
use crate::types::*;
use crate::{MailError, MailResult};
use async_trait::async_trait;
use eklase_auth::{AuthError, Authenticator, FormExtractor};
use futures::Stream;
use serde::Serialize;
use tracing::{debug, info};
use url::Url;

/// An e-klase family portal session.
///
/// Holds one HTTP client whose cookie jar carries the login, so a session is
/// created once, logged in once and then reused. Calls are plain sequential
/// round trips; do not run two logins on the same session at once.
#[derive(Debug)]
pub struct EklaseSession {
    client: reqwest::Client,
    base_url: Url,
    api_url: String,
    authenticator: Authenticator,
}

impl EklaseSession {
    /// Session against the production portal
    pub fn new() -> MailResult<Self> {
        Self::with_config(&SessionConfig::default())
    }

    pub fn with_config(config: &SessionConfig) -> MailResult<Self> {
        let base_url = config.parsed_base_url()?;

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        let client = builder.build()?;

        let api_url = format!("{}/api/family", base_url.as_str().trim_end_matches('/'));
        let authenticator = Authenticator::new(base_url.clone());

        Ok(Self {
            client,
            base_url,
            api_url,
            authenticator,
        })
    }

    /// Replace the HTML form extractor used during login
    pub fn with_extractor(mut self, extractor: Box<dyn FormExtractor>) -> Self {
        self.authenticator = Authenticator::with_extractor(self.base_url.clone(), extractor);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Log in with portal credentials. Must succeed before any mail call.
    ///
    /// Transport failures (network errors, non-2xx pages) come back as
    /// [`MailError::RequestFailed`]; [`MailError::Auth`] means the portal
    /// answered but did not log us in.
    pub async fn login(&self, username: &str, password: &str) -> MailResult<()> {
        self.authenticator
            .login(&self.client, username, password)
            .await
            .map_err(|e| match e {
                AuthError::Http(e) => MailError::RequestFailed(e),
                other => MailError::Auth(other),
            })
    }

    /// All message ids of a folder, in server order
    pub async fn list_message_ids(&self, folder: &str) -> MailResult<Vec<i64>> {
        self.message_ids(validate_folder(folder)?).await
    }

    /// Messages at positions `start..end` of `ids`; `-1` in either bound
    /// selects the whole list
    pub async fn fetch_messages(
        &self,
        ids: &[i64],
        start: i64,
        end: i64,
    ) -> MailResult<Vec<RawMessage>> {
        pagination::fetch_messages(self, ids, start, end).await
    }

    /// One message by id
    pub async fn fetch_message(&self, id: i64) -> MailResult<RawMessage> {
        pagination::fetch_message(self, id).await
    }

    /// `amount` messages of `folder` starting at position `start`;
    /// `None` reads to the end of the folder
    pub async fn get_mail(
        &self,
        folder: &str,
        start: usize,
        amount: Option<usize>,
    ) -> MailResult<Vec<RawMessage>> {
        pagination::get_mail(self, validate_folder(folder)?, start, amount).await
    }

    /// Same selection as [`get_mail`](Self::get_mail), fetched lazily in
    /// chunks of `chunk_size`
    pub fn stream_mail(
        &self,
        folder: &str,
        start: usize,
        amount: Option<usize>,
        chunk_size: usize,
    ) -> MailResult<impl Stream<Item = MailResult<Vec<RawMessage>>> + '_> {
        pagination::stream_mail(self, validate_folder(folder)?, start, amount, chunk_size)
    }

    /// Mark a message as read
    pub async fn read_message(&self, message_id: i64) -> MailResult<()> {
        debug!("eklase: marking {} read", message_id);
        self.post_json("/mail/message/read", &ReadRequest { message_id })
            .await?;
        Ok(())
    }

    /// Send a message. Returns the id the portal assigned to it.
    pub async fn send_message(&self, message: &OutgoingMessage) -> MailResult<i64> {
        debug!(
            "eklase: sending message to {} recipients, subject={}",
            message.recipients.len(),
            message.subject
        );

        let response = self.post_json("/mail/send", &SendRequest { message }).await?;
        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| MailError::ParseError(e.to_string()))?;

        info!("eklase: sent message, id={}", sent.message_id());
        Ok(sent.message_id())
    }

    /// Delete messages from `folder`. Messages in the trash or in Sent are
    /// always removed permanently.
    pub async fn delete_message(
        &self,
        ids: &[i64],
        folder: &str,
        permanently: bool,
    ) -> MailResult<()> {
        let folder = validate_folder(folder)?;
        self.perform_action(ids, folder, MailAction::for_delete(folder, permanently))
            .await
    }

    /// Move messages out of the trash
    pub async fn restore_message(&self, ids: &[i64]) -> MailResult<()> {
        self.perform_action(ids, Folder::Deleted, MailAction::Refresh)
            .await
    }

    /// Run a bulk action on messages of one folder
    pub async fn perform_action(
        &self,
        ids: &[i64],
        folder: Folder,
        action: MailAction,
    ) -> MailResult<()> {
        debug!("eklase: {} on {} messages in {}", action, ids.len(), folder);
        self.post_json("/mail/perform-action-on-messages", &bulk_request(ids, folder, action))
            .await?;
        info!("eklase: {} done for {} messages", action, ids.len());
        Ok(())
    }

    async fn post_json<B>(&self, path: &str, body: &B) -> MailResult<reqwest::Response>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.api_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        ensure_success(response).await
    }
}

#[async_trait]
impl MailApi for EklaseSession {
    async fn message_ids(&self, folder: Folder) -> MailResult<Vec<i64>> {
        let url = format!("{}/mail/folder-message-ids/{}", self.api_url, folder.wire_id());
        debug!("eklase: listing message ids in {}", folder);

        let response = self.client.get(&url).send().await?;
        let ids: Vec<i64> = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| MailError::ParseError(e.to_string()))?;

        info!("eklase: {} has {} messages", folder, ids.len());
        Ok(ids)
    }

    async fn messages(&self, ids: &[i64]) -> MailResult<Vec<RawMessage>> {
        let response = self.post_json("/mail/messages", ids).await?;
        let messages: Vec<RawMessage> = response
            .json()
            .await
            .map_err(|e| MailError::ParseError(e.to_string()))?;

        debug!("eklase: got {} of {} requested messages", messages.len(), ids.len());
        Ok(messages)
    }
}

fn bulk_request(ids: &[i64], folder: Folder, action: MailAction) -> BulkActionRequest<'_> {
    BulkActionRequest {
        action: action.wire_id(),
        folder_id: folder.wire_id(),
        message_ids: ids,
    }
}

async fn ensure_success(response: reqwest::Response) -> MailResult<reqwest::Response> {
    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(MailError::ApiError { status, body });
    }
    Ok(response)
}
