//! HTTP client for the mail provider REST API.

use std::time::Duration;

use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::model::{MessagePage, MailboxMessage, SendMailRequest};

/// Default API base.
pub const DEFAULT_BASE_URL: &str = "https://graph.microsoft.com/v1.0/";

/// Request timeout for the send-mail endpoint.
const SEND_TIMEOUT: Duration = Duration::from_secs(30);

/// Request timeout for folder listings.
const LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// How much of a rejection body is kept for diagnostics.
const BODY_SNIPPET_LEN: usize = 300;

/// Well-known mailbox folders the reconciler reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WellKnownFolder {
    /// The sent-items folder.
    SentItems,
    /// The inbox.
    Inbox,
}

impl WellKnownFolder {
    /// Folder id segment in the API path.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SentItems => "SentItems",
            Self::Inbox => "Inbox",
        }
    }

    /// `$select` field list for this folder.
    #[must_use]
    pub const fn select_fields(self) -> &'static str {
        match self {
            Self::SentItems => "subject,sentDateTime,toRecipients,ccRecipients",
            Self::Inbox => "subject,receivedDateTime,from",
        }
    }

    /// `$orderby` clause for this folder (newest first).
    #[must_use]
    pub const fn order_by(self) -> &'static str {
        match self {
            Self::SentItems => "sentDateTime desc",
            Self::Inbox => "receivedDateTime desc",
        }
    }
}

/// Client for a single mailbox on the provider API.
///
/// Requests are synchronous request/response with independent, non-retried
/// timeouts per endpoint. One client per run; the bearer token is taken at
/// construction and never refreshed.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http_client: reqwest::Client,
    base_url: Url,
    mailbox: String,
    access_token: String,
}

impl GraphClient {
    /// Creates a client for the given mailbox with the default API base.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL fails to parse.
    pub fn new(mailbox: impl Into<String>, access_token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, mailbox, access_token)
    }

    /// Creates a client against a custom API base (sovereign clouds, tests).
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL fails to parse.
    pub fn with_base_url(
        base_url: impl AsRef<str>,
        mailbox: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self> {
        // Url::join drops the last path segment without a trailing slash.
        let mut base = base_url.as_ref().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url: Url::parse(&base)?,
            mailbox: mailbox.into(),
            access_token: access_token.into(),
        })
    }

    /// Dispatches a message through the send-mail endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] with the status code and a body snippet on a
    /// non-success response, or [`Error::Http`] if the request itself fails.
    pub async fn send_mail(&self, request: &SendMailRequest) -> Result<()> {
        let url = self
            .base_url
            .join(&format!("users/{}/sendMail", self.mailbox))?;

        debug!(subject = %request.message.subject, "dispatching message");

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(request)
            .timeout(SEND_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api {
            status: status.as_u16(),
            body: snippet(&body),
        })
    }

    /// Lists the most recent messages of a well-known folder.
    ///
    /// Fields are narrowed via `$select`, sorted by date descending and
    /// capped at `top` results; no paging beyond the first page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] on a non-success response or [`Error::Http`]
    /// if the request itself fails.
    pub async fn list_messages(
        &self,
        folder: WellKnownFolder,
        top: u32,
    ) -> Result<Vec<MailboxMessage>> {
        let url = self.base_url.join(&format!(
            "users/{}/mailFolders/{}/messages",
            self.mailbox,
            folder.as_str()
        ))?;

        debug!(folder = folder.as_str(), top, "listing messages");

        let top = top.to_string();
        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("$select", folder.select_fields()),
                ("$orderby", folder.order_by()),
                ("$top", top.as_str()),
            ])
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body: snippet(&body),
            });
        }

        let page: MessagePage = response.json().await?;
        Ok(page.value)
    }
}

/// Truncates a response body to a char-boundary-safe snippet.
fn snippet(body: &str) -> String {
    let mut end = BODY_SNIPPET_LEN.min(body.len());
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
