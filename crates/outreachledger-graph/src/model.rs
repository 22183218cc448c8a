//! Wire models for the mail provider REST API.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// An email address wrapper as the API represents it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EmailAddress {
    /// The address itself.
    #[serde(default)]
    pub address: String,
}

/// A message recipient (or sender).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    /// Wrapped address.
    pub email_address: EmailAddress,
}

impl Recipient {
    /// Creates a recipient from a bare address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            email_address: EmailAddress {
                address: address.into(),
            },
        }
    }
}

/// Message body payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    /// Content type, `HTML` or `Text`.
    pub content_type: String,
    /// Body content.
    pub content: String,
}

/// A message to be dispatched through the send endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingMessage {
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub body: MessageBody,
    /// Primary recipients.
    pub to_recipients: Vec<Recipient>,
    /// CC recipients.
    pub cc_recipients: Vec<Recipient>,
}

/// Envelope for the send-mail endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailRequest {
    /// The message payload.
    pub message: OutgoingMessage,
    /// Whether the provider should file a copy into sent items.
    pub save_to_sent_items: bool,
}

impl SendMailRequest {
    /// Creates a request with an HTML body and no recipients yet.
    #[must_use]
    pub fn new(subject: impl Into<String>, html_body: impl Into<String>) -> Self {
        Self {
            message: OutgoingMessage {
                subject: subject.into(),
                body: MessageBody {
                    content_type: "HTML".to_string(),
                    content: html_body.into(),
                },
                to_recipients: Vec::new(),
                cc_recipients: Vec::new(),
            },
            save_to_sent_items: true,
        }
    }

    /// Adds a primary recipient.
    #[must_use]
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.message.to_recipients.push(Recipient::new(address));
        self
    }

    /// Adds a CC recipient.
    #[must_use]
    pub fn cc(mut self, address: impl Into<String>) -> Self {
        self.message.cc_recipients.push(Recipient::new(address));
        self
    }
}

/// A message listed from a mailbox folder.
///
/// Only the fields requested through `$select` are populated; everything
/// else deserializes to its default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MailboxMessage {
    /// Subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// When the message was sent (sent items listing).
    #[serde(default)]
    pub sent_date_time: Option<String>,
    /// When the message was received (inbox listing).
    #[serde(default)]
    pub received_date_time: Option<String>,
    /// Sender (inbox listing).
    #[serde(default)]
    pub from: Option<Recipient>,
    /// Primary recipients (sent items listing).
    #[serde(default)]
    pub to_recipients: Vec<Recipient>,
    /// CC recipients (sent items listing).
    #[serde(default)]
    pub cc_recipients: Vec<Recipient>,
}

impl MailboxMessage {
    /// All to/cc addresses, trimmed, lowercased, deduplicated and sorted.
    #[must_use]
    pub fn recipient_addresses(&self) -> Vec<String> {
        let mut addresses = BTreeSet::new();
        for recipient in self.to_recipients.iter().chain(&self.cc_recipients) {
            let address = recipient.email_address.address.trim().to_lowercase();
            if !address.is_empty() {
                addresses.insert(address);
            }
        }
        addresses.into_iter().collect()
    }

    /// The sender address, trimmed and lowercased, if present and non-empty.
    #[must_use]
    pub fn sender_address(&self) -> Option<String> {
        let address = self
            .from
            .as_ref()?
            .email_address
            .address
            .trim()
            .to_lowercase();
        if address.is_empty() { None } else { Some(address) }
    }

    /// The subject, trimmed, or empty when absent.
    #[must_use]
    pub fn subject_trimmed(&self) -> &str {
        self.subject.as_deref().unwrap_or("").trim()
    }
}

/// A page of listed messages.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MessagePage {
    /// Messages in this page.
    #[serde(default)]
    pub value: Vec<MailboxMessage>,
}
