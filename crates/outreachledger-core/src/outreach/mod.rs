//! Outreach sender: batch dispatch with lifecycle bookkeeping.
//!
//! One run selects a small batch of contacts that have never been
//! contacted, renders a message per contact and dispatches it, recording
//! success or failure on the contact itself. The document is persisted
//! exactly once at the end of the run, whatever the per-contact outcomes
//! were. Failed contacts are not retried within the run.

use std::time::Duration;

use outreachledger_graph::{GraphClient, SendMailRequest};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::clock::now_stamp;
use crate::contacts::{Contact, ContactStatus, ContactStore, pending_indices};
use crate::error::Result;
use crate::template::{self, Variant};

/// Subject line used when no override is configured.
pub const DEFAULT_SUBJECT: &str = "Coverage opportunity - a contrarian AI conversion story";

/// Contacts dispatched per run.
pub const DEFAULT_BATCH_SIZE: usize = 2;

/// Bounds, in seconds, of the randomized pause between consecutive sends.
///
/// The mailbox operates under a rate policy of at most two sends per
/// 11-minute window; the pause keeps a batch inside it. Configurable, but
/// removing it is the operator's responsibility.
pub const DEFAULT_PAUSE_SECS: (u64, u64) = (70, 260);

/// Injected configuration for one outreach run.
#[derive(Debug, Clone)]
pub struct SendOptions {
    /// Mailbox the messages are sent from.
    pub sender: String,
    /// CC address on every message.
    pub cc: String,
    /// Subject line on every message.
    pub subject: String,
    /// Maximum contacts dispatched this run.
    pub batch_size: usize,
    /// Inclusive bounds of the inter-send pause, in seconds.
    pub pause_secs: (u64, u64),
}

impl SendOptions {
    /// Creates options for the given sender with all defaults; the CC
    /// address defaults to the sender itself.
    pub fn new(sender: impl Into<String>) -> Self {
        let sender = sender.into();
        Self {
            cc: sender.clone(),
            sender,
            subject: DEFAULT_SUBJECT.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            pause_secs: DEFAULT_PAUSE_SECS,
        }
    }

    /// Sets the CC address.
    #[must_use]
    pub fn with_cc(mut self, cc: impl Into<String>) -> Self {
        self.cc = cc.into();
        self
    }

    /// Sets the subject line.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Sets the inter-send pause bounds in seconds.
    #[must_use]
    pub const fn with_pause_secs(mut self, pause_secs: (u64, u64)) -> Self {
        self.pause_secs = pause_secs;
        self
    }
}

/// Outcome of one outreach run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendReport {
    /// Messages accepted by the provider.
    pub sent: usize,
    /// Contacts the run attempted.
    pub attempted: usize,
}

/// Runs one outreach batch against the store.
///
/// Loads the document, dispatches to up to `batch_size` pending contacts,
/// and persists the document once at the end. When nothing is pending the
/// document is left untouched.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or saved. Send
/// failures are per-contact and never abort the batch.
pub async fn run_outreach(
    client: &GraphClient,
    store: &ContactStore,
    signature_html: &str,
    options: &SendOptions,
) -> Result<SendReport> {
    let mut doc = store.load()?;

    let batch = pending_indices(&doc, options.batch_size);
    if batch.is_empty() {
        debug!("no pending contacts");
        return Ok(SendReport::default());
    }

    let attempted = batch.len();
    let mut sent = 0;

    for (position, idx) in batch.into_iter().enumerate() {
        let contact = &mut doc.contacts[idx];
        let to = contact.email_key();
        let greet = template::greeting(&contact.name, &to);
        let variant = Variant::pick(&contact.company, &to);
        let body = template::build_body(&greet, signature_html, variant);
        let request = SendMailRequest::new(options.subject.as_str(), body)
            .to(to.clone())
            .cc(options.cc.as_str());

        match client.send_mail(&request).await {
            Ok(()) => {
                record_send_success(contact, &options.subject, &now_stamp());
                sent += 1;
                info!(email = %to, variant = variant.as_str(), "outreach sent");
            }
            Err(err) => {
                warn!(email = %to, error = %err, "outreach send failed");
                record_send_failure(contact, err.status());
            }
        }

        if position + 1 < attempted {
            pause_between_sends(options.pause_secs).await;
        }
    }

    doc.touch(&now_stamp());
    store.save(&doc)?;

    Ok(SendReport { sent, attempted })
}

/// Marks a contact as sent and records the subject that went out.
fn record_send_success(contact: &mut Contact, subject: &str, now: &str) {
    contact.status = ContactStatus::Sent;
    contact.last_touch = Some(now.to_string());
    contact.append_note(&format!("Sent batch subject: {subject}"));
}

/// Records a failed dispatch without advancing the lifecycle.
///
/// The status is left as it was, so awaiting-send contacts stay eligible
/// for the next run. Not retried within this run.
fn record_send_failure(contact: &mut Contact, status: Option<u16>) {
    let note = status.map_or_else(
        || "Send failed (request error)".to_string(),
        |code| format!("Send failed ({code})"),
    );
    contact.append_note(&note);
}

/// Sleeps a uniformly random number of seconds within the bounds.
async fn pause_between_sends((min, max): (u64, u64)) {
    let secs = if max > min {
        rand::thread_rng().gen_range(min..=max)
    } else {
        min
    };
    debug!(secs, "pausing between sends");
    tokio::time::sleep(Duration::from_secs(secs)).await;
}
