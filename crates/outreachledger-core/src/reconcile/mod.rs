//! Mailbox reconciliation: one-way sync from provider history into
//! contact state.
//!
//! Two passes over the same contact index, each idempotent against its
//! snapshot. The sent-items pass runs strictly before the reply pass so
//! that a reply observed in the same run wins the status: replies encode
//! genuinely newer information than a stale send determination.

use outreachledger_graph::{GraphClient, MailboxMessage, WellKnownFolder};
use tracing::{debug, info};

use crate::clock::now_stamp;
use crate::contacts::{ContactStatus, ContactStore, OutreachDoc, index_by_email};
use crate::error::Result;

/// Sent-items listing cap.
pub const SENT_FETCH_TOP: u32 = 200;

/// Inbox listing cap.
pub const INBOX_FETCH_TOP: u32 = 100;

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncReport {
    /// Contacts changed by the sent-items pass.
    pub sent_matches: usize,
    /// Contacts changed by the reply pass.
    pub reply_matches: usize,
}

impl SyncReport {
    /// Total changed contacts across both passes.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.sent_matches + self.reply_matches
    }
}

/// Folds recent sent items into contact state.
///
/// For every to/cc address matching a known contact: promote to `Sent`
/// if the contact still awaited its first send, refresh the last touch
/// from the message's sent time when present, and append a dedup-checked
/// note naming the subject. Returns how many matches actually changed a
/// contact's serialized state.
pub fn apply_sent_items(doc: &mut OutreachDoc, messages: &[MailboxMessage]) -> usize {
    let index = index_by_email(doc);
    let mut changed = 0;

    for message in messages {
        let recipients = message.recipient_addresses();
        if recipients.is_empty() {
            continue;
        }
        let tag = sent_tag(message.subject_trimmed());
        let sent_at = present(message.sent_date_time.as_deref());

        for address in recipients {
            let Some(&idx) = index.get(&address) else {
                continue;
            };
            let contact = &mut doc.contacts[idx];
            let before = contact.clone();

            if contact.status.is_awaiting_send() {
                contact.status = ContactStatus::Sent;
            }
            if let Some(sent_at) = sent_at {
                contact.last_touch = Some(sent_at.to_string());
            }
            contact.append_note(&tag);

            if *contact != before {
                changed += 1;
            }
        }
    }

    debug!(changed, "sent-items pass complete");
    changed
}

/// Folds recent inbox messages into contact state.
///
/// For a matching sender: `replied` becomes true unconditionally, the
/// status moves to `Replied` unless it is already terminal, the last
/// touch is refreshed from the received time when present, and a
/// dedup-checked note names the subject. Returns how many matches
/// actually changed a contact's serialized state.
pub fn apply_replies(doc: &mut OutreachDoc, messages: &[MailboxMessage]) -> usize {
    let index = index_by_email(doc);
    let mut changed = 0;

    for message in messages {
        let Some(address) = message.sender_address() else {
            continue;
        };
        let Some(&idx) = index.get(&address) else {
            continue;
        };
        let contact = &mut doc.contacts[idx];
        let before = contact.clone();

        contact.replied = true;
        if !contact.status.is_terminal() {
            contact.status = ContactStatus::Replied;
        }
        if let Some(received_at) = present(message.received_date_time.as_deref()) {
            contact.last_touch = Some(received_at.to_string());
        }
        contact.append_note(&reply_tag(message.subject_trimmed()));

        if *contact != before {
            changed += 1;
        }
    }

    debug!(changed, "reply pass complete");
    changed
}

/// Runs a full reconciliation: fetch both folders, fold them in, persist
/// when anything changed.
///
/// # Errors
///
/// Either listing failing is fatal; nothing is persisted in that case.
pub async fn run_sync(client: &GraphClient, store: &ContactStore) -> Result<SyncReport> {
    let sent_items = client
        .list_messages(WellKnownFolder::SentItems, SENT_FETCH_TOP)
        .await?;
    let inbox = client
        .list_messages(WellKnownFolder::Inbox, INBOX_FETCH_TOP)
        .await?;

    let mut doc = store.load()?;

    // Sent-items first; the reply pass must have the last word on status.
    let report = SyncReport {
        sent_matches: apply_sent_items(&mut doc, &sent_items),
        reply_matches: apply_replies(&mut doc, &inbox),
    };

    if report.total() > 0 {
        doc.touch(&now_stamp());
        store.save(&doc)?;
        info!(changed = report.total(), "contact document updated");
    }

    Ok(report)
}

fn sent_tag(subject: &str) -> String {
    if subject.is_empty() {
        "Sent".to_string()
    } else {
        format!("Sent: {subject}")
    }
}

fn reply_tag(subject: &str) -> String {
    if subject.is_empty() {
        "Reply".to_string()
    } else {
        format!("Reply: {subject}")
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::contacts::Contact;
    use outreachledger_graph::Recipient;

    fn contact(email: &str, status: ContactStatus) -> Contact {
        Contact {
            status,
            ..Contact::new(email)
        }
    }

    fn doc(contacts: Vec<Contact>) -> OutreachDoc {
        OutreachDoc {
            contacts,
            ..OutreachDoc::default()
        }
    }

    fn sent_message(to: &[&str], subject: &str, sent_at: &str) -> MailboxMessage {
        MailboxMessage {
            subject: Some(subject.to_string()),
            sent_date_time: Some(sent_at.to_string()),
            to_recipients: to.iter().copied().map(Recipient::new).collect(),
            ..MailboxMessage::default()
        }
    }

    fn inbox_message(from: &str, subject: &str, received_at: &str) -> MailboxMessage {
        MailboxMessage {
            subject: Some(subject.to_string()),
            received_date_time: Some(received_at.to_string()),
            from: Some(Recipient::new(from)),
            ..MailboxMessage::default()
        }
    }

    #[test]
    fn test_sent_pass_promotes_all_recipients() {
        let mut d = doc(vec![
            contact("a@x.com", ContactStatus::NotSent),
            contact("b@x.com", ContactStatus::NotSent),
        ]);
        let messages = vec![sent_message(
            &["a@x.com", "b@x.com"],
            "Hi",
            "2025-06-01T10:00:00Z",
        )];

        let changed = apply_sent_items(&mut d, &messages);

        assert_eq!(changed, 2);
        for c in &d.contacts {
            assert_eq!(c.status, ContactStatus::Sent);
            assert_eq!(c.last_touch.as_deref(), Some("2025-06-01T10:00:00Z"));
            assert_eq!(c.notes, "Sent: Hi");
        }
    }

    #[test]
    fn test_sent_pass_does_not_demote_or_lose_touch() {
        let mut replied = contact("a@x.com", ContactStatus::Replied);
        replied.last_touch = Some("2025-05-01T00:00:00".to_string());
        let mut d = doc(vec![replied]);

        // No sent time on the message: the prior touch must survive.
        let message = MailboxMessage {
            subject: Some("Hi".to_string()),
            to_recipients: vec![Recipient::new("a@x.com")],
            ..MailboxMessage::default()
        };

        apply_sent_items(&mut d, &[message]);

        assert_eq!(d.contacts[0].status, ContactStatus::Replied);
        assert_eq!(
            d.contacts[0].last_touch.as_deref(),
            Some("2025-05-01T00:00:00")
        );
        assert_eq!(d.contacts[0].notes, "Sent: Hi");
    }

    #[test]
    fn test_sent_pass_unknown_recipients_ignored() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::NotSent)]);
        let messages = vec![sent_message(&["other@y.com"], "Hi", "2025-06-01T10:00:00Z")];

        assert_eq!(apply_sent_items(&mut d, &messages), 0);
        assert_eq!(d.contacts[0].status, ContactStatus::NotSent);
    }

    #[test]
    fn test_sent_pass_idempotent() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::NotSent)]);
        let messages = vec![sent_message(&["a@x.com"], "Hi", "2025-06-01T10:00:00Z")];

        assert_eq!(apply_sent_items(&mut d, &messages), 1);
        let snapshot = d.clone();
        assert_eq!(apply_sent_items(&mut d, &messages), 0);
        assert_eq!(d, snapshot);
    }

    #[test]
    fn test_reply_pass_marks_replied_even_after_sent() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::Sent)]);
        let messages = vec![inbox_message("a@x.com", "Re: Hi", "2025-06-02T09:00:00Z")];

        let changed = apply_replies(&mut d, &messages);

        assert_eq!(changed, 1);
        let c = &d.contacts[0];
        assert!(c.replied);
        assert_eq!(c.status, ContactStatus::Replied);
        assert_eq!(c.last_touch.as_deref(), Some("2025-06-02T09:00:00Z"));
        assert_eq!(c.notes, "Reply: Re: Hi");
    }

    #[test]
    fn test_reply_pass_idempotent() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::Sent)]);
        let messages = vec![inbox_message("a@x.com", "Re: Hi", "2025-06-02T09:00:00Z")];

        assert_eq!(apply_replies(&mut d, &messages), 1);
        let snapshot = d.clone();
        assert_eq!(apply_replies(&mut d, &messages), 0);
        assert_eq!(d, snapshot);
    }

    #[test]
    fn test_terminal_status_never_demoted() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::CoverageWon)]);
        let messages = vec![inbox_message("a@x.com", "Re: Hi", "2025-06-02T09:00:00Z")];

        let changed = apply_replies(&mut d, &messages);

        assert_eq!(changed, 1);
        let c = &d.contacts[0];
        assert_eq!(c.status, ContactStatus::CoverageWon);
        assert!(c.replied);
        assert_eq!(c.notes, "Reply: Re: Hi");
    }

    #[test]
    fn test_reply_wins_over_sent_within_one_run() {
        let mut d = doc(vec![contact("a@x.com", ContactStatus::NotSent)]);
        let sent = vec![sent_message(&["a@x.com"], "Hi", "2025-06-01T10:00:00Z")];
        let inbox = vec![inbox_message("a@x.com", "Re: Hi", "2025-06-02T09:00:00Z")];

        // Pass order as in run_sync: sent items first, replies second.
        let sent_matches = apply_sent_items(&mut d, &sent);
        let reply_matches = apply_replies(&mut d, &inbox);

        assert_eq!(sent_matches, 1);
        assert_eq!(reply_matches, 1);
        let c = &d.contacts[0];
        assert_eq!(c.status, ContactStatus::Replied);
        assert_eq!(c.last_touch.as_deref(), Some("2025-06-02T09:00:00Z"));
        assert_eq!(c.notes, "Sent: Hi | Reply: Re: Hi");
    }

    #[test]
    fn test_empty_subject_tags() {
        assert_eq!(sent_tag(""), "Sent");
        assert_eq!(sent_tag("Hi"), "Sent: Hi");
        assert_eq!(reply_tag(""), "Reply");
        assert_eq!(reply_tag("Re: Hi"), "Reply: Re: Hi");
    }

    #[test]
    fn test_case_insensitive_matching() {
        let mut d = doc(vec![contact("Alice@X.com", ContactStatus::NotSent)]);
        let messages = vec![sent_message(&["ALICE@x.COM"], "Hi", "2025-06-01T10:00:00Z")];

        assert_eq!(apply_sent_items(&mut d, &messages), 1);
        assert_eq!(d.contacts[0].status, ContactStatus::Sent);
    }
}
