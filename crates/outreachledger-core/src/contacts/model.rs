//! Contact and outreach document models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum length of a contact's notes field, in characters.
///
/// Appends beyond this are truncated keeping the head, so the oldest
/// entries survive.
pub const NOTE_MAX_LEN: usize = 700;

/// Lifecycle status of an outreach contact.
///
/// The set is open-ended: values this tool does not know about are carried
/// through [`ContactStatus::Other`] untouched so that humans and other
/// tools can annotate the document freely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContactStatus {
    /// Not yet contacted. Absent, null and empty-string statuses collapse
    /// to this value at parse time.
    #[default]
    NotSent,
    /// A draft exists but nothing has gone out.
    Drafted,
    /// An outreach message has been dispatched.
    Sent,
    /// The contact has replied at least once.
    Replied,
    /// Terminal: coverage secured. Never demoted by reconciliation.
    CoverageWon,
    /// Any other status value, preserved verbatim.
    Other(String),
}

impl ContactStatus {
    /// Parse from the document string representation.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "" | "Not sent" => Self::NotSent,
            "Drafted" => Self::Drafted,
            "Sent" => Self::Sent,
            "Replied" => Self::Replied,
            "Coverage won" => Self::CoverageWon,
            other => Self::Other(other.to_string()),
        }
    }

    /// Convert to the document string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NotSent => "Not sent",
            Self::Drafted => "Drafted",
            Self::Sent => "Sent",
            Self::Replied => "Replied",
            Self::CoverageWon => "Coverage won",
            Self::Other(s) => s,
        }
    }

    /// Whether this contact still awaits its first send.
    #[must_use]
    pub const fn is_awaiting_send(&self) -> bool {
        matches!(self, Self::NotSent | Self::Drafted)
    }

    /// Whether this status is terminal and must never be downgraded.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CoverageWon)
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// Serde helpers for `ContactStatus` (stored as a plain string, with null
/// and absent keys meaning not-yet-sent).
mod status_serde {
    use super::ContactStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(status: &ContactStatus, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(status.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ContactStatus, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map_or(ContactStatus::NotSent, |s| ContactStatus::parse(&s)))
    }
}

/// One outreach target, keyed by email.
///
/// Unknown JSON keys survive a load/save round trip: the core mutates
/// lifecycle fields but does not own the document schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Email address; the natural key, compared case-insensitively.
    #[serde(default)]
    pub email: String,
    /// Display name (may be empty).
    #[serde(default)]
    pub name: String,
    /// Company or outlet (may be empty).
    #[serde(default)]
    pub company: String,
    /// Lifecycle status.
    #[serde(default, with = "status_serde")]
    pub status: ContactStatus,
    /// Most recent outbound or inbound touch, ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_touch: Option<String>,
    /// Append-only pipe-delimited log.
    #[serde(default)]
    pub notes: String,
    /// True once any inbound reply has been observed. Never reset.
    #[serde(default)]
    pub replied: bool,
    /// Fields this tool does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Creates a contact with the given email and no history.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }

    /// The email, trimmed and lowercased, for matching.
    #[must_use]
    pub fn email_key(&self) -> String {
        self.email.trim().to_lowercase()
    }

    /// Appends a note, deduplicating and enforcing [`NOTE_MAX_LEN`].
    ///
    /// A note that is already a literal substring of the existing log is
    /// ignored, which makes repeated reconciliation runs idempotent.
    pub fn append_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() || self.notes.contains(note) {
            return;
        }

        let existing = self.notes.trim();
        let combined = if existing.is_empty() {
            note.to_string()
        } else {
            format!("{existing} | {note}")
        };
        self.notes = truncate_chars(combined, NOTE_MAX_LEN);
    }
}

/// The root outreach document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutreachDoc {
    /// All tracked contacts, in document order.
    #[serde(default)]
    pub contacts: Vec<Contact>,
    /// When any contact was last mutated and persisted.
    #[serde(default)]
    pub updated_at: String,
    /// Fields this tool does not model, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl OutreachDoc {
    /// Stamps the document as updated at `now`.
    pub fn touch(&mut self, now: &str) {
        self.updated_at = now.to_string();
    }
}

/// Keeps the first `max_chars` characters, char-boundary safe.
fn truncate_chars(mut s: String, max_chars: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max_chars) {
        s.truncate(idx);
    }
    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            ContactStatus::NotSent,
            ContactStatus::Drafted,
            ContactStatus::Sent,
            ContactStatus::Replied,
            ContactStatus::CoverageWon,
        ] {
            assert_eq!(ContactStatus::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_preserved() {
        let status = ContactStatus::parse("Ghosted twice");
        assert_eq!(status, ContactStatus::Other("Ghosted twice".to_string()));
        assert_eq!(status.as_str(), "Ghosted twice");
        assert!(!status.is_awaiting_send());
        assert!(!status.is_terminal());
    }

    #[test]
    fn test_empty_null_and_absent_status_await_send() {
        assert_eq!(ContactStatus::parse(""), ContactStatus::NotSent);

        let from_null: Contact =
            serde_json::from_str(r#"{"email": "a@x.com", "status": null}"#).unwrap();
        assert_eq!(from_null.status, ContactStatus::NotSent);

        let from_absent: Contact = serde_json::from_str(r#"{"email": "a@x.com"}"#).unwrap();
        assert_eq!(from_absent.status, ContactStatus::NotSent);

        assert!(from_null.status.is_awaiting_send());
        assert!(ContactStatus::Drafted.is_awaiting_send());
        assert!(!ContactStatus::Sent.is_awaiting_send());
    }

    #[test]
    fn test_contact_roundtrip_preserves_unknown_fields() {
        let json = r#"{
            "email": "a@x.com",
            "name": "Ada Lovelace",
            "status": "Pitched on podcast",
            "lastTouch": "2025-06-01T10:00:00",
            "outlet": "The Register",
            "priority": 3
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(
            contact.status,
            ContactStatus::Other("Pitched on podcast".to_string())
        );
        assert_eq!(contact.extra.get("outlet").unwrap(), "The Register");

        let out = serde_json::to_value(&contact).unwrap();
        assert_eq!(out["status"], "Pitched on podcast");
        assert_eq!(out["outlet"], "The Register");
        assert_eq!(out["priority"], 3);
        assert_eq!(out["lastTouch"], "2025-06-01T10:00:00");
    }

    #[test]
    fn test_append_note_idempotent() {
        let mut contact = Contact::new("a@x.com");
        contact.append_note("Sent: Hi");
        assert_eq!(contact.notes, "Sent: Hi");

        contact.append_note("Sent: Hi");
        assert_eq!(contact.notes, "Sent: Hi");

        contact.append_note("Reply: Re: Hi");
        assert_eq!(contact.notes, "Sent: Hi | Reply: Re: Hi");
    }

    #[test]
    fn test_append_note_substring_check() {
        let mut contact = Contact::new("a@x.com");
        contact.append_note("Sent batch subject: Coverage opportunity");
        // A strict substring of the existing log is dropped.
        contact.append_note("Coverage opportunity");
        assert_eq!(contact.notes, "Sent batch subject: Coverage opportunity");
    }

    #[test]
    fn test_append_note_cap_keeps_head() {
        let mut contact = Contact::new("a@x.com");
        contact.append_note(&"a".repeat(690));
        contact.append_note(&"b".repeat(100));

        assert_eq!(contact.notes.chars().count(), NOTE_MAX_LEN);
        assert!(contact.notes.starts_with('a'));
        assert!(contact.notes.ends_with('b'));
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(s, 3), "ééé");
    }

    #[test]
    fn test_doc_touch() {
        let mut doc = OutreachDoc::default();
        doc.touch("2025-06-01T10:00:00");
        assert_eq!(doc.updated_at, "2025-06-01T10:00:00");

        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["updatedAt"], "2025-06-01T10:00:00");
    }
}
