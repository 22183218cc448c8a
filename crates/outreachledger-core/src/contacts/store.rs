//! Contact document storage and selection.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::model::{Contact, OutreachDoc};

/// Errors that can occur while reading or writing the contact document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document does not exist at the configured path.
    #[error("contact document not found: {0}")]
    NotFound(PathBuf),

    /// Document could not be read or written.
    #[error("contact document I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Document content is not a valid outreach document.
    #[error("contact document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed store for the outreach document.
///
/// The document is read in full and written in full. Writes go through a
/// temp file in the same directory followed by a rename, so a crash
/// mid-write leaves the previous good state intact. Single-process use
/// only: concurrent writers from separate processes can still race each
/// other.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Creates a store for the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the document exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the full document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file is missing and
    /// [`StoreError::Parse`] on malformed content.
    pub fn load(&self) -> Result<OutreachDoc, StoreError> {
        if !self.path.exists() {
            return Err(StoreError::NotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path)?;
        let doc: OutreachDoc = serde_json::from_str(&raw)?;
        debug!(
            path = %self.path.display(),
            contacts = doc.contacts.len(),
            "contact document loaded"
        );
        Ok(doc)
    }

    /// Persists the full document atomically.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the temp write or rename fails.
    pub fn save(&self, doc: &OutreachDoc) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)?;

        let mut tmp_name = OsString::from(self.path.as_os_str());
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), "contact document saved");
        Ok(())
    }
}

/// Indices of up to `limit` contacts awaiting their first send.
///
/// Document order is preserved; the result is a prefix of the filtered
/// list. Contacts with an empty email are skipped.
#[must_use]
pub fn pending_indices(doc: &OutreachDoc, limit: usize) -> Vec<usize> {
    doc.contacts
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.email.trim().is_empty() && c.status.is_awaiting_send())
        .map(|(i, _)| i)
        .take(limit)
        .collect()
}

/// Up to `limit` contacts awaiting their first send, in document order.
#[must_use]
pub fn select_pending(doc: &OutreachDoc, limit: usize) -> Vec<&Contact> {
    pending_indices(doc, limit)
        .into_iter()
        .map(|i| &doc.contacts[i])
        .collect()
}

/// Lookup from lowercased email to contact index.
///
/// When two contacts share an email the later one wins; this is logged
/// but tolerated, matching the document's loose ownership model.
#[must_use]
pub fn index_by_email(doc: &OutreachDoc) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(doc.contacts.len());
    for (i, contact) in doc.contacts.iter().enumerate() {
        let key = contact.email_key();
        if key.is_empty() {
            continue;
        }
        if index.insert(key, i).is_some() {
            warn!(email = %contact.email_key(), "duplicate contact email, keeping the later entry");
        }
    }
    index
}
