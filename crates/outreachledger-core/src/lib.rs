//! # outreachledger-core
//!
//! Core business logic for the `OutreachLedger` outreach tracker.
//!
//! This crate provides:
//! - Settings resolution (provider credentials, sender identity)
//! - The contact document: models, atomic JSON storage, selection
//! - Message templating (greeting, beat variants, HTML body)
//! - **Outreach Sender** - paced batch dispatch with lifecycle bookkeeping
//! - **Mailbox Reconciler** - idempotent sync of sent/received mail into
//!   contact state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod clock;
pub mod contacts;
mod error;
pub mod outreach;
pub mod reconcile;
pub mod settings;
pub mod template;

pub use contacts::{
    Contact, ContactStatus, ContactStore, NOTE_MAX_LEN, OutreachDoc, StoreError, index_by_email,
    pending_indices, select_pending,
};
pub use error::{Error, Result};
pub use outreach::{
    DEFAULT_BATCH_SIZE, DEFAULT_PAUSE_SECS, DEFAULT_SUBJECT, SendOptions, SendReport, run_outreach,
};
pub use reconcile::{
    INBOX_FETCH_TOP, SENT_FETCH_TOP, SyncReport, apply_replies, apply_sent_items, run_sync,
};
pub use settings::{DEFAULT_SENDER, Settings, SettingsError, SettingsStore};
pub use template::{FALLBACK_SIGNATURE, ROLE_ACCOUNT_PREFIXES, Variant, build_body, greeting};
