//! # outreachledger-graph
//!
//! REST client for the mail provider's messaging endpoints.
//!
//! This crate covers exactly the three API surfaces outreach automation
//! needs:
//! - send a message from a mailbox (`sendMail`)
//! - list recent sent items
//! - list the recent inbox
//!
//! Authentication is a bearer token supplied by the caller (see
//! `outreachledger-oauth`). Listings are field-projected, date-sorted and
//! capped; there is no paging, delta sync or retry.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
mod error;
mod model;

pub use client::{DEFAULT_BASE_URL, GraphClient, WellKnownFolder};
pub use error::{Error, Result};
pub use model::{
    EmailAddress, MailboxMessage, MessageBody, MessagePage, OutgoingMessage, Recipient,
    SendMailRequest,
};
