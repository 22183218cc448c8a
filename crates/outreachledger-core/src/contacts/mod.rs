//! Contact document: models, storage, selection.

mod model;
mod store;

pub use model::{Contact, ContactStatus, NOTE_MAX_LEN, OutreachDoc};
pub use store::{ContactStore, StoreError, index_by_email, pending_indices, select_pending};
