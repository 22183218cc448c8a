//! Provider credentials and sender identity resolution.

mod model;
mod store;

pub use model::Settings;
pub use store::{DEFAULT_SENDER, SettingsError, SettingsStore};
