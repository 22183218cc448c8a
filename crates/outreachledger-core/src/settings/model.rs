//! Settings model.

/// Resolved provider credentials and sender identity.
///
/// Produced by [`super::SettingsStore::load`]; all credential fields are
/// guaranteed non-empty once loading succeeds.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory tenant id for the token exchange.
    pub tenant_id: String,
    /// Application (client) id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Mailbox the outreach is sent from.
    pub sender: String,
    /// CC address override for outbound messages.
    pub cc: Option<String>,
    /// Subject line override for outbound messages.
    pub subject: Option<String>,
}
