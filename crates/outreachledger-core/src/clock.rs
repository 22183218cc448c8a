//! Document timestamp stamping.

use chrono::Local;

/// Timestamp format used throughout the outreach document.
pub(crate) const STAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Current local time in document format.
pub(crate) fn now_stamp() -> String {
    Local::now().format(STAMP_FORMAT).to_string()
}
