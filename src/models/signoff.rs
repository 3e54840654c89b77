//! Signoff history entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// One entry of a `(participant, assignment)` signoff history, as returned by
/// `signoff/history`. The service orders entries most-recent-first; an empty
/// history means the assignment has not been signed off yet.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSignoff {
    #[serde(rename = "signedAt")]
    pub signed_at: String,
}

impl RawSignoff {
    /// UTC calendar date of the signoff.
    ///
    /// Timestamps are RFC 3339 in practice; a bare `YYYY-MM-DD` prefix is
    /// accepted as well.
    pub fn signed_date(&self) -> Result<NaiveDate, String> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(&self.signed_at) {
            return Ok(timestamp.with_timezone(&Utc).date_naive());
        }
        if self.signed_at.len() >= 10 {
            if let Ok(date) = NaiveDate::parse_from_str(&self.signed_at[..10], "%Y-%m-%d") {
                return Ok(date);
            }
        }
        Err(format!("bad signedAt timestamp {:?}", self.signed_at))
    }
}
