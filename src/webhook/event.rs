//! The logical webhook event.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One event delivered by the API: what happened, when, and the payload.
///
/// `D` is the domain payload; it defaults to raw JSON so the normalizer
/// can be used without committing to a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent<D = serde_json::Value> {
    /// Event kind, e.g. `task.updated`
    pub event_name: String,
    /// Time the event was emitted, as sent on the wire
    pub time: String,
    /// Domain payload
    pub data: D,
}

impl<D> WebhookEvent<D> {
    /// Parses [`WebhookEvent::time`] as an RFC 3339 timestamp.
    ///
    /// Returns `None` if the sender used another format.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.time).ok()
    }
}
