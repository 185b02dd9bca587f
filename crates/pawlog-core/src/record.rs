//! Journal record types
//!
//! `Visit` and `ClickEvent` are append-only; `UserStats` is the one
//! mutable record, upserted per click. All timestamps are UTC
//! milliseconds since epoch.

use crate::{ButtonType, SessionId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form context attached to a click (e.g. which taunt message
/// the page was showing)
pub type ContextMap = BTreeMap<String, String>;

/// Environment snapshot captured at init time
///
/// Supplied by the host; the journal never inspects the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// User agent string
    pub user_agent: String,
    /// UI language, e.g. "en-US"
    pub language: String,
    /// Host platform name
    pub platform: String,
    /// Screen resolution, e.g. "1920x1080"
    pub screen_resolution: String,
    /// IANA timezone name
    pub timezone: String,
}

/// One page load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visit {
    /// Profile identity
    pub user_id: UserId,
    /// This page load's session
    pub session_id: SessionId,
    /// When the page loaded
    pub visit_time: i64,
    /// Environment snapshot at load time
    pub client: ClientInfo,
}

/// One button press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickEvent {
    /// Profile identity
    pub user_id: UserId,
    /// Session the click happened in
    pub session_id: SessionId,
    /// Which button
    pub button: ButtonType,
    /// When the button was pressed
    pub timestamp: i64,
    /// Running per-user count for this button, assigned at append time
    pub click_count: u64,
    /// Optional contextual fields
    #[serde(default)]
    pub context: ContextMap,
}

/// Per-user aggregate, kept consistent with the click log on every append
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    /// Profile identity
    pub user_id: UserId,
    /// Timestamp of the first recorded event for this user
    pub first_visit: i64,
    /// Timestamp of the most recent recorded event
    pub last_visit: i64,
    /// Total "yes" clicks
    pub total_yes: u64,
    /// Total "no" clicks
    pub total_no: u64,
}

impl UserStats {
    /// Create a zeroed record for a user first seen at `timestamp`
    pub fn new(user_id: UserId, timestamp: i64) -> Self {
        Self {
            user_id,
            first_visit: timestamp,
            last_visit: timestamp,
            total_yes: 0,
            total_no: 0,
        }
    }

    /// Fold one click into the counters and return the updated running
    /// count for that button
    pub fn apply(&mut self, button: ButtonType, timestamp: i64) -> u64 {
        self.last_visit = timestamp;
        match button {
            ButtonType::Yes => {
                self.total_yes += 1;
                self.total_yes
            }
            ButtonType::No => {
                self.total_no += 1;
                self.total_no
            }
        }
    }

    /// Total clicks across both buttons
    pub fn total_clicks(&self) -> u64 {
        self.total_yes + self.total_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_apply_counts() {
        let mut stats = UserStats::new(UserId::new("u"), 100);

        assert_eq!(stats.apply(ButtonType::No, 110), 1);
        assert_eq!(stats.apply(ButtonType::No, 120), 2);
        assert_eq!(stats.apply(ButtonType::Yes, 130), 1);

        assert_eq!(stats.total_no, 2);
        assert_eq!(stats.total_yes, 1);
        assert_eq!(stats.total_clicks(), 3);
    }

    #[test]
    fn test_stats_apply_refreshes_last_visit() {
        let mut stats = UserStats::new(UserId::new("u"), 100);
        stats.apply(ButtonType::Yes, 250);

        assert_eq!(stats.first_visit, 100);
        assert_eq!(stats.last_visit, 250);
    }
}
