//! Singleton and per-user rows: identity, stats, append counters.

use native_db::*;
use native_model::{native_model, Model};
use pawlog_core::{UserId, UserStats};
use serde::{Deserialize, Serialize};

/// Stored profile identity. Single row, created once and never mutated
/// except by a full clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 1, version = 1)]
#[native_db]
pub struct StoredIdentity {
    /// Always "identity" - single row.
    #[primary_key]
    pub id: String,
    /// The profile's user token.
    pub user_id: String,
}

impl StoredIdentity {
    /// Fixed primary key of the singleton row.
    pub const KEY: &'static str = "identity";

    /// Create the singleton row for a user token.
    pub fn from_user_id(user_id: &UserId) -> Self {
        Self {
            id: Self::KEY.to_string(),
            user_id: user_id.as_str().to_string(),
        }
    }

    /// Convert to a user token.
    pub fn to_user_id(&self) -> UserId {
        UserId::new(self.user_id.clone())
    }
}

/// Stored per-user aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 4, version = 1)]
#[native_db]
pub struct StoredUserStats {
    /// Primary key - user token.
    #[primary_key]
    pub user_id: String,
    /// First event timestamp.
    pub first_visit: i64,
    /// Most recent event timestamp.
    pub last_visit: i64,
    /// Total "yes" clicks.
    pub total_yes: u64,
    /// Total "no" clicks.
    pub total_no: u64,
}

impl StoredUserStats {
    /// Create from a stats record.
    pub fn from_stats(stats: &UserStats) -> Self {
        Self {
            user_id: stats.user_id.as_str().to_string(),
            first_visit: stats.first_visit,
            last_visit: stats.last_visit,
            total_yes: stats.total_yes,
            total_no: stats.total_no,
        }
    }

    /// Convert to a stats record.
    pub fn to_stats(&self) -> UserStats {
        UserStats {
            user_id: UserId::new(self.user_id.clone()),
            first_visit: self.first_visit,
            last_visit: self.last_visit,
            total_yes: self.total_yes,
            total_no: self.total_no,
        }
    }
}

/// Append counter for an event table. Bumped in the same transaction as
/// the append it numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 5, version = 1)]
#[native_db]
pub struct StoredSequence {
    /// Table name - "visits" or "clicks".
    #[primary_key]
    pub id: String,
    /// Next sequence number to hand out.
    pub next: u64,
}

impl StoredSequence {
    /// Counter key for the visits table.
    pub const VISITS: &'static str = "visits";
    /// Counter key for the clicks table.
    pub const CLICKS: &'static str = "clicks";
}
