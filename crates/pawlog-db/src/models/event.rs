//! Append-only event rows: visits and clicks.

use crate::error::{Error, Result};
use native_db::*;
use native_model::{native_model, Model};
use pawlog_core::{ButtonType, ClickEvent, ClientInfo, ContextMap, SessionId, UserId, Visit};
use serde::{Deserialize, Serialize};

/// Stored page visit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct StoredVisit {
    /// Primary key - append sequence number.
    #[primary_key]
    pub seq: u64,
    /// Owning identity.
    #[secondary_key]
    pub user_id: String,
    /// Session the visit belongs to.
    pub session_id: String,
    /// Visit timestamp (UTC millis).
    pub visit_time: i64,
    /// Serialized environment snapshot.
    pub client: Vec<u8>,
}

impl StoredVisit {
    /// Create from a visit record at the given sequence slot.
    pub fn from_visit(seq: u64, visit: &Visit) -> Self {
        let client = bincode::serialize(&visit.client).unwrap_or_default();
        Self {
            seq,
            user_id: visit.user_id.as_str().to_string(),
            session_id: visit.session_id.as_str().to_string(),
            visit_time: visit.visit_time,
            client,
        }
    }

    /// Convert back to a visit record.
    ///
    /// An undecodable environment blob degrades to an empty snapshot
    /// rather than failing the load.
    pub fn to_visit(&self) -> Visit {
        let client: ClientInfo = match bincode::deserialize(&self.client) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(seq = self.seq, error = %e, "dropping malformed client snapshot");
                ClientInfo::default()
            }
        };
        Visit {
            user_id: UserId::new(self.user_id.clone()),
            session_id: SessionId::new(self.session_id.clone()),
            visit_time: self.visit_time,
            client,
        }
    }
}

/// Stored button click.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[native_model(id = 3, version = 1)]
#[native_db]
pub struct StoredClick {
    /// Primary key - append sequence number.
    #[primary_key]
    pub seq: u64,
    /// Owning identity.
    #[secondary_key]
    pub user_id: String,
    /// Session the click happened in.
    pub session_id: String,
    /// Button name ("yes" or "no").
    pub button: String,
    /// Click timestamp (UTC millis).
    pub timestamp: i64,
    /// Running per-user count for this button.
    pub click_count: u64,
    /// Serialized context map.
    pub context: Vec<u8>,
}

impl StoredClick {
    /// Create from a click record at the given sequence slot.
    pub fn from_click(seq: u64, click: &ClickEvent) -> Self {
        let context = bincode::serialize(&click.context).unwrap_or_default();
        Self {
            seq,
            user_id: click.user_id.as_str().to_string(),
            session_id: click.session_id.as_str().to_string(),
            button: click.button.as_str().to_string(),
            timestamp: click.timestamp,
            click_count: click.click_count,
            context,
        }
    }

    /// Convert back to a click record.
    ///
    /// A stored button name that no longer parses is `Malformed`;
    /// collection loads skip such rows with a warning instead of
    /// failing. An undecodable context blob degrades to an empty map.
    pub fn to_click(&self) -> Result<ClickEvent> {
        let button: ButtonType = self.button.parse().map_err(|_| {
            tracing::warn!(seq = self.seq, button = %self.button, "skipping malformed click row");
            Error::Malformed(format!(
                "unknown button {:?} in click row {}",
                self.button, self.seq
            ))
        })?;
        let context: ContextMap = match bincode::deserialize(&self.context) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(seq = self.seq, error = %e, "dropping malformed click context");
                ContextMap::default()
            }
        };
        Ok(ClickEvent {
            user_id: UserId::new(self.user_id.clone()),
            session_id: SessionId::new(self.session_id.clone()),
            button,
            timestamp: self.timestamp,
            click_count: self.click_count,
            context,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_row(button: &str, context: Vec<u8>) -> StoredClick {
        StoredClick {
            seq: 1,
            user_id: "u".to_string(),
            session_id: "s".to_string(),
            button: button.to_string(),
            timestamp: 5,
            click_count: 1,
            context,
        }
    }

    #[test]
    fn test_click_round_trip() {
        let mut context = ContextMap::new();
        context.insert("message".to_string(), "really?".to_string());
        let click = ClickEvent {
            user_id: UserId::new("u"),
            session_id: SessionId::new("s"),
            button: ButtonType::No,
            timestamp: 5,
            click_count: 2,
            context,
        };

        let restored = StoredClick::from_click(7, &click).to_click().unwrap();
        assert_eq!(restored, click);
    }

    #[test]
    fn test_malformed_button_row_is_rejected() {
        let err = click_row("maybe", Vec::new()).to_click().unwrap_err();
        assert!(matches!(err, Error::Malformed(msg) if msg.contains("maybe")));
    }

    #[test]
    fn test_malformed_context_blob_degrades_to_empty() {
        let click = click_row("yes", vec![0xff]).to_click().unwrap();
        assert_eq!(click.button, ButtonType::Yes);
        assert!(click.context.is_empty());
    }

    #[test]
    fn test_malformed_client_blob_degrades_to_default() {
        let row = StoredVisit {
            seq: 1,
            user_id: "u".to_string(),
            session_id: "s".to_string(),
            visit_time: 5,
            client: vec![0xff],
        };

        let visit = row.to_visit();
        assert_eq!(visit.client, ClientInfo::default());
        assert_eq!(visit.visit_time, 5);
    }
}
