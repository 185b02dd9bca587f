//! Common query patterns for the store.

use crate::error::{Error, Result};
use crate::models::*;
use crate::store::Store;
use pawlog_core::{ClickEvent, UserId, UserStats};

impl Store {
    /// Number of recorded visits.
    pub fn visit_count(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredVisit>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }

    /// Number of recorded clicks.
    pub fn click_count(&self) -> Result<usize> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredClick>()?;
        let iter = scan.all()?;
        Ok(iter.count())
    }

    /// All clicks for one user, in append order.
    ///
    /// Exact-match scan: a user id that happens to be a prefix of
    /// another never pulls in the other user's clicks.
    pub fn clicks_for(&self, user_id: &UserId) -> Result<Vec<ClickEvent>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().secondary::<StoredClick>(StoredClickKey::user_id)?;
        let iter = scan.range(user_id.as_str()..=user_id.as_str())?;
        let rows: std::result::Result<Vec<StoredClick>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(rows.iter().filter_map(|c| c.to_click().ok()).collect())
    }

    /// Stats for one user, if any event has been recorded for them.
    pub fn stats_for(&self, user_id: &UserId) -> Result<Option<UserStats>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredUserStats> = r.get().primary(user_id.as_str().to_string())?;
        Ok(stored.map(|s| s.to_stats()))
    }

    /// The `limit` newest clicks, newest first.
    pub fn recent_clicks(&self, limit: usize) -> Result<Vec<ClickEvent>> {
        let mut clicks = self.load_clicks()?;
        clicks.reverse();
        clicks.truncate(limit);
        Ok(clicks)
    }
}
