//! Read-only projection over the stored collections

use crate::{ClickEvent, UserStats, Visit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Aggregate view of everything the journal has recorded
///
/// Pure function of stored state; computing it has no side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Distinct user identities seen across visits and clicks
    pub total_users: u64,
    /// Total recorded page loads
    pub total_visits: u64,
    /// Total recorded clicks
    pub total_clicks: u64,
    /// Total "yes" clicks
    pub total_yes_clicks: u64,
    /// Total "no" clicks
    pub total_no_clicks: u64,
    /// Percentage of clicks that were "yes"; 0.0 when there are no clicks
    pub yes_percentage: f64,
    /// Mean clicks per user; 0.0 when there are no users
    pub avg_clicks_per_user: f64,
    /// The most recent clicks, newest first
    pub recent_clicks: Vec<ClickEvent>,
}

impl Summary {
    /// Derive a summary from the stored collections
    ///
    /// `recent_limit` bounds how many of the newest clicks are included,
    /// for UI display.
    pub fn compute(
        visits: &[Visit],
        clicks: &[ClickEvent],
        stats: &[UserStats],
        recent_limit: usize,
    ) -> Self {
        let mut users: BTreeSet<&str> = visits.iter().map(|v| v.user_id.as_str()).collect();
        users.extend(stats.iter().map(|s| s.user_id.as_str()));

        let total_yes: u64 = stats.iter().map(|s| s.total_yes).sum();
        let total_no: u64 = stats.iter().map(|s| s.total_no).sum();
        let total_clicks = total_yes + total_no;
        let total_users = users.len() as u64;

        let yes_percentage = if total_clicks == 0 {
            0.0
        } else {
            total_yes as f64 / total_clicks as f64 * 100.0
        };
        let avg_clicks_per_user = if total_users == 0 {
            0.0
        } else {
            total_clicks as f64 / total_users as f64
        };

        let recent_clicks: Vec<ClickEvent> =
            clicks.iter().rev().take(recent_limit).cloned().collect();

        Self {
            total_users,
            total_visits: visits.len() as u64,
            total_clicks,
            total_yes_clicks: total_yes,
            total_no_clicks: total_no,
            yes_percentage,
            avg_clicks_per_user,
            recent_clicks,
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total users: {}", self.total_users)?;
        writeln!(f, "Total visits: {}", self.total_visits)?;
        writeln!(f, "Total clicks: {}", self.total_clicks)?;
        writeln!(f, "Yes clicks: {}", self.total_yes_clicks)?;
        writeln!(f, "No clicks: {}", self.total_no_clicks)?;
        writeln!(f, "Yes percentage: {:.1}%", self.yes_percentage)?;
        writeln!(f, "Avg clicks per user: {:.2}", self.avg_clicks_per_user)?;
        Ok(())
    }
}
