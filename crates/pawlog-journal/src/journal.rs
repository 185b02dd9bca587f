//! The event journal: visit and click recording over a local store
//!
//! One journal instance per host page, constructed at startup and handed
//! to the UI callbacks. All operations run to completion on the caller's
//! thread; there is no internal locking. Two processes sharing a store
//! path each get their own session but share the profile identity;
//! last-write-wins on the stats row is accepted for this toy.

use crate::error::Result;
use pawlog_core::{
    now_millis, ButtonType, ClickEvent, ClientInfo, ContextMap, SessionId, Summary, UserId, Visit,
};
use pawlog_db::Store;

/// Configuration for the journal
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// How many of the newest clicks `summarize` includes
    pub recent_limit: usize,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self { recent_limit: 10 }
    }
}

struct ActiveSession {
    user_id: UserId,
    session_id: SessionId,
}

/// Records visits and clicks keyed by a locally generated identity
///
/// # Example
///
/// ```
/// use pawlog_core::{ButtonType, ClientInfo};
/// use pawlog_db::Store;
/// use pawlog_journal::Journal;
///
/// let mut journal = Journal::new(Store::in_memory().unwrap());
/// journal.init(ClientInfo::default()).unwrap();
/// journal.record_click(ButtonType::No, Default::default()).unwrap();
///
/// let summary = journal.summarize().unwrap();
/// assert_eq!(summary.total_no_clicks, 1);
/// ```
pub struct Journal {
    store: Store,
    config: JournalConfig,
    session: Option<ActiveSession>,
}

impl Journal {
    /// Create a journal over a store, not yet initialized
    pub fn new(store: Store) -> Self {
        Self::with_config(store, JournalConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(store: Store, config: JournalConfig) -> Self {
        Self {
            store,
            config,
            session: None,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Whether `init` has run (explicitly or defensively)
    pub fn is_initialized(&self) -> bool {
        self.session.is_some()
    }

    /// The profile identity of the running session, if initialized
    pub fn user_id(&self) -> Option<&UserId> {
        self.session.as_ref().map(|s| &s.user_id)
    }

    /// The current session token, if initialized
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session.as_ref().map(|s| &s.session_id)
    }

    /// Start a session: ensure the profile identity exists, mint a fresh
    /// session token, and append one visit with the given environment
    /// snapshot
    ///
    /// Idempotent with respect to the identity (an existing token is
    /// never overwritten); every call appends a visit.
    pub fn init(&mut self, client: ClientInfo) -> Result<Visit> {
        let user_id = match self.store.identity()? {
            Some(existing) => existing,
            None => {
                let fresh = UserId::generate();
                retry_once(|| self.store.set_identity(&fresh))?;
                fresh
            }
        };

        let session_id = SessionId::generate();
        let visit = Visit {
            user_id: user_id.clone(),
            session_id: session_id.clone(),
            visit_time: now_millis(),
            client,
        };
        retry_once(|| self.store.append_visit(&visit))?;

        self.session = Some(ActiveSession {
            user_id,
            session_id,
        });
        Ok(visit)
    }

    /// Append one click and update the user's stats
    ///
    /// When called before `init`, initializes defensively with an empty
    /// environment snapshot instead of faulting. After this returns the
    /// stats counters match the stored click log for this user.
    pub fn record_click(&mut self, button: ButtonType, context: ContextMap) -> Result<ClickEvent> {
        let (user_id, session_id) = match &self.session {
            Some(s) => (s.user_id.clone(), s.session_id.clone()),
            None => {
                let visit = self.init(ClientInfo::default())?;
                (visit.user_id, visit.session_id)
            }
        };

        let timestamp = now_millis();
        let click = retry_once(|| {
            self.store
                .apply_click(&user_id, &session_id, button, timestamp, context.clone())
        })?;
        Ok(click)
    }

    /// Derive the summary projection over current stored state
    pub fn summarize(&self) -> Result<Summary> {
        let visits = self.store.load_visits()?;
        let clicks = self.store.load_clicks()?;
        let stats = self.store.load_stats()?;
        Ok(Summary::compute(
            &visits,
            &clicks,
            &stats,
            self.config.recent_limit,
        ))
    }

    /// Erase identity, visits, clicks, and stats together and return to
    /// the uninitialized state
    ///
    /// Irreversible; the host is expected to confirm with the user first.
    pub fn clear_all(&mut self) -> Result<()> {
        retry_once(|| self.store.clear())?;
        self.session = None;
        Ok(())
    }

    pub(crate) fn drop_session(&mut self) {
        self.session = None;
    }
}

/// Run a storage write, retrying exactly once when the store reports
/// itself unavailable
fn retry_once<T>(mut op: impl FnMut() -> pawlog_db::Result<T>) -> pawlog_db::Result<T> {
    match op() {
        Err(pawlog_db::Error::Unavailable(msg)) => {
            tracing::warn!(error = %msg, "storage write failed, retrying once");
            op()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn journal() -> Journal {
        Journal::new(Store::in_memory().unwrap())
    }

    #[test]
    fn test_init_on_empty_store() {
        let mut journal = journal();
        let visit = journal.init(ClientInfo::default()).unwrap();

        assert!(!visit.user_id.as_str().is_empty());
        assert!(journal.is_initialized());
        assert_eq!(journal.store().visit_count().unwrap(), 1);
        assert_eq!(journal.store().identity().unwrap(), Some(visit.user_id));
    }

    #[test]
    fn test_init_keeps_identity_but_rotates_session() {
        let mut journal = journal();
        let first = journal.init(ClientInfo::default()).unwrap();
        let second = journal.init(ClientInfo::default()).unwrap();

        assert_eq!(first.user_id, second.user_id);
        assert_ne!(first.session_id, second.session_id);
        assert_eq!(journal.store().visit_count().unwrap(), 2);
    }

    #[test]
    fn test_record_click_auto_initializes() {
        let mut journal = journal();
        let click = journal
            .record_click(ButtonType::No, Default::default())
            .unwrap();

        assert!(journal.is_initialized());
        assert_eq!(journal.user_id(), Some(&click.user_id));
        assert_eq!(journal.store().visit_count().unwrap(), 1);
    }

    #[test]
    fn test_click_counters_match_spec_scenario() {
        let mut journal = journal();
        journal.init(ClientInfo::default()).unwrap();

        for _ in 0..3 {
            journal
                .record_click(ButtonType::No, Default::default())
                .unwrap();
        }
        journal
            .record_click(ButtonType::Yes, Default::default())
            .unwrap();

        let summary = journal.summarize().unwrap();
        assert_eq!(summary.total_no_clicks, 3);
        assert_eq!(summary.total_yes_clicks, 1);
        assert_eq!(summary.total_clicks, 4);
        assert_eq!(summary.yes_percentage, 25.0);
    }

    #[test]
    fn test_summary_totals_always_add_up() {
        let mut journal = journal();
        journal
            .record_click(ButtonType::Yes, Default::default())
            .unwrap();
        journal
            .record_click(ButtonType::No, Default::default())
            .unwrap();

        let summary = journal.summarize().unwrap();
        assert_eq!(
            summary.total_clicks,
            summary.total_yes_clicks + summary.total_no_clicks
        );
    }

    #[test]
    fn test_clear_all_resets_everything() {
        let mut journal = journal();
        journal.init(ClientInfo::default()).unwrap();
        journal
            .record_click(ButtonType::No, Default::default())
            .unwrap();

        journal.clear_all().unwrap();

        assert!(!journal.is_initialized());
        assert!(journal.store().identity().unwrap().is_none());

        let summary = journal.summarize().unwrap();
        assert_eq!(summary.total_users, 0);
        assert_eq!(summary.total_visits, 0);
        assert_eq!(summary.total_clicks, 0);
        assert_eq!(summary.yes_percentage, 0.0);
    }

    #[test]
    fn test_recent_limit_is_configurable() {
        let mut journal = Journal::with_config(
            Store::in_memory().unwrap(),
            JournalConfig { recent_limit: 2 },
        );
        for _ in 0..5 {
            journal
                .record_click(ButtonType::No, Default::default())
                .unwrap();
        }

        let summary = journal.summarize().unwrap();
        assert_eq!(summary.recent_clicks.len(), 2);
        assert_eq!(summary.total_no_clicks, 5);
    }

    #[test]
    fn test_click_context_is_persisted() {
        let mut journal = journal();
        let mut context = ContextMap::new();
        context.insert("message".to_string(), "are you sure?".to_string());

        journal.record_click(ButtonType::No, context).unwrap();

        let clicks = journal.store().load_clicks().unwrap();
        assert_eq!(
            clicks[0].context.get("message").map(String::as_str),
            Some("are you sure?")
        );
    }
}
