//! Database store wrapper.

use crate::error::{Error, Result};
use crate::models::*;
use native_db::transaction::RwTransaction;
use native_db::*;
use pawlog_core::{ButtonType, ClickEvent, ContextMap, SessionId, UserId, UserStats, Visit};
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    models.define::<StoredIdentity>().unwrap();
    models.define::<StoredVisit>().unwrap();
    models.define::<StoredClick>().unwrap();
    models.define::<StoredUserStats>().unwrap();
    models.define::<StoredSequence>().unwrap();
    models
});

/// Local store for journal state, one database per profile.
pub struct Store {
    pub(crate) db: Database<'static>,
}

impl Store {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(Self { db })
    }

    /// Load the profile identity, if one has been created.
    pub fn identity(&self) -> Result<Option<UserId>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredIdentity> = r.get().primary(StoredIdentity::KEY.to_string())?;
        Ok(stored.map(|s| s.to_user_id()))
    }

    /// Write the profile identity.
    ///
    /// Callers check `identity()` first; the identity row is created once
    /// per profile and only ever removed by `clear`.
    pub fn set_identity(&self, user_id: &UserId) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredIdentity::from_user_id(user_id))?;
        rw.commit()?;
        Ok(())
    }

    /// Append one visit, assigning it the next sequence slot.
    pub fn append_visit(&self, visit: &Visit) -> Result<u64> {
        let rw = self.db.rw_transaction()?;
        let seq = next_seq(&rw, StoredSequence::VISITS)?;
        rw.upsert(StoredVisit::from_visit(seq, visit))?;
        rw.commit()?;
        Ok(seq)
    }

    /// Append one click and fold it into the user's stats, all in a
    /// single transaction.
    ///
    /// Creates the stats row when this is the user's first event; the
    /// returned event carries the running per-user count for the pressed
    /// button. After this returns, the stored click log and the stats
    /// counters agree.
    pub fn apply_click(
        &self,
        user_id: &UserId,
        session_id: &SessionId,
        button: ButtonType,
        timestamp: i64,
        context: ContextMap,
    ) -> Result<ClickEvent> {
        let rw = self.db.rw_transaction()?;

        let stored: Option<StoredUserStats> = rw.get().primary(user_id.as_str().to_string())?;
        let mut stats = stored
            .map(|s| s.to_stats())
            .unwrap_or_else(|| UserStats::new(user_id.clone(), timestamp));
        let click_count = stats.apply(button, timestamp);
        rw.upsert(StoredUserStats::from_stats(&stats))?;

        let seq = next_seq(&rw, StoredSequence::CLICKS)?;
        let click = ClickEvent {
            user_id: user_id.clone(),
            session_id: session_id.clone(),
            button,
            timestamp,
            click_count,
            context,
        };
        rw.upsert(StoredClick::from_click(seq, &click))?;

        rw.commit()?;
        Ok(click)
    }

    /// Load all visits in append order.
    pub fn load_visits(&self) -> Result<Vec<Visit>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredVisit>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredVisit>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(rows.iter().map(|v| v.to_visit()).collect())
    }

    /// Load all clicks in append order, skipping rows that no longer
    /// decode.
    pub fn load_clicks(&self) -> Result<Vec<ClickEvent>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredClick>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredClick>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(rows.iter().filter_map(|c| c.to_click().ok()).collect())
    }

    /// Load the stats rows for every user seen so far.
    pub fn load_stats(&self) -> Result<Vec<UserStats>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredUserStats>()?;
        let iter = scan.all()?;
        let rows: std::result::Result<Vec<StoredUserStats>, _> = iter.collect();
        let rows = rows.map_err(|e| Error::Unavailable(e.to_string()))?;
        Ok(rows.iter().map(|s| s.to_stats()).collect())
    }

    /// Erase everything: identity, visits, clicks, stats and the append
    /// counters. One transaction, so readers never observe a half-clear.
    pub fn clear(&self) -> Result<()> {
        let keys = self.collect_keys()?;
        let rw = self.db.rw_transaction()?;
        remove_keys(&rw, &keys)?;
        rw.commit()?;
        Ok(())
    }

    /// Replace the entire store contents, used to restore a JSON export.
    ///
    /// Sequence counters are rebuilt from the restored collections.
    pub fn replace_all(
        &self,
        identity: Option<&UserId>,
        visits: &[Visit],
        clicks: &[ClickEvent],
        stats: &[UserStats],
    ) -> Result<()> {
        let keys = self.collect_keys()?;
        let rw = self.db.rw_transaction()?;
        remove_keys(&rw, &keys)?;

        if let Some(user_id) = identity {
            rw.upsert(StoredIdentity::from_user_id(user_id))?;
        }
        for (i, visit) in visits.iter().enumerate() {
            rw.upsert(StoredVisit::from_visit(i as u64 + 1, visit))?;
        }
        for (i, click) in clicks.iter().enumerate() {
            rw.upsert(StoredClick::from_click(i as u64 + 1, click))?;
        }
        for s in stats {
            rw.upsert(StoredUserStats::from_stats(s))?;
        }
        rw.upsert(StoredSequence {
            id: StoredSequence::VISITS.to_string(),
            next: visits.len() as u64 + 1,
        })?;
        rw.upsert(StoredSequence {
            id: StoredSequence::CLICKS.to_string(),
            next: clicks.len() as u64 + 1,
        })?;

        rw.commit()?;
        Ok(())
    }

    fn collect_keys(&self) -> Result<TableKeys> {
        let r = self.db.r_transaction()?;

        let scan = r.scan().primary::<StoredVisit>()?;
        let iter = scan.all()?;
        let visits: std::result::Result<Vec<StoredVisit>, _> = iter.collect();
        let visit_seqs = visits
            .map_err(|e| Error::Unavailable(e.to_string()))?
            .into_iter()
            .map(|v| v.seq)
            .collect();

        let scan = r.scan().primary::<StoredClick>()?;
        let iter = scan.all()?;
        let clicks: std::result::Result<Vec<StoredClick>, _> = iter.collect();
        let click_seqs = clicks
            .map_err(|e| Error::Unavailable(e.to_string()))?
            .into_iter()
            .map(|c| c.seq)
            .collect();

        let scan = r.scan().primary::<StoredUserStats>()?;
        let iter = scan.all()?;
        let stats: std::result::Result<Vec<StoredUserStats>, _> = iter.collect();
        let stat_users = stats
            .map_err(|e| Error::Unavailable(e.to_string()))?
            .into_iter()
            .map(|s| s.user_id)
            .collect();

        Ok(TableKeys {
            visit_seqs,
            click_seqs,
            stat_users,
        })
    }
}

struct TableKeys {
    visit_seqs: Vec<u64>,
    click_seqs: Vec<u64>,
    stat_users: Vec<String>,
}

fn next_seq(rw: &RwTransaction, table: &str) -> Result<u64> {
    let counter: Option<StoredSequence> = rw.get().primary(table.to_string())?;
    let next = counter.map(|c| c.next).unwrap_or(1);
    rw.upsert(StoredSequence {
        id: table.to_string(),
        next: next + 1,
    })?;
    Ok(next)
}

fn remove_keys(rw: &RwTransaction, keys: &TableKeys) -> Result<()> {
    for seq in &keys.visit_seqs {
        if let Some(row) = rw.get().primary::<StoredVisit>(*seq)? {
            rw.remove(row)?;
        }
    }
    for seq in &keys.click_seqs {
        if let Some(row) = rw.get().primary::<StoredClick>(*seq)? {
            rw.remove(row)?;
        }
    }
    for user in &keys.stat_users {
        if let Some(row) = rw.get().primary::<StoredUserStats>(user.clone())? {
            rw.remove(row)?;
        }
    }
    if let Some(row) = rw
        .get()
        .primary::<StoredIdentity>(StoredIdentity::KEY.to_string())?
    {
        rw.remove(row)?;
    }
    for table in [StoredSequence::VISITS, StoredSequence::CLICKS] {
        if let Some(row) = rw.get().primary::<StoredSequence>(table.to_string())? {
            rw.remove(row)?;
        }
    }
    Ok(())
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Unavailable(err.to_string())
    }
}
