//! Restore a JSON export into the store.

use crate::error::{Error, Result};
use crate::exporter::ExportData;
use crate::journal::Journal;

impl Journal {
    /// Replace the store contents with a previously exported JSON
    /// document.
    ///
    /// Exporting and re-importing reproduces an identical set of stored
    /// records. The running session is dropped, since the imported
    /// identity need not match it; the next operation re-initializes.
    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let data: ExportData =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        self.store().replace_all(
            data.identity.as_ref(),
            &data.visits,
            &data.clicks,
            &data.user_stats,
        )?;
        self.drop_session();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Exporter, Journal};
    use pawlog_core::{ButtonType, ClientInfo, ContextMap};
    use pawlog_db::Store;

    #[test]
    fn test_json_export_round_trips() {
        let mut journal = Journal::new(Store::in_memory().unwrap());
        journal.init(ClientInfo::default()).unwrap();
        let mut context = ContextMap::new();
        context.insert("variant".to_string(), "pleading".to_string());
        journal.record_click(ButtonType::No, context).unwrap();
        journal
            .record_click(ButtonType::Yes, Default::default())
            .unwrap();

        let json = Exporter::new(&journal).to_json().unwrap();

        let mut restored = Journal::new(Store::in_memory().unwrap());
        restored.import_json(&json).unwrap();

        assert_eq!(
            restored.store().identity().unwrap(),
            journal.store().identity().unwrap()
        );
        assert_eq!(
            restored.store().load_visits().unwrap(),
            journal.store().load_visits().unwrap()
        );
        assert_eq!(
            restored.store().load_clicks().unwrap(),
            journal.store().load_clicks().unwrap()
        );
        assert_eq!(
            restored.store().load_stats().unwrap(),
            journal.store().load_stats().unwrap()
        );
    }

    #[test]
    fn test_import_replaces_existing_state() {
        let mut source = Journal::new(Store::in_memory().unwrap());
        source
            .record_click(ButtonType::Yes, Default::default())
            .unwrap();
        let json = Exporter::new(&source).to_json().unwrap();

        let mut target = Journal::new(Store::in_memory().unwrap());
        for _ in 0..4 {
            target
                .record_click(ButtonType::No, Default::default())
                .unwrap();
        }

        target.import_json(&json).unwrap();

        assert!(!target.is_initialized());
        let summary = target.summarize().unwrap();
        assert_eq!(summary.total_yes_clicks, 1);
        assert_eq!(summary.total_no_clicks, 0);
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut journal = Journal::new(Store::in_memory().unwrap());
        assert!(journal.import_json("not json at all").is_err());
    }
}
