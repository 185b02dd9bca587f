//! Pawlog Journal - visit/click recording, summaries, and exports
//!
//! This crate is the event journal behind the toy analytics panel:
//!
//! - **Journal**: records visits and clicks keyed by a stable local
//!   identity, with a fresh session token per init
//! - **Exporter**: serializes stored state as JSON, CSV, or a short
//!   text report
//! - **Importer**: restores a JSON export verbatim
//!
//! # Example
//!
//! ```
//! use pawlog_core::{ButtonType, ClientInfo};
//! use pawlog_db::Store;
//! use pawlog_journal::{ExportFormat, Exporter, Journal};
//!
//! let mut journal = Journal::new(Store::in_memory().unwrap());
//! journal.init(ClientInfo::default()).unwrap();
//! journal.record_click(ButtonType::No, Default::default()).unwrap();
//!
//! let csv = Exporter::new(&journal).export(ExportFormat::Csv).unwrap();
//! assert_eq!(csv.lines().count(), 2);
//! ```

mod error;
mod exporter;
mod importer;
mod journal;

pub use error::{Error, Result};
pub use exporter::{ExportFormat, Exporter};
pub use journal::{Journal, JournalConfig};

// Re-export core types for convenience
pub use pawlog_core::{
    ButtonType, ClickEvent, ClientInfo, ContextMap, SessionId, Summary, UserId, UserStats, Visit,
};
