//! Export journal data to various formats

use crate::error::{Error, Result};
use crate::journal::Journal;
use chrono::Utc;
use pawlog_core::{ClickEvent, UserId, UserStats, Visit};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Export format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Raw collections, pretty-printed JSON (re-importable)
    Json,
    /// Flattened per-click table
    Csv,
    /// Short human-readable aggregate report
    Text,
}

impl ExportFormat {
    /// Wire name, as accepted by `FromStr`
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "summary-text",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "summary-text" | "text" => Ok(ExportFormat::Text),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Exporter for journal data
///
/// Reads stored state only; given identical stored state every format
/// serializes the same rows in the same order.
pub struct Exporter<'a> {
    journal: &'a Journal,
}

impl<'a> Exporter<'a> {
    /// Create a new exporter
    pub fn new(journal: &'a Journal) -> Self {
        Self { journal }
    }

    /// Export to a string in the specified format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Text => self.to_text(),
        }
    }

    /// Export to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Export the identity and the three collections as pretty-printed
    /// JSON. `Journal::import_json` restores this verbatim.
    pub fn to_json(&self) -> Result<String> {
        let export = ExportData::from_journal(self.journal)?;
        serde_json::to_string_pretty(&export).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export one row per click
    pub fn to_csv(&self) -> Result<String> {
        let mut output = String::new();
        output.push_str("Timestamp,User ID,Button Type,Click Count\n");

        for click in self.journal.store().load_clicks()? {
            output.push_str(&format!(
                "{},{},{},{}\n",
                click.timestamp, click.user_id, click.button, click.click_count
            ));
        }

        Ok(output)
    }

    /// Export a short human-readable report with a generation timestamp
    pub fn to_text(&self) -> Result<String> {
        let summary = self.journal.summarize()?;

        let mut output = String::new();
        output.push_str("=== Click Journal Report ===\n\n");
        output.push_str(&summary.to_string());
        output.push_str(&format!("\nGenerated: {}\n", Utc::now().to_rfc3339()));
        Ok(output)
    }
}

impl Journal {
    /// Shorthand for `Exporter::new(self).export(format)`
    pub fn export_as(&self, format: ExportFormat) -> Result<String> {
        Exporter::new(self).export(format)
    }
}

/// Data structure for full journal export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExportData {
    pub(crate) version: u32,
    pub(crate) identity: Option<UserId>,
    pub(crate) visits: Vec<Visit>,
    pub(crate) clicks: Vec<ClickEvent>,
    pub(crate) user_stats: Vec<UserStats>,
}

impl ExportData {
    fn from_journal(journal: &Journal) -> Result<Self> {
        let store = journal.store();
        Ok(Self {
            version: 1,
            identity: store.identity()?,
            visits: store.load_visits()?,
            clicks: store.load_clicks()?,
            user_stats: store.load_stats()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawlog_core::{ButtonType, ClientInfo};
    use pawlog_db::Store;

    fn journal_with_clicks() -> Journal {
        let mut journal = Journal::new(Store::in_memory().unwrap());
        journal.init(ClientInfo::default()).unwrap();
        journal
            .record_click(ButtonType::No, Default::default())
            .unwrap();
        journal
            .record_click(ButtonType::Yes, Default::default())
            .unwrap();
        journal
    }

    #[test]
    fn test_format_names() {
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "summary-text".parse::<ExportFormat>().unwrap(),
            ExportFormat::Text
        );
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(Error::UnknownFormat(s)) if s == "xml"
        ));
    }

    #[test]
    fn test_csv_has_header_plus_one_row_per_click() {
        let journal = journal_with_clicks();
        let csv = Exporter::new(&journal).to_csv().unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Timestamp,User ID,Button Type,Click Count");

        let clicks = journal.store().load_clicks().unwrap();
        let fields: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(fields[0], clicks[0].timestamp.to_string());
        assert_eq!(fields[1], clicks[0].user_id.as_str());
        assert_eq!(fields[2], "no");
        assert_eq!(fields[3], "1");
        assert!(lines[2].ends_with(",yes,1"));
    }

    #[test]
    fn test_json_contains_all_collections() {
        let journal = journal_with_clicks();
        let json = Exporter::new(&journal).to_json().unwrap();

        assert!(json.contains("\"identity\""));
        assert!(json.contains("\"visits\""));
        assert!(json.contains("\"clicks\""));
        assert!(json.contains("\"user_stats\""));
    }

    #[test]
    fn test_text_report_fields() {
        let journal = journal_with_clicks();
        let text = Exporter::new(&journal).to_text().unwrap();

        assert!(text.contains("Click Journal Report"));
        assert!(text.contains("Total clicks: 2"));
        assert!(text.contains("Yes percentage: 50.0%"));
        assert!(text.contains("Generated: "));
    }

    #[test]
    fn test_export_as_accepts_wire_names() {
        let journal = journal_with_clicks();
        let text = journal
            .export_as("summary-text".parse().unwrap())
            .unwrap();
        assert!(text.contains("Total clicks: 2"));
    }

    #[test]
    fn test_export_to_writer() {
        let journal = journal_with_clicks();
        let mut buf = Vec::new();
        Exporter::new(&journal)
            .export_to(&mut buf, ExportFormat::Csv)
            .unwrap();

        assert!(String::from_utf8(buf).unwrap().starts_with("Timestamp,"));
    }
}
