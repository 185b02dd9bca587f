//! Cat Page Demo
//!
//! Simulates the UI layer of the toy page: a page load, a user chasing
//! the evasive "No" button, the inevitable "Yes", and the debug panel's
//! summary/export/clear actions.

use pawlog_core::{ButtonType, ClientInfo, ContextMap};
use pawlog_db::Store;
use pawlog_journal::{ExportFormat, Exporter, Journal};
use rand::seq::SliceRandom;

// The page falls back to a static list when the image provider is down.
// Fallback selection is random rather than cycling.
const FALLBACK_CATS: &[&str] = &[
    "https://cdn2.thecatapi.com/images/b1.jpg",
    "https://cdn2.thecatapi.com/images/b2.jpg",
    "https://cdn2.thecatapi.com/images/b3.jpg",
];

const NO_MESSAGES: &[&str] = &[
    "Are you sure?",
    "Really??",
    "The cat is watching you.",
    "Last chance!",
];

fn main() {
    println!("=== Cat Page Demo ===\n");

    let store = Store::in_memory().expect("open store");
    let mut journal = Journal::new(store);

    // Page load: the UI captures its environment and starts a session.
    let client = ClientInfo {
        user_agent: "Mozilla/5.0 (demo)".to_string(),
        language: "en-US".to_string(),
        platform: "linux".to_string(),
        screen_resolution: "1920x1080".to_string(),
        timezone: "UTC".to_string(),
    };
    let visit = journal.init(client).expect("init journal");
    println!("Visitor {} started session {}\n", visit.user_id, visit.session_id);

    let mut rng = rand::thread_rng();
    let cat = FALLBACK_CATS.choose(&mut rng).expect("non-empty list");
    println!("Showing cat: {}", cat);

    // The user tries to press "No" a few times while the button dodges.
    for (attempt, message) in NO_MESSAGES.iter().enumerate() {
        let mut context = ContextMap::new();
        context.insert("message".to_string(), message.to_string());
        context.insert("attempt".to_string(), (attempt + 1).to_string());

        let click = journal
            .record_click(ButtonType::No, context)
            .expect("record no-click");
        println!("  'No' #{} ({})", click.click_count, message);
    }

    // Eventually everyone gives in.
    let click = journal
        .record_click(ButtonType::Yes, ContextMap::new())
        .expect("record yes-click");
    println!("  'Yes' #{} - the cat wins\n", click.click_count);

    // Debug panel: summary and exports.
    let summary = journal.summarize().expect("summarize");
    println!("{}", summary);

    let csv = Exporter::new(&journal)
        .export(ExportFormat::Csv)
        .expect("csv export");
    println!("CSV export:\n{}", csv);

    let report = journal.export_as(ExportFormat::Text).expect("text export");
    println!("{}", report);

    // And the big red button.
    journal.clear_all().expect("clear");
    let summary = journal.summarize().expect("summarize after clear");
    println!("After clear: {} clicks, {} visits", summary.total_clicks, summary.total_visits);
}
