//! Pawlog DB - persistence layer using native_db
//!
//! Provides the durable per-profile store behind the journal:
//! - A singleton identity row
//! - Append-only visit and click tables with sequence counters
//! - Per-user stats rows, upserted in the same transaction as the click
//!   they account for

mod error;
mod models;
mod queries;
mod store;

pub use error::{Error, Result};
pub use store::Store;
