//! Pawlog Core - types and summary math for the click journal
//!
//! This crate provides the domain types shared by the pawlog stack:
//! - Identity and session tokens (`UserId`, `SessionId`)
//! - Journal records (`Visit`, `ClickEvent`, `UserStats`)
//! - The `Summary` projection with its division-safe percentages
//!
//! No I/O lives here; persistence is `pawlog-db`, orchestration is
//! `pawlog-journal`.

mod button;
mod error;
mod identity;
mod record;
mod summary;

pub use button::ButtonType;
pub use error::{Error, Result};
pub use identity::{now_millis, SessionId, UserId};
pub use record::{ClickEvent, ClientInfo, ContextMap, UserStats, Visit};
pub use summary::Summary;
