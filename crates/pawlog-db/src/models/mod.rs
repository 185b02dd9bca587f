//! Database models for persistent storage.

mod event;
mod profile;

pub use event::*;
pub use profile::*;
