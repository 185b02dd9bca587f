//! Identity and session tokens
//!
//! A `UserId` is generated once per local profile and reused across runs;
//! a `SessionId` is generated fresh on every `init`. Both are
//! timestamp-plus-random-suffix tokens: collision-resistant for a toy,
//! deliberately not cryptographic.

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SUFFIX_LEN: usize = 9;
const SUFFIX_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Stable pseudo-identity for one local profile
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Wrap an existing token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh token, e.g. `user_1756300000000_k3f9x2m1q`
    pub fn generate() -> Self {
        Self(token("user"))
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for one page-load lifetime, sharing the profile's `UserId`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Wrap an existing token
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh token, e.g. `session_1756300000000_p8d2w7n4z`
    pub fn generate() -> Self {
        Self(token("session"))
    }

    /// Get the token as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current UTC time in milliseconds since epoch
///
/// Every timestamp in the journal uses this representation.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn token(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, now_millis(), suffix)
}
