//! The two buttons the toy page offers

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which button was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonType {
    /// The button the page wants you to press
    Yes,
    /// The button that runs away from the cursor
    No,
}

impl ButtonType {
    /// Lowercase wire name, matching the serde encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Yes => "yes",
            ButtonType::No => "no",
        }
    }
}

impl fmt::Display for ButtonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ButtonType {
    type Err = Error;

    /// Parse a button name; anything but "yes"/"no" is rejected
    /// before it can reach storage
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yes" => Ok(ButtonType::Yes),
            "no" => Ok(ButtonType::No),
            other => Err(Error::UnknownButton(other.to_string())),
        }
    }
}
