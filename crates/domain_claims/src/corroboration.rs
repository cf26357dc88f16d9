//! Weather corroboration outcome
//!
//! A weather provider can answer "it rained", "it did not" or "I have
//! nothing for that place and day". The decision rules only see a boolean,
//! but the third case is kept apart so the audit trail can tell the two
//! negative answers apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ClaimError;

/// Result of asking the weather corroborator about a claimed loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corroboration {
    /// Recorded weather matches the claimed damage
    Corroborated,
    /// Data exists but shows no matching event
    NotCorroborated,
    /// The provider had no usable data for the location or date
    DataUnavailable,
}

impl Corroboration {
    /// The boolean signal fed to the decision rules
    pub fn is_corroborated(&self) -> bool {
        matches!(self, Corroboration::Corroborated)
    }

    /// Returns the storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            Corroboration::Corroborated => "corroborated",
            Corroboration::NotCorroborated => "not_corroborated",
            Corroboration::DataUnavailable => "data_unavailable",
        }
    }
}

impl From<bool> for Corroboration {
    fn from(matched: bool) -> Self {
        if matched {
            Corroboration::Corroborated
        } else {
            Corroboration::NotCorroborated
        }
    }
}

impl fmt::Display for Corroboration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Corroboration {
    type Err = ClaimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corroborated" => Ok(Corroboration::Corroborated),
            "not_corroborated" => Ok(Corroboration::NotCorroborated),
            "data_unavailable" => Ok(Corroboration::DataUnavailable),
            other => Err(ClaimError::UnknownCorroboration(other.to_string())),
        }
    }
}
