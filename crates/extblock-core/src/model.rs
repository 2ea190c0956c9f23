//! Blocklist rule types and the cached state built from them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier the authority assigns to a rule
pub type RuleId = i64;

/// Curated extension with an independently toggled block state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExtensionRule {
    /// Rule identifier
    pub id: RuleId,
    /// Normalized extension
    pub extension: String,
    /// Human-readable description
    pub description: String,
    /// Whether uploads with this extension are rejected
    pub is_blocked: bool,
}

/// Operator-added extension; its presence alone means "blocked"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomExtensionRule {
    /// Rule identifier
    pub id: RuleId,
    /// Normalized extension
    pub extension: String,
}

/// Which rule set currently holds an extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionType {
    /// Held by a fixed rule; unblocking toggles it off
    Fixed,
    /// Held by a custom rule; unblocking deletes it
    Custom,
}

impl ExtensionType {
    /// Wire name of the type
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ExtensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(Self::Fixed),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown extension type: {other}")),
        }
    }
}

/// Local cache of the authority's rule sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlocklistState {
    /// Fixed rules in authority order
    pub fixed_extensions: Vec<FixedExtensionRule>,
    /// Custom rules in authority order
    pub custom_extensions: Vec<CustomExtensionRule>,
    /// A fixed-scoped request is outstanding
    pub is_loading_fixed: bool,
    /// A custom-scoped request is outstanding
    pub is_loading_custom: bool,
}
