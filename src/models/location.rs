//! Leaderboard locations and the supported region keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A leaderboard partition as listed by the ranking API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub is_country: bool,
    #[serde(default)]
    pub country_code: Option<String>,
}

/// Identifier passed to the ranking API when listing a leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationId {
    #[default]
    Global,
    Id(i64),
}

impl LocationId {
    pub fn is_global(&self) -> bool {
        matches!(self, LocationId::Global)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationId::Global => write!(f, "global"),
            LocationId::Id(id) => write!(f, "{}", id),
        }
    }
}

/// Region keys accepted from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Europe,
    NorthAmerica,
    Asia,
    SouthAmerica,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Europe,
        Region::NorthAmerica,
        Region::Asia,
        Region::SouthAmerica,
    ];

    /// Parse a caller-supplied key, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything outside the enumerated set, `"global"`
    /// included.
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// Lowercase request key.
    pub fn key(&self) -> &'static str {
        match self {
            Region::Europe => "europe",
            Region::NorthAmerica => "north-america",
            Region::Asia => "asia",
            Region::SouthAmerica => "south-america",
        }
    }

    /// Location name used by the ranking API.
    pub fn display_name(&self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::Asia => "Asia",
            Region::SouthAmerica => "South America",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Label used in responses when the global leaderboard is consulted.
pub const GLOBAL_LABEL: &str = "Global";
