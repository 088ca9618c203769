//! Ranked player records.

use serde::{Deserialize, Serialize};

use super::PlayerTag;

/// Clan reference embedded in player records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClanRef {
    #[serde(default)]
    pub tag: Option<String>,
    pub name: String,
}

/// A player as listed on a location leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayer {
    /// Upstream tag, e.g. "#ABC123"
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub trophies: i64,
    /// Rank within the location leaderboard (1 = top)
    pub rank: u32,
    #[serde(default)]
    pub clan: Option<ClanRef>,
}

impl RankedPlayer {
    pub fn player_tag(&self) -> PlayerTag {
        PlayerTag::new(&self.tag)
    }

    /// Absolute trophy distance to a target.
    pub fn trophy_distance(&self, target: i64) -> u64 {
        self.trophies.abs_diff(target)
    }
}

/// Location reference attached to a player profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRef {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
}

/// Player profile from the player detail endpoint.
///
/// Only the fields used for enrichment are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDetail {
    pub tag: String,
    pub name: String,
    #[serde(default)]
    pub trophies: i64,
    #[serde(default)]
    pub clan: Option<ClanRef>,
    #[serde(default)]
    pub location: Option<LocationRef>,
}
