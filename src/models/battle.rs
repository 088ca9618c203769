//! Battle log records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::PlayerTag;

/// Game mode of a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameMode {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Arena a battle was played in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

/// A card as played in a battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub id: Option<i64>,
    pub level: u32,
    pub max_level: u32,
    #[serde(default)]
    pub icon_urls: BTreeMap<String, String>,
}

/// One participant on a battle side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

/// A battle from a player's battle log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    #[serde(rename = "type", default)]
    pub battle_type: Option<String>,
    #[serde(default)]
    pub battle_time: Option<String>,
    #[serde(default)]
    pub game_mode: Option<GameMode>,
    #[serde(default)]
    pub arena: Option<Arena>,
    #[serde(default)]
    pub team: Vec<Participant>,
    #[serde(default)]
    pub opponent: Vec<Participant>,
}

impl Battle {
    pub fn game_mode_id(&self) -> Option<i64> {
        self.game_mode.as_ref().map(|m| m.id)
    }

    pub fn arena_id(&self) -> Option<i64> {
        self.arena.as_ref().map(|a| a.id)
    }

    /// Participant whose tag matches, searching the team side first.
    pub fn participant(&self, tag: &PlayerTag) -> Option<&Participant> {
        self.team
            .iter()
            .chain(self.opponent.iter())
            .find(|p| tag.matches(&p.tag))
    }
}
