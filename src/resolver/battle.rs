//! Ultimate Champion battle filtering.

use crate::config::DeckConfig;
use crate::models::Battle;

/// Game mode and arena pair identifying Ultimate Champion ladder battles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleCriteria {
    pub game_mode_id: i64,
    pub arena_id: i64,
}

impl BattleCriteria {
    pub fn from_config(config: &DeckConfig) -> Self {
        Self {
            game_mode_id: config.game_mode_id,
            arena_id: config.arena_id,
        }
    }

    pub fn matches(&self, battle: &Battle) -> bool {
        battle.game_mode_id() == Some(self.game_mode_id) && battle.arena_id() == Some(self.arena_id)
    }

    /// First qualifying battle in log order.
    pub fn first_match<'a>(&self, battles: &'a [Battle]) -> Option<&'a Battle> {
        battles.iter().find(|b| self.matches(b))
    }
}

impl Default for BattleCriteria {
    fn default() -> Self {
        Self::from_config(&DeckConfig::default())
    }
}
