//! Deck extraction from a matched battle.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Battle, Card, PlayerTag};

/// A card in the simplified response schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckCard {
    pub name: String,
    pub level: u32,
    pub max_level: u32,
    pub icon_urls: BTreeMap<String, String>,
}

impl From<&Card> for DeckCard {
    fn from(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            level: card.level,
            max_level: card.max_level,
            icon_urls: card.icon_urls.clone(),
        }
    }
}

/// Cards played by `tag` in `battle`, in upstream order.
///
/// Empty when neither side of the battle belongs to the player.
pub fn extract_deck(battle: &Battle, tag: &PlayerTag) -> Vec<DeckCard> {
    battle
        .participant(tag)
        .map(|p| p.cards.iter().map(DeckCard::from).collect())
        .unwrap_or_default()
}
