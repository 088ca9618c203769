//! Deck resolution.
//!
//! Turns a trophy count and optional region into the most recent Ultimate
//! Champion deck of the closest-ranked player:
//!
//! 1. resolve the region to a leaderboard location
//! 2. list that leaderboard
//! 3. pick the player with the closest trophy count
//! 4. fetch the player's battle log
//! 5. take the first Ultimate Champion battle
//! 6. extract the player's side of that battle
//!
//! Each stage short-circuits on failure. Region resolution and the battle
//! log fetch degrade softly; only the leaderboard fetch surfaces an
//! upstream error.

mod battle;
mod deck;
mod region;
mod select;

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::RankedPlayer;
use crate::rankings::{RankingsClient, RankingsError};

pub use battle::BattleCriteria;
pub use deck::{extract_deck, DeckCard};
pub use region::{match_location, resolve_location, ResolvedLocation};
pub use select::closest_player;

/// Terminal outcomes other than success.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No players found for this trophy count.")]
    NoPlayers,

    #[error("No Ultimate Champion battles found.")]
    NoQualifyingBattle,

    #[error("Ranking API error: {0}")]
    Upstream(#[from] RankingsError),
}

/// A deck lookup request.
#[derive(Debug, Clone)]
pub struct DeckQuery {
    pub medals: i64,
    pub region: Option<String>,
}

/// Result of a successful lookup.
#[derive(Debug, Clone)]
pub struct ResolvedDeck {
    pub player: RankedPlayer,
    pub location: ResolvedLocation,
    pub battle_time: Option<String>,
    pub deck: Vec<DeckCard>,
}

/// Runs the deck lookup against a ranking client.
#[derive(Clone)]
pub struct DeckResolver {
    client: Arc<dyn RankingsClient>,
    criteria: BattleCriteria,
}

impl DeckResolver {
    pub fn new(client: Arc<dyn RankingsClient>, criteria: BattleCriteria) -> Self {
        Self { client, criteria }
    }

    pub async fn resolve(&self, query: &DeckQuery) -> Result<ResolvedDeck, ResolveError> {
        let location = resolve_location(self.client.as_ref(), query.region.as_deref()).await;

        let players = self.client.list_ranked_players(location.id, None).await?;
        let player = closest_player(&players, query.medals)
            .cloned()
            .ok_or(ResolveError::NoPlayers)?;

        info!(
            "Closest player to {} on {}: {} ({}) with {}",
            query.medals, location.label, player.name, player.tag, player.trophies
        );

        let tag = player.player_tag();
        let battles = match self.client.get_battle_log(&tag).await {
            Ok(battles) => battles,
            Err(e) => {
                warn!("Battle log for {} unavailable: {}", tag, e);
                Vec::new()
            }
        };

        let battle = self
            .criteria
            .first_match(&battles)
            .ok_or(ResolveError::NoQualifyingBattle)?;

        let deck = extract_deck(battle, &tag);
        if deck.is_empty() {
            warn!("Player {} not found on either side of matched battle", tag);
        }

        Ok(ResolvedDeck {
            battle_time: battle.battle_time.clone(),
            player,
            location,
            deck,
        })
    }
}
