//! Scripted ranking client for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{RankingsClient, RankingsError};
use crate::models::{
    Arena, Battle, Card, ClanRef, GameMode, Location, LocationId, LocationRef, Participant,
    PlayerDetail, PlayerTag, RankedPlayer,
};

/// Mock client returning canned data.
///
/// Lookups for anything not scripted fail with a 404 status error.
#[derive(Default)]
pub struct MockRankingsClient {
    locations: Option<Vec<Location>>,
    leaderboards: HashMap<String, Vec<RankedPlayer>>,
    players: HashMap<PlayerTag, PlayerDetail>,
    battle_logs: HashMap<PlayerTag, Vec<Battle>>,
    leaderboard_calls: AtomicUsize,
}

fn not_found(what: &str) -> RankingsError {
    RankingsError::Status {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl MockRankingsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = Some(locations);
        self
    }

    pub fn with_leaderboard(mut self, location: LocationId, players: Vec<RankedPlayer>) -> Self {
        self.leaderboards.insert(location.to_string(), players);
        self
    }

    pub fn with_player(mut self, detail: PlayerDetail) -> Self {
        self.players.insert(PlayerTag::new(&detail.tag), detail);
        self
    }

    pub fn with_battle_log(mut self, tag: &str, battles: Vec<Battle>) -> Self {
        self.battle_logs.insert(PlayerTag::new(tag), battles);
        self
    }

    pub fn leaderboard_calls(&self) -> usize {
        self.leaderboard_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankingsClient for MockRankingsClient {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_locations(&self) -> Result<Vec<Location>, RankingsError> {
        self.locations.clone().ok_or_else(|| RankingsError::Status {
            status: 503,
            message: "locations unavailable".to_string(),
        })
    }

    async fn list_ranked_players(
        &self,
        location: LocationId,
        limit: Option<u32>,
    ) -> Result<Vec<RankedPlayer>, RankingsError> {
        self.leaderboard_calls.fetch_add(1, Ordering::SeqCst);
        let players = self
            .leaderboards
            .get(&location.to_string())
            .cloned()
            .ok_or_else(|| not_found("leaderboard"))?;

        Ok(match limit {
            Some(n) => players.into_iter().take(n as usize).collect(),
            None => players,
        })
    }

    async fn get_player(&self, tag: &PlayerTag) -> Result<PlayerDetail, RankingsError> {
        self.players.get(tag).cloned().ok_or_else(|| not_found("player"))
    }

    async fn get_battle_log(&self, tag: &PlayerTag) -> Result<Vec<Battle>, RankingsError> {
        self.battle_logs
            .get(tag)
            .cloned()
            .ok_or_else(|| not_found("battle log"))
    }
}

// ── Fixture builders ────────────────────────────────────────────

pub fn location(id: i64, name: &str) -> Location {
    Location {
        id,
        name: name.to_string(),
        is_country: false,
        country_code: None,
    }
}

pub fn ranked(tag: &str, name: &str, trophies: i64, rank: u32) -> RankedPlayer {
    RankedPlayer {
        tag: tag.to_string(),
        name: name.to_string(),
        trophies,
        rank,
        clan: None,
    }
}

pub fn detail(tag: &str, name: &str, clan: Option<&str>, location: Option<&str>) -> PlayerDetail {
    PlayerDetail {
        tag: tag.to_string(),
        name: name.to_string(),
        trophies: 0,
        clan: clan.map(|c| ClanRef {
            tag: None,
            name: c.to_string(),
        }),
        location: location.map(|l| LocationRef {
            id: None,
            name: l.to_string(),
        }),
    }
}

pub fn card(name: &str, level: u32) -> Card {
    Card {
        name: name.to_string(),
        id: None,
        level,
        max_level: 14,
        icon_urls: [("medium".to_string(), format!("https://cdn.example/{name}.png"))]
            .into_iter()
            .collect(),
    }
}

pub fn participant(tag: &str, cards: Vec<Card>) -> Participant {
    Participant {
        tag: tag.to_string(),
        name: None,
        cards,
    }
}

pub fn battle(
    game_mode_id: i64,
    arena_id: i64,
    team: Vec<Participant>,
    opponent: Vec<Participant>,
) -> Battle {
    Battle {
        battle_type: None,
        battle_time: None,
        game_mode: Some(GameMode {
            id: game_mode_id,
            name: None,
        }),
        arena: Some(Arena {
            id: arena_id,
            name: None,
        }),
        team,
        opponent,
    }
}
