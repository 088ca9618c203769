//! Top-player listing with clan/region enrichment.
//!
//! Each listed player gets one profile request. Requests run concurrently
//! and fail independently: a failed lookup leaves that entry without clan
//! and region rather than failing the listing.

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::RankedPlayer;
use crate::rankings::{RankingsClient, RankingsError};
use crate::resolver::ResolvedLocation;

/// Label for enriched players that are not in a clan.
pub const NO_CLAN: &str = "No Clan";

/// A top-player entry in the response schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopPlayer {
    pub name: String,
    pub tag: String,
    pub trophies: i64,
    pub rank: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl TopPlayer {
    fn bare(player: RankedPlayer) -> Self {
        Self {
            name: player.name,
            tag: player.tag,
            trophies: player.trophies,
            rank: player.rank,
            clan: None,
            region: None,
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.clan.is_some()
    }
}

/// Enrich one player from its profile.
async fn enrich_one(
    client: &dyn RankingsClient,
    player: RankedPlayer,
    fallback_region: &str,
) -> TopPlayer {
    let tag = player.player_tag();
    match client.get_player(&tag).await {
        Ok(detail) => {
            let clan = detail
                .clan
                .or_else(|| player.clan.clone())
                .map(|c| c.name)
                .unwrap_or_else(|| NO_CLAN.to_string());
            let region = detail
                .location
                .map(|l| l.name)
                .unwrap_or_else(|| fallback_region.to_string());

            TopPlayer {
                clan: Some(clan),
                region: Some(region),
                ..TopPlayer::bare(player)
            }
        }
        Err(e) => {
            warn!("Enrichment failed for {}: {}", tag, e);
            TopPlayer::bare(player)
        }
    }
}

/// Enrich players concurrently, preserving input order.
pub async fn enrich_players(
    client: &dyn RankingsClient,
    players: Vec<RankedPlayer>,
    fallback_region: &str,
    concurrency: usize,
) -> Vec<TopPlayer> {
    stream::iter(players)
        .map(|player| enrich_one(client, player, fallback_region))
        .buffered(concurrency.max(1))
        .collect()
        .await
}

/// List and enrich the top `limit` players of a leaderboard.
///
/// Fails only when the leaderboard itself cannot be fetched.
pub async fn top_players(
    client: &dyn RankingsClient,
    location: &ResolvedLocation,
    limit: u32,
    concurrency: usize,
) -> Result<Vec<TopPlayer>, RankingsError> {
    let mut players = client.list_ranked_players(location.id, Some(limit)).await?;
    players.truncate(limit as usize);

    let enriched = enrich_players(client, players, &location.label, concurrency).await;
    debug!(
        "Enriched {}/{} top players on {}",
        enriched.iter().filter(|p| p.is_enriched()).count(),
        enriched.len(),
        location.label
    );

    Ok(enriched)
}
