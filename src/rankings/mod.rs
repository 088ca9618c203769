//! Outbound client for the third-party ranking API.
//!
//! The client returns parsed upstream records and owns no business logic.
//! All lookups go through the [`RankingsClient`] trait so handlers and the
//! resolver can be exercised against a scripted double.

mod http;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Battle, Location, LocationId, PlayerDetail, PlayerTag, RankedPlayer};

pub use http::HttpRankingsClient;

/// Errors from the ranking API.
#[derive(Debug, Error)]
pub enum RankingsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid player tag: {0:?}")]
    InvalidTag(String),

    #[error("API token is not a valid header value")]
    InvalidToken,
}

impl RankingsError {
    /// Upstream-provided message, when there is one.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            RankingsError::Status { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Read access to the ranking API.
#[async_trait]
pub trait RankingsClient: Send + Sync {
    /// Client name for logging.
    fn name(&self) -> &'static str;

    /// All leaderboard locations, in upstream order.
    async fn list_locations(&self) -> Result<Vec<Location>, RankingsError>;

    /// Players ranked on a location leaderboard, rank ascending.
    async fn list_ranked_players(
        &self,
        location: LocationId,
        limit: Option<u32>,
    ) -> Result<Vec<RankedPlayer>, RankingsError>;

    /// Player profile.
    async fn get_player(&self, tag: &PlayerTag) -> Result<PlayerDetail, RankingsError>;

    /// Recent battles, most recent first as returned upstream.
    async fn get_battle_log(&self, tag: &PlayerTag) -> Result<Vec<Battle>, RankingsError>;
}
