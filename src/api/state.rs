use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use crate::api::rate_limit::{FixedWindow, SharedRateLimiter};
use crate::config::{AppConfig, ConfigError};
use crate::rankings::RankingsClient;
use crate::resolver::{BattleCriteria, DeckResolver};

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn RankingsClient>,
    pub resolver: DeckResolver,
    pub rate_limiter: SharedRateLimiter,
    pub top_players: u32,
    pub enrich_concurrency: usize,
    pub cors_origin: String,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(client: Arc<dyn RankingsClient>, config: &AppConfig) -> Result<Self, ConfigError> {
        let window = config.rate_limit.window_duration()?;

        Ok(Self {
            resolver: DeckResolver::new(client.clone(), BattleCriteria::from_config(&config.deck)),
            client,
            rate_limiter: Arc::new(tokio::sync::Mutex::new(FixedWindow::new(
                config.rate_limit.max_requests,
                window,
                Instant::now(),
            ))),
            top_players: config.deck.top_players,
            enrich_concurrency: config.deck.enrich_concurrency,
            cors_origin: config.server.cors_origin.clone(),
            started_at: Utc::now(),
        })
    }
}
