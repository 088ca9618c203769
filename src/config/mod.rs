//! Configuration loading and validation.
//!
//! Values come from built-in defaults, an optional TOML file, a `.env` file
//! and the process environment, in increasing order of precedence.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::parse_duration;

/// Environment variable holding the upstream API bearer token.
pub const TOKEN_ENV: &str = "CR_API_TOKEN";
/// Environment variable overriding the listening port.
pub const PORT_ENV: &str = "PORT";
/// Environment variable overriding the upstream API base URL.
pub const BASE_URL_ENV: &str = "CR_API_BASE_URL";

/// Upper bound on entries returned by the top-players listing.
pub const MAX_TOP_PLAYERS: u32 = 20;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing API token: set CR_API_TOKEN")]
    MissingToken,

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Upstream ranking API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingsConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token; normally supplied through the environment
    #[serde(default, skip_serializing)]
    pub token: String,

    /// Timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://api.clashroyale.com/v1".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for RankingsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl RankingsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Inbound rate limiting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,

    /// Window length, e.g. "15m"
    #[serde(default = "default_window")]
    pub window: String,
}

fn default_max_requests() -> u32 {
    100
}

fn default_window() -> String {
    "15m".to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: default_max_requests(),
            window: default_window(),
        }
    }
}

impl RateLimitConfig {
    pub fn window_duration(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.window).ok_or_else(|| {
            ConfigError::ValidationError(format!("Invalid rate limit window: {}", self.window))
        })
    }
}

/// Deck lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckConfig {
    /// Game mode id of ranked Path of Legends battles
    #[serde(default = "default_game_mode_id")]
    pub game_mode_id: i64,

    /// Arena id of the Ultimate Champion league
    #[serde(default = "default_arena_id")]
    pub arena_id: i64,

    /// Entries returned by the top-players endpoint
    #[serde(default = "default_top_players")]
    pub top_players: u32,

    /// Concurrent player-detail requests while enriching
    #[serde(default = "default_enrich_concurrency")]
    pub enrich_concurrency: usize,
}

fn default_game_mode_id() -> i64 {
    72000464
}

fn default_arena_id() -> i64 {
    54000031
}

fn default_top_players() -> u32 {
    20
}

fn default_enrich_concurrency() -> usize {
    20
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            game_mode_id: default_game_mode_id(),
            arena_id: default_arena_id(),
            top_players: default_top_players(),
            enrich_concurrency: default_enrich_concurrency(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub rankings: RankingsConfig,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub deck: DeckConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            server: ServerConfig::default(),
            rankings: RankingsConfig::default(),
            rate_limit: RateLimitConfig::default(),
            deck: DeckConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from an optional file, overlay the environment and validate.
    ///
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            Some(p) => {
                debug!("Config file {:?} not found, using defaults", p);
                Self::default()
            }
            None => Self::default(),
        };

        dotenvy::dotenv().ok();
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV) {
            self.rankings.token = token.trim().to_string();
        }

        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("Invalid {}: {}", PORT_ENV, port)))?;
        }

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            self.rankings.base_url = base_url.trim().to_string();
        }

        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rankings.token.is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if Url::parse(&self.rankings.base_url).is_err() {
            return Err(ConfigError::ValidationError(format!(
                "Invalid API base URL: {}",
                self.rankings.base_url
            )));
        }

        if self.rankings.timeout_seconds == 0 {
            return Err(ConfigError::ValidationError(
                "API timeout must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::ValidationError(
                "Rate limit must allow at least one request".to_string(),
            ));
        }

        if self.rate_limit.window_duration()?.is_zero() {
            return Err(ConfigError::ValidationError(
                "Rate limit window must be greater than 0".to_string(),
            ));
        }

        if !(1..=MAX_TOP_PLAYERS).contains(&self.deck.top_players) {
            return Err(ConfigError::ValidationError(format!(
                "Top player count must be between 1 and {}",
                MAX_TOP_PLAYERS
            )));
        }

        if self.deck.enrich_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "Enrichment concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
