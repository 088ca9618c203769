//! Ranking API client implementation using reqwest.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{RankingsClient, RankingsError};
use crate::config::RankingsConfig;
use crate::models::{Battle, Location, LocationId, PlayerDetail, PlayerTag, RankedPlayer};

/// List endpoints wrap their payload in `{"items": [...]}`.
#[derive(Debug, Deserialize)]
struct Items<T> {
    items: Vec<T>,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// HTTP transport for the ranking API.
///
/// Every request carries the bearer token as a default header.
#[derive(Clone)]
pub struct HttpRankingsClient {
    client: Client,
    base_url: String,
}

impl std::fmt::Debug for HttpRankingsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpRankingsClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpRankingsClient {
    pub fn new(config: &RankingsConfig) -> Result<Self, RankingsError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| RankingsError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, RankingsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RankingsError::Status {
                status: status.as_u16(),
                message: extract_error_message(&body).unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                }),
            });
        }

        serde_json::from_str(&body).map_err(|e| RankingsError::Decode(e.to_string()))
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let parsed: UpstreamErrorBody = serde_json::from_str(body).ok()?;
    parsed.message.or(parsed.reason)
}

fn require_tag(tag: &PlayerTag) -> Result<(), RankingsError> {
    if tag.is_empty() {
        return Err(RankingsError::InvalidTag(tag.canonical()));
    }
    Ok(())
}

#[async_trait]
impl RankingsClient for HttpRankingsClient {
    fn name(&self) -> &'static str {
        "clash-royale"
    }

    async fn list_locations(&self) -> Result<Vec<Location>, RankingsError> {
        let items: Items<Location> = self.get_json("/locations", &[]).await?;
        Ok(items.items)
    }

    async fn list_ranked_players(
        &self,
        location: LocationId,
        limit: Option<u32>,
    ) -> Result<Vec<RankedPlayer>, RankingsError> {
        let path = format!("/locations/{}/rankings/players", location);
        let query: Vec<(&str, String)> = limit
            .map(|n| vec![("limit", n.to_string())])
            .unwrap_or_default();

        let items: Items<RankedPlayer> = self.get_json(&path, &query).await?;
        Ok(items.items)
    }

    async fn get_player(&self, tag: &PlayerTag) -> Result<PlayerDetail, RankingsError> {
        require_tag(tag)?;
        self.get_json(&format!("/players/{}", tag.url_encoded()), &[])
            .await
    }

    async fn get_battle_log(&self, tag: &PlayerTag) -> Result<Vec<Battle>, RankingsError> {
        require_tag(tag)?;
        self.get_json(&format!("/players/{}/battlelog", tag.url_encoded()), &[])
            .await
    }
}
