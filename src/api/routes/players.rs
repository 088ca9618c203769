use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::config::MAX_TOP_PLAYERS;
use crate::enrich::{self, TopPlayer};
use crate::resolver::resolve_location;

#[derive(Debug, Default, Deserialize)]
pub struct TopPlayersParams {
    pub region: Option<String>,
    pub limit: Option<u32>,
}

pub async fn top_players(
    State(state): State<AppState>,
    params: Result<Query<TopPlayersParams>, QueryRejection>,
) -> Result<Json<Vec<TopPlayer>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::Validation {
        message: format!("Invalid query parameters: {}", e.body_text()),
        example: json!("/api/top-players?region=europe&limit=10"),
    })?;

    let max = state.top_players.clamp(1, MAX_TOP_PLAYERS);
    let limit = params.limit.unwrap_or(max).clamp(1, max);

    let location = resolve_location(state.client.as_ref(), params.region.as_deref()).await;
    let players = enrich::top_players(
        state.client.as_ref(),
        &location,
        limit,
        state.enrich_concurrency,
    )
    .await
    .map_err(|e| {
        error!("Failed to fetch top players: {}", e);
        ApiError::Upstream {
            message: "Failed to fetch top players".to_string(),
            details: e
                .upstream_message()
                .map(str::to_string)
                .unwrap_or_else(|| e.to_string()),
        }
    })?;

    Ok(Json(players))
}
