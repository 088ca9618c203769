use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::config::MAX_TOP_PLAYERS;
use crate::models::Region;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
    pub uptime_seconds: i64,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub top_players: EndpointInfo,
    pub find_deck: EndpointInfo,
}

fn region_keys() -> Vec<&'static str> {
    Region::ALL.iter().map(Region::key).collect()
}

pub async fn service_descriptor(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    let regions = region_keys();

    Json(ServiceDescriptor {
        status: "online",
        message: "Clash Royale Ultimate Champion deck finder API",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        endpoints: Endpoints {
            top_players: EndpointInfo {
                method: "GET",
                path: "/api/top-players",
                description: "Top ranked players with clan and region",
                parameters: json!({
                    "region": format!("optional, one of {}; defaults to global", regions.join(", ")),
                    "limit": format!("optional, 1-{}", state.top_players.clamp(1, MAX_TOP_PLAYERS)),
                }),
            },
            find_deck: EndpointInfo {
                method: "POST",
                path: "/api/find-deck",
                description: "Latest Ultimate Champion deck of the player closest to a trophy count",
                parameters: json!({
                    "medals": "number (required)",
                    "region": format!("string (optional), one of {}", regions.join(", ")),
                }),
            },
        },
    })
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get_json, state_with};
    use crate::rankings::mock::MockRankingsClient;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_service_descriptor() {
        let app = build_router(state_with(MockRankingsClient::new()));
        let (status, json) = get_json(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "online");
        assert!(json["message"].is_string());
        assert_eq!(json["endpoints"]["findDeck"]["method"], "POST");
        assert_eq!(json["endpoints"]["findDeck"]["path"], "/api/find-deck");
        assert_eq!(json["endpoints"]["topPlayers"]["path"], "/api/top-players");
        assert!(json["endpoints"]["findDeck"]["parameters"]["medals"].is_string());
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(state_with(MockRankingsClient::new()));
        let (status, json) = get_json(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }
}
