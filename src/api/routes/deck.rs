use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::resolver::{DeckCard, DeckQuery, ResolvedDeck};

#[derive(Debug, Serialize)]
pub struct DeckPlayer {
    pub name: String,
    pub tag: String,
    pub trophies: i64,
    pub rank: u32,
    pub region: String,
}

#[derive(Debug, Serialize)]
pub struct FindDeckResponse {
    pub success: bool,
    pub player: DeckPlayer,
    pub deck: Vec<DeckCard>,
}

impl From<ResolvedDeck> for FindDeckResponse {
    fn from(resolved: ResolvedDeck) -> Self {
        Self {
            success: true,
            player: DeckPlayer {
                name: resolved.player.name,
                tag: resolved.player.tag,
                trophies: resolved.player.trophies,
                rank: resolved.player.rank,
                region: resolved.location.label,
            },
            deck: resolved.deck,
        }
    }
}

fn example_body() -> Value {
    json!({ "medals": 2500, "region": "europe" })
}

/// Trophy count from a JSON number or numeric string.
///
/// Fractional values are rejected.
pub fn parse_medals(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate a raw request body into a deck query.
pub fn parse_query(body: &Value) -> Result<DeckQuery, ApiError> {
    let medals = body
        .get("medals")
        .and_then(parse_medals)
        .ok_or_else(|| ApiError::Validation {
            message: "Medals value is required and must be a number".to_string(),
            example: example_body(),
        })?;

    let region = body
        .get("region")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(DeckQuery { medals, region })
}

pub async fn find_deck(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<FindDeckResponse>, ApiError> {
    let Json(body) = payload.map_err(|e| ApiError::Validation {
        message: format!("Invalid request body: {}", e.body_text()),
        example: example_body(),
    })?;

    let query = parse_query(&body)?;
    let resolved = state.resolver.resolve(&query).await?;

    Ok(Json(resolved.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::build_router;
    use crate::api::test_support::{post_json, state_with};
    use crate::models::LocationId;
    use crate::rankings::mock::{battle, card, location, participant, ranked, MockRankingsClient};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    const MODE: i64 = 72000464;
    const ARENA: i64 = 54000031;

    fn uc_log(tag: &str) -> Vec<crate::models::Battle> {
        vec![
            battle(MODE, 54000030, vec![participant(tag, vec![card("Old", 1)])], vec![]),
            battle(
                MODE,
                ARENA,
                vec![participant("#ENEMY", vec![card("Golem", 14)])],
                vec![participant(tag, vec![card("Hog Rider", 14), card("Log", 13)])],
            ),
        ]
    }

    fn client() -> MockRankingsClient {
        MockRankingsClient::new()
            .with_leaderboard(
                LocationId::Global,
                vec![
                    ranked("#P2400", "Low", 2400, 10),
                    ranked("#P2600", "High", 2600, 9),
                    ranked("#P3000", "Top", 3000, 1),
                ],
            )
            .with_battle_log("#P2400", uc_log("#P2400"))
            .with_battle_log("#P2600", uc_log("#P2600"))
    }

    #[test]
    fn test_parse_medals() {
        assert_eq!(parse_medals(&json!(2500)), Some(2500));
        assert_eq!(parse_medals(&json!(2500.0)), Some(2500));
        assert_eq!(parse_medals(&json!(" 2500 ")), Some(2500));
        assert_eq!(parse_medals(&json!(2500.5)), None);
        assert_eq!(parse_medals(&json!("lots")), None);
        assert_eq!(parse_medals(&json!(null)), None);
        assert_eq!(parse_medals(&json!([2500])), None);
    }

    #[test]
    fn test_parse_query_region_optional() {
        let query = parse_query(&json!({"medals": 10})).unwrap();
        assert_eq!(query.region, None);

        let query = parse_query(&json!({"medals": 10, "region": "asia"})).unwrap();
        assert_eq!(query.region.as_deref(), Some("asia"));

        let query = parse_query(&json!({"medals": 10, "region": 5})).unwrap();
        assert_eq!(query.region, None);
    }

    #[tokio::test]
    async fn test_equidistant_players_pick_first_in_order() {
        let app = build_router(state_with(client()));
        let (status, json) = post_json(app, "/api/find-deck", r#"{"medals": 2500}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["player"]["tag"], "#P2400");
        assert_eq!(json["player"]["trophies"], 2400);
        assert_eq!(json["player"]["rank"], 10);
        assert_eq!(json["player"]["region"], "Global");

        let names: Vec<&str> = json["deck"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Hog Rider", "Log"]);
        assert_eq!(json["deck"][1]["level"], 13);
        assert_eq!(json["deck"][1]["maxLevel"], 14);
        assert!(json["deck"][0]["iconUrls"]["medium"].is_string());
    }

    #[tokio::test]
    async fn test_missing_medals_is_400() {
        let app = build_router(state_with(client()));
        let (status, json) = post_json(app, "/api/find-deck", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
        assert_eq!(json["example"]["medals"], 2500);
    }

    #[tokio::test]
    async fn test_non_numeric_medals_is_400() {
        let app = build_router(state_with(client()));
        let (status, json) =
            post_json(app, "/api/find-deck", r#"{"medals": "a lot"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["example"].is_object());
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let app = build_router(state_with(client()));
        let (status, json) = post_json(app, "/api/find-deck", "{medals:").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["example"].is_object());
    }

    #[tokio::test]
    async fn test_no_uc_battle_is_404() {
        let client = MockRankingsClient::new()
            .with_leaderboard(LocationId::Global, vec![ranked("#A", "A", 3000, 1)])
            .with_battle_log("#A", vec![battle(MODE, 1, vec![], vec![])]);

        let app = build_router(state_with(client));
        let (status, json) = post_json(app, "/api/find-deck", r#"{"medals": 3000}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "No Ultimate Champion battles found.");
        assert!(json["suggestion"].is_string());
    }

    #[tokio::test]
    async fn test_empty_leaderboard_is_404() {
        let client = MockRankingsClient::new().with_leaderboard(LocationId::Global, vec![]);
        let app = build_router(state_with(client));
        let (status, json) = post_json(app, "/api/find-deck", r#"{"medals": 3000}"#).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["suggestion"].is_string());
    }

    #[tokio::test]
    async fn test_leaderboard_failure_is_500() {
        let app = build_router(state_with(MockRankingsClient::new()));
        let (status, json) = post_json(app, "/api/find-deck", r#"{"medals": 3000}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to find deck");
        assert_eq!(json["details"], "leaderboard not found");
    }

    #[tokio::test]
    async fn test_unknown_region_uses_global() {
        let client = client().with_locations(vec![location(1, "Europe")]);
        let app = build_router(state_with(client));
        let (status, json) = post_json(
            app,
            "/api/find-deck",
            r#"{"medals": "2600", "region": "atlantis"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["player"]["tag"], "#P2600");
        assert_eq!(json["player"]["region"], "Global");
    }
}
