//! REST API endpoints.
//!
//! Axum-based HTTP surface: a service descriptor, the top-players listing
//! and the deck lookup, behind a global rate limiter.

pub mod rate_limit;
pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::resolver::ResolveError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, example: Value },

    #[error("{message}")]
    NotFound { message: String, suggestion: String },

    #[error("{message}")]
    Upstream { message: String, details: String },

    #[error("Too many requests, please try again later.")]
    RateLimited { retry_after_secs: u64 },
}

/// 400 body.
#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub error: String,
    pub example: Value,
}

/// 404 body.
#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: String,
    pub suggestion: String,
}

/// 500 body.
#[derive(Debug, Serialize)]
pub struct UpstreamBody {
    pub error: String,
    pub details: String,
}

/// 429 body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitedBody {
    pub error: String,
    pub retry_after_seconds: u64,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::Validation { example, .. } => (
                StatusCode::BAD_REQUEST,
                Json(ValidationBody {
                    error: message,
                    example,
                }),
            )
                .into_response(),
            ApiError::NotFound { suggestion, .. } => (
                StatusCode::NOT_FOUND,
                Json(NotFoundBody {
                    error: message,
                    suggestion,
                }),
            )
                .into_response(),
            ApiError::Upstream { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(UpstreamBody {
                    error: message,
                    details,
                }),
            )
                .into_response(),
            ApiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                Json(RateLimitedBody {
                    error: message,
                    retry_after_seconds: retry_after_secs,
                }),
            )
                .into_response(),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::NoPlayers => ApiError::NotFound {
                message: err.to_string(),
                suggestion: "Try a different trophy count or region.".to_string(),
            },
            ResolveError::NoQualifyingBattle => ApiError::NotFound {
                message: err.to_string(),
                suggestion: "The closest player has no recent Ultimate Champion battles. Try a different trophy count.".to_string(),
            },
            ResolveError::Upstream(e) => {
                error!("Deck lookup failed upstream: {}", e);
                ApiError::Upstream {
                    message: "Failed to find deck".to_string(),
                    details: e
                        .upstream_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| e.to_string()),
                }
            }
        }
    }
}

/// CORS policy for the configured origin; `*` allows any origin.
pub fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!("Invalid CORS origin {:?}, cross-origin requests disabled", origin);
            layer
        }
    }
}

/// Build the application router.
///
/// Only the `/api/*` routes sit behind the rate limiter.
pub fn build_router(state: AppState) -> Router {
    let limited = Router::new()
        .route("/api/top-players", get(routes::players::top_players))
        .route("/api/find-deck", post(routes::deck::find_deck))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ));

    Router::new()
        .route("/", get(routes::index::service_descriptor))
        .route("/health", get(routes::index::health))
        .merge(limited)
        .layer(cors_layer(&state.cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::util::ServiceExt;

    use super::state::AppState;
    use crate::config::AppConfig;
    use crate::rankings::mock::MockRankingsClient;

    pub fn state_with(client: MockRankingsClient) -> AppState {
        let mut config = AppConfig::default();
        config.rankings.token = "test".to_string();
        AppState::new(Arc::new(client), &config).unwrap()
    }

    pub async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(request).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }

    pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, Value) {
        send(
            app,
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}
