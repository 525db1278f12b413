use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer};

use common::{log, log_warn};
use crate::config::ServerConfig;
use crate::rate_limit::{RateLimiter, rate_limit};
use crate::scores::ScoreBoard;

const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-xss-protection", "1; mode=block"),
    (
        "content-security-policy",
        "default-src 'self' 'unsafe-inline' 'unsafe-eval' https://fonts.googleapis.com https://fonts.gstatic.com",
    ),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
    ("x-permitted-cross-domain-policies", "none"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("cache-control", "no-store, no-cache, must-revalidate, max-age=0"),
];

#[derive(Clone)]
pub struct AppState {
    pub scores: ScoreBoard,
    pub config: Arc<ServerConfig>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            scores: ScoreBoard::new(),
            config: Arc::new(config),
            limiter: Arc::new(RateLimiter::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    MissingField,
    InvalidScore,
    InvalidPlayerName,
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionError::MissingField => write!(f, "Missing player_name or score"),
            SubmissionError::InvalidScore => write!(f, "Invalid score value"),
            SubmissionError::InvalidPlayerName => write!(f, "Invalid player name"),
        }
    }
}

impl std::error::Error for SubmissionError {}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Checks fields in the order the client can fix them: presence, score, then name.
pub fn parse_submission(body: &Value, max_name_len: usize) -> Result<(String, u64), SubmissionError> {
    let (Some(name), Some(score)) = (body.get("player_name"), body.get("score")) else {
        return Err(SubmissionError::MissingField);
    };
    let score = score.as_u64().ok_or(SubmissionError::InvalidScore)?;
    let name = name.as_str().ok_or(SubmissionError::InvalidPlayerName)?;
    if name.chars().count() > max_name_len {
        return Err(SubmissionError::InvalidPlayerName);
    }
    Ok((name.to_string(), score))
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/save_score", post(save_score))
        .route("/top_scores", get(top_scores))
        .route("/total_players", get(total_players))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit))
        .layer(CorsLayer::permissive());

    for &(name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router.with_state(state)
}

async fn save_score(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, SubmissionError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            log_warn!("Rejected score body: {}", rejection);
            return Err(SubmissionError::MissingField);
        }
    };

    let (player_name, score) = parse_submission(&body, state.config.max_player_name_len).inspect_err(|e| {
        log_warn!("Rejected score submission: {}", e);
    })?;

    log!("Score saved: {} - {}", player_name, score);
    state.scores.save(player_name, score).await;
    Ok(Json(json!({ "success": true })))
}

async fn top_scores(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.scores.top(state.config.top_scores_limit).await)
}

async fn total_players(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.scores.total_players().await)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Resource not found" })))
}
