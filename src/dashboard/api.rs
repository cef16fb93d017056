use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use bugboard_common::{AssigneeStat, ClosedIssue, Issue};
use chrono::{SecondsFormat, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::errors::ServiceError;
use crate::service::IssueService;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub service: IssueService,
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RecentlyClosedParams {
    /// Kept as text so a malformed value falls back to the default instead of a 400.
    pub days: Option<String>,
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidDays { .. } => ApiError::BadRequest(err.to_string()),
            ServiceError::Fetch(ref inner) => {
                warn!(reason = inner.reason(), error = %inner, "request failed upstream");
                ApiError::Upstream(err.to_string())
            }
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/api/github/issues", get(list_issues))
        .route("/api/github/issues/by-assignee", get(issues_by_assignee))
        .route("/api/github/issues/regression", get(regression_issues))
        .route("/api/github/issues/recently-closed", get(recently_closed))
        .route("/health", get(health_check))
}

// ── Helpers ───────────────────────────────────────────────────────────

/// Missing, non-numeric and zero values all mean one day. Windows wider
/// than the service accepts pass through and are answered with a 400.
pub fn parse_days(raw: Option<&str>) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(1)
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

async fn list_issues(State(state): State<SharedState>) -> Result<Json<Vec<Issue>>, ApiError> {
    let issues = state.service.open_issues().await?;
    Ok(Json(Vec::clone(&issues)))
}

async fn issues_by_assignee(
    State(state): State<SharedState>,
) -> Result<Json<Vec<AssigneeStat>>, ApiError> {
    Ok(Json(state.service.issues_by_assignee().await?))
}

async fn regression_issues(State(state): State<SharedState>) -> Result<Json<Vec<Issue>>, ApiError> {
    Ok(Json(state.service.regression_issues().await?))
}

async fn recently_closed(
    State(state): State<SharedState>,
    Query(params): Query<RecentlyClosedParams>,
) -> Result<Json<Vec<ClosedIssue>>, ApiError> {
    let days = parse_days(params.days.as_deref());
    let issues = state.service.recently_closed(days).await?;
    Ok(Json(Vec::clone(&issues)))
}
