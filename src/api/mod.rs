//! HTTP surface over the ledger snapshot.
//!
//! Handlers only filter and format; every number comes from [`LedgerSnapshot`].

pub mod agents;
pub mod format;
pub mod governance;
pub mod positions;
pub mod users;
pub mod vault;

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ledger::LedgerSnapshot;
use crate::middleware::request_logging;

pub const API_VERSION: &str = "1.0.0";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<LedgerSnapshot>,
    random_picks: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(ledger: Arc<LedgerSnapshot>) -> Self {
        Self {
            ledger,
            random_picks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Ordinal for the next random-bet pick; the n-th call always gets the same wager.
    pub fn next_pick(&self) -> u64 {
        self.random_picks.fetch_add(1, Ordering::Relaxed)
    }
}

/// Error response carrying a `{"detail": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// Resolve an optional `days` query value against `1..=max`.
pub(crate) fn days_param(days: Option<i64>, default: i64, max: i64) -> Result<i64, ApiError> {
    let days = days.unwrap_or(default);
    if !(1..=max).contains(&days) {
        return Err(ApiError::unprocessable(format!(
            "days must be between 1 and {max}"
        )));
    }
    Ok(days)
}

/// Trimmed wallet address, rejecting missing or blank values.
pub(crate) fn wallet_param(wallet: Option<&str>) -> Result<String, ApiError> {
    match wallet.map(str::trim) {
        Some(w) if !w.is_empty() => Ok(w.to_string()),
        _ => Err(ApiError::bad_request("Wallet address is required")),
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Quack API is running",
        version: API_VERSION,
    })
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// Full application router. User routes are mounted under both `/api/user`
/// and `/api/users`.
pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/vault", vault::routes())
        .nest("/api/user", users::routes())
        .nest("/api/users", users::routes())
        .nest("/api/positions", positions::routes())
        .nest("/api/governance", governance::routes())
        .nest("/api/agents", agents::routes())
        .layer(middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
