//! API routes for atlasd
//!
//! The dispatcher is synchronous and may block on outbound HTTP, so every
//! call runs on the blocking pool.

use crate::server::AppState;
use atlas_common::{
    Dispatcher, ErrorResponse, HealthResponse, QueryRequest, QueryResponse, TextResponse,
    WeatherResponse,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;
type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

/// Run `f` against the dispatcher on the blocking pool
async fn with_dispatcher<T, F>(state: &AppStateArc, error_prefix: &str, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Dispatcher) -> T + Send + 'static,
    T: Send + 'static,
{
    let dispatcher = state.dispatcher.clone();
    tokio::task::spawn_blocking(move || f(&dispatcher))
        .await
        .map_err(|e| {
            error!("  Dispatch task failed: {}", e);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {}", error_prefix, e),
            )
        })
}

// ============================================================================
// Query Routes
// ============================================================================

pub fn query_routes() -> Router<AppStateArc> {
    Router::new().route("/api/query", post(handle_query))
}

async fn handle_query(
    State(state): State<AppStateArc>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = body.map_err(|rejection| {
        warn!("  Rejected query body: {}", rejection.body_text());
        api_error(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    let query = req.query.unwrap_or_default().trim().to_string();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No query provided"));
    }

    info!("[Q]  Processing: {}", query);

    let q = query.clone();
    let result = with_dispatcher(&state, "An error occurred", move |d| d.handle(&q)).await?;

    info!("[A]  Routed to {}", result.label());

    Ok(Json(QueryResponse {
        query,
        agent_used: result.label().to_string(),
        response: result.response,
        success: true,
    }))
}

// ============================================================================
// Direct Routes
// ============================================================================

pub fn direct_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/weather/:location", get(weather_for_location))
        .route("/api/math", get(random_math))
        .route("/api/sample", get(sample_fact))
}

async fn weather_for_location(
    State(state): State<AppStateArc>,
    Path(location): Path<String>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let loc = location.clone();
    let response =
        with_dispatcher(&state, "Weather fetch error", move |d| d.weather_report(&loc)).await?;

    Ok(Json(WeatherResponse {
        location,
        response,
        success: true,
    }))
}

async fn random_math(State(state): State<AppStateArc>) -> Result<Json<TextResponse>, ApiError> {
    let response =
        with_dispatcher(&state, "Math calculation error", |d| d.random_problem()).await?;

    Ok(Json(TextResponse {
        response,
        success: true,
    }))
}

async fn sample_fact(State(state): State<AppStateArc>) -> Result<Json<TextResponse>, ApiError> {
    let response = with_dispatcher(&state, "API fetch error", |d| d.sample_fact()).await?;

    Ok(Json(TextResponse {
        response,
        success: true,
    }))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
