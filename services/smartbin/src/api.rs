//! HTTP API consumed by the dashboard front end

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sw_auth::{AuthGate, Session};
use tower_http::cors::CorsLayer;

use crate::aggregator::area_alerts;
use crate::dispatch::{plan_dispatch, DispatchRequest};
use crate::reading::{BinReading, BinView};
use crate::stats::fleet_stats;
use crate::state::{SourceStatus, StateHandle};
use crate::teams::{Roster, TeamStatus};

/// Everything the handlers need
#[derive(Clone)]
pub struct ApiState {
    pub state: StateHandle,
    pub auth: Arc<AuthGate>,
    pub roster: Arc<Roster>,
    pub alert_threshold: f64,
}

/// Build the API router
pub fn build_router(api: ApiState) -> Router {
    let protected = Router::new()
        .route("/bins", get(bins_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/alerts", get(alerts_handler))
        .route("/api/source", get(source_handler))
        .route("/api/readings", post(push_reading_handler))
        .route("/api/teams", get(teams_handler))
        .route("/api/teams/{id}", get(team_handler))
        .route(
            "/api/dispatch",
            get(dispatch_history_handler).post(dispatch_handler),
        )
        .route("/api/session", get(session_handler))
        .route("/api/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(api.clone(), require_session));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/login", post(login_handler))
        .merge(protected)
        .layer(CorsLayer::permissive())
        .with_state(api)
}

/// Reject requests without a live session; hand the session to handlers
async fn require_session(
    State(api): State<ApiState>,
    mut request: Request,
    next: Next,
) -> crate::Result<Response> {
    let session = api.auth.authenticate(request.headers()).await?;
    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    username: String,
}

async fn login_handler(
    State(api): State<ApiState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> crate::Result<Json<LoginResponse>> {
    let Json(body) = payload?;
    let session = api.auth.login(&body.username, &body.password).await?;
    Ok(Json(LoginResponse {
        token: session.token,
        username: session.username,
    }))
}

async fn logout_handler(
    State(api): State<ApiState>,
    Extension(session): Extension<Session>,
) -> StatusCode {
    api.auth.logout(&session.token).await;
    tracing::info!("User '{}' logged out", session.username);
    StatusCode::NO_CONTENT
}

async fn session_handler(Extension(session): Extension<Session>) -> impl IntoResponse {
    Json(serde_json::json!({
        "username": session.username,
        "created_at": session.created_at,
        "expires_at": session.expires_at,
    }))
}

async fn bins_handler(State(api): State<ApiState>) -> Json<Vec<BinView>> {
    let state = api.state.read().await;
    Json(state.readings.iter().cloned().map(BinView::from).collect())
}

async fn stats_handler(State(api): State<ApiState>) -> impl IntoResponse {
    let state = api.state.read().await;
    Json(fleet_stats(&state.readings, api.alert_threshold))
}

async fn alerts_handler(State(api): State<ApiState>) -> impl IntoResponse {
    let state = api.state.read().await;
    Json(area_alerts(&state.readings, api.alert_threshold))
}

#[derive(Debug, Serialize)]
struct SourceReport {
    #[serde(flatten)]
    status: SourceStatus,
    uptime_seconds: u64,
}

async fn source_handler(State(api): State<ApiState>) -> impl IntoResponse {
    let state = api.state.read().await;
    Json(SourceReport {
        status: state.source.clone(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Accept one reading from a collector. It stands until the next successful
/// poll replaces the store.
async fn push_reading_handler(
    State(api): State<ApiState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<BinReading>, JsonRejection>,
) -> crate::Result<impl IntoResponse> {
    let Json(reading) = payload?;
    reading.validate()?;

    let added = api.state.write().await.upsert_reading(reading.clone());
    tracing::debug!(
        "Reading for {} pushed by '{}' ({})",
        reading.bin_id,
        session.username,
        if added { "new bin" } else { "replaced" }
    );
    Ok((StatusCode::CREATED, Json(BinView::from(reading))))
}

#[derive(Debug, Deserialize)]
struct TeamQuery {
    status: Option<TeamStatus>,
}

async fn teams_handler(
    State(api): State<ApiState>,
    Query(query): Query<TeamQuery>,
) -> impl IntoResponse {
    let teams: Vec<_> = match query.status {
        Some(status) => api.roster.with_status(status).into_iter().cloned().collect(),
        None => api.roster.all().to_vec(),
    };
    Json(teams)
}

async fn team_handler(
    State(api): State<ApiState>,
    Path(id): Path<String>,
) -> crate::Result<impl IntoResponse> {
    let team = api.roster.find(&id)?;
    Ok(Json(team.clone()))
}

async fn dispatch_handler(
    State(api): State<ApiState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<DispatchRequest>, JsonRejection>,
) -> crate::Result<impl IntoResponse> {
    let Json(request) = payload?;
    let mut state = api.state.write().await;
    let alerts = area_alerts(&state.readings, api.alert_threshold);
    let order = plan_dispatch(&api.roster, &alerts, &request, Utc::now())?;

    tracing::info!("{} (requested by '{}')", order.message, session.username);
    state.add_dispatch(order.clone());

    Ok((StatusCode::CREATED, Json(order)))
}

async fn dispatch_history_handler(State(api): State<ApiState>) -> impl IntoResponse {
    let state = api.state.read().await;
    Json(state.dispatches.iter().cloned().collect::<Vec<_>>())
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
