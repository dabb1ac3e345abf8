//! API routes for the stub backend
//!
//! Entity routes live under `/api`; `/health` is served bare so a
//! supervisor can check liveness without knowing the API shape.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;
use vox_common::{CampaignUpdate, Credentials, NewCampaign, NewTrustConnection, NewUser};

use crate::error::ApiError;
use crate::state::PlatformState;

// ============================================================================
// Router
// ============================================================================

/// Create the stub router over the given state
pub fn router(state: PlatformState) -> Router {
    let api = Router::new()
        // Users
        .route("/users", post(create_user_handler).get(list_users_handler))
        .route(
            "/users/:id",
            get(get_user_handler).delete(delete_user_handler),
        )
        .route(
            "/users/:id/eligible-campaigns",
            get(eligible_campaigns_handler),
        )
        // Auth
        .route("/auth/login", post(login_handler))
        .route("/auth/me", get(me_handler))
        // Campaigns
        .route(
            "/campaigns",
            post(create_campaign_handler).get(list_campaigns_handler),
        )
        .route(
            "/campaigns/:id",
            get(get_campaign_handler)
                .patch(update_campaign_handler)
                .delete(delete_campaign_handler),
        )
        // Trust connections
        .route(
            "/trust-connections",
            post(create_connection_handler).get(list_connections_handler),
        )
        .route(
            "/trust-connections/:id",
            get(get_connection_handler).delete(delete_connection_handler),
        )
        .route(
            "/trust-connections/:id/accept",
            patch(accept_connection_handler),
        )
        .route(
            "/trust-connections/:id/reject",
            patch(reject_connection_handler),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

fn error_response(err: ApiError) -> Response {
    (
        err.status(),
        Json(serde_json::json!({ "error": err.to_string() })),
    )
        .into_response()
}

fn extract_token(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

// ============================================================================
// Health
// ============================================================================

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "vox-stub"
    }))
}

// ============================================================================
// User handlers
// ============================================================================

async fn create_user_handler(
    State(state): State<PlatformState>,
    Json(req): Json<NewUser>,
) -> impl IntoResponse {
    match state.create_user(req) {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_users_handler(State(state): State<PlatformState>) -> impl IntoResponse {
    Json(state.list_users())
}

async fn get_user_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.get_user(&id) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => error_response(ApiError::NotFound {
            kind: "user".to_string(),
            id,
        }),
    }
}

async fn delete_user_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.delete_user(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

async fn eligible_campaigns_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.eligible_campaigns(&id) {
        Ok(campaigns) => (StatusCode::OK, Json(campaigns)).into_response(),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Auth handlers
// ============================================================================

async fn login_handler(
    State(state): State<PlatformState>,
    Json(creds): Json<Credentials>,
) -> impl IntoResponse {
    match state.login(&creds) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn me_handler(
    State(state): State<PlatformState>,
    headers: axum::http::HeaderMap,
) -> impl IntoResponse {
    match extract_token(&headers).and_then(|t| state.user_for_token(&t)) {
        Some(user) => (StatusCode::OK, Json(user)).into_response(),
        None => error_response(ApiError::InvalidCredentials),
    }
}

// ============================================================================
// Campaign handlers
// ============================================================================

async fn create_campaign_handler(
    State(state): State<PlatformState>,
    Json(req): Json<NewCampaign>,
) -> impl IntoResponse {
    match state.create_campaign(req) {
        Ok(campaign) => (StatusCode::CREATED, Json(campaign)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_campaigns_handler(State(state): State<PlatformState>) -> impl IntoResponse {
    Json(state.list_campaigns())
}

async fn get_campaign_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.get_campaign(&id) {
        Some(campaign) => (StatusCode::OK, Json(campaign)).into_response(),
        None => error_response(ApiError::NotFound {
            kind: "campaign".to_string(),
            id,
        }),
    }
}

async fn update_campaign_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
    Json(req): Json<CampaignUpdate>,
) -> impl IntoResponse {
    match state.update_campaign_status(&id, req.status) {
        Ok(campaign) => (StatusCode::OK, Json(campaign)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_campaign_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.delete_campaign(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

// ============================================================================
// Trust connection handlers
// ============================================================================

async fn create_connection_handler(
    State(state): State<PlatformState>,
    Json(req): Json<NewTrustConnection>,
) -> impl IntoResponse {
    match state.create_connection(req) {
        Ok(connection) => (StatusCode::CREATED, Json(connection)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn list_connections_handler(State(state): State<PlatformState>) -> impl IntoResponse {
    Json(state.list_connections())
}

async fn get_connection_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.get_connection(&id) {
        Some(connection) => (StatusCode::OK, Json(connection)).into_response(),
        None => error_response(ApiError::NotFound {
            kind: "trust connection".to_string(),
            id,
        }),
    }
}

async fn accept_connection_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.accept_connection(&id) {
        Ok(connection) => (StatusCode::OK, Json(connection)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn reject_connection_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.reject_connection(&id) {
        Ok(connection) => (StatusCode::OK, Json(connection)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn delete_connection_handler(
    State(state): State<PlatformState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.delete_connection(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}
