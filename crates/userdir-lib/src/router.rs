// ============================
// userdir-lib/src/router.rs
// ============================
//! HTTP router and handlers for the user directory.
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Json,
    routing::post,
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::{authenticate, requires_admin, BasicCredentials};
use crate::contracts::{LookupParams, PromoteParams, RegisterUserRequest, UserResponse};
use crate::error::AppError;
use crate::AppState;

/// Create the application router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/user-register", post(register_user))
        .route("/user-get", post(get_user))
        .route("/user-promote", post(promote_user))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /user-register` — open endpoint, always creates a USER-role
/// record.
async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let entity = state.registry.register(request.into_info())?;
    Ok(Json(UserResponse::from_entity(&entity)))
}

/// `POST /user-get` — authenticated lookup by exactly one of id or
/// username. Absence is a 404, not an error in the registry.
async fn get_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<LookupParams>,
) -> Result<Json<UserResponse>, AppError> {
    let credentials = BasicCredentials::from_headers(&headers)?;
    authenticate(&state.registry, &credentials)?;

    params.validate()?;

    let found = match params.id {
        Some(id) => state.registry.get_by_id(Some(id)),
        None => state.registry.get_by_username(params.username.as_deref()),
    };

    match found {
        Some(entity) => Ok(Json(UserResponse::from_entity(&entity))),
        None => Err(AppError::UserNotFound),
    }
}

/// `POST /user-promote` — admin-only promotion of the target user.
///
/// Order matters: authenticate (401), then the admin check (403), and
/// only then the target lookup (404), so non-admins cannot probe for
/// existing ids.
async fn promote_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<PromoteParams>,
) -> Result<Json<UserResponse>, AppError> {
    let credentials = BasicCredentials::from_headers(&headers)?;
    let actor = authenticate(&state.registry, &credentials)?;
    requires_admin(&actor)?;

    let entity = state.registry.grant_admin(params.id)?;
    tracing::debug!(actor = %actor.info.username, target = entity.uid, "promotion applied");
    Ok(Json(UserResponse::from_entity(&entity)))
}
