//! User HTTP Routes
//!
//! Endpoints for user record CRUD and existence checks.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::user::{User, UserPayload, UserService};

use super::errors::ApiError;

// ==================
// Shared State
// ==================

/// User state shared across handlers
pub struct UserState {
    pub service: UserService,
}

impl UserState {
    pub fn new(service: UserService) -> Self {
        Self { service }
    }
}

// ==================
// Response Types
// ==================

/// Body of the existence check; field casing matches the wire contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExistsResponse {
    pub exists: bool,
    pub user_id: u64,
}

// ==================
// Routes
// ==================

pub fn user_routes(state: Arc<UserState>) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users/:id/exists", get(user_exists))
        .with_state(state)
}

// ==================
// Handlers
// ==================

/// GET /users
async fn list_users(State(state): State<Arc<UserState>>) -> Json<Vec<User>> {
    Json(state.service.list_all())
}

/// GET /users/:id
async fn get_user(
    State(state): State<Arc<UserState>>,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    state
        .service
        .get_by_id(id)
        .map(Json)
        .ok_or_else(|| crate::user::UserError::NotFound(id).into())
}

/// GET /users/:id/exists
async fn user_exists(
    State(state): State<Arc<UserState>>,
    Path(id): Path<u64>,
) -> Json<ExistsResponse> {
    Json(ExistsResponse {
        exists: state.service.exists_by_id(id),
        user_id: id,
    })
}

/// POST /users
///
/// A missing or undecodable body reaches the service as an absent
/// candidate and comes back as the "User data is required" validation
/// failure.
async fn create_user(
    State(state): State<Arc<UserState>>,
    payload: Option<Json<UserPayload>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.service.create(payload.map(|Json(p)| p))?;
    let location = format!("/users/{}", user.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(user),
    ))
}

/// PUT /users/:id
async fn update_user(
    State(state): State<Arc<UserState>>,
    Path(id): Path<u64>,
    payload: Option<Json<UserPayload>>,
) -> Result<Json<User>, ApiError> {
    let user = state.service.update(id, payload.map(|Json(p)| p))?;
    Ok(Json(user))
}

/// DELETE /users/:id
async fn delete_user(
    State(state): State<Arc<UserState>>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.service.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
