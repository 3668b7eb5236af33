use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    routing::{get, patch},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{dto::PublicUser, AuthUser, Role},
    error::AppResult,
    state::AppState,
    users::{
        dto::{MemberSummary, UpdateUserRequest},
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", patch(update_user))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<MemberSummary>>> {
    auth.require_role(&[Role::Admin])?;
    let today = OffsetDateTime::now_utc().date();
    Ok(Json(services::list_members(state.store.as_ref(), today).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AppResult<Json<PublicUser>> {
    auth.require_role(&[Role::Admin])?;
    let Path(id) = path?;
    let Json(payload) = payload?;
    Ok(Json(services::update_user(state.store.as_ref(), id, payload).await?))
}
