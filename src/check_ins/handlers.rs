use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    check_ins::{
        dto::CreateCheckInRequest,
        repo_types::{CheckIn, CheckInEntry},
        services,
    },
    error::AppResult,
    state::AppState,
};

pub fn check_in_routes() -> Router<AppState> {
    Router::new()
        .route("/check-ins", post(create_check_in))
        .route("/check-ins/history", get(my_history))
        .route("/check-ins/history/:user_id", get(user_history))
}

#[instrument(skip(state, payload))]
pub async fn create_check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateCheckInRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CheckIn>)> {
    auth.require_role(&[Role::Student])?;
    let Json(payload) = payload?;
    let check_in = services::record_check_in(
        state.store.as_ref(),
        auth.id,
        payload.workout_id,
        OffsetDateTime::now_utc(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(check_in)))
}

#[instrument(skip(state))]
pub async fn my_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<CheckInEntry>>> {
    Ok(Json(services::history(state.store.as_ref(), auth.id).await?))
}

#[instrument(skip(state))]
pub async fn user_history(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Vec<CheckInEntry>>> {
    let Path(user_id) = path?;
    auth.require_self_or_role(user_id, &[Role::Instructor, Role::Admin])?;
    Ok(Json(services::history(state.store.as_ref(), user_id).await?))
}
