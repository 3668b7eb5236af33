use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    enrollments::{
        dto::{CreateEnrollmentRequest, UpdateStatusRequest},
        repo_types::Enrollment,
        services,
    },
    error::AppResult,
    state::AppState,
};

pub fn enrollment_routes() -> Router<AppState> {
    Router::new()
        .route("/enrollments", post(create_enrollment))
        .route("/enrollments/user/:user_id", get(list_user_enrollments))
        .route("/enrollments/:id/status", patch(update_status))
}

#[instrument(skip(state, payload))]
pub async fn create_enrollment(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateEnrollmentRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Enrollment>)> {
    auth.require_role(&[Role::Admin])?;
    let Json(payload) = payload?;
    let today = OffsetDateTime::now_utc().date();
    let enrollment = services::enroll(state.store.as_ref(), payload, today).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

#[instrument(skip(state))]
pub async fn list_user_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Vec<Enrollment>>> {
    let Path(user_id) = path?;
    auth.require_self_or_role(user_id, &[Role::Admin])?;
    Ok(Json(services::list_for_user(state.store.as_ref(), user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> AppResult<Json<Enrollment>> {
    auth.require_role(&[Role::Admin])?;
    let Path(id) = path?;
    let Json(payload) = payload?;
    Ok(Json(services::set_status(state.store.as_ref(), id, payload.status).await?))
}
