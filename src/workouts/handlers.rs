use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::AppResult,
    state::AppState,
    workouts::{dto::CreateWorkoutRequest, repo_types::WorkoutWithExercises, services},
};

pub fn workout_routes() -> Router<AppState> {
    Router::new()
        .route("/workouts", post(create_workout))
        .route("/workouts/my", get(list_my_workouts))
        .route("/workouts/student/:student_id", get(list_student_workouts))
        .route("/workouts/:id", delete(delete_workout))
}

#[instrument(skip(state, payload))]
pub async fn create_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<WorkoutWithExercises>)> {
    auth.require_role(&[Role::Instructor, Role::Admin])?;
    let Json(payload) = payload?;
    let created = services::create_workout(state.store.as_ref(), &auth, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(skip(state))]
pub async fn list_my_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<WorkoutWithExercises>>> {
    Ok(Json(services::list_for_student(state.store.as_ref(), auth.id).await?))
}

#[instrument(skip(state))]
pub async fn list_student_workouts(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<Vec<WorkoutWithExercises>>> {
    let Path(student_id) = path?;
    auth.require_self_or_role(student_id, &[Role::Instructor, Role::Admin])?;
    Ok(Json(services::list_for_student(state.store.as_ref(), student_id).await?))
}

#[instrument(skip(state))]
pub async fn delete_workout(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    auth.require_role(&[Role::Instructor, Role::Admin])?;
    let Path(id) = path?;
    services::delete_workout(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
