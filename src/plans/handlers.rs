use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::AppResult,
    plans::{dto::PlanRequest, repo_types::Plan, services},
    state::AppState,
};

pub fn plan_routes() -> Router<AppState> {
    Router::new()
        .route("/plans", get(list_plans).post(create_plan))
        .route("/plans/:id", put(update_plan).delete(delete_plan))
}

#[instrument(skip(state, payload))]
pub async fn create_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Plan>)> {
    auth.require_role(&[Role::Admin])?;
    let Json(payload) = payload?;
    let plan = services::create_plan(state.store.as_ref(), payload).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

#[instrument(skip(state))]
pub async fn list_plans(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<Plan>>> {
    Ok(Json(services::list_plans(state.store.as_ref()).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> AppResult<Json<Plan>> {
    auth.require_role(&[Role::Admin])?;
    let Path(id) = path?;
    let Json(payload) = payload?;
    Ok(Json(services::update_plan(state.store.as_ref(), id, payload).await?))
}

#[instrument(skip(state))]
pub async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    auth.require_role(&[Role::Admin])?;
    let Path(id) = path?;
    services::delete_plan(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
