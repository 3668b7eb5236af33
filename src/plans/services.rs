use tracing::info;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    plans::{
        dto::PlanRequest,
        repo_types::{Plan, PlanInput},
    },
    store::Store,
};

/// One hundred years.
const MAX_DURATION_MONTHS: i32 = 1200;

fn validate(req: PlanRequest) -> AppResult<PlanInput> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Plan name is required"));
    }
    if !req.price.is_finite() || req.price <= 0.0 {
        return Err(AppError::validation("Price must be a positive number"));
    }
    if req.duration <= 0 {
        return Err(AppError::validation("Duration must be a positive number of months"));
    }
    if req.duration > MAX_DURATION_MONTHS {
        return Err(AppError::validation(format!(
            "Duration cannot exceed {MAX_DURATION_MONTHS} months"
        )));
    }
    Ok(PlanInput {
        name,
        price: req.price,
        duration_months: req.duration,
    })
}

pub async fn create_plan(store: &dyn Store, req: PlanRequest) -> AppResult<Plan> {
    let input = validate(req)?;
    let plan = store.insert_plan(input).await?;
    info!(plan_id = %plan.id, "plan created");
    Ok(plan)
}

pub async fn list_plans(store: &dyn Store) -> AppResult<Vec<Plan>> {
    Ok(store.list_plans().await?)
}

pub async fn update_plan(store: &dyn Store, id: Uuid, req: PlanRequest) -> AppResult<Plan> {
    let input = validate(req)?;
    store
        .update_plan(id, input)
        .await?
        .ok_or_else(|| AppError::not_found("Plan not found"))
}

pub async fn delete_plan(store: &dyn Store, id: Uuid) -> AppResult<()> {
    if !store.delete_plan(id).await? {
        return Err(AppError::not_found("Plan not found"));
    }
    info!(plan_id = %id, "plan deleted");
    Ok(())
}
