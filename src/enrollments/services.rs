use time::Date;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dates::add_months,
    enrollments::{
        dto::CreateEnrollmentRequest,
        repo_types::{Enrollment, EnrollmentStatus, NewEnrollment},
    },
    error::{AppError, AppResult},
    store::Store,
};

/// Enrolls a user in a plan starting `today`; the end date is `today` plus the plan's months.
pub async fn enroll(
    store: &dyn Store,
    req: CreateEnrollmentRequest,
    today: Date,
) -> AppResult<Enrollment> {
    let plan = match Uuid::parse_str(req.plan_id.trim()) {
        Ok(plan_id) => store.find_plan(plan_id).await?,
        Err(_) => None,
    };
    let Some(plan) = plan else {
        warn!(plan_id = %req.plan_id, "enroll with unknown plan");
        return Err(AppError::not_found("Plan not found"));
    };

    if store.find_user_by_id(req.user_id).await?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    let months = u32::try_from(plan.duration_months)
        .map_err(|_| anyhow::anyhow!("plan {} has negative duration", plan.id))?;
    let end_date = add_months(today, months).map_err(|e| {
        warn!(plan_id = %plan.id, error = %e, "enrollment end date out of range");
        AppError::validation("Plan duration is out of range")
    })?;

    let enrollment = store
        .insert_enrollment(NewEnrollment {
            user_id: req.user_id,
            plan_id: plan.id,
            start_date: today,
            end_date,
        })
        .await?;

    info!(
        enrollment_id = %enrollment.id,
        user_id = %enrollment.user_id,
        plan_id = %enrollment.plan_id,
        end_date = %enrollment.end_date,
        "enrollment created"
    );
    Ok(enrollment)
}

pub async fn list_for_user(store: &dyn Store, user_id: Uuid) -> AppResult<Vec<Enrollment>> {
    Ok(store.list_enrollments_for_user(user_id).await?)
}

pub async fn set_status(
    store: &dyn Store,
    id: Uuid,
    status: EnrollmentStatus,
) -> AppResult<Enrollment> {
    let enrollment = store
        .set_enrollment_status(id, status)
        .await?
        .ok_or_else(|| AppError::not_found("Enrollment not found"))?;
    info!(enrollment_id = %id, status = ?status, "enrollment status changed");
    Ok(enrollment)
}
