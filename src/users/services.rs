use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::dto::PublicUser,
    enrollments::repo_types::EnrollmentStatus,
    error::{AppError, AppResult},
    store::Store,
    users::{
        dto::{MemberSummary, UpdateUserRequest},
        repo_types::UserUpdate,
    },
};

pub async fn list_members(store: &dyn Store, today: Date) -> AppResult<Vec<MemberSummary>> {
    let rows = store.list_members(today).await?;
    Ok(rows
        .into_iter()
        .map(|r| MemberSummary {
            status: if r.plan_name.is_some() {
                EnrollmentStatus::Active
            } else {
                EnrollmentStatus::Inactive
            },
            id: r.id,
            name: r.name,
            email: r.email,
            role: r.role,
            plan: r.plan_name,
        })
        .collect())
}

pub async fn update_user(
    store: &dyn Store,
    id: Uuid,
    req: UpdateUserRequest,
) -> AppResult<PublicUser> {
    let name = match req.name {
        Some(n) if n.trim().chars().count() < 3 => {
            return Err(AppError::validation("Name must have at least 3 characters"))
        }
        Some(n) => Some(n.trim().to_string()),
        None => None,
    };
    if name.is_none() && req.role.is_none() {
        return Err(AppError::validation("Nothing to update"));
    }

    let user = store
        .update_user(id, UserUpdate { name, role: req.role })
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    info!(user_id = %user.id, role = ?user.role, "user updated");
    Ok(user.into())
}
