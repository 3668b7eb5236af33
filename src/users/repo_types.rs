use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::Role;

/// A user with the plan of their current membership, if any.
#[derive(Debug, Clone, FromRow)]
pub struct MemberRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub plan_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub role: Option<Role>,
}
