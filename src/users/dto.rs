use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{auth::Role, enrollments::repo_types::EnrollmentStatus};

#[derive(Debug, Serialize)]
pub struct MemberSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub plan: Option<String>,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}
