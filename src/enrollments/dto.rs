use serde::Deserialize;
use uuid::Uuid;

use super::repo_types::EnrollmentStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnrollmentRequest {
    pub user_id: Uuid,
    /// Kept as text: a malformed id is reported as an unknown plan.
    pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: EnrollmentStatus,
}
