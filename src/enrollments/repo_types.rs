use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::dates::iso_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "enrollment_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EnrollmentStatus {
    Active,
    Inactive,
    Locked,
}

/// Enrollment joined with its plan's name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub plan_name: String,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
    pub status: EnrollmentStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Enrollment {
    /// ACTIVE and not yet past its end date on `day` (inclusive).
    pub fn is_current_on(&self, day: Date) -> bool {
        self.status == EnrollmentStatus::Active && self.end_date >= day
    }
}

#[derive(Debug, Clone)]
pub struct NewEnrollment {
    pub user_id: Uuid,
    pub plan_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
}
