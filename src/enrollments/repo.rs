use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    enrollments::repo_types::{Enrollment, EnrollmentStatus, NewEnrollment},
    store::{PgStore, StoreResult},
};

#[async_trait]
pub trait EnrollmentRepo: Send + Sync {
    /// Always inserts as ACTIVE; overlapping enrollments are not checked.
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Enrollment>;
    /// Newest start date first.
    async fn list_enrollments_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Enrollment>>;
    async fn set_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> StoreResult<Option<Enrollment>>;
}

#[async_trait]
impl EnrollmentRepo for PgStore {
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Enrollment> {
        let row = sqlx::query_as::<_, Enrollment>(
            r#"
            WITH e AS (
                INSERT INTO enrollments (id, user_id, plan_id, start_date, end_date, status)
                VALUES ($1, $2, $3, $4, $5, 'ACTIVE')
                RETURNING *
            )
            SELECT e.id, e.user_id, e.plan_id, p.name AS plan_name,
                   e.start_date, e.end_date, e.status, e.created_at
              FROM e
              JOIN plans p ON p.id = e.plan_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(enrollment.user_id)
        .bind(enrollment.plan_id)
        .bind(enrollment.start_date)
        .bind(enrollment.end_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_enrollments_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Enrollment>> {
        let rows = sqlx::query_as::<_, Enrollment>(
            r#"
            SELECT e.id, e.user_id, e.plan_id, p.name AS plan_name,
                   e.start_date, e.end_date, e.status, e.created_at
              FROM enrollments e
              JOIN plans p ON p.id = e.plan_id
             WHERE e.user_id = $1
             ORDER BY e.start_date DESC, e.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> StoreResult<Option<Enrollment>> {
        let row = sqlx::query_as::<_, Enrollment>(
            r#"
            WITH e AS (
                UPDATE enrollments SET status = $2 WHERE id = $1
                RETURNING *
            )
            SELECT e.id, e.user_id, e.plan_id, p.name AS plan_name,
                   e.start_date, e.end_date, e.status, e.created_at
              FROM e
              JOIN plans p ON p.id = e.plan_id
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
