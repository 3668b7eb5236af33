use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    check_ins::repo_types::{CheckIn, CheckInEntry, NewCheckIn},
    store::{PgStore, StoreResult},
};

#[async_trait]
pub trait CheckInRepo: Send + Sync {
    /// First check-in of `user_id` with `from <= created_at < to`.
    async fn find_check_in_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> StoreResult<Option<CheckIn>>;
    /// Fails with `UniqueViolation` if the user already has a check-in that UTC day.
    async fn insert_check_in(&self, check_in: NewCheckIn) -> StoreResult<CheckIn>;
    /// Newest first.
    async fn check_in_history(&self, user_id: Uuid) -> StoreResult<Vec<CheckInEntry>>;
}

#[async_trait]
impl CheckInRepo for PgStore {
    async fn find_check_in_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> StoreResult<Option<CheckIn>> {
        let row = sqlx::query_as::<_, CheckIn>(
            r#"
            SELECT id, user_id, workout_id, check_in_day, created_at
              FROM check_ins
             WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
             ORDER BY created_at ASC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert_check_in(&self, check_in: NewCheckIn) -> StoreResult<CheckIn> {
        let created_at = check_in.created_at.to_offset(time::UtcOffset::UTC);
        let row = sqlx::query_as::<_, CheckIn>(
            r#"
            INSERT INTO check_ins (id, user_id, workout_id, check_in_day, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, workout_id, check_in_day, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(check_in.user_id)
        .bind(check_in.workout_id)
        .bind(created_at.date())
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn check_in_history(&self, user_id: Uuid) -> StoreResult<Vec<CheckInEntry>> {
        let rows = sqlx::query_as::<_, CheckInEntry>(
            r#"
            SELECT c.id, c.user_id, c.workout_id, w.name AS workout_name, c.created_at
              FROM check_ins c
              LEFT JOIN workouts w ON w.id = c.workout_id
             WHERE c.user_id = $1
             ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
