use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    store::{PgStore, StoreResult},
    users::repo_types::{MemberRow, UserUpdate},
};

#[async_trait]
pub trait DirectoryRepo: Send + Sync {
    /// All users ordered by name, with the plan of an enrollment current on `today`.
    async fn list_members(&self, today: Date) -> StoreResult<Vec<MemberRow>>;
    /// Leaves fields that are `None` untouched.
    async fn update_user(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>>;
}

#[async_trait]
impl DirectoryRepo for PgStore {
    async fn list_members(&self, today: Date) -> StoreResult<Vec<MemberRow>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT u.id, u.name, u.email, u.role, cur.plan_name
              FROM users u
              LEFT JOIN LATERAL (
                    SELECT p.name AS plan_name
                      FROM enrollments e
                      JOIN plans p ON p.id = e.plan_id
                     WHERE e.user_id = u.id
                       AND e.status = 'ACTIVE'
                       AND e.end_date >= $1
                     ORDER BY e.end_date DESC
                     LIMIT 1
              ) cur ON TRUE
             ORDER BY u.name ASC
            "#,
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = COALESCE($2, name),
                   role = COALESCE($3, role)
             WHERE id = $1
            RETURNING id, name, email, password_hash, role, created_at
            "#,
        )
        .bind(id)
        .bind(update.name)
        .bind(update.role)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
