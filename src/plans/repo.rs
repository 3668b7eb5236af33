use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    plans::repo_types::{Plan, PlanInput},
    store::{PgStore, StoreResult},
};

#[async_trait]
pub trait PlanRepo: Send + Sync {
    async fn insert_plan(&self, plan: PlanInput) -> StoreResult<Plan>;
    async fn list_plans(&self) -> StoreResult<Vec<Plan>>;
    async fn find_plan(&self, id: Uuid) -> StoreResult<Option<Plan>>;
    async fn update_plan(&self, id: Uuid, plan: PlanInput) -> StoreResult<Option<Plan>>;
    /// Returns false when no such plan exists; `ForeignKeyViolation` while enrollments use it.
    async fn delete_plan(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
impl PlanRepo for PgStore {
    async fn insert_plan(&self, plan: PlanInput) -> StoreResult<Plan> {
        let row = sqlx::query_as::<_, Plan>(
            r#"
            INSERT INTO plans (id, name, price, duration_months)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, price, duration_months, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.duration_months)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_plans(&self) -> StoreResult<Vec<Plan>> {
        let rows = sqlx::query_as::<_, Plan>(
            r#"
            SELECT id, name, price, duration_months, created_at
            FROM plans
            ORDER BY price ASC, name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_plan(&self, id: Uuid) -> StoreResult<Option<Plan>> {
        let row = sqlx::query_as::<_, Plan>(
            r#"
            SELECT id, name, price, duration_months, created_at
            FROM plans
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_plan(&self, id: Uuid, plan: PlanInput) -> StoreResult<Option<Plan>> {
        let row = sqlx::query_as::<_, Plan>(
            r#"
            UPDATE plans
               SET name = $2, price = $3, duration_months = $4
             WHERE id = $1
            RETURNING id, name, price, duration_months, created_at
            "#,
        )
        .bind(id)
        .bind(&plan.name)
        .bind(plan.price)
        .bind(plan.duration_months)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_plan(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query("DELETE FROM plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
