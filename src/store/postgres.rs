use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::StoreError;

/// PostgreSQL-backed store; each domain's `repo.rs` implements its trait on it.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation(constraint_subject(db.constraint()));
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint_subject(db.constraint()));
            }
        }
        StoreError::Backend(e.into())
    }
}

/// Maps constraint names from the migrations to what the client sees.
fn constraint_subject(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("users_email_key") => "email",
        Some("check_ins_user_day_key") => "check-in for this day",
        Some("enrollments_plan_id_fkey") => "plan",
        Some("enrollments_user_id_fkey") => "user",
        Some(c) if c.starts_with("workouts_") => "workout",
        _ => "record",
    }
}
