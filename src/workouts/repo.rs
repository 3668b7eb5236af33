use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    store::{PgStore, StoreResult},
    workouts::repo_types::{Exercise, NewWorkout, Workout, WorkoutWithExercises},
};

#[async_trait]
pub trait WorkoutRepo: Send + Sync {
    /// Inserts the workout and its exercises atomically, keeping exercise order.
    async fn insert_workout(&self, workout: NewWorkout) -> StoreResult<WorkoutWithExercises>;
    async fn list_workouts_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<WorkoutWithExercises>>;
    async fn find_workout(&self, id: Uuid) -> StoreResult<Option<Workout>>;
    /// Exercises go with it; check-ins keep their row with the workout cleared.
    async fn delete_workout(&self, id: Uuid) -> StoreResult<bool>;
}

#[async_trait]
impl WorkoutRepo for PgStore {
    async fn insert_workout(&self, new: NewWorkout) -> StoreResult<WorkoutWithExercises> {
        let mut tx = self.pool.begin().await.context("begin tx")?;

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (id, name, description, student_id, instructor_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, description, student_id, instructor_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.student_id)
        .bind(new.instructor_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut exercises = Vec::with_capacity(new.exercises.len());
        for (position, ex) in new.exercises.into_iter().enumerate() {
            let row = sqlx::query_as::<_, Exercise>(
                r#"
                INSERT INTO exercises (id, workout_id, position, name, sets, reps, notes)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, workout_id, position, name, sets, reps, notes
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(workout.id)
            .bind(position as i32)
            .bind(&ex.name)
            .bind(ex.sets)
            .bind(ex.reps)
            .bind(&ex.notes)
            .fetch_one(&mut *tx)
            .await?;
            exercises.push(row);
        }

        tx.commit().await.context("commit tx")?;
        Ok(WorkoutWithExercises { workout, exercises })
    }

    async fn list_workouts_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<WorkoutWithExercises>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, student_id, instructor_id, created_at
              FROM workouts
             WHERE student_id = $1
             ORDER BY created_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
        let rows = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT id, workout_id, position, name, sets, reps, notes
              FROM exercises
             WHERE workout_id = ANY($1)
             ORDER BY workout_id, position ASC
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_workout: HashMap<Uuid, Vec<Exercise>> = HashMap::new();
        for ex in rows {
            by_workout.entry(ex.workout_id).or_default().push(ex);
        }

        Ok(workouts
            .into_iter()
            .map(|workout| {
                let exercises = by_workout.remove(&workout.id).unwrap_or_default();
                WorkoutWithExercises { workout, exercises }
            })
            .collect())
    }

    async fn find_workout(&self, id: Uuid) -> StoreResult<Option<Workout>> {
        let row = sqlx::query_as::<_, Workout>(
            r#"
            SELECT id, name, description, student_id, instructor_id, created_at
              FROM workouts
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_workout(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
