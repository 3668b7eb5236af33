use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub student_id: Uuid,
    pub instructor_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: Uuid,
    pub workout_id: Uuid,
    /// Zero-based order inside the workout.
    pub position: i32,
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkoutWithExercises {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone)]
pub struct NewExercise {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub description: Option<String>,
    pub student_id: Uuid,
    pub instructor_id: Uuid,
    pub exercises: Vec<NewExercise>,
}
