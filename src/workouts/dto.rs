use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct ExerciseRequest {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub student_id: Uuid,
    /// Only honoured for admins; instructors always own what they create.
    #[serde(default)]
    pub instructor_id: Option<Uuid>,
    #[serde(default)]
    pub exercises: Vec<ExerciseRequest>,
}
