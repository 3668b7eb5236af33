use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{AuthUser, Role},
    error::{AppError, AppResult},
    store::Store,
    workouts::{
        dto::CreateWorkoutRequest,
        repo_types::{NewExercise, NewWorkout, WorkoutWithExercises},
    },
};

fn validate(caller: &AuthUser, req: CreateWorkoutRequest) -> AppResult<NewWorkout> {
    let name = req.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::validation("Workout name is required"));
    }

    let mut exercises = Vec::with_capacity(req.exercises.len());
    for ex in req.exercises {
        let ex_name = ex.name.trim().to_string();
        if ex_name.is_empty() {
            return Err(AppError::validation("Exercise name is required"));
        }
        if ex.sets <= 0 || ex.reps <= 0 {
            return Err(AppError::validation("Sets and reps must be positive"));
        }
        exercises.push(NewExercise {
            name: ex_name,
            sets: ex.sets,
            reps: ex.reps,
            notes: ex.notes.filter(|n| !n.trim().is_empty()),
        });
    }

    let instructor_id = match caller.role {
        Role::Admin => req.instructor_id.unwrap_or(caller.id),
        _ => caller.id,
    };

    Ok(NewWorkout {
        name,
        description: req.description.filter(|d| !d.trim().is_empty()),
        student_id: req.student_id,
        instructor_id,
        exercises,
    })
}

pub async fn create_workout(
    store: &dyn Store,
    caller: &AuthUser,
    req: CreateWorkoutRequest,
) -> AppResult<WorkoutWithExercises> {
    let new = validate(caller, req)?;

    if store.find_user_by_id(new.student_id).await?.is_none() {
        return Err(AppError::not_found("Student not found"));
    }
    if new.instructor_id != caller.id && store.find_user_by_id(new.instructor_id).await?.is_none()
    {
        return Err(AppError::not_found("Instructor not found"));
    }

    let created = store.insert_workout(new).await?;
    info!(
        workout_id = %created.workout.id,
        student_id = %created.workout.student_id,
        exercises = created.exercises.len(),
        "workout created"
    );
    Ok(created)
}

pub async fn list_for_student(
    store: &dyn Store,
    student_id: Uuid,
) -> AppResult<Vec<WorkoutWithExercises>> {
    Ok(store.list_workouts_for_student(student_id).await?)
}

pub async fn delete_workout(store: &dyn Store, id: Uuid) -> AppResult<()> {
    if !store.delete_workout(id).await? {
        return Err(AppError::not_found("Workout not found"));
    }
    info!(workout_id = %id, "workout deleted");
    Ok(())
}
