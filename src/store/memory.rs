//! In-memory store for tests. Mirrors the constraints declared in the migrations.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::{Date, OffsetDateTime, UtcOffset};
use uuid::Uuid;

use super::{StoreError, StoreResult};
use crate::{
    auth::{
        password::hash_password,
        repo::UserRepo,
        repo_types::{NewUser, Role, User},
    },
    check_ins::{
        repo::CheckInRepo,
        repo_types::{CheckIn, CheckInEntry, NewCheckIn},
    },
    enrollments::{
        repo::EnrollmentRepo,
        repo_types::{Enrollment, EnrollmentStatus, NewEnrollment},
    },
    plans::{
        repo::PlanRepo,
        repo_types::{Plan, PlanInput},
    },
    users::{
        repo::DirectoryRepo,
        repo_types::{MemberRow, UserUpdate},
    },
    workouts::{
        repo::WorkoutRepo,
        repo_types::{Exercise, NewWorkout, Workout, WorkoutWithExercises},
    },
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    plans: Vec<Plan>,
    enrollments: Vec<Enrollment>,
    workouts: Vec<Workout>,
    exercises: Vec<Exercise>,
    check_ins: Vec<CheckIn>,
}

impl Tables {
    fn plan_name(&self, plan_id: Uuid) -> String {
        self.plans
            .iter()
            .find(|p| p.id == plan_id)
            .map(|p| p.name.clone())
            .unwrap_or_default()
    }

    fn with_plan_name(&self, mut e: Enrollment) -> Enrollment {
        e.plan_name = self.plan_name(e.plan_id);
        e
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }
}

/// Inserts a user whose password is "segredo1" and whose name is the email's local part.
pub async fn seed_user(store: &MemoryStore, email: &str, role: Role) -> User {
    let name = email.split('@').next().unwrap_or(email).to_string();
    store
        .insert_user(NewUser {
            name,
            email: email.to_string(),
            password_hash: hash_password("segredo1").expect("hash"),
            role,
        })
        .await
        .expect("seed user")
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        let mut t = self.tables();
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("email"));
        }
        let row = User {
            id: Uuid::new_v4(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(row.clone());
        Ok(row)
    }
}

#[async_trait]
impl DirectoryRepo for MemoryStore {
    async fn list_members(&self, today: Date) -> StoreResult<Vec<MemberRow>> {
        let t = self.tables();
        let mut rows: Vec<MemberRow> = t
            .users
            .iter()
            .map(|u| {
                let plan_name = t
                    .enrollments
                    .iter()
                    .filter(|e| e.user_id == u.id && e.is_current_on(today))
                    .max_by_key(|e| e.end_date)
                    .map(|e| t.plan_name(e.plan_id));
                MemberRow {
                    id: u.id,
                    name: u.name.clone(),
                    email: u.email.clone(),
                    role: u.role,
                    plan_name,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn update_user(&self, id: Uuid, update: UserUpdate) -> StoreResult<Option<User>> {
        let mut t = self.tables();
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl PlanRepo for MemoryStore {
    async fn insert_plan(&self, plan: PlanInput) -> StoreResult<Plan> {
        let row = Plan {
            id: Uuid::new_v4(),
            name: plan.name,
            price: plan.price,
            duration_months: plan.duration_months,
            created_at: OffsetDateTime::now_utc(),
        };
        self.tables().plans.push(row.clone());
        Ok(row)
    }

    async fn list_plans(&self) -> StoreResult<Vec<Plan>> {
        let mut plans = self.tables().plans.clone();
        plans.sort_by(|a, b| a.price.total_cmp(&b.price).then_with(|| a.name.cmp(&b.name)));
        Ok(plans)
    }

    async fn find_plan(&self, id: Uuid) -> StoreResult<Option<Plan>> {
        Ok(self.tables().plans.iter().find(|p| p.id == id).cloned())
    }

    async fn update_plan(&self, id: Uuid, plan: PlanInput) -> StoreResult<Option<Plan>> {
        let mut t = self.tables();
        let Some(row) = t.plans.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        row.name = plan.name;
        row.price = plan.price;
        row.duration_months = plan.duration_months;
        Ok(Some(row.clone()))
    }

    async fn delete_plan(&self, id: Uuid) -> StoreResult<bool> {
        let mut t = self.tables();
        if t.enrollments.iter().any(|e| e.plan_id == id) {
            return Err(StoreError::ForeignKeyViolation("plan"));
        }
        let before = t.plans.len();
        t.plans.retain(|p| p.id != id);
        Ok(t.plans.len() < before)
    }
}

#[async_trait]
impl EnrollmentRepo for MemoryStore {
    async fn insert_enrollment(&self, enrollment: NewEnrollment) -> StoreResult<Enrollment> {
        let mut t = self.tables();
        if !t.plans.iter().any(|p| p.id == enrollment.plan_id) {
            return Err(StoreError::ForeignKeyViolation("plan"));
        }
        if !t.users.iter().any(|u| u.id == enrollment.user_id) {
            return Err(StoreError::ForeignKeyViolation("user"));
        }
        let row = Enrollment {
            id: Uuid::new_v4(),
            user_id: enrollment.user_id,
            plan_id: enrollment.plan_id,
            plan_name: t.plan_name(enrollment.plan_id),
            start_date: enrollment.start_date,
            end_date: enrollment.end_date,
            status: EnrollmentStatus::Active,
            created_at: OffsetDateTime::now_utc(),
        };
        t.enrollments.push(row.clone());
        Ok(row)
    }

    async fn list_enrollments_for_user(&self, user_id: Uuid) -> StoreResult<Vec<Enrollment>> {
        let t = self.tables();
        let mut rows: Vec<Enrollment> = t
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .map(|e| t.with_plan_name(e.clone()))
            .collect();
        rows.sort_by(|a, b| {
            b.start_date
                .cmp(&a.start_date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(rows)
    }

    async fn set_enrollment_status(
        &self,
        id: Uuid,
        status: EnrollmentStatus,
    ) -> StoreResult<Option<Enrollment>> {
        let mut t = self.tables();
        let Some(row) = t.enrollments.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        row.status = status;
        let row = row.clone();
        Ok(Some(t.with_plan_name(row)))
    }
}

#[async_trait]
impl WorkoutRepo for MemoryStore {
    async fn insert_workout(&self, new: NewWorkout) -> StoreResult<WorkoutWithExercises> {
        let mut t = self.tables();
        if !t.users.iter().any(|u| u.id == new.student_id) {
            return Err(StoreError::ForeignKeyViolation("user"));
        }
        let workout = Workout {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            student_id: new.student_id,
            instructor_id: new.instructor_id,
            created_at: OffsetDateTime::now_utc(),
        };
        let exercises: Vec<Exercise> = new
            .exercises
            .into_iter()
            .enumerate()
            .map(|(position, ex)| Exercise {
                id: Uuid::new_v4(),
                workout_id: workout.id,
                position: position as i32,
                name: ex.name,
                sets: ex.sets,
                reps: ex.reps,
                notes: ex.notes,
            })
            .collect();
        t.workouts.push(workout.clone());
        t.exercises.extend(exercises.iter().cloned());
        Ok(WorkoutWithExercises { workout, exercises })
    }

    async fn list_workouts_for_student(
        &self,
        student_id: Uuid,
    ) -> StoreResult<Vec<WorkoutWithExercises>> {
        let t = self.tables();
        let mut rows: Vec<WorkoutWithExercises> = t
            .workouts
            .iter()
            .filter(|w| w.student_id == student_id)
            .map(|w| {
                let mut exercises: Vec<Exercise> = t
                    .exercises
                    .iter()
                    .filter(|e| e.workout_id == w.id)
                    .cloned()
                    .collect();
                exercises.sort_by_key(|e| e.position);
                WorkoutWithExercises { workout: w.clone(), exercises }
            })
            .collect();
        rows.sort_by(|a, b| b.workout.created_at.cmp(&a.workout.created_at));
        Ok(rows)
    }

    async fn find_workout(&self, id: Uuid) -> StoreResult<Option<Workout>> {
        Ok(self.tables().workouts.iter().find(|w| w.id == id).cloned())
    }

    async fn delete_workout(&self, id: Uuid) -> StoreResult<bool> {
        let mut t = self.tables();
        let before = t.workouts.len();
        t.workouts.retain(|w| w.id != id);
        if t.workouts.len() == before {
            return Ok(false);
        }
        t.exercises.retain(|e| e.workout_id != id);
        for c in t.check_ins.iter_mut().filter(|c| c.workout_id == Some(id)) {
            c.workout_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl CheckInRepo for MemoryStore {
    async fn find_check_in_between(
        &self,
        user_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> StoreResult<Option<CheckIn>> {
        Ok(self
            .tables()
            .check_ins
            .iter()
            .filter(|c| c.user_id == user_id && c.created_at >= from && c.created_at < to)
            .min_by_key(|c| c.created_at)
            .cloned())
    }

    async fn insert_check_in(&self, check_in: NewCheckIn) -> StoreResult<CheckIn> {
        let mut t = self.tables();
        let created_at = check_in.created_at.to_offset(UtcOffset::UTC);
        let day = created_at.date();
        if t
            .check_ins
            .iter()
            .any(|c| c.user_id == check_in.user_id && c.check_in_day == day)
        {
            return Err(StoreError::UniqueViolation("check-in for this day"));
        }
        let row = CheckIn {
            id: Uuid::new_v4(),
            user_id: check_in.user_id,
            workout_id: Some(check_in.workout_id),
            check_in_day: day,
            created_at,
        };
        t.check_ins.push(row.clone());
        Ok(row)
    }

    async fn check_in_history(&self, user_id: Uuid) -> StoreResult<Vec<CheckInEntry>> {
        let t = self.tables();
        let mut rows: Vec<CheckInEntry> = t
            .check_ins
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| CheckInEntry {
                id: c.id,
                user_id: c.user_id,
                workout_id: c.workout_id,
                workout_name: c
                    .workout_id
                    .and_then(|wid| t.workouts.iter().find(|w| w.id == wid))
                    .map(|w| w.name.clone()),
                created_at: c.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[tokio::test]
    async fn unique_day_constraint_survives_the_read_check() {
        let store = MemoryStore::default();
        let user = seed_user(&store, "aluno@fitup.com", Role::Student).await;
        let first = NewCheckIn {
            user_id: user.id,
            workout_id: Uuid::new_v4(),
            created_at: datetime!(2024-03-01 6:00 UTC),
        };
        let second = NewCheckIn {
            created_at: datetime!(2024-03-01 21:00 UTC),
            ..first.clone()
        };
        store.insert_check_in(first).await.unwrap();
        assert!(matches!(
            store.insert_check_in(second).await,
            Err(StoreError::UniqueViolation(_))
        ));
    }

    #[tokio::test]
    async fn deleting_a_workout_keeps_check_ins() {
        let store = MemoryStore::default();
        let user = seed_user(&store, "aluno@fitup.com", Role::Student).await;
        let w = store
            .insert_workout(NewWorkout {
                name: "Treino B".into(),
                description: None,
                student_id: user.id,
                instructor_id: user.id,
                exercises: vec![],
            })
            .await
            .unwrap();
        store
            .insert_check_in(NewCheckIn {
                user_id: user.id,
                workout_id: w.workout.id,
                created_at: datetime!(2024-03-01 6:00 UTC),
            })
            .await
            .unwrap();

        assert!(store.delete_workout(w.workout.id).await.unwrap());
        let history = store.check_in_history(user.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].workout_id, None);
        assert_eq!(history[0].workout_name, None);
    }
}
