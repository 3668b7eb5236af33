use thiserror::Error;

use crate::{
    auth::repo::UserRepo, check_ins::repo::CheckInRepo, enrollments::repo::EnrollmentRepo,
    plans::repo::PlanRepo, users::repo::DirectoryRepo, workouts::repo::WorkoutRepo,
};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated on {0}")]
    UniqueViolation(&'static str),
    #[error("{0} is still referenced")]
    ForeignKeyViolation(&'static str),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Everything the handlers need from persistence.
pub trait Store:
    UserRepo + DirectoryRepo + PlanRepo + EnrollmentRepo + WorkoutRepo + CheckInRepo
{
}

impl<T> Store for T where
    T: UserRepo + DirectoryRepo + PlanRepo + EnrollmentRepo + WorkoutRepo + CheckInRepo
{
}
