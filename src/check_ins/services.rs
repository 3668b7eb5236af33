use time::{Date, OffsetDateTime, UtcOffset};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    check_ins::{
        eligibility::{check_eligibility, Ineligible},
        repo_types::{CheckIn, CheckInEntry, NewCheckIn},
    },
    dates::utc_day_range,
    error::{AppError, AppResult},
    store::{Store, StoreError},
};

const ALREADY_CHECKED_IN: &str = "You have already checked in today";

impl From<Ineligible> for AppError {
    fn from(reason: Ineligible) -> Self {
        match reason {
            Ineligible::NoActiveMembership => AppError::forbidden("Membership inactive or expired"),
            Ineligible::AlreadyCheckedIn => AppError::conflict(ALREADY_CHECKED_IN),
        }
    }
}

/// Forbidden without a current membership on `day`, Conflict after a check-in that day.
pub async fn can_check_in(store: &dyn Store, user_id: Uuid, day: Date) -> AppResult<()> {
    let enrollments = store.list_enrollments_for_user(user_id).await?;
    let (from, to) = utc_day_range(day);
    let existing = store.find_check_in_between(user_id, from, to).await?;

    check_eligibility(&enrollments, existing.as_ref(), day).map_err(|reason| {
        warn!(user_id = %user_id, %day, reason = ?reason, "check-in refused");
        AppError::from(reason)
    })
}

/// Appends a check-in stamped `now` once the eligibility gate passes.
pub async fn record_check_in(
    store: &dyn Store,
    user_id: Uuid,
    workout_id: Uuid,
    now: OffsetDateTime,
) -> AppResult<CheckIn> {
    if store.find_workout(workout_id).await?.is_none() {
        return Err(AppError::not_found("Workout not found"));
    }

    let now = now.to_offset(UtcOffset::UTC);
    can_check_in(store, user_id, now.date()).await?;

    // A concurrent request may have won the race since the read above.
    let check_in = store
        .insert_check_in(NewCheckIn {
            user_id,
            workout_id,
            created_at: now,
        })
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(_) => AppError::conflict(ALREADY_CHECKED_IN),
            other => other.into(),
        })?;

    info!(check_in_id = %check_in.id, user_id = %user_id, workout_id = %workout_id, "check-in recorded");
    Ok(check_in)
}

pub async fn history(store: &dyn Store, user_id: Uuid) -> AppResult<Vec<CheckInEntry>> {
    Ok(store.check_in_history(user_id).await?)
}
