//! Check-in gate: a user may check in on `day` only with a current membership
//! and no earlier check-in that day.

use time::Date;

use crate::{check_ins::repo_types::CheckIn, enrollments::repo_types::Enrollment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// No ACTIVE enrollment ending on or after the day.
    NoActiveMembership,
    /// Already checked in that day.
    AlreadyCheckedIn,
}

/// Membership is checked before the same-day rule, so an expired member who
/// already checked in still sees the membership failure.
pub fn check_eligibility(
    enrollments: &[Enrollment],
    existing_today: Option<&CheckIn>,
    day: Date,
) -> Result<(), Ineligible> {
    if !enrollments.iter().any(|e| e.is_current_on(day)) {
        return Err(Ineligible::NoActiveMembership);
    }
    if existing_today.is_some() {
        return Err(Ineligible::AlreadyCheckedIn);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrollments::repo_types::EnrollmentStatus;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn enrollment(status: EnrollmentStatus, end_date: Date) -> Enrollment {
        Enrollment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id: Uuid::new_v4(),
            plan_name: "Mensal".into(),
            start_date: date!(2024 - 01 - 01),
            end_date,
            status,
            created_at: datetime!(2024-01-01 8:00 UTC),
        }
    }

    fn check_in_on(day: Date) -> CheckIn {
        CheckIn {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            workout_id: Some(Uuid::new_v4()),
            check_in_day: day,
            created_at: day.midnight().assume_utc(),
        }
    }

    #[test]
    fn no_enrollment_is_ineligible() {
        assert_eq!(
            check_eligibility(&[], None, date!(2024 - 01 - 15)),
            Err(Ineligible::NoActiveMembership)
        );
    }

    #[test]
    fn expired_active_enrollment_is_ineligible() {
        let e = enrollment(EnrollmentStatus::Active, date!(2024 - 01 - 14));
        assert_eq!(
            check_eligibility(&[e], None, date!(2024 - 01 - 15)),
            Err(Ineligible::NoActiveMembership)
        );
    }

    #[test]
    fn end_date_is_inclusive() {
        let e = enrollment(EnrollmentStatus::Active, date!(2024 - 01 - 15));
        assert_eq!(check_eligibility(&[e], None, date!(2024 - 01 - 15)), Ok(()));
    }

    #[test]
    fn inactive_or_locked_enrollment_is_ineligible() {
        let enrollments = [
            enrollment(EnrollmentStatus::Inactive, date!(2024 - 12 - 31)),
            enrollment(EnrollmentStatus::Locked, date!(2024 - 12 - 31)),
        ];
        assert_eq!(
            check_eligibility(&enrollments, None, date!(2024 - 01 - 15)),
            Err(Ineligible::NoActiveMembership)
        );
    }

    #[test]
    fn any_current_enrollment_among_history_is_enough() {
        let enrollments = [
            enrollment(EnrollmentStatus::Active, date!(2023 - 06 - 30)),
            enrollment(EnrollmentStatus::Active, date!(2024 - 02 - 01)),
        ];
        assert_eq!(check_eligibility(&enrollments, None, date!(2024 - 01 - 15)), Ok(()));
    }

    #[test]
    fn second_check_in_same_day_is_ineligible() {
        let day = date!(2024 - 01 - 15);
        let e = enrollment(EnrollmentStatus::Active, date!(2024 - 02 - 01));
        let existing = check_in_on(day);
        assert_eq!(
            check_eligibility(&[e], Some(&existing), day),
            Err(Ineligible::AlreadyCheckedIn)
        );
    }

    #[test]
    fn membership_failure_wins_over_duplicate() {
        let day = date!(2024 - 01 - 15);
        let existing = check_in_on(day);
        assert_eq!(
            check_eligibility(&[], Some(&existing), day),
            Err(Ineligible::NoActiveMembership)
        );
    }
}
