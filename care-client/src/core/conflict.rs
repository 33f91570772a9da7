//! Local fallback conflict checker
//!
//! Approximates the remote validator's verdict when the workflow service
//! is unreachable, so scheduling is never fully blocked offline. The
//! outcome uses the same envelope as a remote verdict; callers never
//! branch on the source.
//!
//! Covered rules (the remote validator evaluates more):
//! 1. Employee Double-Booking
//! 2. Room Double-Booking
//! 3. Consecutive Rest Days (±1 day around the candidate only; the
//!    narrow window is deliberate, not a bug)

use shared::client::{CheckData, CheckResponse, CheckStatus, ConflictRecord, ScheduleCheckRequest};
use shared::models::{Shift, ShiftType};
use shared::util::{day_after, day_before};

pub const RULE_EMPLOYEE_DOUBLE_BOOKING: &str = "Employee Double-Booking";
pub const RULE_ROOM_DOUBLE_BOOKING: &str = "Room Double-Booking";
pub const RULE_CONSECUTIVE_REST_DAYS: &str = "Consecutive Rest Days";

const SEVERITY_CRITICAL: &str = "Critical";

/// Candidate assignment to validate
#[derive(Debug, Clone)]
pub struct ShiftCandidate {
    pub employee_id: String,
    /// Display name used in conflict messages
    pub employee_name: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub shift_type: ShiftType,
    /// `None` for rest days
    pub room_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,
}

impl ShiftCandidate {
    /// Candidate working (or rest) shift with the default times for its
    /// type.
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        date: impl Into<String>,
        shift_type: ShiftType,
        room_id: Option<String>,
    ) -> Self {
        let (start, end) = shift_type.default_times();
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            date: date.into(),
            shift_type,
            room_id: if shift_type.is_working() { room_id } else { None },
            start_time: start.to_string(),
            end_time: end.to_string(),
            notes: String::new(),
        }
    }

    /// Candidate day off (used when validating day-off requests locally).
    pub fn day_off(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(employee_id, employee_name, date, ShiftType::Off, None)
    }

    /// The matching `schedule-check` request body.
    pub fn to_check_request(&self) -> ScheduleCheckRequest {
        ScheduleCheckRequest {
            employee_id: self.employee_id.clone(),
            date: self.date.clone(),
            shift_type: self.shift_type,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            room_id: self.room_id.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Evaluate the candidate against the current shift collection.
pub fn check_local(candidate: &ShiftCandidate, shifts: &[Shift]) -> CheckResponse {
    let mut conflicts = Vec::new();

    if candidate.shift_type.is_working() {
        let double_booked = shifts.iter().any(|s| {
            s.employee_id == candidate.employee_id
                && s.date == candidate.date
                && s.shift_type.is_working()
        });
        if double_booked {
            conflicts.push(ConflictRecord {
                rule: RULE_EMPLOYEE_DOUBLE_BOOKING.to_string(),
                severity: SEVERITY_CRITICAL.to_string(),
                detail: format!(
                    "{} already has a shift on this date.",
                    candidate.employee_name
                ),
            });
        }

        if let Some(room_id) = candidate.room_id.as_deref() {
            let room_taken = shifts
                .iter()
                .any(|s| s.room_id == room_id && s.date == candidate.date && s.shift_type.is_working());
            if room_taken {
                conflicts.push(ConflictRecord {
                    rule: RULE_ROOM_DOUBLE_BOOKING.to_string(),
                    severity: SEVERITY_CRITICAL.to_string(),
                    detail: "Room is already booked on this date.".to_string(),
                });
            }
        }
    } else {
        // Day before takes precedence; the day after is only consulted
        // when the day before is free.
        let has_off_on = |date: &str| {
            shifts.iter().any(|s| {
                s.employee_id == candidate.employee_id
                    && s.date == date
                    && s.shift_type == ShiftType::Off
            })
        };
        let neighbor = day_before(&candidate.date)
            .filter(|d| has_off_on(d))
            .or_else(|| day_after(&candidate.date).filter(|d| has_off_on(d)));
        if let Some(date) = neighbor {
            conflicts.push(ConflictRecord {
                rule: RULE_CONSECUTIVE_REST_DAYS.to_string(),
                severity: SEVERITY_CRITICAL.to_string(),
                detail: format!(
                    "{} already has a rest day on {}.",
                    candidate.employee_name, date
                ),
            });
        }
    }

    let success = conflicts.is_empty();
    CheckResponse {
        success,
        status: if success {
            CheckStatus::Clear
        } else {
            CheckStatus::Conflict
        },
        message: if success {
            format!(
                "Schedule looks clear for {}! No conflicts found.",
                candidate.employee_name
            )
        } else {
            format!("Conflicts detected for {}.", candidate.employee_name)
        },
        data: CheckData {
            conflicts,
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shift(employee_id: &str, date: &str, shift_type: ShiftType, room: &str) -> Shift {
        Shift::new(employee_id, date, shift_type, room)
    }

    #[test]
    fn test_employee_double_booking() {
        let shifts = vec![shift("EMP-001", "2026-03-02", ShiftType::Morning, "ROOM-01")];
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-02",
            ShiftType::Afternoon,
            Some("ROOM-03".to_string()),
        );

        let outcome = check_local(&candidate, &shifts);
        assert!(!outcome.success);
        assert_eq!(outcome.status, CheckStatus::Conflict);
        assert_eq!(outcome.data.conflicts.len(), 1);
        assert_eq!(outcome.data.conflicts[0].rule, RULE_EMPLOYEE_DOUBLE_BOOKING);
        assert_eq!(outcome.data.conflicts[0].severity, "Critical");
        assert!(outcome.data.conflicts[0].detail.contains("Maria Santos"));
    }

    #[test]
    fn test_room_double_booking() {
        let shifts = vec![shift("EMP-002", "2026-03-02", ShiftType::Morning, "ROOM-01")];
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-02",
            ShiftType::Morning,
            Some("ROOM-01".to_string()),
        );

        let outcome = check_local(&candidate, &shifts);
        assert!(!outcome.success);
        assert_eq!(outcome.data.conflicts.len(), 1);
        assert_eq!(outcome.data.conflicts[0].rule, RULE_ROOM_DOUBLE_BOOKING);
    }

    #[test]
    fn test_both_working_rules_can_fire_together() {
        let shifts = vec![
            shift("EMP-001", "2026-03-02", ShiftType::Morning, "ROOM-02"),
            shift("EMP-002", "2026-03-02", ShiftType::Morning, "ROOM-01"),
        ];
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-02",
            ShiftType::Afternoon,
            Some("ROOM-01".to_string()),
        );

        let outcome = check_local(&candidate, &shifts);
        let rules: Vec<&str> = outcome
            .data
            .conflicts
            .iter()
            .map(|c| c.rule.as_str())
            .collect();
        assert_eq!(
            rules,
            vec![RULE_EMPLOYEE_DOUBLE_BOOKING, RULE_ROOM_DOUBLE_BOOKING]
        );
    }

    #[test]
    fn test_existing_rest_day_does_not_double_book() {
        // An OFF entry on the same date is not a working shift
        let shifts = vec![shift("EMP-001", "2026-03-02", ShiftType::Off, "")];
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-02",
            ShiftType::Morning,
            Some("ROOM-01".to_string()),
        );

        assert!(check_local(&candidate, &shifts).success);
    }

    #[test]
    fn test_consecutive_rest_day_before() {
        let shifts = vec![shift("EMP-001", "2026-03-10", ShiftType::Off, "")];
        let candidate = ShiftCandidate::day_off("EMP-001", "Maria Santos", "2026-03-11");

        let outcome = check_local(&candidate, &shifts);
        assert!(!outcome.success);
        assert_eq!(outcome.data.conflicts.len(), 1);
        assert_eq!(outcome.data.conflicts[0].rule, RULE_CONSECUTIVE_REST_DAYS);
        assert!(outcome.data.conflicts[0].detail.contains("2026-03-10"));
    }

    #[test]
    fn test_consecutive_rest_day_after() {
        // No OFF on 2026-03-08, so the day-after check finds 2026-03-10
        let shifts = vec![shift("EMP-001", "2026-03-10", ShiftType::Off, "")];
        let candidate = ShiftCandidate::day_off("EMP-001", "Maria Santos", "2026-03-09");

        let outcome = check_local(&candidate, &shifts);
        assert!(!outcome.success);
        assert!(outcome.data.conflicts[0].detail.contains("2026-03-10"));
    }

    #[test]
    fn test_rest_day_before_wins_over_day_after() {
        let shifts = vec![
            shift("EMP-001", "2026-03-10", ShiftType::Off, ""),
            shift("EMP-001", "2026-03-12", ShiftType::Off, ""),
        ];
        let candidate = ShiftCandidate::day_off("EMP-001", "Maria Santos", "2026-03-11");

        let outcome = check_local(&candidate, &shifts);
        // First match wins: exactly one conflict, citing the day before
        assert_eq!(outcome.data.conflicts.len(), 1);
        assert!(outcome.data.conflicts[0].detail.contains("2026-03-10"));
    }

    #[test]
    fn test_rest_day_ignores_other_employees() {
        let shifts = vec![shift("EMP-002", "2026-03-10", ShiftType::Off, "")];
        let candidate = ShiftCandidate::day_off("EMP-001", "Maria Santos", "2026-03-11");

        assert!(check_local(&candidate, &shifts).success);
    }

    #[test]
    fn test_clear_schedule() {
        let shifts = vec![shift("EMP-002", "2026-03-02", ShiftType::Morning, "ROOM-02")];
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-02",
            ShiftType::Morning,
            Some("ROOM-01".to_string()),
        );

        let outcome = check_local(&candidate, &shifts);
        assert!(outcome.success);
        assert_eq!(outcome.status, CheckStatus::Clear);
        assert!(outcome.data.conflicts.is_empty());
        assert_eq!(
            outcome.message,
            "Schedule looks clear for Maria Santos! No conflicts found."
        );
    }

    #[test]
    fn test_unparseable_date_skips_rest_day_rule() {
        let shifts = vec![shift("EMP-001", "2026-03-10", ShiftType::Off, "")];
        let candidate = ShiftCandidate::day_off("EMP-001", "Maria Santos", "not-a-date");

        assert!(check_local(&candidate, &shifts).success);
    }
}
