//! Time, identifier and calendar-week utilities

use std::sync::OnceLock;

use chrono::{Datelike, Duration, NaiveDate};
use regex::Regex;

use crate::models::Employee;

/// Short weekday names, Sunday-indexed to match `Date.getDay()` on the
/// view side.
pub const DAYS_SHORT: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's date as ISO `YYYY-MM-DD`
pub fn today_iso() -> String {
    chrono::Local::now().date_naive().to_string()
}

/// Generate a time-based day-off request identifier: `DO-{n}`.
///
/// Layout of `n` (53 bits, fits in JavaScript's Number.MAX_SAFE_INTEGER
/// for the view layer):
///   - 41 bits: milliseconds since 2024-01-01 UTC (~69 years)
///   - 12 bits: random (4096 values per ms, collision-free at this scale)
pub fn dayoff_request_id() -> String {
    use rand::Rng;
    // Custom epoch: 2024-01-01 00:00:00 UTC
    const EPOCH_MS: i64 = 1_704_067_200_000;
    let ts = (now_millis() - EPOCH_MS) & 0x1FF_FFFF_FFFF; // 41 bits
    let rand_bits: i64 = rand::thread_rng().gen_range(0..0x1000); // 12 bits
    format!("DO-{}", (ts << 12) | rand_bits)
}

fn emp_id_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^EMP-(\d+)$").expect("static pattern"))
}

/// Next free employee identifier: `EMP-NNN` with NNN = max existing
/// numeric suffix + 1, zero-padded to 3 digits. `EMP-001` when no `EMP-*`
/// ids exist. Admin ids and malformed ids are ignored.
pub fn next_employee_id(employees: &[Employee]) -> String {
    let max = employees
        .iter()
        .filter_map(|e| emp_id_pattern().captures(&e.id))
        .filter_map(|c| c[1].parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("EMP-{:03}", max + 1)
}

/// Short weekday name for a date ("Mon")
pub fn short_weekday(date: NaiveDate) -> &'static str {
    DAYS_SHORT[date.weekday().num_days_from_sunday() as usize]
}

/// The Monday-through-Sunday week containing `reference`.
pub fn week_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let monday = reference - Duration::days(reference.weekday().num_days_from_monday() as i64);
    (0..7).map(|i| monday + Duration::days(i)).collect()
}

/// Human label for a week span: "Feb 23 – Mar 1, 2026"
pub fn week_label(dates: &[NaiveDate]) -> String {
    let (Some(start), Some(end)) = (dates.first(), dates.last()) else {
        return String::new();
    };
    format!(
        "{} – {}, {}",
        start.format("%b %-d"),
        end.format("%b %-d"),
        end.year()
    )
}

/// The day immediately before an ISO date, if both parse and represent.
pub fn day_before(iso: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    date.pred_opt().map(|d| d.to_string())
}

/// The day immediately after an ISO date, if both parse and represent.
pub fn day_after(iso: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()?;
    date.succ_opt().map(|d| d.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn emp(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_employee_id_increments_max_suffix() {
        let employees = vec![emp("EMP-001"), emp("EMP-003"), emp("EMP-002")];
        assert_eq!(next_employee_id(&employees), "EMP-004");
    }

    #[test]
    fn test_next_employee_id_empty_collection() {
        assert_eq!(next_employee_id(&[]), "EMP-001");
    }

    #[test]
    fn test_next_employee_id_ignores_admin_and_malformed() {
        let employees = vec![emp("ADMIN-001"), emp("EMP-007"), emp("EMP-X")];
        assert_eq!(next_employee_id(&employees), "EMP-008");
    }

    #[test]
    fn test_next_employee_id_pads_to_three_digits() {
        let employees = vec![emp("EMP-099")];
        assert_eq!(next_employee_id(&employees), "EMP-100");
        let employees = vec![emp("EMP-9")];
        assert_eq!(next_employee_id(&employees), "EMP-010");
    }

    #[test]
    fn test_week_dates_monday_start() {
        // 2026-03-11 is a Wednesday
        let wed = NaiveDate::from_ymd_opt(2026, 3, 11).unwrap();
        let week = week_dates(wed);
        assert_eq!(week.len(), 7);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2026, 3, 15).unwrap());
        assert_eq!(week[0].weekday(), Weekday::Mon);
    }

    #[test]
    fn test_week_dates_sunday_belongs_to_previous_week() {
        let sun = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        let week = week_dates(sun);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(week[6], sun);
    }

    #[test]
    fn test_week_label_format() {
        let week = week_dates(NaiveDate::from_ymd_opt(2026, 2, 24).unwrap());
        assert_eq!(week_label(&week), "Feb 23 – Mar 1, 2026");
    }

    #[test]
    fn test_day_before_and_after() {
        assert_eq!(day_before("2026-03-11").as_deref(), Some("2026-03-10"));
        assert_eq!(day_after("2026-03-11").as_deref(), Some("2026-03-12"));
        assert_eq!(day_before("2026-03-01").as_deref(), Some("2026-02-28"));
        assert!(day_before("not-a-date").is_none());
    }

    #[test]
    fn test_dayoff_request_id_shape() {
        let id = dayoff_request_id();
        assert!(id.starts_with("DO-"));
        assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    }
}
