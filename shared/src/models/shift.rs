//! Shift Model

use serde::{Deserialize, Serialize};

use super::sync::SyncState;

/// Shift type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
    #[serde(rename = "OFF")]
    Off,
}

impl ShiftType {
    /// Whether this is a working shift (everything except a rest day)
    pub fn is_working(self) -> bool {
        self != Self::Off
    }

    /// Default display times for this shift type: `(start, end)`
    ///
    /// Rest days carry empty time strings.
    pub fn default_times(self) -> (&'static str, &'static str) {
        match self {
            Self::Morning => ("7:30 AM", "12:30 PM"),
            Self::Afternoon => ("12:30 PM", "5:30 PM"),
            Self::Night => ("9:00 PM", "6:00 AM"),
            Self::Off => ("", ""),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Night => "Night",
            Self::Off => "OFF",
        }
    }
}

impl std::fmt::Display for ShiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift record - one work assignment (or explicit rest day) for one
/// employee on one date
///
/// Compound key: (`employee_id`, `date`). The store's upsert keeps at most
/// one record per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    #[serde(rename = "Employee_ID")]
    pub employee_id: String,
    /// ISO `YYYY-MM-DD`
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Shift_Type")]
    pub shift_type: ShiftType,
    /// Display string, e.g. "7:30 AM"; empty for rest days
    #[serde(rename = "Start_Time", default)]
    pub start_time: String,
    #[serde(rename = "End_Time", default)]
    pub end_time: String,
    /// Empty for rest days
    #[serde(rename = "Room_ID", default)]
    pub room_id: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    /// Local-only flag: whether the remote write for this record succeeded
    #[serde(
        rename = "Sync_State",
        default,
        skip_serializing_if = "SyncState::is_synced"
    )]
    pub sync: SyncState,
}

impl Shift {
    /// Build a shift with the default times for its type, normalizing
    /// rest-day fields (empty times, no room).
    pub fn new(
        employee_id: impl Into<String>,
        date: impl Into<String>,
        shift_type: ShiftType,
        room_id: impl Into<String>,
    ) -> Self {
        let (start, end) = shift_type.default_times();
        Self {
            employee_id: employee_id.into(),
            date: date.into(),
            shift_type,
            start_time: start.to_string(),
            end_time: end.to_string(),
            room_id: if shift_type.is_working() {
                room_id.into()
            } else {
                String::new()
            },
            notes: String::new(),
            sync: SyncState::Synced,
        }
    }

    /// Clear time/room fields when the type is a rest day.
    ///
    /// The write boundary calls this so an OFF shift never keeps stale
    /// working-shift fields from an edited form.
    pub fn normalize(&mut self) {
        if !self.shift_type.is_working() {
            self.start_time.clear();
            self.end_time.clear();
            self.room_id.clear();
        }
    }
}
