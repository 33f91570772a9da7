//! Day-Off Request Model

use serde::{Deserialize, Serialize};

use super::sync::SyncState;

/// Review status of a day-off request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOffStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for DayOffStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Reason for a day-off request (fixed list from the request form)
///
/// Stale cached rows may carry free-text reasons from an older schema;
/// anything outside the list folds to `Other` instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOffReason {
    #[serde(rename = "Medical appointment")]
    MedicalAppointment,
    #[serde(rename = "Family event")]
    FamilyEvent,
    #[serde(rename = "Personal errand")]
    PersonalErrand,
    #[serde(rename = "Rest & recovery")]
    RestAndRecovery,
    #[serde(rename = "Emergency")]
    Emergency,
    #[serde(rename = "Other", other)]
    Other,
}

impl Default for DayOffReason {
    fn default() -> Self {
        Self::Other
    }
}

impl DayOffReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MedicalAppointment => "Medical appointment",
            Self::FamilyEvent => "Family event",
            Self::PersonalErrand => "Personal errand",
            Self::RestAndRecovery => "Rest & recovery",
            Self::Emergency => "Emergency",
            Self::Other => "Other",
        }
    }
}

/// Day-off request record
///
/// Created by employee or admin submission; mutated only via status
/// update; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOffRequest {
    /// Generated, time-based: `DO-{unix-millis}`
    pub id: String,
    #[serde(rename = "Employee_ID")]
    pub employee_id: String,
    #[serde(rename = "Employee_Name", default)]
    pub employee_name: String,
    /// Requested date, ISO `YYYY-MM-DD`
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Status", default)]
    pub status: DayOffStatus,
    #[serde(rename = "Reason", default)]
    pub reason: DayOffReason,
    #[serde(rename = "Notes", default)]
    pub notes: String,
    /// Submission date, ISO `YYYY-MM-DD`
    #[serde(rename = "Requested_On", default)]
    pub requested_on: String,
    /// Populated by automated or manual review
    #[serde(rename = "Manager_Note", default)]
    pub manager_note: String,
    /// Local-only flag: whether the remote write for this record succeeded
    #[serde(
        rename = "Sync_State",
        default,
        skip_serializing_if = "SyncState::is_synced"
    )]
    pub sync: SyncState,
}
