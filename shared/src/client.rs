//! Webhook DTOs shared between the client core and the workflow service
//!
//! Request/response types for the n8n-style webhook API. The validator
//! endpoints (`schedule-check`, `dayoff-submit`) share one response
//! envelope, [`CheckResponse`], which the local fallback checker also
//! produces so callers never branch on the verdict's source.

use serde::{Deserialize, Serialize};

use crate::models::{DayOffReason, ShiftType};

// =============================================================================
// Validator API DTOs
// =============================================================================

/// `schedule-check` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleCheckRequest {
    pub employee_id: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub shift_type: ShiftType,
    pub start_time: String,
    pub end_time: String,
    /// `None` for rest days
    pub room_id: Option<String>,
    pub notes: String,
}

/// `dayoff-submit` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayOffSubmitRequest {
    pub employee_id: String,
    pub employee_name: String,
    /// ISO `YYYY-MM-DD`
    pub request_date: String,
    pub reason: DayOffReason,
    pub notes: String,
}

/// Verdict status in a [`CheckResponse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "conflict")]
    Conflict,
    /// Transport-level failure surfaced to the view layer
    #[serde(rename = "error")]
    Error,
}

/// One detected rule violation
///
/// `rule` and `severity` stay free-form strings: the remote validator
/// evaluates rules the local fallback does not know about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub rule: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub detail: String,
}

/// Alternative room suggestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AltRoom {
    pub room_id: String,
    #[serde(default)]
    pub room_name: String,
}

/// Alternative date suggestion
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AltDate {
    /// ISO `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub weekday: String,
}

/// Alternatives block of a [`CheckResponse`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alternatives {
    #[serde(default)]
    pub rooms: Vec<AltRoom>,
    #[serde(default)]
    pub dates: Vec<AltDate>,
}

/// Data block of a [`CheckResponse`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckData {
    #[serde(default)]
    pub conflicts: Vec<ConflictRecord>,
    #[serde(default)]
    pub alternatives: Alternatives,
    /// `dayoff-submit` only: alternative date proposed by the validator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_date: Option<String>,
    /// `dayoff-submit` only: reasoning behind the automated verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_reasoning: Option<String>,
}

/// Validator response envelope, shared by remote verdicts and the local
/// fallback checker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    pub success: bool,
    pub status: CheckStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: CheckData,
}

impl CheckResponse {
    /// Envelope for a transport failure, shaped like a verdict so the view
    /// layer renders it with the same component.
    pub fn offline(message: impl Into<String>) -> Self {
        Self {
            success: false,
            status: CheckStatus::Error,
            message: message.into(),
            data: CheckData::default(),
        }
    }
}

// =============================================================================
// CRUD / notification API DTOs
// =============================================================================

/// Generic list envelope returned by the `get-*` endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Generic acknowledgement returned by the write endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// `delete-shift` request (compound key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteShiftRequest {
    pub employee_id: String,
    pub date: String,
}

/// `delete-employee` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteEmployeeRequest {
    pub employee_id: String,
}

/// One row of a weekly schedule email
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailShiftRow {
    /// Short weekday name ("Mon")
    pub day: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    /// Shift type name or "Not Scheduled"
    pub shift: String,
    /// "7:30 AM–12:30 PM", or "—" when unscheduled
    pub time: String,
    pub room: String,
}

/// `send-schedule-email` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEmailRequest {
    pub employee_id: String,
    pub employee_name: String,
    pub employee_email: String,
    pub week_label: String,
    pub shifts: Vec<EmailShiftRow>,
}
