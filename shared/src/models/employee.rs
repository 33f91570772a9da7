//! Employee Model

use serde::{Deserialize, Serialize};

/// Employee master record
///
/// Only the identifier is guaranteed to be present in cached data; every
/// other column may be missing from rows written by an older schema and
/// deserializes to its default instead of erroring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier, `EMP-NNN` or `ADMIN-NNN`
    #[serde(rename = "Employee_ID")]
    pub id: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Department", default)]
    pub department: String,
    #[serde(rename = "Position", default)]
    pub position: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    /// Employment type (e.g. "Full-time", "Part-time")
    #[serde(rename = "Employment_Type", default)]
    pub employment_type: String,
    /// Hire date, ISO `YYYY-MM-DD`
    #[serde(rename = "Hire_Date", default)]
    pub hire_date: String,
    /// Professional license number, empty for unlicensed staff
    #[serde(rename = "License_No", default)]
    pub license_no: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "Emergency_Contact", default)]
    pub emergency_contact: String,
    #[serde(rename = "Blood_Type", default)]
    pub blood_type: String,
    #[serde(rename = "Civil_Status", default)]
    pub civil_status: String,
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "employee")]
    Employee,
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Employee
    }
}

/// Login credential entry
///
/// The password is stored and compared in plaintext. This is a known,
/// deliberate weakness; see DESIGN.md before reusing this type anywhere
/// near production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthCredential {
    /// Matches an [`Employee::id`] or the fixed admin identifier
    pub id: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}
