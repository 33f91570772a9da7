//! User Session Model

use serde::{Deserialize, Serialize};

use super::employee::{Employee, UserRole};

/// Authenticated user session
///
/// Built by the session manager from a credential joined against the
/// employee collection; the persisted shape (lowercase keys, `dept`) is
/// what the view layer reads, so it stays as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    #[serde(rename = "dept", default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Build a session for the given role from an employee profile.
    pub fn from_profile(employee: &Employee, role: UserRole) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            role,
            department: employee.department.clone(),
            position: employee.position.clone(),
            email: employee.email.clone(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
