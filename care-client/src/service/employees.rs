//! Employee administration

use chrono::NaiveDate;
use serde::Deserialize;
use shared::client::{EmailShiftRow, ScheduleEmailRequest};
use shared::models::{AuthCredential, Employee, UserRole};
use shared::util::{short_weekday, week_dates, week_label};
use thiserror::Error;
use validator::Validate;

use crate::core::password;
use crate::core::store::{LocalStore, StorageError};
use crate::remote::client::{WorkflowClient, WorkflowTransport};

#[derive(Debug, Error)]
pub enum EmployeeError {
    /// Required field missing or malformed (never sent to the backend)
    #[error("Validation failed")]
    Invalid(#[from] validator::ValidationErrors),

    #[error("Password too weak: {}", .0.join(", "))]
    WeakPassword(Vec<String>),

    #[error("No employee with id {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// New-employee form
///
/// Validated locally; validation errors surface as inline field errors
/// and never reach the backend.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Department is required"))]
    pub department: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub employment_type: String,
    #[serde(default)]
    pub hire_date: String,
    #[serde(default)]
    pub license_no: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub emergency_contact: String,
    #[serde(default)]
    pub blood_type: String,
    #[serde(default)]
    pub civil_status: String,
}

/// Employee CRUD with credential cascade and schedule mailing
pub struct EmployeeService<T: WorkflowTransport> {
    store: LocalStore,
    client: WorkflowClient<T>,
}

impl<T: WorkflowTransport> EmployeeService<T> {
    pub fn new(client: WorkflowClient<T>, store: LocalStore) -> Self {
        Self { store, client }
    }

    /// Create an employee with an auto-assigned `EMP-NNN` id and an
    /// employee-role credential; backend write is best-effort.
    pub async fn create(&self, form: NewEmployee, password: &str) -> Result<Employee, EmployeeError> {
        form.validate()?;

        let id = self.store.next_employee_id();
        let failed = password::failed_rules(password, &id);
        if !failed.is_empty() {
            return Err(EmployeeError::WeakPassword(
                failed.into_iter().map(String::from).collect(),
            ));
        }

        let employee = Employee {
            id: id.clone(),
            name: form.name,
            department: form.department,
            position: form.position,
            email: form.email,
            phone: form.phone,
            employment_type: form.employment_type,
            hire_date: form.hire_date,
            license_no: form.license_no,
            address: form.address,
            emergency_contact: form.emergency_contact,
            blood_type: form.blood_type,
            civil_status: form.civil_status,
        };

        self.store.save_employee(employee.clone())?;
        self.store.save_auth_entry(AuthCredential {
            id,
            password: password.to_string(),
            role: UserRole::Employee,
        })?;

        if let Err(e) = self.client.create_employee(&employee).await {
            tracing::warn!(id = %employee.id, "Employee not written to backend: {e}");
        }
        tracing::info!(id = %employee.id, "Employee created");
        Ok(employee)
    }

    /// Full-record update; backend write is best-effort (sheet upsert).
    pub async fn update(&self, employee: Employee) -> Result<(), EmployeeError> {
        self.store.save_employee(employee.clone())?;
        if let Err(e) = self.client.create_employee(&employee).await {
            tracing::warn!(id = %employee.id, "Employee update not written to backend: {e}");
        }
        Ok(())
    }

    /// Delete an employee, cascading to the matching credential and
    /// cached profile photo.
    pub async fn remove(&self, employee_id: &str) -> Result<(), EmployeeError> {
        self.store.delete_employee(employee_id)?;
        self.store.delete_auth_entry(employee_id)?;
        self.store.delete_photo(employee_id)?;
        if let Err(e) = self.client.delete_employee(employee_id).await {
            tracing::warn!(id = %employee_id, "Employee deletion not propagated to backend: {e}");
        }
        tracing::info!(id = %employee_id, "Employee deleted");
        Ok(())
    }

    /// Send one employee's week (Monday through Sunday around
    /// `week_ref`) by email. Returns false when the backend is down and
    /// the email stays queued.
    pub async fn email_week(
        &self,
        employee_id: &str,
        week_ref: NaiveDate,
    ) -> Result<bool, EmployeeError> {
        let employee = self
            .store
            .load_employees()
            .into_iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EmployeeError::NotFound(employee_id.to_string()))?;

        let dates = week_dates(week_ref);
        let shifts = self.store.load_shifts();
        let rows = dates
            .iter()
            .map(|d| {
                let iso = d.to_string();
                let shift = shifts
                    .iter()
                    .find(|s| s.employee_id == employee.id && s.date == iso);
                match shift {
                    Some(s) => EmailShiftRow {
                        day: short_weekday(*d).to_string(),
                        date: iso,
                        shift: s.shift_type.to_string(),
                        time: if s.start_time.is_empty() || s.end_time.is_empty() {
                            "—".to_string()
                        } else {
                            format!("{}–{}", s.start_time, s.end_time)
                        },
                        room: if s.room_id.is_empty() {
                            "—".to_string()
                        } else {
                            s.room_id.clone()
                        },
                    },
                    None => EmailShiftRow {
                        day: short_weekday(*d).to_string(),
                        date: iso,
                        shift: "Not Scheduled".to_string(),
                        time: "—".to_string(),
                        room: "—".to_string(),
                    },
                }
            })
            .collect();

        let request = ScheduleEmailRequest {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            employee_email: employee.email.clone(),
            week_label: week_label(&dates),
            shifts: rows,
        };

        match self.client.send_schedule_email(&request).await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!(id = %employee.id, "Schedule email queued, backend unreachable: {e}");
                Ok(false)
            }
        }
    }
}
