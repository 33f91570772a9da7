//! Fixed seed data
//!
//! Used to populate a collection the first time it is accessed with no
//! persisted state, and as the source of the static rooms list and the
//! fixed admin profile. Values mirror the deployment at the facility.

use shared::models::{
    AuthCredential, DayOffRequest, Employee, Room, Shift, ShiftType, UserRole,
};

/// Fixed administrator account identifier
pub const ADMIN_ID: &str = "ADMIN-001";

fn employee(id: &str, name: &str, department: &str, position: &str, email: &str) -> Employee {
    Employee {
        id: id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        position: position.to_string(),
        email: email.to_string(),
        ..Default::default()
    }
}

/// The fixed admin profile returned for admin-role logins.
///
/// Admins are not part of the employee collection; their profile never
/// changes through the employee editor.
pub fn admin_profile() -> Employee {
    employee(
        ADMIN_ID,
        "Admin User",
        "Management",
        "Scheduler Admin",
        "admin@jiscare.com",
    )
}

pub fn employees() -> Vec<Employee> {
    vec![
        employee(
            "EMP-001",
            "Maria Santos",
            "Nursing",
            "Senior Nurse",
            "maria@jiscare.com",
        ),
        employee(
            "EMP-002",
            "Juan dela Cruz",
            "Therapy",
            "Physiotherapist",
            "juan@jiscare.com",
        ),
        employee(
            "EMP-003",
            "Ana Reyes",
            "Nursing",
            "Staff Nurse",
            "ana@jiscare.com",
        ),
        employee(
            "EMP-004",
            "Carlos Mendoza",
            "Admin",
            "Care Coordinator",
            "carlos@jiscare.com",
        ),
        employee(
            "EMP-005",
            "Rosa Bautista",
            "Therapy",
            "Occupational Therapist",
            "rosa@jiscare.com",
        ),
    ]
}

pub fn auth_entries() -> Vec<AuthCredential> {
    let mut entries: Vec<AuthCredential> = (1..=5)
        .map(|n| AuthCredential {
            id: format!("EMP-{n:03}"),
            password: format!("emp{n:03}"),
            role: UserRole::Employee,
        })
        .collect();
    entries.push(AuthCredential {
        id: ADMIN_ID.to_string(),
        password: "admin123".to_string(),
        role: UserRole::Admin,
    });
    entries
}

pub fn shifts() -> Vec<Shift> {
    vec![
        Shift::new("EMP-001", "2026-02-24", ShiftType::Morning, "ROOM-01"),
        Shift::new("EMP-002", "2026-02-24", ShiftType::Morning, "ROOM-02"),
        Shift::new("EMP-003", "2026-02-24", ShiftType::Afternoon, "ROOM-01"),
    ]
}

pub fn dayoffs() -> Vec<DayOffRequest> {
    Vec::new()
}

fn room(id: &str, name: &str, capacity: u32, location: &str) -> Room {
    Room {
        id: id.to_string(),
        name: name.to_string(),
        capacity,
        location: location.to_string(),
    }
}

/// Static room reference list
pub fn rooms() -> Vec<Room> {
    vec![
        room("ROOM-01", "Room 101 — General", 4, "Ground Floor"),
        room("ROOM-02", "Room 102 — ICU", 2, "Ground Floor"),
        room("ROOM-03", "Room 201 — Therapy", 3, "Second Floor"),
        room("ROOM-04", "Room 202 — Recovery", 4, "Second Floor"),
    ]
}
