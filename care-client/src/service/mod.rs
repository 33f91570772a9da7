//! Service layer: remote-first operations with explicit local fallback
//!
//! Every mutating flow attempts the workflow backend first and degrades
//! to the local store, marking records pending-sync when the remote write
//! failed so a later [`crate::remote::SyncGateway::flush_pending`] pass
//! can reconcile.

pub mod dayoff;
pub mod employees;
pub mod schedule;

pub use dayoff::{DayOffOutcome, DayOffService};
pub use employees::{EmployeeError, EmployeeService, NewEmployee};
pub use schedule::ScheduleService;
