//! Shared types for the JISCare portal
//!
//! Domain models, webhook DTOs and small utilities used by the client core
//! and any embedding app shell. Wire field names follow the Google-Sheets
//! column names of the workflow backend, so payloads stay byte-compatible.

pub mod client;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
