//! JISCare client core
//!
//! The non-view core of the JISCare scheduling portal: a durable local
//! cache over redb, a session manager, a best-effort sync gateway against
//! the n8n workflow backend, and a local fallback conflict checker for
//! when that backend is unreachable.
//!
//! The rendering layer talks to this crate through [`Portal`], which wires
//! the pieces together, or through the individual modules when it needs
//! finer control.

pub mod config;
pub mod core;
pub mod error;
pub mod portal;
pub mod remote;
pub mod service;

// Re-exports
pub use config::PortalConfig;
pub use error::{ClientError, ClientResult};
pub use portal::{Portal, PortalError};
