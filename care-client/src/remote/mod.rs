//! Remote side: webhook client and the bootstrap/reconciliation gateway

pub mod client;
pub mod sync;

pub use client::{HttpTransport, WorkflowClient, WorkflowTransport};
pub use sync::{BootstrapReport, FlushReport, SyncGateway};
