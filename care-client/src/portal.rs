//! Portal facade - wires the store, sessions, gateway and services
//!
//! The embedding app shell constructs one [`Portal`] at startup, runs
//! `sync().bootstrap()` once, then hands the pieces to the view layer.

use thiserror::Error;

use crate::config::PortalConfig;
use crate::core::paths::PortalPaths;
use crate::core::session::SessionManager;
use crate::core::store::{LocalStore, StorageError};
use crate::error::ClientError;
use crate::remote::client::{HttpTransport, WorkflowClient, WorkflowTransport};
use crate::remote::sync::SyncGateway;
use crate::service::dayoff::DayOffService;
use crate::service::employees::EmployeeService;
use crate::service::schedule::ScheduleService;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),
}

/// Assembled portal core
pub struct Portal<T: WorkflowTransport + Clone = HttpTransport> {
    store: LocalStore,
    sessions: SessionManager,
    sync: SyncGateway<T>,
    schedule: ScheduleService<T>,
    dayoffs: DayOffService<T>,
    employees: EmployeeService<T>,
}

impl Portal<HttpTransport> {
    /// Open (or create) the local cache under the configured data
    /// directory and connect the webhook client.
    pub fn open(config: &PortalConfig) -> Result<Self, PortalError> {
        let paths = PortalPaths::new(&config.data_dir);
        paths.ensure()?;
        let store = LocalStore::open(paths.database_file())?;
        let transport = HttpTransport::new(&config.webhook_base, config.timeout)?;
        Ok(Self::with_transport(store, transport))
    }
}

impl<T: WorkflowTransport + Clone> Portal<T> {
    /// Assemble over an existing store and transport (tests inject a stub
    /// transport here).
    pub fn with_transport(store: LocalStore, transport: T) -> Self {
        let client = WorkflowClient::new(transport);
        Self {
            sessions: SessionManager::new(store.clone()),
            sync: SyncGateway::new(client.clone(), store.clone()),
            schedule: ScheduleService::new(client.clone(), store.clone()),
            dayoffs: DayOffService::new(client.clone(), store.clone()),
            employees: EmployeeService::new(client, store.clone()),
            store,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn sync(&self) -> &SyncGateway<T> {
        &self.sync
    }

    pub fn schedule(&self) -> &ScheduleService<T> {
        &self.schedule
    }

    pub fn dayoffs(&self) -> &DayOffService<T> {
        &self.dayoffs
    }

    pub fn employees(&self) -> &EmployeeService<T> {
        &self.employees
    }
}
