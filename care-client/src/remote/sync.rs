//! Sync gateway - bootstrap pull and pending-sync reconciliation
//!
//! The workflow backend (a spreadsheet behind n8n) is the source of truth
//! across devices; the local store is an offline cache. `bootstrap` runs
//! once per session start, `flush_pending` replays records that were
//! written while the backend was unreachable.

use shared::models::SyncState;

use super::client::{WorkflowClient, WorkflowTransport};
use crate::core::store::LocalStore;

/// Which collections a bootstrap pull refreshed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub employees: bool,
    pub shifts: bool,
    pub dayoffs: bool,
}

impl BootstrapReport {
    /// Whether any collection was refreshed from the backend.
    pub fn any(&self) -> bool {
        self.employees || self.shifts || self.dayoffs
    }
}

/// Outcome of a reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlushReport {
    pub shifts_replayed: usize,
    pub shifts_remaining: usize,
    pub dayoffs_replayed: usize,
    pub dayoffs_remaining: usize,
}

/// One-shot, best-effort sync against the workflow backend
pub struct SyncGateway<T: WorkflowTransport> {
    client: WorkflowClient<T>,
    store: LocalStore,
}

impl<T: WorkflowTransport> SyncGateway<T> {
    pub fn new(client: WorkflowClient<T>, store: LocalStore) -> Self {
        Self { client, store }
    }

    /// Pull authoritative copies of employees, shifts and day-offs.
    ///
    /// Each pull is independent: a failure (network error, empty or
    /// malformed response) leaves that local collection untouched and
    /// never aborts the others. No retry, no backoff.
    pub async fn bootstrap(&self) -> BootstrapReport {
        let mut report = BootstrapReport::default();

        match self.client.get_employees().await {
            Ok(list) if !list.is_empty() => match self.store.overwrite_employees(list) {
                Ok(()) => {
                    report.employees = true;
                    tracing::info!("Employees refreshed from backend");
                }
                Err(e) => tracing::warn!("Employee overwrite failed: {e}"),
            },
            Ok(_) => tracing::debug!("Backend employee list empty, keeping local cache"),
            Err(e) => tracing::warn!("Employee bootstrap skipped: {e}"),
        }

        match self.client.get_shifts().await {
            Ok(list) if !list.is_empty() => match self.store.overwrite_shifts(list) {
                Ok(()) => {
                    report.shifts = true;
                    tracing::info!("Shifts refreshed from backend");
                }
                Err(e) => tracing::warn!("Shift overwrite failed: {e}"),
            },
            Ok(_) => tracing::debug!("Backend shift list empty, keeping local cache"),
            Err(e) => tracing::warn!("Shift bootstrap skipped: {e}"),
        }

        match self.client.get_dayoffs().await {
            Ok(list) if !list.is_empty() => match self.store.overwrite_dayoffs(list) {
                Ok(()) => {
                    report.dayoffs = true;
                    tracing::info!("Day-off requests refreshed from backend");
                }
                Err(e) => tracing::warn!("Day-off overwrite failed: {e}"),
            },
            Ok(_) => tracing::debug!("Backend day-off list empty, keeping local cache"),
            Err(e) => tracing::warn!("Day-off bootstrap skipped: {e}"),
        }

        report
    }

    /// Replay records whose remote write is still outstanding.
    ///
    /// Per-entry isolation: a record that fails to replay stays pending
    /// for the next pass and never blocks the rest.
    pub async fn flush_pending(&self) -> FlushReport {
        let mut report = FlushReport::default();

        for shift in self.store.pending_shifts() {
            // The flag is local bookkeeping; replay the record without it
            let mut replay = shift.clone();
            replay.sync = SyncState::Synced;
            match self.client.create_shift(&replay).await {
                Ok(_) => match self.store.mark_shift_synced(&shift.employee_id, &shift.date) {
                    Ok(()) => report.shifts_replayed += 1,
                    Err(e) => {
                        tracing::warn!("Replayed shift could not be marked synced: {e}");
                        report.shifts_remaining += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        employee_id = %shift.employee_id,
                        date = %shift.date,
                        "Shift replay failed, staying pending: {e}"
                    );
                    report.shifts_remaining += 1;
                }
            }
        }

        for request in self.store.pending_dayoffs() {
            let mut replay = request.clone();
            replay.sync = SyncState::Synced;
            match self.client.update_dayoff(&replay).await {
                Ok(_) => match self.store.mark_dayoff_synced(&request.id) {
                    Ok(()) => report.dayoffs_replayed += 1,
                    Err(e) => {
                        tracing::warn!("Replayed day-off could not be marked synced: {e}");
                        report.dayoffs_remaining += 1;
                    }
                },
                Err(e) => {
                    tracing::warn!(id = %request.id, "Day-off replay failed, staying pending: {e}");
                    report.dayoffs_remaining += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use async_trait::async_trait;
    use serde::{Serialize, de::DeserializeOwned};
    use shared::models::{Shift, ShiftType};

    /// Answers every `get-*` call with a fixed JSON document, everything
    /// else with an empty acknowledgement.
    #[derive(Clone)]
    struct FixedTransport {
        employees: serde_json::Value,
        shifts: serde_json::Value,
        dayoffs: serde_json::Value,
    }

    #[async_trait]
    impl WorkflowTransport for FixedTransport {
        async fn post<R: DeserializeOwned, B: Serialize + Sync>(
            &self,
            path: &str,
            _body: &B,
        ) -> ClientResult<R> {
            let value = match path {
                "get-employees" => self.employees.clone(),
                "get-shifts" => self.shifts.clone(),
                "get-dayoffs" => self.dayoffs.clone(),
                _ => serde_json::json!({"success": true}),
            };
            serde_json::from_value(value)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        }
    }

    /// Every call fails as if the backend were down.
    #[derive(Clone)]
    struct DownTransport;

    #[async_trait]
    impl WorkflowTransport for DownTransport {
        async fn post<R: DeserializeOwned, B: Serialize + Sync>(
            &self,
            _path: &str,
            _body: &B,
        ) -> ClientResult<R> {
            Err(ClientError::Api {
                status: 503,
                message: "backend down".to_string(),
            })
        }
    }

    fn employee_doc(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({"Employee_ID": id, "Name": name})
    }

    #[tokio::test]
    async fn test_bootstrap_overwrites_from_backend() {
        let store = LocalStore::open_in_memory().unwrap();
        let transport = FixedTransport {
            employees: serde_json::json!({"data": [employee_doc("EMP-010", "Remote Person")]}),
            shifts: serde_json::json!({"data": []}),
            dayoffs: serde_json::json!({"data": []}),
        };
        let gateway = SyncGateway::new(WorkflowClient::new(transport), store.clone());

        let report = gateway.bootstrap().await;
        assert!(report.employees);
        // Empty lists leave the local cache untouched
        assert!(!report.shifts);
        assert!(!report.dayoffs);

        let employees = store.load_employees();
        assert_eq!(employees.len(), 1);
        assert_eq!(employees[0].id, "EMP-010");
        assert_eq!(store.load_shifts().len(), 3);
    }

    #[tokio::test]
    async fn test_bootstrap_offline_keeps_local_state() {
        let store = LocalStore::open_in_memory().unwrap();
        let gateway = SyncGateway::new(WorkflowClient::new(DownTransport), store.clone());

        let report = gateway.bootstrap().await;
        assert!(!report.any());
        assert_eq!(store.load_employees().len(), 5);
    }

    #[tokio::test]
    async fn test_bootstrap_partial_failure_is_isolated() {
        let store = LocalStore::open_in_memory().unwrap();
        // Shifts payload is malformed; the other pulls still land
        let transport = FixedTransport {
            employees: serde_json::json!({"data": [employee_doc("EMP-020", "Remote Person")]}),
            shifts: serde_json::json!("garbage"),
            dayoffs: serde_json::json!({"data": [{
                "id": "DO-1", "Employee_ID": "EMP-020", "Date": "2026-03-01"
            }]}),
        };
        let gateway = SyncGateway::new(WorkflowClient::new(transport), store.clone());

        let report = gateway.bootstrap().await;
        assert!(report.employees);
        assert!(!report.shifts);
        assert!(report.dayoffs);
        assert_eq!(store.load_shifts().len(), 3);
        assert_eq!(store.load_dayoffs().len(), 1);
    }

    #[tokio::test]
    async fn test_flush_pending_replays_and_clears() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut shift = Shift::new("EMP-001", "2026-03-05", ShiftType::Morning, "ROOM-01");
        shift.sync = SyncState::Pending;
        store.save_shift(shift).unwrap();

        let transport = FixedTransport {
            employees: serde_json::json!({"data": []}),
            shifts: serde_json::json!({"data": []}),
            dayoffs: serde_json::json!({"data": []}),
        };
        let gateway = SyncGateway::new(WorkflowClient::new(transport), store.clone());

        let report = gateway.flush_pending().await;
        assert_eq!(report.shifts_replayed, 1);
        assert_eq!(report.shifts_remaining, 0);
        assert!(store.pending_shifts().is_empty());
    }

    #[tokio::test]
    async fn test_flush_pending_keeps_flag_on_failure() {
        let store = LocalStore::open_in_memory().unwrap();
        let mut shift = Shift::new("EMP-001", "2026-03-05", ShiftType::Morning, "ROOM-01");
        shift.sync = SyncState::Pending;
        store.save_shift(shift).unwrap();

        let gateway = SyncGateway::new(WorkflowClient::new(DownTransport), store.clone());

        let report = gateway.flush_pending().await;
        assert_eq!(report.shifts_replayed, 0);
        assert_eq!(report.shifts_remaining, 1);
        assert_eq!(store.pending_shifts().len(), 1);
    }
}
