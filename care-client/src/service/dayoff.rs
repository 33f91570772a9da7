//! Day-off request workflows

use shared::client::{CheckResponse, DayOffSubmitRequest};
use shared::models::{DayOffReason, DayOffRequest, DayOffStatus, SyncState};
use shared::util::{dayoff_request_id, today_iso};

use crate::core::store::{LocalStore, StorageResult};
use crate::remote::client::{WorkflowClient, WorkflowTransport};

/// Offline fallback message shown when the validator cannot be reached
const OFFLINE_MESSAGE: &str =
    "Could not connect to the validation server. Your request has been saved for review by the admin.";

/// Result of a submission: the stored record plus the validator's (or the
/// offline fallback's) envelope for the UI panel.
#[derive(Debug, Clone)]
pub struct DayOffOutcome {
    pub request: DayOffRequest,
    pub response: CheckResponse,
}

/// Day-off submission and review
pub struct DayOffService<T: WorkflowTransport> {
    store: LocalStore,
    client: WorkflowClient<T>,
}

impl<T: WorkflowTransport> DayOffService<T> {
    pub fn new(client: WorkflowClient<T>, store: LocalStore) -> Self {
        Self { store, client }
    }

    /// Submit a request for automated validation.
    ///
    /// When the validator answers, its verdict resolves the request
    /// immediately (Approved/Rejected, reasoning as manager note). When it
    /// is unreachable the request is stored as Pending with the sync flag
    /// set, for the admin and the reconciliation pass.
    pub async fn submit(
        &self,
        employee_id: &str,
        request_date: &str,
        reason: DayOffReason,
        notes: &str,
    ) -> StorageResult<DayOffOutcome> {
        let employee_name = self
            .store
            .load_employees()
            .into_iter()
            .find(|e| e.id == employee_id)
            .map(|e| e.name)
            .unwrap_or_default();

        let submit = DayOffSubmitRequest {
            employee_id: employee_id.to_string(),
            employee_name: employee_name.clone(),
            request_date: request_date.to_string(),
            reason,
            notes: notes.to_string(),
        };

        let mut request = DayOffRequest {
            id: dayoff_request_id(),
            employee_id: employee_id.to_string(),
            employee_name,
            date: request_date.to_string(),
            status: DayOffStatus::Pending,
            reason,
            notes: notes.to_string(),
            requested_on: today_iso(),
            manager_note: String::new(),
            sync: SyncState::Synced,
        };

        let response = match self.client.dayoff_submit(&submit).await {
            Ok(response) => {
                request.status = if response.success {
                    DayOffStatus::Approved
                } else {
                    DayOffStatus::Rejected
                };
                request.manager_note = response.data.ai_reasoning.clone().unwrap_or_default();
                response
            }
            Err(e) => {
                tracing::warn!(id = %request.id, "Day-off validation unreachable, saved as pending: {e}");
                request.sync = SyncState::Pending;
                CheckResponse::offline(OFFLINE_MESSAGE)
            }
        };

        self.store.save_dayoff(request.clone())?;
        Ok(DayOffOutcome { request, response })
    }

    /// Admin review: set the status and manager note, then tell the
    /// backend best-effort.
    pub async fn review(
        &self,
        id: &str,
        status: DayOffStatus,
        manager_note: &str,
    ) -> StorageResult<()> {
        self.store.update_dayoff_status(id, status, manager_note)?;
        if let Some(updated) = self.store.load_dayoffs().into_iter().find(|r| r.id == id) {
            if let Err(e) = self.client.update_dayoff(&updated).await {
                tracing::warn!(id = %id, "Day-off review not propagated to backend: {e}");
            }
        }
        Ok(())
    }

    /// Requests submitted by one employee, newest submission date last.
    pub fn requests_for(&self, employee_id: &str) -> Vec<DayOffRequest> {
        self.store.dayoffs_for_employee(employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use async_trait::async_trait;
    use serde::{Serialize, de::DeserializeOwned};
    use shared::client::CheckStatus;

    #[derive(Clone)]
    struct VerdictTransport(serde_json::Value);

    #[async_trait]
    impl WorkflowTransport for VerdictTransport {
        async fn post<R: DeserializeOwned, B: Serialize + Sync>(
            &self,
            _path: &str,
            _body: &B,
        ) -> ClientResult<R> {
            serde_json::from_value(self.0.clone())
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        }
    }

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
                message: "down".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_submit_approved_by_validator() {
        let service = DayOffService::new(
            WorkflowClient::new(VerdictTransport(serde_json::json!({
                "success": true,
                "status": "clear",
                "message": "Approved, no conflicts.",
                "data": {"ai_reasoning": "No shift on that date; team capacity fine."}
            }))),
            LocalStore::open_in_memory().unwrap(),
        );

        let outcome = service
            .submit("EMP-001", "2026-03-20", DayOffReason::FamilyEvent, "")
            .await
            .unwrap();

        assert_eq!(outcome.request.status, DayOffStatus::Approved);
        assert_eq!(outcome.request.employee_name, "Maria Santos");
        assert_eq!(
            outcome.request.manager_note,
            "No shift on that date; team capacity fine."
        );
        assert!(outcome.request.sync.is_synced());
        assert!(outcome.request.id.starts_with("DO-"));

        let stored = service.store.load_dayoffs();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0], outcome.request);
    }

    #[tokio::test]
    async fn test_submit_rejected_by_validator() {
        let service = DayOffService::new(
            WorkflowClient::new(VerdictTransport(serde_json::json!({
                "success": false,
                "status": "conflict",
                "message": "Rejected: consecutive rest days.",
                "data": {
                    "conflicts": [{"rule": "Consecutive Rest Days", "severity": "Critical", "detail": "Rest day on 2026-03-19."}],
                    "suggested_date": "2026-03-23"
                }
            }))),
            LocalStore::open_in_memory().unwrap(),
        );

        let outcome = service
            .submit("EMP-002", "2026-03-20", DayOffReason::PersonalErrand, "")
            .await
            .unwrap();

        assert_eq!(outcome.request.status, DayOffStatus::Rejected);
        assert_eq!(outcome.response.data.suggested_date.as_deref(), Some("2026-03-23"));
    }

    #[tokio::test]
    async fn test_submit_offline_saves_pending() {
        let service = DayOffService::new(
            WorkflowClient::new(DownTransport),
            LocalStore::open_in_memory().unwrap(),
        );

        let outcome = service
            .submit("EMP-003", "2026-03-20", DayOffReason::MedicalAppointment, "clinic at 9")
            .await
            .unwrap();

        assert_eq!(outcome.request.status, DayOffStatus::Pending);
        assert!(outcome.request.sync.is_pending());
        assert_eq!(outcome.response.status, CheckStatus::Error);
        assert!(!outcome.response.success);
        assert_eq!(service.store.pending_dayoffs().len(), 1);
    }

    #[tokio::test]
    async fn test_review_updates_status_and_note() {
        let service = DayOffService::new(
            WorkflowClient::new(DownTransport),
            LocalStore::open_in_memory().unwrap(),
        );
        let outcome = service
            .submit("EMP-001", "2026-03-20", DayOffReason::Other, "")
            .await
            .unwrap();

        // Backend still down; review must succeed locally regardless
        service
            .review(&outcome.request.id, DayOffStatus::Approved, "Covered by EMP-002.")
            .await
            .unwrap();

        let stored = service.store.load_dayoffs();
        assert_eq!(stored[0].status, DayOffStatus::Approved);
        assert_eq!(stored[0].manager_note, "Covered by EMP-002.");
    }

    #[tokio::test]
    async fn test_requests_for_filters_by_employee() {
        let service = DayOffService::new(
            WorkflowClient::new(DownTransport),
            LocalStore::open_in_memory().unwrap(),
        );
        service
            .submit("EMP-001", "2026-03-20", DayOffReason::Other, "")
            .await
            .unwrap();
        service
            .submit("EMP-002", "2026-03-21", DayOffReason::Other, "")
            .await
            .unwrap();

        let mine = service.requests_for("EMP-001");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].employee_id, "EMP-001");
    }
}
