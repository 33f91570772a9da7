//! Schedule operations: conflict checking and shift writes

use shared::client::CheckResponse;
use shared::models::{Shift, SyncState};

use crate::core::conflict::{self, ShiftCandidate};
use crate::core::store::{LocalStore, StorageResult};
use crate::remote::client::{WorkflowClient, WorkflowTransport};

/// Schedule workflows: validate a candidate, save or remove a shift
pub struct ScheduleService<T: WorkflowTransport> {
    store: LocalStore,
    client: WorkflowClient<T>,
}

impl<T: WorkflowTransport> ScheduleService<T> {
    pub fn new(client: WorkflowClient<T>, store: LocalStore) -> Self {
        Self { store, client }
    }

    /// Validate a candidate assignment.
    ///
    /// The remote validator is authoritative; when it is unreachable the
    /// local fallback checker answers with the same envelope.
    pub async fn check(&self, candidate: &ShiftCandidate) -> CheckResponse {
        match self.client.schedule_check(&candidate.to_check_request()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Remote validator unreachable, using local checker: {e}");
                conflict::check_local(candidate, &self.store.load_shifts())
            }
        }
    }

    /// Save a shift: remote first, then the local upsert.
    ///
    /// The local write always happens; the returned state says whether
    /// the record still awaits its remote write.
    pub async fn save(&self, mut shift: Shift) -> StorageResult<SyncState> {
        shift.normalize();
        shift.sync = match self.client.create_shift(&shift).await {
            Ok(_) => SyncState::Synced,
            Err(e) => {
                tracing::warn!(
                    employee_id = %shift.employee_id,
                    date = %shift.date,
                    "Shift not written to backend, marked pending: {e}"
                );
                SyncState::Pending
            }
        };
        let state = shift.sync;
        self.store.save_shift(shift)?;
        Ok(state)
    }

    /// Remove a shift locally, telling the backend best-effort.
    pub async fn remove(&self, employee_id: &str, date: &str) -> StorageResult<()> {
        if let Err(e) = self.client.delete_shift(employee_id, date).await {
            tracing::warn!("Shift deletion not propagated to backend: {e}");
        }
        self.store.delete_shift(employee_id, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClientError, ClientResult};
    use async_trait::async_trait;
    use serde::{Serialize, de::DeserializeOwned};
    use shared::client::CheckStatus;
    use shared::models::ShiftType;

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

    fn service_with_verdict(value: serde_json::Value) -> ScheduleService<VerdictTransport> {
        ScheduleService::new(
            WorkflowClient::new(VerdictTransport(value)),
            LocalStore::open_in_memory().unwrap(),
        )
    }

    fn offline_service() -> ScheduleService<DownTransport> {
        ScheduleService::new(
            WorkflowClient::new(DownTransport),
            LocalStore::open_in_memory().unwrap(),
        )
    }

    #[tokio::test]
    async fn test_check_prefers_remote_verdict() {
        let service = service_with_verdict(serde_json::json!({
            "success": false,
            "status": "conflict",
            "message": "Conflicts detected for Maria Santos.",
            "data": {
                "conflicts": [{"rule": "Weekly Limit (Day-Off)", "severity": "Warning", "detail": "Second day off this week."}],
                "alternatives": {"rooms": [], "dates": [{"date": "2026-03-12", "weekday": "Thursday"}]}
            }
        }));
        // Locally this candidate is clear; the remote verdict wins anyway
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-03-11",
            ShiftType::Morning,
            Some("ROOM-04".to_string()),
        );

        let outcome = service.check(&candidate).await;
        assert_eq!(outcome.status, CheckStatus::Conflict);
        assert_eq!(outcome.data.conflicts[0].rule, "Weekly Limit (Day-Off)");
        assert_eq!(outcome.data.alternatives.dates.len(), 1);
    }

    #[tokio::test]
    async fn test_check_falls_back_to_local_rules() {
        let service = offline_service();
        // Seeded: EMP-001 works Morning in ROOM-01 on 2026-02-24
        let candidate = ShiftCandidate::new(
            "EMP-001",
            "Maria Santos",
            "2026-02-24",
            ShiftType::Afternoon,
            Some("ROOM-04".to_string()),
        );

        let outcome = service.check(&candidate).await;
        assert!(!outcome.success);
        assert_eq!(outcome.status, CheckStatus::Conflict);
        assert_eq!(
            outcome.data.conflicts[0].rule,
            crate::core::conflict::RULE_EMPLOYEE_DOUBLE_BOOKING
        );
    }

    #[tokio::test]
    async fn test_save_marks_pending_when_backend_down() {
        let service = offline_service();
        let state = service
            .save(Shift::new("EMP-004", "2026-03-02", ShiftType::Night, "ROOM-03"))
            .await
            .unwrap();
        assert_eq!(state, SyncState::Pending);
        assert_eq!(service.store.pending_shifts().len(), 1);
    }

    #[tokio::test]
    async fn test_save_synced_when_backend_acks() {
        let service = service_with_verdict(serde_json::json!({"success": true}));
        let state = service
            .save(Shift::new("EMP-004", "2026-03-02", ShiftType::Night, "ROOM-03"))
            .await
            .unwrap();
        assert_eq!(state, SyncState::Synced);
        assert!(service.store.pending_shifts().is_empty());
    }

    #[tokio::test]
    async fn test_save_normalizes_rest_days() {
        let service = service_with_verdict(serde_json::json!({"success": true}));
        let mut shift = Shift::new("EMP-004", "2026-03-02", ShiftType::Off, "");
        shift.start_time = "7:30 AM".to_string();
        shift.room_id = "ROOM-01".to_string();
        service.save(shift).await.unwrap();

        let stored = service
            .store
            .load_shifts()
            .into_iter()
            .find(|s| s.employee_id == "EMP-004")
            .unwrap();
        assert!(stored.start_time.is_empty());
        assert!(stored.room_id.is_empty());
    }

    #[tokio::test]
    async fn test_remove_deletes_locally_even_offline() {
        let service = offline_service();
        service.remove("EMP-001", "2026-02-24").await.unwrap();
        assert!(service
            .store
            .load_shifts()
            .iter()
            .all(|s| !(s.employee_id == "EMP-001" && s.date == "2026-02-24")));
    }
}
