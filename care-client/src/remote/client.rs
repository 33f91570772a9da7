//! Webhook client for the n8n workflow service
//!
//! Every endpoint is a JSON POST relative to the configured webhook base.
//! The transport sits behind [`WorkflowTransport`] so the service layer
//! and tests are independent of reqwest.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use shared::client::{
    AckResponse, CheckResponse, DayOffSubmitRequest, DeleteEmployeeRequest, DeleteShiftRequest,
    ListResponse, ScheduleCheckRequest, ScheduleEmailRequest,
};
use shared::models::{AuthCredential, DayOffRequest, Employee, Shift};

use crate::error::{ClientError, ClientResult};

/// Error body shape the workflow service answers failures with
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// POST-JSON transport to the workflow service
#[async_trait]
pub trait WorkflowTransport: Send + Sync {
    async fn post<R: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R>;
}

/// 网络传输 - reqwest
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout_secs: u64) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl WorkflowTransport for HttpTransport {
    async fn post<R: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // Prefer the message field of a JSON error body
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(err) => err.message,
                Err(_) if !text.is_empty() => text,
                Err(_) => format!("HTTP {}", status.as_u16()),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {e}")))
    }
}

/// Typed endpoint surface over a [`WorkflowTransport`]
#[derive(Debug, Clone)]
pub struct WorkflowClient<T: WorkflowTransport> {
    transport: T,
}

impl WorkflowClient<HttpTransport> {
    /// Client over HTTP with the given webhook base.
    pub fn connect(base_url: &str, timeout_secs: u64) -> ClientResult<Self> {
        Ok(Self::new(HttpTransport::new(base_url, timeout_secs)?))
    }
}

impl<T: WorkflowTransport> WorkflowClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    // ========== Validator workflows ==========

    pub async fn schedule_check(&self, req: &ScheduleCheckRequest) -> ClientResult<CheckResponse> {
        self.transport.post("schedule-check", req).await
    }

    pub async fn dayoff_submit(&self, req: &DayOffSubmitRequest) -> ClientResult<CheckResponse> {
        self.transport.post("dayoff-submit", req).await
    }

    // ========== Shift CRUD ==========

    pub async fn create_shift(&self, shift: &Shift) -> ClientResult<AckResponse> {
        self.transport.post("create-shift", shift).await
    }

    pub async fn get_shifts(&self) -> ClientResult<Vec<Shift>> {
        let response: ListResponse<Shift> =
            self.transport.post("get-shifts", &serde_json::json!({})).await?;
        Ok(response.data)
    }

    pub async fn delete_shift(&self, employee_id: &str, date: &str) -> ClientResult<AckResponse> {
        let req = DeleteShiftRequest {
            employee_id: employee_id.to_string(),
            date: date.to_string(),
        };
        self.transport.post("delete-shift", &req).await
    }

    // ========== Employee CRUD ==========

    pub async fn create_employee(&self, employee: &Employee) -> ClientResult<AckResponse> {
        self.transport.post("create-employee", employee).await
    }

    pub async fn get_employees(&self) -> ClientResult<Vec<Employee>> {
        let response: ListResponse<Employee> = self
            .transport
            .post("get-employees", &serde_json::json!({}))
            .await?;
        Ok(response.data)
    }

    pub async fn delete_employee(&self, employee_id: &str) -> ClientResult<AckResponse> {
        let req = DeleteEmployeeRequest {
            employee_id: employee_id.to_string(),
        };
        self.transport.post("delete-employee", &req).await
    }

    // ========== Day-off CRUD ==========

    pub async fn get_dayoffs(&self) -> ClientResult<Vec<DayOffRequest>> {
        let response: ListResponse<DayOffRequest> =
            self.transport.post("get-dayoffs", &serde_json::json!({})).await?;
        Ok(response.data)
    }

    /// Record write mirroring the entity shape (sheet upsert); used by the
    /// admin review flow and the pending-sync replay.
    pub async fn update_dayoff(&self, request: &DayOffRequest) -> ClientResult<AckResponse> {
        self.transport.post("update-dayoff", request).await
    }

    // ========== Auth / notifications ==========

    pub async fn get_auth(&self) -> ClientResult<Vec<AuthCredential>> {
        let response: ListResponse<AuthCredential> =
            self.transport.post("get-auth", &serde_json::json!({})).await?;
        Ok(response.data)
    }

    pub async fn send_schedule_email(&self, req: &ScheduleEmailRequest) -> ClientResult<AckResponse> {
        self.transport.post("send-schedule-email", req).await
    }
}
