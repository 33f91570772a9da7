//! SessionManager - 用户会话管理
//!
//! 将 (identifier, password) 变成带角色的会话对象，并通过本地缓存
//! 持久化/恢复会话。凭证以明文比较（已知缺陷，见 DESIGN.md）。

use std::sync::{Arc, PoisonError, RwLock};

use shared::models::{AuthCredential, Session, UserRole};
use thiserror::Error;

use super::seed;
use super::store::{LocalStore, StorageError};

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown identifier or wrong password. One message for both causes
    /// so valid identifiers cannot be enumerated.
    #[error("Invalid Employee ID or password")]
    InvalidCredentials,

    /// Credential exists but no employee record matches it (orphaned after
    /// an employee deletion)
    #[error("No employee profile matches this account")]
    ProfileNotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// 会话管理器
///
/// Clones share the active-session slot.
#[derive(Clone)]
pub struct SessionManager {
    store: LocalStore,
    current: Arc<RwLock<Option<Session>>>,
}

impl SessionManager {
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, session: Option<Session>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = session;
    }

    /// 登录：角色由凭证决定（Smart Login，无需选择 Admin/Employee）
    pub fn login(&self, id: &str, password: &str) -> Result<Session, AuthError> {
        let entries = self.store.load_auth();
        let Some(credential) = entries.iter().find(|c| c.id == id) else {
            return Err(AuthError::InvalidCredentials);
        };
        // Plaintext comparison (known weakness, see DESIGN.md)
        if credential.password != password {
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.build_session(credential)?;
        self.persist(&session);
        self.set_current(Some(session.clone()));
        tracing::info!(id = %session.id, role = ?session.role, "Login succeeded");
        Ok(session)
    }

    /// 恢复上次持久化的会话
    ///
    /// Re-validates against the current auth and employee collections and
    /// rebuilds the session from them, so edits made while logged out are
    /// reflected. Any failed check clears the persisted slot.
    pub fn restore_session(&self) -> Option<Session> {
        let persisted = self.store.load_session()?;
        match self.rebuild(&persisted.id) {
            Some(session) => {
                self.persist(&session);
                self.set_current(Some(session.clone()));
                tracing::info!(id = %session.id, "Restored cached session");
                Some(session)
            }
            None => {
                tracing::info!(id = %persisted.id, "Cached session no longer valid, cleared");
                self.discard();
                None
            }
        }
    }

    /// 刷新当前会话（管理员修改自己的资料后调用）
    pub fn refresh_session(&self) -> Option<Session> {
        let id = self.current()?.id;
        match self.rebuild(&id) {
            Some(session) => {
                self.persist(&session);
                self.set_current(Some(session.clone()));
                Some(session)
            }
            None => {
                self.discard();
                None
            }
        }
    }

    /// 登出并清除持久化的会话
    pub fn logout(&self) {
        self.discard();
        tracing::debug!("Session cleared");
    }

    fn rebuild(&self, id: &str) -> Option<Session> {
        let entries = self.store.load_auth();
        let credential = entries.iter().find(|c| c.id == id)?;
        self.build_session(credential).ok()
    }

    fn build_session(&self, credential: &AuthCredential) -> Result<Session, AuthError> {
        match credential.role {
            UserRole::Admin => Ok(Session::from_profile(&seed::admin_profile(), UserRole::Admin)),
            UserRole::Employee => {
                let employees = self.store.load_employees();
                let employee = employees
                    .iter()
                    .find(|e| e.id == credential.id)
                    .ok_or(AuthError::ProfileNotFound)?;
                Ok(Session::from_profile(employee, UserRole::Employee))
            }
        }
    }

    fn persist(&self, session: &Session) {
        if let Err(e) = self.store.save_session(session) {
            tracing::warn!("Session not persisted, login is ephemeral: {e}");
        }
    }

    fn discard(&self) {
        self.set_current(None);
        if let Err(e) = self.store.clear_session() {
            tracing::warn!("Could not clear persisted session: {e}");
        }
    }
}
