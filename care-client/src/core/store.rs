//! redb-based local cache for the portal collections
//!
//! # Layout
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `app_state` | collection name | JSON array / object | employees, auth, shifts, day-offs, session |
//! | `profile_photos` | employee id | data-URI string | profile photo cache |
//!
//! Each collection is stored as one JSON-encoded value and written back in
//! full on every mutation; an in-memory mirror serves synchronous reads in
//! between. `refresh_*` is the only supported way to observe a write made
//! by another process sharing the database file (last write wins, no
//! locking).
//!
//! The `load_*` accessors never fail: a collection that has never been
//! written is initialized from the seed set, and a storage fault degrades
//! to the mirror copy (ephemeral mode). Mutations return
//! `Result<_, StorageError>` so the caller decides whether a failed
//! persist matters.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{Serialize, de::DeserializeOwned};
use shared::models::{
    AuthCredential, DayOffRequest, DayOffStatus, Employee, Room, Session, Shift, SyncState,
};
use std::path::Path;
use thiserror::Error;

use super::seed;

/// Collections and the session slot: key = collection name, value = JSON
const STATE_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("app_state");

/// Profile photo cache: key = employee id, value = data URI
const PHOTOS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("profile_photos");

const EMPLOYEES_KEY: &str = "employees";
const AUTH_KEY: &str = "auth";
const SHIFTS_KEY: &str = "shifts";
const DAYOFFS_KEY: &str = "dayoffs";
const SESSION_KEY: &str = "session";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// In-memory mirror of the persisted collections
#[derive(Debug, Default)]
struct Mirror {
    employees: Vec<Employee>,
    auth: Vec<AuthCredential>,
    shifts: Vec<Shift>,
    dayoffs: Vec<DayOffRequest>,
}

/// Local cache backed by redb
///
/// Cheap to clone; clones share the database handle and the mirror.
#[derive(Clone)]
pub struct LocalStore {
    db: Arc<Database>,
    mirror: Arc<RwLock<Mirror>>,
}

impl LocalStore {
    /// Open or create the database at the given path and prime the mirror,
    /// seeding any collection that has never been written.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        let store = Self::init(db)?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(STATE_TABLE)?;
            let _ = write_txn.open_table(PHOTOS_TABLE)?;
        }
        write_txn.commit()?;

        let store = Self {
            db: Arc::new(db),
            mirror: Arc::new(RwLock::new(Mirror::default())),
        };

        // Prime the mirror; first access seeds missing collections
        store.load_employees();
        store.load_auth();
        store.load_shifts();
        store.load_dayoffs();

        Ok(store)
    }

    fn mirror_read(&self) -> RwLockReadGuard<'_, Mirror> {
        self.mirror.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn mirror_write(&self) -> RwLockWriteGuard<'_, Mirror> {
        self.mirror.write().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Raw state access ==========

    fn read_state<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(STATE_TABLE)?;
        match table.get(key)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    fn write_state<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            let encoded = serde_json::to_vec(value)?;
            table.insert(key, encoded.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn remove_state(&self, key: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(STATE_TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }

    // ========== Employees ==========

    /// Synchronous read of the employee mirror
    pub fn employees(&self) -> Vec<Employee> {
        self.mirror_read().employees.clone()
    }

    /// Read the persisted employee collection, seeding it on first access.
    pub fn load_employees(&self) -> Vec<Employee> {
        match self.read_state::<Vec<Employee>>(EMPLOYEES_KEY) {
            Ok(Some(list)) => {
                self.mirror_write().employees = list.clone();
                list
            }
            Ok(None) => {
                let seeded = seed::employees();
                if let Err(e) = self.write_state(EMPLOYEES_KEY, &seeded) {
                    tracing::warn!("Employee seed not persisted, running ephemeral: {e}");
                }
                self.mirror_write().employees = seeded.clone();
                seeded
            }
            Err(e) => {
                tracing::warn!("Employee cache read failed, serving in-memory copy: {e}");
                self.mirror_read().employees.clone()
            }
        }
    }

    /// Re-read the persisted collection (observes out-of-process writes).
    pub fn refresh_employees(&self) -> Vec<Employee> {
        self.load_employees()
    }

    /// Upsert by identifier: replace if present, append otherwise.
    pub fn save_employee(&self, employee: Employee) -> StorageResult<()> {
        let mut list = self.load_employees();
        match list.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => *slot = employee,
            None => list.push(employee),
        }
        self.mirror_write().employees = list.clone();
        self.write_state(EMPLOYEES_KEY, &list)
    }

    /// Remove by identifier; no-op when absent.
    pub fn delete_employee(&self, id: &str) -> StorageResult<()> {
        let mut list = self.load_employees();
        list.retain(|e| e.id != id);
        self.mirror_write().employees = list.clone();
        self.write_state(EMPLOYEES_KEY, &list)
    }

    /// Next free `EMP-NNN` identifier based on the persisted collection.
    pub fn next_employee_id(&self) -> String {
        shared::util::next_employee_id(&self.load_employees())
    }

    // ========== Auth credentials ==========

    pub fn auth_entries(&self) -> Vec<AuthCredential> {
        self.mirror_read().auth.clone()
    }

    pub fn load_auth(&self) -> Vec<AuthCredential> {
        match self.read_state::<Vec<AuthCredential>>(AUTH_KEY) {
            Ok(Some(list)) => {
                self.mirror_write().auth = list.clone();
                list
            }
            Ok(None) => {
                let seeded = seed::auth_entries();
                if let Err(e) = self.write_state(AUTH_KEY, &seeded) {
                    tracing::warn!("Auth seed not persisted, running ephemeral: {e}");
                }
                self.mirror_write().auth = seeded.clone();
                seeded
            }
            Err(e) => {
                tracing::warn!("Auth cache read failed, serving in-memory copy: {e}");
                self.mirror_read().auth.clone()
            }
        }
    }

    pub fn refresh_auth(&self) -> Vec<AuthCredential> {
        self.load_auth()
    }

    pub fn save_auth_entry(&self, entry: AuthCredential) -> StorageResult<()> {
        let mut list = self.load_auth();
        match list.iter_mut().find(|c| c.id == entry.id) {
            Some(slot) => *slot = entry,
            None => list.push(entry),
        }
        self.mirror_write().auth = list.clone();
        self.write_state(AUTH_KEY, &list)
    }

    pub fn delete_auth_entry(&self, id: &str) -> StorageResult<()> {
        let mut list = self.load_auth();
        list.retain(|c| c.id != id);
        self.mirror_write().auth = list.clone();
        self.write_state(AUTH_KEY, &list)
    }

    // ========== Shifts ==========

    pub fn shifts(&self) -> Vec<Shift> {
        self.mirror_read().shifts.clone()
    }

    pub fn load_shifts(&self) -> Vec<Shift> {
        match self.read_state::<Vec<Shift>>(SHIFTS_KEY) {
            Ok(Some(list)) => {
                self.mirror_write().shifts = list.clone();
                list
            }
            Ok(None) => {
                let seeded = seed::shifts();
                if let Err(e) = self.write_state(SHIFTS_KEY, &seeded) {
                    tracing::warn!("Shift seed not persisted, running ephemeral: {e}");
                }
                self.mirror_write().shifts = seeded.clone();
                seeded
            }
            Err(e) => {
                tracing::warn!("Shift cache read failed, serving in-memory copy: {e}");
                self.mirror_read().shifts.clone()
            }
        }
    }

    pub fn refresh_shifts(&self) -> Vec<Shift> {
        self.load_shifts()
    }

    /// Upsert by the compound (employee, date) key: replace if found,
    /// append otherwise. This is the write boundary that keeps at most one
    /// shift per employee per date.
    pub fn save_shift(&self, shift: Shift) -> StorageResult<()> {
        let mut list = self.load_shifts();
        match list
            .iter_mut()
            .find(|s| s.employee_id == shift.employee_id && s.date == shift.date)
        {
            Some(slot) => *slot = shift,
            None => list.push(shift),
        }
        self.mirror_write().shifts = list.clone();
        self.write_state(SHIFTS_KEY, &list)
    }

    /// Remove by the compound key; no-op when absent.
    pub fn delete_shift(&self, employee_id: &str, date: &str) -> StorageResult<()> {
        let mut list = self.load_shifts();
        list.retain(|s| !(s.employee_id == employee_id && s.date == date));
        self.mirror_write().shifts = list.clone();
        self.write_state(SHIFTS_KEY, &list)
    }

    pub fn shifts_for_employee(&self, employee_id: &str) -> Vec<Shift> {
        self.load_shifts()
            .into_iter()
            .filter(|s| s.employee_id == employee_id)
            .collect()
    }

    /// Shifts whose remote write is still outstanding.
    pub fn pending_shifts(&self) -> Vec<Shift> {
        self.load_shifts()
            .into_iter()
            .filter(|s| s.sync.is_pending())
            .collect()
    }

    /// Clear the pending flag after a successful remote replay.
    pub fn mark_shift_synced(&self, employee_id: &str, date: &str) -> StorageResult<()> {
        let mut list = self.load_shifts();
        if let Some(shift) = list
            .iter_mut()
            .find(|s| s.employee_id == employee_id && s.date == date)
        {
            shift.sync = SyncState::Synced;
            self.mirror_write().shifts = list.clone();
            return self.write_state(SHIFTS_KEY, &list);
        }
        Ok(())
    }

    // ========== Day-off requests ==========

    pub fn dayoffs(&self) -> Vec<DayOffRequest> {
        self.mirror_read().dayoffs.clone()
    }

    pub fn load_dayoffs(&self) -> Vec<DayOffRequest> {
        match self.read_state::<Vec<DayOffRequest>>(DAYOFFS_KEY) {
            Ok(Some(list)) => {
                self.mirror_write().dayoffs = list.clone();
                list
            }
            Ok(None) => {
                let seeded = seed::dayoffs();
                if let Err(e) = self.write_state(DAYOFFS_KEY, &seeded) {
                    tracing::warn!("Day-off seed not persisted, running ephemeral: {e}");
                }
                self.mirror_write().dayoffs = seeded.clone();
                seeded
            }
            Err(e) => {
                tracing::warn!("Day-off cache read failed, serving in-memory copy: {e}");
                self.mirror_read().dayoffs.clone()
            }
        }
    }

    pub fn refresh_dayoffs(&self) -> Vec<DayOffRequest> {
        self.load_dayoffs()
    }

    pub fn save_dayoff(&self, request: DayOffRequest) -> StorageResult<()> {
        let mut list = self.load_dayoffs();
        match list.iter_mut().find(|r| r.id == request.id) {
            Some(slot) => *slot = request,
            None => list.push(request),
        }
        self.mirror_write().dayoffs = list.clone();
        self.write_state(DAYOFFS_KEY, &list)
    }

    pub fn dayoffs_for_employee(&self, employee_id: &str) -> Vec<DayOffRequest> {
        self.load_dayoffs()
            .into_iter()
            .filter(|r| r.employee_id == employee_id)
            .collect()
    }

    /// Partial update of status and manager note; no-op when the id is
    /// unknown.
    pub fn update_dayoff_status(
        &self,
        id: &str,
        status: DayOffStatus,
        manager_note: &str,
    ) -> StorageResult<()> {
        let mut list = self.load_dayoffs();
        if let Some(request) = list.iter_mut().find(|r| r.id == id) {
            request.status = status;
            request.manager_note = manager_note.to_string();
            self.mirror_write().dayoffs = list.clone();
            return self.write_state(DAYOFFS_KEY, &list);
        }
        Ok(())
    }

    pub fn pending_dayoffs(&self) -> Vec<DayOffRequest> {
        self.load_dayoffs()
            .into_iter()
            .filter(|r| r.sync.is_pending())
            .collect()
    }

    pub fn mark_dayoff_synced(&self, id: &str) -> StorageResult<()> {
        let mut list = self.load_dayoffs();
        if let Some(request) = list.iter_mut().find(|r| r.id == id) {
            request.sync = SyncState::Synced;
            self.mirror_write().dayoffs = list.clone();
            return self.write_state(DAYOFFS_KEY, &list);
        }
        Ok(())
    }

    // ========== Wholesale replacement (sync gateway) ==========

    pub fn overwrite_employees(&self, list: Vec<Employee>) -> StorageResult<()> {
        self.mirror_write().employees = list.clone();
        self.write_state(EMPLOYEES_KEY, &list)
    }

    pub fn overwrite_shifts(&self, list: Vec<Shift>) -> StorageResult<()> {
        self.mirror_write().shifts = list.clone();
        self.write_state(SHIFTS_KEY, &list)
    }

    pub fn overwrite_dayoffs(&self, list: Vec<DayOffRequest>) -> StorageResult<()> {
        self.mirror_write().dayoffs = list.clone();
        self.write_state(DAYOFFS_KEY, &list)
    }

    // ========== Rooms (static reference data) ==========

    pub fn rooms(&self) -> Vec<Room> {
        seed::rooms()
    }

    // ========== Session slot ==========

    pub fn save_session(&self, session: &Session) -> StorageResult<()> {
        self.write_state(SESSION_KEY, session)
    }

    /// The persisted session, if any. A corrupt or unreadable slot reads
    /// as absent.
    pub fn load_session(&self) -> Option<Session> {
        match self.read_state::<Session>(SESSION_KEY) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("Session slot unreadable, treating as logged out: {e}");
                None
            }
        }
    }

    pub fn clear_session(&self) -> StorageResult<()> {
        self.remove_state(SESSION_KEY)
    }

    // ========== Profile photos ==========

    pub fn save_photo(&self, employee_id: &str, data_uri: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PHOTOS_TABLE)?;
            table.insert(employee_id, data_uri)?;
        }
        txn.commit()?;
        Ok(())
    }

    pub fn load_photo(&self, employee_id: &str) -> Option<String> {
        let result: StorageResult<Option<String>> = (|| {
            let read_txn = self.db.begin_read()?;
            let table = read_txn.open_table(PHOTOS_TABLE)?;
            Ok(table.get(employee_id)?.map(|v| v.value().to_string()))
        })();
        match result {
            Ok(photo) => photo,
            Err(e) => {
                tracing::warn!("Photo cache read failed: {e}");
                None
            }
        }
    }

    pub fn delete_photo(&self, employee_id: &str) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PHOTOS_TABLE)?;
            table.remove(employee_id)?;
        }
        txn.commit()?;
        Ok(())
    }
}
