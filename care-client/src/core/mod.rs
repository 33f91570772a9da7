//! Core modules: local cache, session handling, fallback validation

pub mod conflict;
pub mod password;
pub mod paths;
pub mod seed;
pub mod session;
pub mod store;

pub use conflict::ShiftCandidate;
pub use paths::PortalPaths;
pub use session::{AuthError, SessionManager};
pub use store::{LocalStore, StorageError, StorageResult};
