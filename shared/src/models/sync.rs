//! Sync state flag for locally-written records

use serde::{Deserialize, Serialize};

/// Whether a locally-persisted record has been written to the remote
/// backend.
///
/// `Pending` marks records saved while the workflow service was
/// unreachable; the sync gateway's reconciliation pass replays them and
/// flips the flag back to `Synced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    #[serde(rename = "synced")]
    Synced,
    #[serde(rename = "pending")]
    Pending,
}

impl Default for SyncState {
    fn default() -> Self {
        Self::Synced
    }
}

impl SyncState {
    pub fn is_synced(&self) -> bool {
        *self == Self::Synced
    }

    pub fn is_pending(&self) -> bool {
        *self == Self::Pending
    }
}
