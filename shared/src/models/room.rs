//! Room Model

use serde::{Deserialize, Serialize};

/// Care room — static reference data, not persisted or mutated at runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "Room_ID")]
    pub id: String,
    #[serde(rename = "Room_Name")]
    pub name: String,
    #[serde(rename = "Capacity")]
    pub capacity: u32,
    #[serde(rename = "Location")]
    pub location: String,
}
