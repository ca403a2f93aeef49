// src/entity/question.rs
use serde::{Deserialize, Serialize};

/// A thematic question's note for one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub unit_number: u32,
    pub note: String,
}

impl Contribution {
    pub fn new(unit_number: u32, note: impl Into<String>) -> Self {
        Self {
            unit_number,
            note: note.into(),
        }
    }
}
