// src/entity/line.rs
use serde::{Deserialize, Serialize};

/// Lifecycle of a narrative line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineStatus {
    #[default]
    Dormant,
    Emerging,
    Active,
    Climax,
    Resolving,
    Resolved,
}

impl std::fmt::Display for LineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineStatus::Dormant => write!(f, "dormant"),
            LineStatus::Emerging => write!(f, "emerging"),
            LineStatus::Active => write!(f, "active"),
            LineStatus::Climax => write!(f, "climax"),
            LineStatus::Resolving => write!(f, "resolving"),
            LineStatus::Resolved => write!(f, "resolved"),
        }
    }
}

/// One entry of a narrative line's `history`, written when a unit advances it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub unit_id: String,
    pub unit_number: u32,
    pub note: String,
    pub weight_before: f64,
    pub weight_after: f64,
    pub status_before: LineStatus,
    pub status_after: LineStatus,
}
