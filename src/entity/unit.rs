// src/entity/unit.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    #[default]
    Chapter,
    Scene,
    Act,
    Arc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitStatus {
    #[default]
    Planning,
    Writing,
    Completed,
}

/// A story unit record as stored in `storyUnits`.
///
/// Field order matches the on-disk layout. Evaluations are kept as the raw
/// JSON the editor wrote and serialize as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryUnit {
    pub id: String,
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    pub number: u32,
    pub title: String,
    pub status: UnitStatus,
    pub content: String,
    pub summary: String,
    pub advanced_lines: Vec<String>,
    pub pre_evaluation: Option<Value>,
    pub post_evaluation: Option<Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl StoryUnit {
    pub fn new(id: String, number: u32, title: String, timestamp: &str) -> Self {
        Self {
            id,
            unit_type: UnitType::default(),
            number,
            title,
            status: UnitStatus::default(),
            content: String::new(),
            summary: String::new(),
            advanced_lines: Vec::new(),
            pre_evaluation: None,
            post_evaluation: None,
            created_at: timestamp.to_string(),
            updated_at: timestamp.to_string(),
        }
    }
}
