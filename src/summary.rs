//! Console summary printed after an update is written.

use serde_json::Value;

use crate::error::Result;
use crate::storage::{record_id, ProjectDocument};

/// One narrative line as shown in the summary
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    pub id: String,
    pub weight: String,
    pub last_advanced: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub file_name: String,
    pub lines: Vec<LineSummary>,
    pub unit_count: usize,
    pub last_unit_title: Option<String>,
}

impl Summary {
    pub fn from_document(doc: &ProjectDocument, file_name: &str) -> Result<Self> {
        let lines = doc
            .narrative_lines()?
            .iter()
            .map(|line| LineSummary {
                id: record_id(line).unwrap_or("-").to_string(),
                weight: scalar(line.get("weight")),
                last_advanced: scalar(line.get("lastAdvancedInUnit")),
            })
            .collect();

        let units = doc.story_units()?;
        let last_unit_title = units
            .last()
            .and_then(|unit| unit.get("title"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            file_name: file_name.to_string(),
            lines,
            unit_count: units.len(),
            last_unit_title,
        })
    }

    /// Render the summary, one console line per element
    pub fn render(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + 2);
        out.push(format!("OK - {} updated", self.file_name));
        for line in &self.lines {
            out.push(format!(
                "  {}: w={}, last={}",
                line.id, line.weight, line.last_advanced
            ));
        }
        out.push(format!(
            "StoryUnits: {}, last={}",
            self.unit_count,
            self.last_unit_title.as_deref().unwrap_or("-")
        ));
        out
    }
}

fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}
