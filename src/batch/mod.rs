//! Update batches: a literal table of edits tied to one story unit.
//!
//! A batch overwrites the current state of the lines it names and appends
//! log-like records (history, unit, reinforcements, contributions) at most
//! once per unit. Identifiers the document does not contain are skipped.

mod ch19;

pub use ch19::chapter_19;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::entity::{Contribution, HistoryEntry, LineStatus, StoryUnit};
use crate::error::{Result, StorylineError};
use crate::merge::{append_keyed, append_marker, UnitKey};
use crate::storage::{record_id, ProjectDocument};

/// Format a timestamp the way the document stores them: `2026-02-19T06:00:00.000Z`
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// New state for one narrative line, plus the note logged in its history.
#[derive(Debug, Clone, PartialEq)]
pub struct LineAdvance {
    pub line_id: String,
    pub weight_before: f64,
    pub weight_after: f64,
    pub status_before: LineStatus,
    pub status_after: LineStatus,
    pub note: String,
}

impl LineAdvance {
    pub fn new(
        line_id: impl Into<String>,
        weights: (f64, f64),
        statuses: (LineStatus, LineStatus),
        note: impl Into<String>,
    ) -> Self {
        Self {
            line_id: line_id.into(),
            weight_before: weights.0,
            weight_after: weights.1,
            status_before: statuses.0,
            status_after: statuses.1,
            note: note.into(),
        }
    }

    fn history_entry(&self, unit: &StoryUnit) -> HistoryEntry {
        HistoryEntry {
            unit_id: unit.id.clone(),
            unit_number: unit.number,
            note: self.note.clone(),
            weight_before: self.weight_before,
            weight_after: self.weight_after,
            status_before: self.status_before,
            status_after: self.status_after,
        }
    }
}

/// Contribution note for one thematic question.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeNote {
    pub question_id: String,
    pub note: String,
}

impl ThemeNote {
    pub fn new(question_id: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            note: note.into(),
        }
    }
}

/// Counts of what an apply changed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub lines_advanced: usize,
    pub history_appended: usize,
    pub unit_inserted: bool,
    pub promises_reinforced: usize,
    pub contributions_appended: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateBatch {
    /// The update-unit: appended to `storyUnits`, and the key of every appended record
    pub unit: StoryUnit,
    pub timestamp: String,
    pub lines: Vec<LineAdvance>,
    pub promises: Vec<String>,
    pub themes: Vec<ThemeNote>,
}

impl UpdateBatch {
    /// Build a batch; the unit's `advancedLines` lists every line in `lines`, in order.
    pub fn new(
        mut unit: StoryUnit,
        lines: Vec<LineAdvance>,
        promises: Vec<String>,
        themes: Vec<ThemeNote>,
    ) -> Self {
        unit.advanced_lines = lines.iter().map(|l| l.line_id.clone()).collect();
        let timestamp = unit.updated_at.clone();
        Self {
            unit,
            timestamp,
            lines,
            promises,
            themes,
        }
    }

    /// Apply every edit of the batch to `doc`, in memory.
    ///
    /// Fails when a required collection is missing, or when a named line or
    /// thematic question lacks its `history`/`contributions` array; `doc` is
    /// then partially edited and must not be saved. A named promise without
    /// `reinforcedInChapters` is left as it is.
    pub fn apply(&self, doc: &mut ProjectDocument) -> Result<ApplyReport> {
        let mut report = ApplyReport::default();

        self.advance_lines(doc, &mut report)?;
        self.insert_unit(doc, &mut report)?;
        self.reinforce_promises(doc, &mut report)?;
        self.add_contributions(doc, &mut report)?;
        doc.set_updated_at(&self.timestamp);

        tracing::info!(
            unit = %self.unit.id,
            lines_advanced = report.lines_advanced,
            history_appended = report.history_appended,
            unit_inserted = report.unit_inserted,
            promises_reinforced = report.promises_reinforced,
            contributions_appended = report.contributions_appended,
            "applied update batch"
        );
        Ok(report)
    }

    fn unit_key(&self) -> UnitKey<'_> {
        UnitKey::Id(&self.unit.id)
    }

    fn advance_lines(&self, doc: &mut ProjectDocument, report: &mut ApplyReport) -> Result<()> {
        let mut seen = Vec::new();

        for line in doc.narrative_lines_mut()?.iter_mut() {
            let advance = match record_id(line)
                .and_then(|id| self.lines.iter().find(|a| a.line_id == id))
            {
                Some(advance) => advance,
                None => continue,
            };
            let Some(fields) = line.as_object_mut() else {
                continue;
            };

            fields.insert("weight".to_string(), Value::from(advance.weight_after));
            fields.insert(
                "status".to_string(),
                Value::from(advance.status_after.to_string()),
            );
            fields.insert(
                "lastAdvancedInUnit".to_string(),
                Value::from(self.unit.number),
            );
            fields.insert("updatedAt".to_string(), Value::from(self.timestamp.as_str()));
            report.lines_advanced += 1;
            seen.push(advance.line_id.as_str());

            let entry = serde_json::to_value(advance.history_entry(&self.unit))?;
            let history = list_field(fields, "history", &advance.line_id)?;
            if append_keyed(history, "unitId", self.unit_key(), entry) {
                report.history_appended += 1;
            } else {
                tracing::debug!(line = %advance.line_id, "history already records this unit");
            }
        }

        for advance in &self.lines {
            if !seen.contains(&advance.line_id.as_str()) {
                tracing::debug!(line = %advance.line_id, "line not in document, skipped");
            }
        }
        Ok(())
    }

    fn insert_unit(&self, doc: &mut ProjectDocument, report: &mut ApplyReport) -> Result<()> {
        let candidate = serde_json::to_value(&self.unit)?;
        let units = doc.story_units_mut()?;
        report.unit_inserted = append_keyed(units, "id", self.unit_key(), candidate);
        if !report.unit_inserted {
            tracing::debug!(unit = %self.unit.id, "story unit already present");
        }
        Ok(())
    }

    fn reinforce_promises(
        &self,
        doc: &mut ProjectDocument,
        report: &mut ApplyReport,
    ) -> Result<()> {
        let Some(promises) = doc.promises_mut() else {
            tracing::debug!("document has no promises");
            return Ok(());
        };

        for promise in promises.iter_mut() {
            let id = match record_id(promise) {
                Some(id) if self.promises.iter().any(|p| p == id) => id.to_string(),
                _ => continue,
            };
            let Some(fields) = promise.as_object_mut() else {
                continue;
            };
            let reinforced = match fields.get_mut("reinforcedInChapters") {
                Some(Value::Array(reinforced)) => reinforced,
                None => {
                    tracing::debug!(promise = %id, "promise has no reinforcement list, skipped");
                    continue;
                }
                Some(_) => return Err(not_an_array("reinforcedInChapters", &id)),
            };
            if append_marker(reinforced, UnitKey::Number(self.unit.number)) {
                report.promises_reinforced += 1;
            }
        }
        Ok(())
    }

    fn add_contributions(
        &self,
        doc: &mut ProjectDocument,
        report: &mut ApplyReport,
    ) -> Result<()> {
        let Some(questions) = doc.thematic_questions_mut() else {
            tracing::debug!("document has no thematic questions");
            return Ok(());
        };

        for question in questions.iter_mut() {
            let theme = match record_id(question)
                .and_then(|id| self.themes.iter().find(|t| t.question_id == id))
            {
                Some(theme) => theme,
                None => continue,
            };
            let Some(fields) = question.as_object_mut() else {
                continue;
            };

            let candidate =
                serde_json::to_value(Contribution::new(self.unit.number, theme.note.as_str()))?;
            let contributions = list_field(fields, "contributions", &theme.question_id)?;
            if append_keyed(
                contributions,
                "unitNumber",
                UnitKey::Number(self.unit.number),
                candidate,
            ) {
                report.contributions_appended += 1;
            }
        }
        Ok(())
    }
}

/// The array stored under `key`; a record lacking it is an invalid document.
fn list_field<'a>(
    fields: &'a mut Map<String, Value>,
    key: &str,
    owner: &str,
) -> Result<&'a mut Vec<Value>> {
    match fields.get_mut(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(not_an_array(key, owner)),
        None => Err(StorylineError::InvalidDocument(format!(
            "'{}' has no '{}' list",
            owner, key
        ))),
    }
}

fn not_an_array(key: &str, owner: &str) -> StorylineError {
    StorylineError::InvalidDocument(format!("'{}' of '{}' is not an array", key, owner))
}
