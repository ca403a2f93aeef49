use std::fs;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::{Result, StorylineError};

pub const NARRATIVE_LINES: &str = "narrativeLines";
pub const STORY_UNITS: &str = "storyUnits";
pub const PROMISES: &str = "promises";
pub const THEMATIC_QUESTIONS: &str = "thematicQuestions";
const UPDATED_AT: &str = "updatedAt";

/// The project document, held whole in memory.
///
/// The root object keeps its key order and untouched numbers keep their exact
/// text, so records the caller never touches are written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDocument {
    root: Map<String, Value>,
}

impl ProjectDocument {
    /// Read and parse the document at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let doc = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded project document");
        Ok(doc)
    }

    /// Parse a document from JSON text
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(StorylineError::InvalidDocument(format!(
                "expected an object at the root, found {}",
                value_kind(&other)
            ))),
        }
    }

    /// Serialize with two-space indentation; non-ASCII text is kept literal.
    pub fn to_pretty_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.root)?)
    }

    /// Write the document to `path` in one step.
    ///
    /// The text goes to a fresh temporary file in the same directory, which
    /// takes over the permissions of the existing document and is then
    /// renamed over `path`. A failed run never leaves a half-written document.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.to_pretty_string()?;
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        if let Ok(meta) = fs::metadata(path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "saved project document");
        Ok(())
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn narrative_lines(&self) -> Result<&[Value]> {
        self.required(NARRATIVE_LINES)
    }

    pub fn narrative_lines_mut(&mut self) -> Result<&mut Vec<Value>> {
        self.required_mut(NARRATIVE_LINES)
    }

    pub fn story_units(&self) -> Result<&[Value]> {
        self.required(STORY_UNITS)
    }

    pub fn story_units_mut(&mut self) -> Result<&mut Vec<Value>> {
        self.required_mut(STORY_UNITS)
    }

    /// `None` when the document has no promises
    pub fn promises_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.optional_mut(PROMISES)
    }

    /// `None` when the document has no thematic questions
    pub fn thematic_questions_mut(&mut self) -> Option<&mut Vec<Value>> {
        self.optional_mut(THEMATIC_QUESTIONS)
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.root.get(UPDATED_AT).and_then(Value::as_str)
    }

    pub fn set_updated_at(&mut self, timestamp: &str) {
        self.root.insert(UPDATED_AT.to_string(), Value::from(timestamp));
    }

    fn required(&self, key: &'static str) -> Result<&[Value]> {
        match self.root.get(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StorylineError::MissingCollection(key)),
        }
    }

    fn required_mut(&mut self, key: &'static str) -> Result<&mut Vec<Value>> {
        match self.root.get_mut(key) {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(StorylineError::MissingCollection(key)),
        }
    }

    fn optional_mut(&mut self, key: &str) -> Option<&mut Vec<Value>> {
        match self.root.get_mut(key) {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        }
    }
}

/// The `id` of a record, if it has a string one
pub fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
  "name": "Les vestiges",
  "narrativeLines": [
    {
      "id": "line-guerre",
      "weight": 0.6,
      "status": "dormant",
      "history": []
    }
  ],
  "storyUnits": [],
  "updatedAt": "2026-02-18T06:00:00.000Z"
}"#;

    #[test]
    fn test_parse_and_access_collections() {
        let mut doc = ProjectDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.narrative_lines().unwrap().len(), 1);
        assert!(doc.story_units().unwrap().is_empty());
        assert!(doc.promises_mut().is_none());
        assert!(doc.thematic_questions_mut().is_none());
        assert_eq!(doc.updated_at(), Some("2026-02-18T06:00:00.000Z"));
    }

    #[test]
    fn test_missing_required_collection() {
        let mut doc = ProjectDocument::parse(r#"{"narrativeLines": []}"#).unwrap();
        match doc.story_units_mut() {
            Err(StorylineError::MissingCollection(name)) => assert_eq!(name, "storyUnits"),
            other => panic!("Expected MissingCollection, got {:?}", other),
        }
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let err = ProjectDocument::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, StorylineError::InvalidDocument(_)));
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = ProjectDocument::parse("{\"narrativeLines\": [").unwrap_err();
        assert!(matches!(err, StorylineError::Json(_)));
    }

    #[test]
    fn test_pretty_output_matches_input_layout() {
        let doc = ProjectDocument::parse(SAMPLE).unwrap();
        let text = doc.to_pretty_string().unwrap();
        assert_eq!(text, SAMPLE);
    }

    #[test]
    fn test_non_ascii_is_written_literally() {
        let doc = ProjectDocument::parse(r#"{"name":"Scène d'ouverture — Épilogue"}"#).unwrap();
        let text = doc.to_pretty_string().unwrap();
        assert!(text.contains("Scène d'ouverture — Épilogue"));
        assert!(!text.contains("\\u"));
    }

    #[test]
    fn test_save_replaces_file_and_leaves_no_temp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.json");
        fs::write(&path, SAMPLE).unwrap();

        let mut doc = ProjectDocument::open(&path).unwrap();
        doc.set_updated_at("2026-02-19T06:00:00.000Z");
        doc.save(&path).unwrap();

        let reopened = ProjectDocument::open(&path).unwrap();
        assert_eq!(reopened.updated_at(), Some("2026-02-19T06:00:00.000Z"));
        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_save_keeps_stray_files_next_to_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.json");
        let stray = tmp.path().join(".project.json.tmp");
        fs::write(&path, SAMPLE).unwrap();
        fs::write(&stray, "brouillon").unwrap();

        ProjectDocument::open(&path).unwrap().save(&path).unwrap();

        assert_eq!(fs::read_to_string(&stray).unwrap(), "brouillon");
        assert_eq!(fs::read_to_string(&path).unwrap(), SAMPLE);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("project.json");
        fs::write(&path, SAMPLE).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        ProjectDocument::open(&path).unwrap().save(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn test_numbers_keep_their_text() {
        let text = r#"{
  "wordCount": 123456789012345678901234,
  "ratio": 0.1,
  "negative": -18446744073709551617
}"#;
        let doc = ProjectDocument::parse(text).unwrap();
        assert_eq!(doc.to_pretty_string().unwrap(), text);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let tmp = TempDir::new().unwrap();
        let err = ProjectDocument::open(&tmp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StorylineError::Io(_)));
    }

    #[test]
    fn test_record_id() {
        let record = serde_json::json!({"id": "promise-helena-plan"});
        assert_eq!(record_id(&record), Some("promise-helena-plan"));
        assert_eq!(record_id(&serde_json::json!({"id": 3})), None);
    }
}
