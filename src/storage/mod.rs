mod json_store;

pub use json_store::{
    record_id, ProjectDocument, NARRATIVE_LINES, PROMISES, STORY_UNITS, THEMATIC_QUESTIONS,
};
