pub mod batch;
pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod merge;
pub mod storage;
pub mod summary;

pub use batch::{chapter_19, ApplyReport, UpdateBatch};
pub use config::Config;
pub use error::{Result, StorylineError};
pub use storage::ProjectDocument;
