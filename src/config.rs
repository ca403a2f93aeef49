use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the project document lives unless told otherwise, relative to the working directory.
pub const DEFAULT_PROJECT_PATH: &str = "data/project.json";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the project document to update
    pub project_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_path: PathBuf::from(DEFAULT_PROJECT_PATH),
        }
    }
}

impl Config {
    /// Default config, with the project path overridden when one is given.
    pub fn with_project(project: Option<PathBuf>) -> Self {
        match project {
            Some(project_path) => Self { project_path },
            None => Self::default(),
        }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// File name of the project document, for console messages
    pub fn file_name(&self) -> String {
        self.project_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.project_path.display().to_string())
    }
}
