//! Project and session discovery for Claude Code data.
//!
//! This module locates the Claude Code data directory and enumerates:
//! - Project directories under `~/.claude/projects/`
//! - Session logs (`*.jsonl`) inside each project
//! - Readable names for encoded project directories

mod paths;
mod project;
mod session;

pub use paths::*;
pub use project::*;
pub use session::*;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::PROJECTS_DIR_NAME;

/// Claude Code data directory manager.
#[derive(Debug, Clone)]
pub struct ClaudeDirectory {
    /// Root path to the .claude directory.
    root: PathBuf,
    /// Projects subdirectory.
    projects_dir: PathBuf,
}

impl ClaudeDirectory {
    /// Create from an explicit path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let root = path.as_ref().to_path_buf();

        if !root.exists() {
            return Err(HistoryError::ClaudeDirectoryNotFound {
                expected_path: root,
            });
        }

        let projects_dir = root.join(PROJECTS_DIR_NAME);
        Ok(Self { root, projects_dir })
    }

    /// Auto-discover the Claude Code data directory.
    pub fn discover() -> Result<Self> {
        let path = discover_claude_directory()?;
        Self::from_path(path)
    }

    /// Get the root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the projects directory path.
    #[must_use]
    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    /// List all projects, sorted by directory name.
    ///
    /// Fails with [`HistoryError::ProjectsDirectoryNotFound`] when the
    /// `projects/` subdirectory is missing.
    pub fn projects(&self) -> Result<Vec<Project>> {
        if !self.projects_dir.is_dir() {
            return Err(HistoryError::ProjectsDirectoryNotFound {
                path: self.projects_dir.clone(),
            });
        }

        let mut projects = Vec::new();

        for entry in std::fs::read_dir(&self.projects_dir).map_err(|e| {
            HistoryError::io(
                format!(
                    "Failed to read projects directory: {}",
                    self.projects_dir.display()
                ),
                e,
            )
        })? {
            let entry = entry.map_err(|e| HistoryError::io("Failed to read directory entry", e))?;

            let path = entry.path();
            if path.is_dir() {
                match Project::from_path(&path) {
                    Ok(project) => projects.push(project),
                    Err(e) => debug!(path = %path.display(), error = %e, "Skipping project"),
                }
            }
        }

        projects.sort_by(|a, b| a.encoded_name().cmp(b.encoded_name()));
        debug!(count = projects.len(), "Discovered projects");

        Ok(projects)
    }
}
