//! Project discovery.
//!
//! A project in Claude Code corresponds to a working directory.
//! Project data is stored in `~/.claude/projects/<encoded-path>/`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{HistoryError, Result};

use super::paths::project_display_name;
use super::session::{is_session_file, Session};

/// A Claude Code project directory.
#[derive(Debug, Clone)]
pub struct Project {
    /// Path to the project directory in ~/.claude/projects/.
    path: PathBuf,
    /// Encoded directory name.
    encoded_name: String,
    /// Readable project path.
    display_name: String,
}

impl Project {
    /// Create a Project from its directory path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.is_dir() {
            return Err(HistoryError::FileNotFound { path });
        }

        let encoded_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| HistoryError::FileNotFound { path: path.clone() })?;
        let display_name = project_display_name(&encoded_name);

        Ok(Self {
            path,
            encoded_name,
            display_name,
        })
    }

    /// Get the path to the project directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the encoded directory name.
    #[must_use]
    pub fn encoded_name(&self) -> &str {
        &self.encoded_name
    }

    /// Readable project path, used as the menu label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// List sessions, newest first.
    pub fn sessions(&self) -> Result<Vec<Session>> {
        let mut sessions = Vec::new();

        for entry in std::fs::read_dir(&self.path).map_err(|e| {
            HistoryError::io(
                format!("Failed to read project directory: {}", self.path.display()),
                e,
            )
        })? {
            let entry = entry.map_err(|e| HistoryError::io("Failed to read directory entry", e))?;

            let path = entry.path();
            if !is_session_file(&path) {
                continue;
            }
            match Session::from_path(&path) {
                Ok(session) => sessions.push(session),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable session"),
            }
        }

        sessions.sort_by(|a, b| b.modified_time().cmp(&a.modified_time()));
        debug!(project = %self.display_name, count = sessions.len(), "Listed sessions");

        Ok(sessions)
    }
}
