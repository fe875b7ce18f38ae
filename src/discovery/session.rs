//! Session file discovery and metadata.
//!
//! A session corresponds to a single JSONL file containing conversation history.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use tracing::debug;

use crate::error::{HistoryError, Result};
use crate::model::TranscriptMessage;
use crate::parser::TranscriptParser;

/// Extension of session log files.
pub const SESSION_EXTENSION: &str = "jsonl";

/// A Claude Code session file.
#[derive(Debug, Clone)]
pub struct Session {
    /// Path to the JSONL file.
    path: PathBuf,
    /// File name, including extension.
    file_name: String,
    /// Last modification time.
    modified_time: SystemTime,
}

impl Session {
    /// Create a Session from its file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| HistoryError::FileNotFound { path: path.clone() })?;

        let metadata = std::fs::metadata(&path).map_err(|e| HistoryError::open(&path, e))?;
        let modified_time = metadata.modified().map_err(|e| {
            HistoryError::io(format!("Failed to get mtime for {}", path.display()), e)
        })?;

        Ok(Self {
            path,
            file_name,
            modified_time,
        })
    }

    /// Get the path to the session file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Get the last modification time.
    #[must_use]
    pub fn modified_time(&self) -> SystemTime {
        self.modified_time
    }

    /// Modification time in the local timezone.
    #[must_use]
    pub fn modified_local(&self) -> DateTime<Local> {
        DateTime::from(self.modified_time)
    }

    /// Menu label: `YYYY-MM-DD HH:MM - <file name>`.
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.modified_local().format("%Y-%m-%d %H:%M"),
            self.file_name
        )
    }

    /// Parse the session into a transcript.
    pub fn transcript(&self) -> Result<Vec<TranscriptMessage>> {
        let mut parser = TranscriptParser::new();
        let messages = parser.parse_file(&self.path)?;
        debug!(
            session = %self.file_name,
            messages = messages.len(),
            malformed = parser.stats().malformed_lines,
            "Loaded transcript"
        );
        Ok(messages)
    }
}

/// Check if a path looks like a visible session log.
#[must_use]
pub fn is_session_file(path: &Path) -> bool {
    let visible = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| !n.starts_with('.'));

    visible
        && path.extension().is_some_and(|ext| ext == SESSION_EXTENSION)
        && path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let session = dir.path().join("abc.jsonl");
        let hidden = dir.path().join(".abc.jsonl");
        let other = dir.path().join("notes.txt");
        let folder = dir.path().join("nested.jsonl");
        for path in [&session, &hidden, &other] {
            std::fs::write(path, "").unwrap();
        }
        std::fs::create_dir(&folder).unwrap();

        assert!(is_session_file(&session));
        assert!(!is_session_file(&hidden));
        assert!(!is_session_file(&other));
        assert!(!is_session_file(&folder));
    }

    #[test]
    fn test_label_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("40afc8a7.jsonl");
        std::fs::write(&path, "").unwrap();

        let session = Session::from_path(&path).unwrap();
        let label = session.label();

        assert!(label.ends_with(" - 40afc8a7.jsonl"));
        // "YYYY-MM-DD HH:MM"
        let stamp = label.split(" - ").next().unwrap();
        assert_eq!(stamp.len(), 16);
        assert!(chrono::NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d %H:%M").is_ok());
    }

    #[test]
    fn test_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.jsonl");
        std::fs::write(
            &path,
            r#"{"type":"user","message":{"content":"hello"}}"#,
        )
        .unwrap();

        let session = Session::from_path(&path).unwrap();
        let messages = session.transcript().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].content, "hello");
    }
}
