//! Data model for Claude Code session logs.
//!
//! Session files are JSONL: one [`LogRecord`] per line. For display, each
//! record is reduced to at most one [`TranscriptMessage`].

pub mod record;

pub use record::*;

use std::fmt;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Human input.
    User,
    /// Claude's response.
    Assistant,
    /// Context summary inserted by compaction.
    Summary,
}

impl Role {
    /// Lowercase label used in the transcript.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry of a linear transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptMessage {
    /// Speaker.
    pub role: Role,
    /// Display text, never empty.
    pub content: String,
    /// Original timestamp string, if the record had one.
    pub timestamp: Option<String>,
}
