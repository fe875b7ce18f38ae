//! Transcript rendering.
//!
//! Writes a linear, colored transcript of a session to any writer.

use std::io::Write;

use crate::error::{HistoryError, Result};
use crate::menu::Theme;
use crate::model::{Role, TranscriptMessage};

/// Default width of the header rule.
pub const DEFAULT_SEPARATOR_WIDTH: usize = 80;

/// Renders transcripts as human-readable text.
#[derive(Debug, Clone)]
pub struct TranscriptRenderer {
    theme: Theme,
    separator_width: usize,
}

impl Default for TranscriptRenderer {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl TranscriptRenderer {
    /// Create a renderer with the given theme.
    #[must_use]
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            separator_width: DEFAULT_SEPARATOR_WIDTH,
        }
    }

    /// Set the width of the `=` rule under the header.
    #[must_use]
    pub fn with_separator_width(mut self, width: usize) -> Self {
        self.separator_width = width;
        self
    }

    /// Write the header and every message.
    pub fn render<W: Write>(
        &self,
        writer: &mut W,
        messages: &[TranscriptMessage],
        project: &str,
        file_name: &str,
    ) -> Result<()> {
        self.write_transcript(writer, messages, project, file_name)
            .map_err(|e| HistoryError::io("Failed to write transcript", e))
    }

    fn write_transcript<W: Write>(
        &self,
        writer: &mut W,
        messages: &[TranscriptMessage],
        project: &str,
        file_name: &str,
    ) -> std::io::Result<()> {
        writeln!(writer, "{}", self.theme.title(&format!("Project: {project}")))?;
        writeln!(writer, "{}", self.theme.title(&format!("File: {file_name}")))?;
        writeln!(writer, "{}", "=".repeat(self.separator_width))?;
        writeln!(writer)?;

        for message in messages {
            match message.role {
                Role::User => {
                    writeln!(writer, "{}", self.theme.user_label("user:"))?;
                    writeln!(writer, "{}", message.content)?;
                }
                Role::Assistant => {
                    writeln!(writer, "{}", self.theme.assistant_label("assistant:"))?;
                    writeln!(writer, "{}", message.content)?;
                }
                Role::Summary => {
                    writeln!(writer, "{}", self.theme.summary(&message.content))?;
                }
            }
            writeln!(writer)?;
        }

        writer.flush()
    }
}
