//! JSONL parsing for Claude Code session logs.
//!
//! Parsing is always lenient: blank lines, lines that are not UTF-8, malformed
//! JSON and records that carry no visible text are skipped and counted, never
//! fatal. Only failing to open or read the file itself is an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use cchistory::parser::TranscriptParser;
//!
//! let mut parser = TranscriptParser::new();
//! let messages = parser.parse_file("session.jsonl")?;
//! println!(
//!     "{} messages, {} malformed lines",
//!     messages.len(),
//!     parser.stats().malformed_lines
//! );
//! # Ok::<(), cchistory::HistoryError>(())
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, instrument, trace, warn};

use crate::error::{HistoryError, Result};
use crate::model::{LogRecord, TranscriptMessage};

/// Statistics about one parse run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Total lines read.
    pub lines_processed: usize,
    /// Lines that produced a transcript message.
    pub messages: usize,
    /// Well-formed records with nothing to show (tool results, system events).
    pub records_skipped: usize,
    /// Lines that were not valid records.
    pub malformed_lines: usize,
    /// Blank lines.
    pub empty_lines: usize,
}

/// Parser turning session logs into transcripts.
#[derive(Debug, Default)]
pub struct TranscriptParser {
    stats: ParseStats,
}

impl TranscriptParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics from the most recent parse.
    #[must_use]
    pub fn stats(&self) -> &ParseStats {
        &self.stats
    }

    /// Parse a session file.
    #[instrument(skip(self), fields(path = %path.as_ref().display()))]
    pub fn parse_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<TranscriptMessage>> {
        let path = path.as_ref();
        debug!("Opening session file");

        let file = File::open(path).map_err(|e| HistoryError::open(path, e))?;
        self.parse_reader(BufReader::new(file))
    }

    /// Parse JSONL from a string.
    pub fn parse_str(&mut self, content: &str) -> Result<Vec<TranscriptMessage>> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse JSONL from a reader.
    ///
    /// Lines are split on raw bytes, so a line that is not valid UTF-8 is
    /// counted as malformed instead of failing the whole read.
    pub fn parse_reader<R: BufRead>(&mut self, mut reader: R) -> Result<Vec<TranscriptMessage>> {
        let mut messages = Vec::new();
        self.stats = ParseStats::default();

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let line_num = self.stats.lines_processed + 1;
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|e| HistoryError::io(format!("Failed to read line {line_num}"), e))?;
            if read == 0 {
                break;
            }
            self.stats.lines_processed += 1;

            if let Some(message) = self.process_line(&buf, line_num) {
                messages.push(message);
            }
        }

        if self.stats.malformed_lines > 0 {
            warn!(
                malformed = self.stats.malformed_lines,
                "Skipped malformed lines"
            );
        }
        debug!(
            messages = self.stats.messages,
            lines = self.stats.lines_processed,
            "Parsing complete"
        );
        Ok(messages)
    }

    fn process_line(&mut self, bytes: &[u8], line_num: usize) -> Option<TranscriptMessage> {
        let Ok(line) = std::str::from_utf8(bytes) else {
            self.stats.malformed_lines += 1;
            trace!(line = line_num, "Line is not valid UTF-8, skipping");
            return None;
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.stats.empty_lines += 1;
            return None;
        }

        match Self::parse_line(trimmed) {
            Ok(record) => {
                let message = record.into_transcript();
                match message {
                    Some(_) => self.stats.messages += 1,
                    None => self.stats.records_skipped += 1,
                }
                message
            }
            Err(e) => {
                self.stats.malformed_lines += 1;
                trace!(line = line_num, error = %e, "Malformed line, skipping");
                None
            }
        }
    }

    /// Parse a single JSON line into a record.
    pub fn parse_line(line: &str) -> std::result::Result<LogRecord, serde_json::Error> {
        serde_json::from_str(line)
    }
}
