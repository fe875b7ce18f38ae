//! Raw JSONL record shapes.
//!
//! Only the fields needed to build a transcript are modelled. Everything is
//! optional or defaulted so that records from older and newer Claude Code
//! versions still deserialize.

use serde::Deserialize;
use serde_json::Value;

use super::{Role, TranscriptMessage};

/// One line of a session log.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    /// Human input (and tool results, which are discarded).
    User(ChatRecord),
    /// Claude's response.
    Assistant(ChatRecord),
    /// Context-compaction summary.
    Summary(SummaryRecord),
    /// Any other record type (system, snapshots, queue operations, ...).
    #[serde(other)]
    Other,
}

/// A user or assistant record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRecord {
    /// API message payload.
    #[serde(default)]
    pub message: RecordMessage,
    /// ISO 8601 timestamp, kept verbatim.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The `message` object of a chat record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMessage {
    /// String or content-block array.
    #[serde(default)]
    pub content: MessageContent,
}

/// Message content in any of the shapes seen in logs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain string content.
    Text(String),
    /// Array of content blocks or bare strings.
    Blocks(Vec<Value>),
    /// Anything else (null, numbers, objects).
    Other(Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// A `summary` record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryRecord {
    /// Summary text.
    #[serde(default)]
    pub summary: String,
    /// Timestamp, rarely present on summaries.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Text of a `{"type": "text", "text": ...}` block.
fn text_block(block: &Value) -> Option<&str> {
    let object = block.as_object()?;
    if object.get("type").and_then(Value::as_str) != Some("text") {
        return None;
    }
    object.get("text").and_then(Value::as_str)
}

impl MessageContent {
    /// User-side text: text blocks and bare strings joined by newlines.
    ///
    /// Tool results, other block types and empty text blocks are skipped.
    /// Bare strings are kept even when empty.
    #[must_use]
    pub fn user_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Blocks(blocks) => blocks
                .iter()
                .filter_map(|block| match block {
                    Value::String(s) => Some(s.as_str()),
                    other => text_block(other).filter(|text| !text.is_empty()),
                })
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Other(value) => stringify_scalar(value),
        }
    }

    /// Assistant-side text: text blocks concatenated, nothing else.
    #[must_use]
    pub fn assistant_text(&self) -> String {
        match self {
            Self::Blocks(blocks) => blocks.iter().filter_map(text_block).collect(),
            Self::Text(_) | Self::Other(_) => String::new(),
        }
    }
}

/// Render unusual content values; falsy values (null, false, zero, `{}`) yield nothing.
fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(n) if n.as_f64() == Some(0.0) => String::new(),
        Value::Object(map) if map.is_empty() => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl LogRecord {
    /// Reduce the record to a transcript entry, if it carries visible text.
    #[must_use]
    pub fn into_transcript(self) -> Option<TranscriptMessage> {
        let (role, content, timestamp) = match self {
            Self::User(record) => (Role::User, record.message.content.user_text(), record.timestamp),
            Self::Assistant(record) => (
                Role::Assistant,
                record.message.content.assistant_text(),
                record.timestamp,
            ),
            Self::Summary(record) => {
                if record.summary.is_empty() {
                    return None;
                }
                (
                    Role::Summary,
                    format!("[Summary: {}]", record.summary),
                    record.timestamp,
                )
            }
            Self::Other => return None,
        };

        if content.is_empty() {
            return None;
        }

        Some(TranscriptMessage {
            role,
            content,
            timestamp,
        })
    }
}
