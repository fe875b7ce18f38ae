//! cchistory: interactive terminal browser for Claude Code conversation logs.
//!
//! Lists the projects recorded under `~/.claude/projects/`, lets the user pick
//! one and then a session from it, and prints the session as a readable
//! transcript. Navigation is keyboard-driven: arrow keys, page keys, Enter
//! and `q`, read byte-by-byte from a terminal in raw mode.
//!
//! # Architecture
//!
//! - [`menu`]: Raw key input, menu state machine and rendering
//! - [`discovery`]: Data directory, project and session enumeration
//! - [`model`]: Log record types and the transcript message
//! - [`parser`]: Lenient JSONL parsing into transcripts
//! - [`render`]: Transcript output
//! - [`cli`]: Command-line interface and the browse loop
//! - [`config`]: Configuration management
//! - [`error`]: Error types and handling
//!
//! # Example
//!
//! ```rust,no_run
//! use cchistory::{discovery::ClaudeDirectory, parser::TranscriptParser};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let claude_dir = ClaudeDirectory::discover()?;
//!
//!     for project in claude_dir.projects()? {
//!         println!("Project: {}", project.display_name());
//!         for session in project.sessions()? {
//!             let messages = TranscriptParser::new().parse_file(session.path())?;
//!             println!("  {} ({} messages)", session.label(), messages.len());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod menu;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types at the crate root
pub use error::{HistoryError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Default Claude Code data directory name.
pub const CLAUDE_DIR_NAME: &str = ".claude";

/// Projects subdirectory name.
pub const PROJECTS_DIR_NAME: &str = "projects";
