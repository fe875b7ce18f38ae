//! Error types for cchistory.
//!
//! Errors follow the thiserror pattern. Each variant carries enough context to
//! be shown to the user directly, and maps to a process exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for cchistory operations.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// The terminal input stream is closed or unreadable.
    #[error("Terminal input is unavailable")]
    InputUnavailable,

    /// The terminal mode could not be switched or restored.
    #[error("Terminal mode error: {context}")]
    TerminalMode {
        /// Which mode change failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Claude directory not found.
    #[error("Claude Code data directory not found. Expected at: {expected_path}")]
    ClaudeDirectoryNotFound {
        /// Expected path to Claude Code data directory.
        expected_path: PathBuf,
    },

    /// The projects subdirectory is missing.
    #[error("Claude projects directory not found at {path}")]
    ProjectsDirectoryNotFound {
        /// Expected projects directory.
        path: PathBuf,
    },

    /// The projects directory contains no projects.
    #[error("No projects found in {path}")]
    NoProjects {
        /// Projects directory that was scanned.
        path: PathBuf,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Permission denied when accessing a file or directory.
    #[error("Permission denied: {path}")]
    PermissionDenied {
        /// Path where access was denied.
        path: PathBuf,
    },

    /// I/O error.
    #[error("I/O error: {context}")]
    IoError {
        /// Context describing the operation that failed.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Human-readable error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Human-readable error message.
        message: String,
    },
}

impl HistoryError {
    /// Create a new I/O error with context.
    #[must_use]
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            context: context.into(),
            source,
        }
    }

    /// Create a new terminal mode error with context.
    #[must_use]
    pub fn terminal(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::TerminalMode {
            context: context.into(),
            source,
        }
    }

    /// Map a failed file open to the most specific variant.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            _ => Self::io(format!("Failed to open {}", path.display()), source),
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ClaudeDirectoryNotFound { .. }
            | Self::ProjectsDirectoryNotFound { .. }
            | Self::NoProjects { .. } => exit_codes::EXIT_GENERAL_ERROR,
            Self::FileNotFound { .. } => exit_codes::EXIT_FILE_NOT_FOUND,
            Self::PermissionDenied { .. } => exit_codes::EXIT_PERMISSION_DENIED,
            Self::ConfigError { .. } | Self::InvalidConfig { .. } => exit_codes::EXIT_CONFIG_ERROR,
            Self::IoError { .. } | Self::TerminalMode { .. } => exit_codes::EXIT_IO_ERROR,
            Self::InputUnavailable => exit_codes::EXIT_SUCCESS,
        }
    }

    /// Whether a menu should treat this error as the user quitting.
    #[must_use]
    pub const fn is_quit_equivalent(&self) -> bool {
        matches!(self, Self::InputUnavailable)
    }
}

/// Result type alias for cchistory operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Exit codes for CLI operations.
pub mod exit_codes {
    /// Operation completed successfully.
    pub const EXIT_SUCCESS: i32 = 0;
    /// General error, including a missing data directory.
    pub const EXIT_GENERAL_ERROR: i32 = 1;
    /// Specified file not found.
    pub const EXIT_FILE_NOT_FOUND: i32 = 3;
    /// Insufficient permissions.
    pub const EXIT_PERMISSION_DENIED: i32 = 4;
    /// Invalid configuration.
    pub const EXIT_CONFIG_ERROR: i32 = 5;
    /// I/O error (BSD standard).
    pub const EXIT_IO_ERROR: i32 = 74;
}
