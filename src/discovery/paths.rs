//! Data directory discovery and project name decoding.

use std::path::PathBuf;

use crate::error::{HistoryError, Result};
use crate::CLAUDE_DIR_NAME;

/// Environment variable that overrides the data directory location.
pub const CLAUDE_DIR_ENV: &str = "CLAUDE_CODE_DIR";

/// Directory names that sit directly under a home directory.
const HOME_LEVEL_DIRS: &[&str] = &["coding", "Documents", "Desktop", "Downloads", "Projects"];

/// Directory names that appear one level below the home-level ones.
const NESTED_DIRS: &[&str] = &["kaggle", "analyze", "workspaces"];

/// Discover the Claude Code data directory.
///
/// Checks locations in order:
/// 1. Environment variable `CLAUDE_CODE_DIR`
/// 2. Home directory (`~/.claude/`)
///
/// Returns the expected home location as the error path when neither exists.
pub fn discover_claude_directory() -> Result<PathBuf> {
    if let Some(env_path) = std::env::var_os(CLAUDE_DIR_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let home = home_directory().ok_or_else(|| HistoryError::ClaudeDirectoryNotFound {
        expected_path: PathBuf::from("~").join(CLAUDE_DIR_NAME),
    })?;

    let home_path = home.join(CLAUDE_DIR_NAME);
    if home_path.exists() {
        return Ok(home_path);
    }

    Err(HistoryError::ClaudeDirectoryNotFound {
        expected_path: home_path,
    })
}

/// Get the user's home directory.
pub fn home_directory() -> Option<PathBuf> {
    directories::UserDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Turn an encoded project directory name into a readable path.
///
/// Claude Code stores `/Users/me/coding/my-app` as `-Users-me-coding-my-app`,
/// which cannot be reversed exactly. For macOS home paths the usual container
/// directories are recognised and the first unrecognised part starts the
/// (possibly hyphenated) project name. Other names are shown unchanged.
///
/// `-Users-me-coding-my-app` → `/Users/me/coding/my-app`
#[must_use]
pub fn project_display_name(encoded: &str) -> String {
    let Some(rest) = encoded.strip_prefix("-Users-") else {
        return encoded.to_string();
    };

    let parts: Vec<&str> = rest.split('-').collect();
    let mut path_parts: Vec<String> = vec!["/Users".to_string(), parts[0].to_string()];
    let mut depth = 2;

    let mut i = 1;
    while i < parts.len() {
        let part = parts[i];

        let is_dir = (depth <= 3 && HOME_LEVEL_DIRS.contains(&part))
            || (depth == 3 && NESTED_DIRS.contains(&part))
            || (depth == 4 && part == "competitions")
            || (depth == 5 && part == "math");

        if is_dir {
            path_parts.push(part.to_string());
            depth += 1;
        } else if depth == 3 && part == "classum" {
            // Container whose children are all hyphenated names.
            path_parts.push(part.to_string());
            let remaining = parts[i + 1..].join("-");
            if !remaining.is_empty() {
                path_parts.push(remaining);
            }
            break;
        } else {
            path_parts.push(parts[i..].join("-"));
            break;
        }
        i += 1;
    }

    path_parts.join("/")
}
