//! Interactive browse command.
//!
//! Project menu → session menu → transcript, repeated until the user quits.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::cli::Cli;
use crate::config::Config;
use crate::discovery::{ClaudeDirectory, Project, Session};
use crate::error::{HistoryError, Result};
use crate::menu::{clear_screen, wait_for_key, KeySource, Menu, MenuOutcome, TerminalKeys, Theme};
use crate::render::TranscriptRenderer;

use super::get_claude_dir;

const PROJECTS_TITLE: &str = "Select a Project";

/// Run the browser on the real terminal.
pub fn run(cli: &Cli, config: &Config, theme: Theme) -> Result<()> {
    let claude_dir = get_claude_dir(cli.claude_dir.as_ref())?;

    let mut keys = TerminalKeys::new();
    let mut stdout = io::stdout();
    Browser::new(&claude_dir, config, theme).run(&mut keys, &mut stdout)
}

/// The three-step browse loop over one data directory.
pub struct Browser<'a> {
    claude_dir: &'a ClaudeDirectory,
    config: &'a Config,
    theme: Theme,
}

impl<'a> Browser<'a> {
    /// Create a browser.
    #[must_use]
    pub fn new(claude_dir: &'a ClaudeDirectory, config: &'a Config, theme: Theme) -> Self {
        Self {
            claude_dir,
            config,
            theme,
        }
    }

    /// Loop until the user quits from a menu.
    ///
    /// Fails with [`HistoryError::NoProjects`] when there is nothing to browse.
    pub fn run<K, W>(&self, keys: &mut K, out: &mut W) -> Result<()>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        loop {
            let projects = self.claude_dir.projects()?;
            if projects.is_empty() {
                return Err(HistoryError::NoProjects {
                    path: self.claude_dir.projects_dir().to_path_buf(),
                });
            }

            let Some(project) = self.pick_project(&projects, keys, out)? else {
                info!("Quit from project menu");
                return Ok(());
            };

            let sessions = project.sessions()?;
            if sessions.is_empty() {
                self.notice(out, "No conversations found in this project")?;
                self.prompt(out, "Press any key to continue...")?;
                wait_for_key(keys)?;
                continue;
            }

            let Some(session) = self.pick_session(project, &sessions, keys, out)? else {
                info!("Quit from session menu");
                return Ok(());
            };

            self.show_transcript(project, session, keys, out)?;
        }
    }

    fn pick_project<'p, K, W>(
        &self,
        projects: &'p [Project],
        keys: &mut K,
        out: &mut W,
    ) -> Result<Option<&'p Project>>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        let labels: Vec<&str> = projects.iter().map(Project::display_name).collect();
        let page_size = self.config.menu.project_page_size.max(1);

        let outcome = Menu::new(&labels, PROJECTS_TITLE)
            .with_pagination(labels.len() > page_size, page_size)
            .with_theme(self.theme)
            .run(keys, out)?;

        Ok(match outcome {
            MenuOutcome::Selected(index) => projects.get(index),
            MenuOutcome::Quit => None,
        })
    }

    fn pick_session<'s, K, W>(
        &self,
        project: &Project,
        sessions: &'s [Session],
        keys: &mut K,
        out: &mut W,
    ) -> Result<Option<&'s Session>>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        let labels: Vec<String> = sessions.iter().map(Session::label).collect();
        let title = format!("Select a Conversation from {}", project.display_name());
        let page_size = self.config.menu.session_page_size.max(1);

        let outcome = Menu::new(&labels, &title)
            .with_pagination(labels.len() > page_size, page_size)
            .with_theme(self.theme)
            .run(keys, out)?;

        Ok(match outcome {
            MenuOutcome::Selected(index) => sessions.get(index),
            MenuOutcome::Quit => None,
        })
    }

    fn show_transcript<K, W>(
        &self,
        project: &Project,
        session: &Session,
        keys: &mut K,
        out: &mut W,
    ) -> Result<()>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        let (messages, failure) = match session.transcript() {
            Ok(messages) => (messages, None),
            Err(e) => {
                warn!(session = session.file_name(), error = %e, "Could not read session");
                (Vec::new(), Some(e))
            }
        };

        clear_screen(out)?;
        if messages.is_empty() {
            if let Some(e) = failure {
                writeln!(out, "{}", self.theme.error(&format!("Error reading file: {e}")))
                    .map_err(|e| HistoryError::io("Failed to write output", e))?;
            }
            writeln!(out, "{}", self.theme.warning("No messages found in this conversation"))
                .map_err(|e| HistoryError::io("Failed to write output", e))?;
            self.prompt(out, "Press any key to continue...")?;
        } else {
            TranscriptRenderer::new(self.theme)
                .with_separator_width(self.config.display.separator_width)
                .render(out, &messages, project.display_name(), session.file_name())?;
            writeln!(out).map_err(|e| HistoryError::io("Failed to write output", e))?;
            self.prompt(out, "Press any key to return to menu...")?;
        }

        wait_for_key(keys)
    }

    fn notice<W: Write>(&self, out: &mut W, text: &str) -> Result<()> {
        clear_screen(out)?;
        writeln!(out, "{}", self.theme.warning(text))
            .map_err(|e| HistoryError::io("Failed to write output", e))
    }

    fn prompt<W: Write>(&self, out: &mut W, text: &str) -> Result<()> {
        writeln!(out, "{}", self.theme.hint(text))
            .and_then(|()| out.flush())
            .map_err(|e| HistoryError::io("Failed to write output", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::ReaderKeys;
    use crate::PROJECTS_DIR_NAME;
    use std::path::Path;

    const ENTER: &[u8] = b"\r";

    fn claude_fixture() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join(PROJECTS_DIR_NAME)).unwrap();
        root
    }

    fn add_project(root: &Path, name: &str) -> std::path::PathBuf {
        let dir = root.join(PROJECTS_DIR_NAME).join(name);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn browse(root: &Path, input: &[u8]) -> (Result<()>, String) {
        let claude = ClaudeDirectory::from_path(root).unwrap();
        let config = Config::default();
        let mut keys = ReaderKeys::new(input);
        let mut out = Vec::new();
        let result = Browser::new(&claude, &config, Theme::plain()).run(&mut keys, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_no_projects() {
        let root = claude_fixture();
        let (result, _) = browse(root.path(), b"");
        let err = result.unwrap_err();
        assert!(matches!(err, HistoryError::NoProjects { .. }));
        assert!(err.to_string().starts_with("No projects found in "));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_quit_from_project_menu() {
        let root = claude_fixture();
        add_project(root.path(), "-Users-me-coding-app");

        let (result, out) = browse(root.path(), b"q");
        result.unwrap();
        assert!(out.contains("Select a Project"));
        assert!(out.contains("▶ /Users/me/coding/app"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_empty_project_returns_to_projects() {
        let root = claude_fixture();
        add_project(root.path(), "-Users-me-coding-app");

        let input = [ENTER, b"x", b"q"].concat();
        let (result, out) = browse(root.path(), &input);
        result.unwrap();
        assert!(out.contains("No conversations found in this project"));
        assert!(out.contains("Press any key to continue..."));
        assert_eq!(out.matches("Select a Project").count(), 2);
    }

    #[test]
    fn test_view_transcript() {
        let root = claude_fixture();
        let dir = add_project(root.path(), "-Users-me-coding-app");
        std::fs::write(
            dir.join("abc.jsonl"),
            concat!(
                r#"{"type":"user","message":{"content":"How do I build?"}}"#,
                "\n",
                r#"{"type":"assistant","message":{"content":[{"type":"text","text":"Run make."}]}}"#,
                "\n",
            ),
        )
        .unwrap();

        // project, session, any key, quit
        let input = [ENTER, ENTER, b" ", b"q"].concat();
        let (result, out) = browse(root.path(), &input);
        result.unwrap();

        assert!(out.contains("Select a Conversation from /Users/me/coding/app"));
        assert!(out.contains("Project: /Users/me/coding/app\nFile: abc.jsonl\n"));
        assert!(out.contains("user:\nHow do I build?\n\nassistant:\nRun make.\n\n\n"));
        assert!(out.contains("Press any key to return to menu..."));
    }

    #[test]
    fn test_empty_transcript() {
        let root = claude_fixture();
        let dir = add_project(root.path(), "scratch");
        std::fs::write(dir.join("empty.jsonl"), "\n").unwrap();

        let input = [ENTER, ENTER, b" ", b"q"].concat();
        let (result, out) = browse(root.path(), &input);
        result.unwrap();
        assert!(out.contains("No messages found in this conversation"));
    }

    #[test]
    fn test_quit_from_session_menu() {
        let root = claude_fixture();
        let dir = add_project(root.path(), "scratch");
        std::fs::write(dir.join("one.jsonl"), "").unwrap();

        let input = [ENTER, b"q"].concat();
        let (result, out) = browse(root.path(), &input);
        result.unwrap();
        assert!(out.contains("Select a Conversation from scratch"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_closed_input_quits() {
        let root = claude_fixture();
        add_project(root.path(), "scratch");
        let (result, _) = browse(root.path(), b"");
        result.unwrap();
    }

    #[test]
    fn test_session_with_binary_line_still_shows() {
        let root = claude_fixture();
        let dir = add_project(root.path(), "scratch");
        let mut bytes = br#"{"type":"user","message":{"content":"still here"}}"#.to_vec();
        bytes.extend_from_slice(b"\n\xff\xfe garbage\n");
        std::fs::write(dir.join("mixed.jsonl"), bytes).unwrap();

        let input = [ENTER, ENTER, b" ", b"q"].concat();
        let (result, out) = browse(root.path(), &input);
        result.unwrap();
        assert!(out.contains("user:\nstill here\n"));
        assert!(out.ends_with("Goodbye!\n"));
    }

    /// Deletes a file just before handing out the key that opens it.
    struct DeleteBefore<'a> {
        keys: ReaderKeys<&'a [u8]>,
        path: std::path::PathBuf,
        reads_left: usize,
    }

    impl KeySource for DeleteBefore<'_> {
        fn read_key(&mut self) -> Result<crate::menu::KeyEvent> {
            if self.reads_left == 0 && self.path.exists() {
                std::fs::remove_file(&self.path).unwrap();
            }
            self.reads_left = self.reads_left.saturating_sub(1);
            self.keys.read_key()
        }
    }

    #[test]
    fn test_vanished_session_reports_error_and_continues() {
        let root = claude_fixture();
        let dir = add_project(root.path(), "scratch");
        let path = dir.join("gone.jsonl");
        std::fs::write(&path, r#"{"type":"user","message":{"content":"hi"}}"#).unwrap();

        let claude = ClaudeDirectory::from_path(root.path()).unwrap();
        let config = Config::default();
        let input = [ENTER, ENTER, b" ", b"q"].concat();
        let mut keys = DeleteBefore {
            keys: ReaderKeys::new(&input[..]),
            path,
            reads_left: 1,
        };
        let mut out = Vec::new();

        Browser::new(&claude, &config, Theme::plain())
            .run(&mut keys, &mut out)
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Error reading file: File not found"));
        assert!(out.contains("No messages found in this conversation"));
        assert!(out.contains("Press any key to continue..."));
        assert!(out.ends_with("Goodbye!\n"));
    }
}
