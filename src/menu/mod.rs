//! Interactive paginated selection menu.
//!
//! The menu loop is strictly sequential: draw a frame, block on one key from a
//! [`KeySource`], apply it to the [`MenuState`], repeat. It ends only when the
//! user confirms an item or quits.
//!
//! # Example
//!
//! ```rust,no_run
//! use cchistory::menu::{run_menu, MenuOutcome, Theme};
//!
//! let items = vec!["first".to_string(), "second".to_string()];
//! match run_menu(&items, "Pick one", false, 10, Theme::default())? {
//!     MenuOutcome::Selected(index) => println!("picked {}", items[index]),
//!     MenuOutcome::Quit => {}
//! }
//! # Ok::<(), cchistory::HistoryError>(())
//! ```

mod input;
mod signals;
mod state;
mod theme;

pub use input::{
    decode_key, CrosstermMode, KeyEvent, KeySource, RawModeGuard, ReaderKeys, TerminalKeys,
    TerminalMode,
};
pub use signals::{exit_code_for, finish_after_signal, install_signal_handlers};
pub use state::{MenuState, Transition};
pub use theme::Theme;

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use tracing::{debug, warn};

use crate::error::{HistoryError, Result};

/// How a menu invocation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Index of the chosen item in the original list.
    Selected(usize),
    /// The user quit, or input went away.
    Quit,
}

const NAV_HELP: &str = "Use ↑/↓ arrows to navigate, Enter to select, 'q' to quit";
const NAV_HELP_PAGED: &str =
    "Use ↑/↓ arrows to navigate, PgUp/PgDn for pages, Enter to select, 'q' to quit";

/// A menu over a borrowed list of display labels.
#[derive(Debug, Clone)]
pub struct Menu<'a, S> {
    items: &'a [S],
    title: &'a str,
    paginate: bool,
    items_per_page: usize,
    theme: Theme,
}

impl<'a, S: AsRef<str>> Menu<'a, S> {
    /// Create an unpaginated menu. `items` must not be empty.
    pub fn new(items: &'a [S], title: &'a str) -> Self {
        Self {
            items,
            title,
            paginate: false,
            items_per_page: items.len(),
            theme: Theme::default(),
        }
    }

    /// Request pagination with the given page size.
    ///
    /// Ignored when every item fits on one page.
    #[must_use]
    pub fn with_pagination(mut self, enabled: bool, items_per_page: usize) -> Self {
        self.paginate = enabled;
        self.items_per_page = items_per_page;
        self
    }

    /// Set the styling palette.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Run the menu until a selection or quit.
    ///
    /// Unavailable input counts as quitting. Terminal mode and output
    /// failures are returned to the caller.
    pub fn run<K, W>(&self, keys: &mut K, out: &mut W) -> Result<MenuOutcome>
    where
        K: KeySource + ?Sized,
        W: Write,
    {
        let mut state = MenuState::new(self.items.len(), self.paginate, self.items_per_page);
        debug!(
            items = state.total_items(),
            pages = state.total_pages(),
            paginated = state.is_paginated(),
            "Starting menu"
        );

        loop {
            self.render(&state, out)?;

            let key = match keys.read_key() {
                Ok(key) => key,
                Err(e) if e.is_quit_equivalent() => {
                    warn!("Input closed while menu was open, quitting");
                    KeyEvent::Quit
                }
                Err(e) => return Err(e),
            };

            match state.apply(key) {
                Transition::Select(index) => return Ok(MenuOutcome::Selected(index)),
                Transition::Quit => {
                    self.farewell(out)?;
                    return Ok(MenuOutcome::Quit);
                }
                Transition::Moved | Transition::Unchanged => {}
            }
        }
    }

    /// Draw one full frame for `state`.
    pub fn render<W: Write>(&self, state: &MenuState, out: &mut W) -> Result<()> {
        self.draw(state, out)
            .map_err(|e| HistoryError::io("Failed to draw menu", e))
    }

    fn draw<W: Write>(&self, state: &MenuState, out: &mut W) -> io::Result<()> {
        let theme = &self.theme;
        write_clear(out)?;

        if !self.title.is_empty() {
            writeln!(out, "{}", theme.title(self.title))?;
            writeln!(out, "{}", "=".repeat(self.title.chars().count()))?;
            writeln!(out)?;
        }

        if state.is_paginated() {
            writeln!(out, "{}", theme.instructions(NAV_HELP_PAGED))?;
            let indicator = format!(
                "Page {}/{} (Total: {} items)",
                state.current_page() + 1,
                state.total_pages(),
                state.total_items()
            );
            writeln!(out, "{}", theme.page_indicator(&indicator))?;
        } else {
            writeln!(out, "{}", theme.instructions(NAV_HELP))?;
        }
        writeln!(out)?;

        for index in state.page_range() {
            let label = self.items[index].as_ref();
            if index == state.selected_index() {
                writeln!(out, "{}", theme.selected(&format!("▶ {label}")))?;
            } else {
                writeln!(out, "  {label}")?;
            }
        }

        out.flush()
    }

    fn farewell<W: Write>(&self, out: &mut W) -> Result<()> {
        clear_screen(out)?;
        writeln!(out, "Goodbye!")
            .and_then(|()| out.flush())
            .map_err(|e| HistoryError::io("Failed to write farewell", e))
    }
}

/// Run a menu on the real terminal, reading keys from stdin.
pub fn run_menu<S: AsRef<str>>(
    items: &[S],
    title: &str,
    paginate: bool,
    items_per_page: usize,
    theme: Theme,
) -> Result<MenuOutcome> {
    let mut keys = TerminalKeys::new();
    let mut stdout = io::stdout();
    Menu::new(items, title)
        .with_pagination(paginate, items_per_page)
        .with_theme(theme)
        .run(&mut keys, &mut stdout)
}

fn write_clear<W: Write>(out: &mut W) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))
}

/// Clear the screen and home the cursor.
pub fn clear_screen<W: Write>(out: &mut W) -> Result<()> {
    write_clear(out)
        .and_then(|()| out.flush())
        .map_err(|e| HistoryError::io("Failed to clear screen", e))
}

/// Block until any key is pressed.
///
/// Closed input is not an error here; the caller simply continues.
pub fn wait_for_key<K: KeySource + ?Sized>(keys: &mut K) -> Result<()> {
    match keys.read_key() {
        Ok(_) => Ok(()),
        Err(e) if e.is_quit_equivalent() => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CLEAR: &str = "\u{1b}[2J\u{1b}[1;1H";

    fn labels(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("item {i}")).collect()
    }

    fn run_scripted(menu: &Menu<'_, String>, input: &[u8]) -> (MenuOutcome, String) {
        let mut keys = ReaderKeys::new(input);
        let mut out = Vec::new();
        let outcome = menu.run(&mut keys, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    /// Frames drawn during a run, without the clear sequence.
    fn frames(output: &str) -> Vec<&str> {
        output.split(CLEAR).filter(|f| !f.is_empty()).collect()
    }

    struct BrokenTerminal;

    impl KeySource for BrokenTerminal {
        fn read_key(&mut self) -> Result<KeyEvent> {
            Err(HistoryError::terminal(
                "Failed to restore terminal mode",
                io::Error::other("tcsetattr failed"),
            ))
        }
    }

    #[test]
    fn test_frame_layout() {
        let items = vec!["alpha".to_string(), "beta".to_string()];
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let state = MenuState::new(items.len(), false, 10);

        let mut out = Vec::new();
        menu.render(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            format!(
                "{CLEAR}Pick\n====\n\n{NAV_HELP}\n\n▶ alpha\n  beta\n"
            )
        );
    }

    #[test]
    fn test_paginated_frame_shows_only_current_page() {
        let items = labels(25);
        let menu = Menu::new(&items, "Sessions")
            .with_pagination(true, 10)
            .with_theme(Theme::plain());
        let mut state = MenuState::new(items.len(), true, 10);
        state.apply(KeyEvent::PageDown);
        state.apply(KeyEvent::PageDown);

        let mut out = Vec::new();
        menu.render(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(NAV_HELP_PAGED));
        assert!(text.contains("Page 3/3 (Total: 25 items)"));
        assert!(text.contains("▶ item 20\n"));
        assert!(text.contains("  item 24\n"));
        assert!(!text.contains("item 19"));
    }

    #[test]
    fn test_untitled_menu_has_no_heading() {
        let items = labels(2);
        let menu = Menu::new(&items, "").with_theme(Theme::plain());
        let state = MenuState::new(2, false, 2);

        let mut out = Vec::new();
        menu.render(&state, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with(&format!("{CLEAR}{NAV_HELP}")));
        assert!(!text.contains('='));
    }

    #[test]
    fn test_enter_selects_first_item() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let (outcome, output) = run_scripted(&menu, b"\r");
        assert_eq!(outcome, MenuOutcome::Selected(0));
        assert_eq!(frames(&output).len(), 1);
    }

    #[test]
    fn test_navigation_then_enter() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let (outcome, output) = run_scripted(&menu, b"\x1b[B\x1b[Bx\x1b[B\r");
        assert_eq!(outcome, MenuOutcome::Selected(2));

        // one frame per key, plus the initial one
        let frames = frames(&output);
        assert_eq!(frames.len(), 5);
        assert!(frames[1].contains("▶ item 1"));
        assert!(frames[3].contains("▶ item 2"));
    }

    #[test]
    fn test_paged_navigation_scenario() {
        let items = labels(25);
        let menu = Menu::new(&items, "Pick")
            .with_pagination(true, 10)
            .with_theme(Theme::plain());
        let mut script = b"\x1b[B".repeat(10);
        script.extend_from_slice(b"\x1b[6~\x1b[A\n");

        let (outcome, output) = run_scripted(&menu, &script);
        assert_eq!(outcome, MenuOutcome::Selected(19));
        assert!(output.contains("Page 1/3"));
        assert!(output.contains("Page 2/3"));
        assert!(output.contains("Page 3/3"));
    }

    #[test]
    fn test_page_down_ignored_when_pagination_forced_off() {
        let items = labels(5);
        let menu = Menu::new(&items, "Pick")
            .with_pagination(true, 10)
            .with_theme(Theme::plain());
        let (outcome, output) = run_scripted(&menu, b"\x1b[6~\r");
        assert_eq!(outcome, MenuOutcome::Selected(0));
        assert!(!output.contains("Page "));
    }

    #[test]
    fn test_quit_prints_farewell() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let (outcome, output) = run_scripted(&menu, b"\x1b[Bq");
        assert_eq!(outcome, MenuOutcome::Quit);
        assert!(output.ends_with(&format!("{CLEAR}Goodbye!\n")));
    }

    #[test]
    fn test_interrupt_byte_quits() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let (outcome, _) = run_scripted(&menu, &[0x03]);
        assert_eq!(outcome, MenuOutcome::Quit);
    }

    #[test]
    fn test_closed_input_quits() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let (outcome, output) = run_scripted(&menu, b"\x1b[B");
        assert_eq!(outcome, MenuOutcome::Quit);
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_terminal_failure_propagates() {
        let items = labels(3);
        let menu = Menu::new(&items, "Pick").with_theme(Theme::plain());
        let mut out = Vec::new();
        let result = menu.run(&mut BrokenTerminal, &mut out);
        assert!(matches!(result, Err(HistoryError::TerminalMode { .. })));
    }

    #[test]
    fn test_wait_for_key() {
        assert!(wait_for_key(&mut ReaderKeys::new(&b"x"[..])).is_ok());
        assert!(wait_for_key(&mut ReaderKeys::new(&b""[..])).is_ok());
        assert!(wait_for_key(&mut BrokenTerminal).is_err());
    }
}
