//! Text styling for menus and transcripts.
//!
//! Every method returns a ready-to-print `String`. With color disabled the
//! text comes back untouched, so output stays readable when piped or when
//! `NO_COLOR` is set.

use crossterm::style::{Color, Stylize};

/// Styling palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    color: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    /// Create a theme with color on or off.
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Theme without any escape sequences.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Resolve color from a preference and the `NO_COLOR` convention.
    #[must_use]
    pub fn from_preference(color: bool) -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(color && !no_color)
    }

    /// Whether styling is emitted.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, text: &str, color: Color, bold: bool) -> String {
        if !self.color {
            return text.to_string();
        }
        let styled = text.with(color);
        if bold {
            styled.bold().to_string()
        } else {
            styled.to_string()
        }
    }

    /// Menu and transcript headings.
    #[must_use]
    pub fn title(&self, text: &str) -> String {
        self.paint(text, Color::Cyan, true)
    }

    /// Key help line.
    #[must_use]
    pub fn instructions(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey, false)
    }

    /// "Page X/Y" line.
    #[must_use]
    pub fn page_indicator(&self, text: &str) -> String {
        self.paint(text, Color::Yellow, false)
    }

    /// Highlighted menu row.
    #[must_use]
    pub fn selected(&self, text: &str) -> String {
        self.paint(text, Color::Green, false)
    }

    /// Fatal conditions.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red, false)
    }

    /// Recoverable conditions such as an empty project.
    #[must_use]
    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Color::Yellow, false)
    }

    /// "press any key" prompts.
    #[must_use]
    pub fn hint(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey, false)
    }

    /// `user:` label.
    #[must_use]
    pub fn user_label(&self, text: &str) -> String {
        self.paint(text, Color::Green, true)
    }

    /// `assistant:` label.
    #[must_use]
    pub fn assistant_label(&self, text: &str) -> String {
        self.paint(text, Color::Blue, true)
    }

    /// Context summaries.
    #[must_use]
    pub fn summary(&self, text: &str) -> String {
        self.paint(text, Color::Yellow, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_theme_passes_text_through() {
        let theme = Theme::plain();
        assert_eq!(theme.title("Select a Project"), "Select a Project");
        assert_eq!(theme.error("boom"), "boom");
        assert!(!theme.is_colored());
    }

    #[test]
    fn test_colored_theme_wraps_in_escapes() {
        // crossterm itself honors NO_COLOR when rendering
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let theme = Theme::new(true);
        let styled = theme.selected("▶ item");
        assert!(styled.contains("▶ item"));
        assert!(styled.starts_with('\u{1b}'));
        assert!(styled.len() > "▶ item".len());
    }

    #[test]
    fn test_preference_off_disables_color() {
        assert!(!Theme::from_preference(false).is_colored());
    }
}
