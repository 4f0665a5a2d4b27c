//! Theme configuration for consistent styling across prompt components.

use colored::{Color, ColoredString, Colorize};

/// Theme configuration for prompt components.
///
/// Provides consistent colors and glyphs across all prompt types.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Color of the prompt text
    pub title: Color,
    /// Color of the cursor row marker and checked boxes
    pub selected: Color,
    /// Color of markers on rows without the cursor
    pub unselected: Color,
    /// Color of help text and ghost defaults
    pub help: Color,
    /// Color of warnings such as the fallback notice
    pub notice: Color,
    /// Color of the spinner frames
    pub spinner: Color,
    /// Color of success indicators
    pub success: Color,
    /// Color of failure indicators
    pub error: Color,
    /// Marker drawn in front of the cursor row
    pub pointer: &'static str,
    /// Marker drawn in front of every other row
    pub bullet: &'static str,
    /// Glyph inside a checked multi-select box
    pub checkmark: &'static str,
    /// Glyph for failure messages
    pub cross: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Color::Cyan,
            selected: Color::Green,
            unselected: Color::BrightBlack,
            help: Color::BrightBlack,
            notice: Color::Yellow,
            spinner: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            pointer: ">",
            bullet: "•",
            checkmark: "✓",
            cross: "✗",
        }
    }
}

impl Theme {
    /// Creates a new theme with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(&self, text: &str) -> ColoredString {
        text.color(self.title).bold()
    }

    #[must_use]
    pub fn help(&self, text: &str) -> ColoredString {
        text.color(self.help)
    }

    /// Dimmed placeholder shown before the user types anything.
    #[must_use]
    pub fn ghost(&self, text: &str) -> ColoredString {
        text.color(self.help).dimmed()
    }

    #[must_use]
    pub fn notice(&self, text: &str) -> ColoredString {
        text.color(self.notice)
    }

    /// The accepted answer as echoed after a prompt completes.
    #[must_use]
    pub fn answer(&self, text: &str) -> ColoredString {
        text.color(self.selected)
    }

    /// Row marker for a menu line.
    #[must_use]
    pub fn marker(&self, is_cursor: bool) -> ColoredString {
        if is_cursor {
            self.pointer.color(self.selected).bold()
        } else {
            self.bullet.color(self.unselected)
        }
    }

    /// Checkbox for a multi-select line.
    #[must_use]
    pub fn checkbox(&self, checked: bool, is_cursor: bool) -> String {
        let mark = if checked { self.checkmark } else { " " };
        if is_cursor {
            format!("[{}]", mark.color(self.selected))
        } else {
            format!("[{mark}]")
        }
    }

    #[must_use]
    pub fn success_line(&self, message: &str) -> String {
        format!("{} {message}", self.checkmark.color(self.success))
    }

    #[must_use]
    pub fn failure_line(&self, message: &str) -> String {
        format!("{} {message}", self.cross.color(self.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_reflects_state() {
        colored::control::set_override(false);
        let theme = Theme::default();
        assert_eq!(theme.checkbox(true, false), "[✓]");
        assert_eq!(theme.checkbox(false, false), "[ ]");
        assert_eq!(theme.checkbox(false, true), "[ ]");
    }

    #[test]
    fn test_status_lines() {
        colored::control::set_override(false);
        let theme = Theme::default();
        assert_eq!(theme.success_line("done"), "✓ done");
        assert_eq!(theme.failure_line("broken"), "✗ broken");
    }
}
