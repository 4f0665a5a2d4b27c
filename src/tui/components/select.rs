//! Single selection component.

use std::{convert::Infallible, str::FromStr};

use colored::Colorize;

use super::{Interaction, Transition};
use crate::tui::{keys::Key, render::Frame, theme::Theme};

const HELP: &str = "↑↓ navigate, Enter select, q cancel";

/// An option in a selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    value: String,
    label: String,
}

impl SelectOption {
    /// Creates an option whose label is its value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }

    /// Creates an option with a custom label. An empty label falls back to
    /// the value.
    #[must_use]
    pub fn with_label(value: impl Into<String>, label: impl Into<String>) -> Self {
        let value = value.into();
        let label = label.into();
        if label.is_empty() {
            return Self::new(value);
        }
        Self { value, label }
    }

    /// Maps plain strings to options labelled by their value.
    #[must_use]
    pub fn list<I, S>(values: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values.into_iter().map(Self::new).collect()
    }

    /// The value returned when this option is chosen.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The text displayed to the user.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Parses `value` or `value=label`.
impl FromStr for SelectOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once('=') {
            Some((value, label)) => Self::with_label(value, label),
            None => Self::new(s),
        })
    }
}

impl From<&str> for SelectOption {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SelectOption {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Arrow-key menu over a non-empty list of options.
pub(crate) struct SelectMenu<'a> {
    prompt: &'a str,
    options: &'a [SelectOption],
    cursor: usize,
}

impl<'a> SelectMenu<'a> {
    pub(crate) fn new(prompt: &'a str, options: &'a [SelectOption]) -> Self {
        Self {
            prompt,
            options,
            cursor: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    fn move_cursor_up(&mut self) -> Transition<String> {
        if self.cursor == 0 {
            return Transition::Ignore;
        }
        self.cursor = self.cursor.saturating_sub(1);
        Transition::Redraw
    }

    fn move_cursor_down(&mut self) -> Transition<String> {
        if self.cursor.saturating_add(1) >= self.options.len() {
            return Transition::Ignore;
        }
        self.cursor = self.cursor.saturating_add(1);
        Transition::Redraw
    }
}

impl Interaction for SelectMenu<'_> {
    type Output = String;

    fn frame(&self, theme: &Theme) -> Frame {
        let mut lines = Vec::with_capacity(self.options.len().saturating_add(2));
        lines.push(theme.title(self.prompt).to_string());

        for (idx, option) in self.options.iter().enumerate() {
            let is_cursor = idx == self.cursor;
            let label = if is_cursor {
                option.label().bold().to_string()
            } else {
                option.label().to_string()
            };
            lines.push(format!("{} {label}", theme.marker(is_cursor)));
        }

        lines.push(theme.help(HELP).to_string());
        Frame::new(lines)
    }

    fn handle_key(&mut self, key: Key) -> Transition<String> {
        match key {
            Key::Up => self.move_cursor_up(),
            Key::Down => self.move_cursor_down(),
            Key::Enter => self
                .options
                .get(self.cursor)
                .map_or(Transition::Ignore, |option| {
                    Transition::Submit(option.value().to_string())
                }),
            key if key.is_menu_cancel() => Transition::Cancel,
            _ => Transition::Ignore,
        }
    }

    fn summary(&self, _value: &Self::Output, theme: &Theme) -> String {
        let label = self.options.get(self.cursor).map_or("", SelectOption::label);
        format!("{} {}", theme.title(self.prompt), theme.answer(label))
    }
}
