//! Multi-selection component with toggle support.

use std::collections::HashSet;

use colored::Colorize;

use super::{Interaction, SelectOption, Transition};
use crate::tui::{keys::Key, render::Frame, theme::Theme};

const HELP: &str = "↑↓ navigate, Space toggle, Enter confirm, q cancel";

/// Arrow-key menu where any number of rows can be checked.
pub(crate) struct MultiSelectMenu<'a> {
    prompt: &'a str,
    options: &'a [SelectOption],
    cursor: usize,
    selected_indices: HashSet<usize>,
}

impl<'a> MultiSelectMenu<'a> {
    pub(crate) fn new(prompt: &'a str, options: &'a [SelectOption]) -> Self {
        Self {
            prompt,
            options,
            cursor: 0,
            selected_indices: HashSet::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub(crate) fn is_marked(&self, idx: usize) -> bool {
        self.selected_indices.contains(&idx)
    }

    fn toggle(&mut self) {
        if !self.selected_indices.remove(&self.cursor) {
            self.selected_indices.insert(self.cursor);
        }
    }

    /// Values of the checked rows, in option order.
    fn selected_values(&self) -> Vec<String> {
        self.options
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.selected_indices.contains(idx))
            .map(|(_, option)| option.value().to_string())
            .collect()
    }

    fn move_cursor_up(&mut self) -> Transition<Vec<String>> {
        if self.cursor == 0 {
            return Transition::Ignore;
        }
        self.cursor = self.cursor.saturating_sub(1);
        Transition::Redraw
    }

    fn move_cursor_down(&mut self) -> Transition<Vec<String>> {
        if self.cursor.saturating_add(1) >= self.options.len() {
            return Transition::Ignore;
        }
        self.cursor = self.cursor.saturating_add(1);
        Transition::Redraw
    }
}

impl Interaction for MultiSelectMenu<'_> {
    type Output = Vec<String>;

    fn frame(&self, theme: &Theme) -> Frame {
        let mut lines = Vec::with_capacity(self.options.len().saturating_add(2));
        lines.push(theme.title(self.prompt).to_string());
        lines.push(theme.help(HELP).to_string());

        for (idx, option) in self.options.iter().enumerate() {
            let is_cursor = idx == self.cursor;
            let checkbox = theme.checkbox(self.selected_indices.contains(&idx), is_cursor);
            let label = if is_cursor {
                option.label().bold().to_string()
            } else {
                option.label().to_string()
            };
            lines.push(format!("{} {checkbox} {label}", theme.marker(is_cursor)));
        }

        Frame::new(lines)
    }

    fn handle_key(&mut self, key: Key) -> Transition<Vec<String>> {
        match key {
            Key::Up => self.move_cursor_up(),
            Key::Down => self.move_cursor_down(),
            Key::Space => {
                self.toggle();
                Transition::Redraw
            }
            Key::Enter => Transition::Submit(self.selected_values()),
            key if key.is_menu_cancel() => Transition::Cancel,
            _ => Transition::Ignore,
        }
    }

    fn summary(&self, _values: &Self::Output, theme: &Theme) -> String {
        let labels: Vec<&str> = self
            .options
            .iter()
            .enumerate()
            .filter(|(idx, _)| self.selected_indices.contains(idx))
            .map(|(_, option)| option.label())
            .collect();
        format!("{} {}", theme.title(self.prompt), theme.answer(&labels.join(", ")))
    }
}
