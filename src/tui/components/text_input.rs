//! Text input component with a ghost default value.

use super::{Interaction, Transition};
use crate::tui::{keys::Key, render::Frame, theme::Theme};

/// Single-line text input.
///
/// While the buffer is empty the default is shown dimmed after the prompt.
/// Submitting an empty buffer yields the default.
pub(crate) struct TextInput<'a> {
    prompt: &'a str,
    default: &'a str,
    buffer: String,
}

impl<'a> TextInput<'a> {
    pub(crate) fn new(prompt: &'a str, default: &'a str) -> Self {
        Self {
            prompt,
            default,
            buffer: String::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &str {
        &self.buffer
    }

    fn value(&self) -> String {
        if self.buffer.is_empty() {
            self.default.to_string()
        } else {
            self.buffer.clone()
        }
    }
}

impl Interaction for TextInput<'_> {
    type Output = String;

    fn hides_cursor(&self) -> bool {
        false
    }

    fn frame(&self, theme: &Theme) -> Frame {
        let title = theme.title(self.prompt);
        let line = if self.buffer.is_empty() {
            format!("{title} {}", theme.ghost(self.default))
        } else {
            format!("{title} {}", self.buffer)
        };

        let caret = self
            .prompt
            .chars()
            .count()
            .saturating_add(1)
            .saturating_add(self.buffer.chars().count());

        Frame::new(vec![line]).with_caret(caret)
    }

    fn handle_key(&mut self, key: Key) -> Transition<String> {
        match key {
            Key::Char(c) => {
                self.buffer.push(c);
                Transition::Redraw
            }
            Key::Space => {
                self.buffer.push(' ');
                Transition::Redraw
            }
            Key::Backspace => {
                if self.buffer.pop().is_some() {
                    Transition::Redraw
                } else {
                    Transition::Ignore
                }
            }
            Key::Enter => Transition::Submit(self.value()),
            Key::Cancel => Transition::Cancel,
            _ => Transition::Ignore,
        }
    }

    fn summary(&self, value: &Self::Output, theme: &Theme) -> String {
        format!("{} {}", theme.title(self.prompt), theme.answer(value))
    }
}
