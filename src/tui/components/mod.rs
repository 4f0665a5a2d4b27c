//! Reusable prompt components.
//!
//! Each interactive component is a small state machine: it turns decoded
//! keys into [`Transition`]s and describes what to draw as a [`Frame`].
//! The terminal loop that drives them lives in [`crate::tui::prompts`].

pub(crate) mod confirm;
pub(crate) mod fallback;
mod multiselect;
mod select;
mod spinner;
mod text_input;

pub use select::SelectOption;
pub use spinner::{CommandOutput, Spinner};

pub(crate) use multiselect::MultiSelectMenu;
pub(crate) use select::SelectMenu;
pub(crate) use text_input::TextInput;

use super::{error::PromptError, keys::Key, render::Frame, theme::Theme};

/// Result type for prompt operations.
///
/// - `Ok(Some(value))` - User submitted a value
/// - `Ok(None)` - User cancelled (Ctrl+C, or `q` in menus)
/// - `Err(_)` - An error occurred
pub type PromptResult<T> = Result<Option<T>, PromptError>;

/// What a component wants after handling one key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Transition<T> {
    /// Nothing changed.
    Ignore,
    /// State changed and the frame must be redrawn.
    Redraw,
    /// The prompt is answered.
    Submit(T),
    /// The user cancelled.
    Cancel,
}

/// A component that can be driven by the raw-mode key loop.
pub(crate) trait Interaction {
    type Output;

    /// Whether the terminal cursor is hidden while the component is active.
    fn hides_cursor(&self) -> bool {
        true
    }

    fn frame(&self, theme: &Theme) -> Frame;

    fn handle_key(&mut self, key: Key) -> Transition<Self::Output>;

    /// One line left on screen once the prompt is answered.
    fn summary(&self, output: &Self::Output, theme: &Theme) -> String;
}
