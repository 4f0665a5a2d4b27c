//! Interactive terminal prompts.
//!
//! This module provides the prompt primitives used across the CLI:
//! - [`Prompter::select`] - Single selection from a list
//! - [`Prompter::multi_select`] - Multiple selection with toggle
//! - [`Prompter::text`] - Text input with a default value
//! - [`Prompter::confirm`] - Yes/no question
//! - [`Spinner`] - Animation for long-running operations
//!
//! Selection prompts fall back to numbered input when standard input is not
//! a terminal or raw mode cannot be entered.

pub mod components;
mod error;
pub mod keys;
mod prompts;
pub mod render;
pub mod terminal;
mod theme;

pub use components::{CommandOutput, PromptResult, SelectOption, Spinner};
pub use error::PromptError;
pub use prompts::{Prompter, confirm, multi_select, read_line, select, text};
pub use terminal::{RawModeGuard, StdinTerminal, Terminal, TerminalError};
pub use theme::Theme;
