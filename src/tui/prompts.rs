//! High-level prompt functions.
//!
//! A [`Prompter`] owns the terminal, input and output a prompt talks to.
//! Interactive prompts run in raw mode and redraw in place; when raw mode is
//! not available the selection prompts fall back to numbered input and the
//! text prompt to a plain line read.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use log::{debug, warn};

use super::{
    components::{
        Interaction, MultiSelectMenu, PromptResult, SelectMenu, SelectOption, TextInput,
        Transition, confirm as yes_no, fallback,
    },
    error::PromptError,
    keys::KeyReader,
    render::Screen,
    terminal::{RawModeGuard, StdinTerminal, Terminal},
    theme::Theme,
};

const FALLBACK_NOTICE: &str = "Falling back to numbered selection...";

/// How an attempt to run a prompt in raw mode ended.
enum RawOutcome<T> {
    /// Input is not a terminal, or raw mode is disabled by configuration.
    NotInteractive,
    /// The terminal refused raw mode.
    RawModeFailed,
    /// The prompt ran to completion; `None` if cancelled.
    Finished(Option<T>),
}

/// Runs prompts against a terminal, an input stream and an output stream.
pub struct Prompter<T: Terminal, R: BufRead, W: Write> {
    terminal: T,
    input: R,
    output: W,
    theme: Theme,
    fallback_only: bool,
}

impl Prompter<StdinTerminal, StdinLock<'static>, Stdout> {
    /// A prompter over the process's standard streams.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(StdinTerminal, io::stdin().lock(), io::stdout())
    }
}

impl<T: Terminal, R: BufRead, W: Write> Prompter<T, R, W> {
    #[must_use]
    pub fn new(terminal: T, input: R, output: W) -> Self {
        Self {
            terminal,
            input,
            output,
            theme: Theme::default(),
            fallback_only: false,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Never enter raw mode; always use numbered and line input.
    #[must_use]
    pub fn with_fallback_only(mut self, fallback_only: bool) -> Self {
        self.fallback_only = fallback_only;
        self
    }

    /// Consumes the prompter and returns its output stream.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Asks the user to pick one option and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::InvalidArgument`] when `options` is empty,
    /// [`PromptError::InvalidSelection`] when numbered input is malformed,
    /// and [`PromptError::Io`] when the terminal fails or input ends.
    pub fn select(&mut self, prompt: &str, options: &[SelectOption]) -> PromptResult<String> {
        if options.is_empty() {
            return Err(PromptError::InvalidArgument("no options provided".into()));
        }

        match self.run_raw(SelectMenu::new(prompt, options))? {
            RawOutcome::Finished(answer) => Ok(answer),
            outcome => {
                self.announce_fallback(&outcome)?;
                fallback::select_numbered(
                    &mut self.input,
                    &mut self.output,
                    &self.theme,
                    prompt,
                    options,
                )
                .map(Some)
            }
        }
    }

    /// Asks the user to mark any number of options.
    ///
    /// The values come back in option order, not in the order they were
    /// marked. Confirming without marking anything yields an empty list.
    ///
    /// # Errors
    ///
    /// Same as [`Prompter::select`].
    pub fn multi_select(
        &mut self,
        prompt: &str,
        options: &[SelectOption],
    ) -> PromptResult<Vec<String>> {
        if options.is_empty() {
            return Err(PromptError::InvalidArgument("no options provided".into()));
        }

        match self.run_raw(MultiSelectMenu::new(prompt, options))? {
            RawOutcome::Finished(answer) => Ok(answer),
            outcome => {
                self.announce_fallback(&outcome)?;
                fallback::multi_select_numbered(
                    &mut self.input,
                    &mut self.output,
                    &self.theme,
                    prompt,
                    options,
                )
                .map(Some)
            }
        }
    }

    /// Asks for a line of text, offering `default` when nothing is typed.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] when the terminal fails or input ends
    /// during interactive editing.
    pub fn text(&mut self, prompt: &str, default: &str) -> PromptResult<String> {
        if let RawOutcome::Finished(answer) = self.run_raw(TextInput::new(prompt, default))? {
            return Ok(answer);
        }

        if default.is_empty() {
            write!(self.output, "{} ", self.theme.title(prompt))?;
        } else {
            write!(
                self.output,
                "{} {} ",
                self.theme.title(prompt),
                self.theme.ghost(&format!("({default})"))
            )?;
        }
        self.output.flush()?;

        let line = fallback::read_line(&mut self.input)?;
        if line.is_empty() {
            Ok(Some(default.to_string()))
        } else {
            Ok(Some(line))
        }
    }

    /// Asks a yes/no question.
    ///
    /// A blank answer, or no answer at all, picks `default`.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] when reading or writing fails.
    pub fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool, PromptError> {
        write!(
            self.output,
            "{} {} ",
            self.theme.title(prompt),
            self.theme.help(&format!("({})", yes_no::hint(default)))
        )?;
        self.output.flush()?;

        let line = fallback::read_line(&mut self.input)?;
        Ok(yes_no::parse_answer(&line, default))
    }

    /// Prints `prompt` and reads one trimmed line.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError::Io`] when reading or writing fails.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{} ", self.theme.title(prompt))?;
        self.output.flush()?;
        Ok(fallback::read_line(&mut self.input)?)
    }

    fn run_raw<I: Interaction>(
        &mut self,
        mut interaction: I,
    ) -> Result<RawOutcome<I::Output>, PromptError> {
        if self.fallback_only || !self.terminal.is_interactive() {
            debug!("input is not interactive, using line input");
            return Ok(RawOutcome::NotInteractive);
        }

        let guard = match RawModeGuard::acquire(&self.terminal) {
            Ok(guard) => guard,
            Err(e) => {
                warn!("raw mode unavailable: {e}");
                return Ok(RawOutcome::RawModeFailed);
            }
        };

        let answer = drive(&mut self.input, &mut self.output, &self.theme, &mut interaction);
        drop(guard);
        answer.map(RawOutcome::Finished)
    }

    fn announce_fallback<O>(&mut self, outcome: &RawOutcome<O>) -> io::Result<()> {
        if matches!(outcome, RawOutcome::RawModeFailed) {
            writeln!(self.output, "\n{}\n", self.theme.notice(FALLBACK_NOTICE))?;
        }
        Ok(())
    }
}

/// Feeds keys to `interaction` until it submits or cancels.
///
/// The rendered block is replaced by a summary line on submit and erased on
/// cancel or error.
fn drive<I, R, W>(
    input: &mut R,
    output: &mut W,
    theme: &Theme,
    interaction: &mut I,
) -> PromptResult<I::Output>
where
    I: Interaction,
    R: BufRead,
    W: Write,
{
    let mut screen = Screen::new(output, interaction.hides_cursor())?;
    screen.draw(&interaction.frame(theme))?;

    let mut keys = KeyReader::new(input);
    loop {
        let key = match keys.read_key() {
            Ok(Some(key)) => key,
            Ok(None) => {
                let _ = screen.clear();
                return Err(PromptError::input_closed());
            }
            Err(e) => {
                let _ = screen.clear();
                return Err(e.into());
            }
        };

        match interaction.handle_key(key) {
            Transition::Ignore => {}
            Transition::Redraw => screen.draw(&interaction.frame(theme))?,
            Transition::Submit(value) => {
                screen.finish_with(&interaction.summary(&value, theme))?;
                return Ok(Some(value));
            }
            Transition::Cancel => {
                screen.clear()?;
                return Ok(None);
            }
        }
    }
}

/// Single selection on the standard streams. See [`Prompter::select`].
///
/// # Errors
///
/// Same as [`Prompter::select`].
pub fn select(prompt: &str, options: &[SelectOption]) -> PromptResult<String> {
    Prompter::stdio().select(prompt, options)
}

/// Multi-selection on the standard streams. See [`Prompter::multi_select`].
///
/// # Errors
///
/// Same as [`Prompter::select`].
pub fn multi_select(prompt: &str, options: &[SelectOption]) -> PromptResult<Vec<String>> {
    Prompter::stdio().multi_select(prompt, options)
}

/// Text input on the standard streams. See [`Prompter::text`].
///
/// # Errors
///
/// Same as [`Prompter::text`].
pub fn text(prompt: &str, default: &str) -> PromptResult<String> {
    Prompter::stdio().text(prompt, default)
}

/// Yes/no question on the standard streams. See [`Prompter::confirm`].
///
/// # Errors
///
/// Same as [`Prompter::confirm`].
pub fn confirm(prompt: &str, default: bool) -> Result<bool, PromptError> {
    Prompter::stdio().confirm(prompt, default)
}

/// Line input on the standard streams. See [`Prompter::read_line`].
///
/// # Errors
///
/// Same as [`Prompter::read_line`].
pub fn read_line(prompt: &str) -> Result<String, PromptError> {
    Prompter::stdio().read_line(prompt)
}
