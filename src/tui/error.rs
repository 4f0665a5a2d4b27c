use std::io;

use derive_more::Display;

/// Failure of a prompt.
///
/// Cancellation is not an error: prompts report it as `Ok(None)`.
#[derive(Debug, Display)]
pub enum PromptError {
    /// Reading from or writing to the terminal failed, or input ended
    /// before the prompt was answered.
    #[display("terminal I/O failed: {_0}")]
    Io(io::Error),
    /// The caller passed arguments the prompt cannot work with.
    #[display("invalid argument: {_0}")]
    InvalidArgument(String),
    /// Numbered input was malformed or out of range.
    #[display("invalid selection: {_0}")]
    InvalidSelection(String),
}

impl std::error::Error for PromptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidArgument(_) | Self::InvalidSelection(_) => None,
        }
    }
}

impl From<io::Error> for PromptError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl PromptError {
    pub(crate) fn input_closed() -> Self {
        Self::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before the prompt was answered",
        ))
    }
}
