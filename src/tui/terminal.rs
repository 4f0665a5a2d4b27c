//! Raw-mode control of the input terminal with scoped restore.

use std::io::{self, IsTerminal};

use derive_more::Display;
use log::{debug, warn};

/// Raw-mode entry or restore failed.
///
/// Prompts never surface this to callers; it makes them fall back to
/// numbered input instead.
#[derive(Debug, Display)]
#[display("{operation} failed: {source}")]
pub struct TerminalError {
    operation: &'static str,
    source: io::Error,
}

impl TerminalError {
    #[must_use]
    pub fn new(operation: &'static str, source: io::Error) -> Self {
        Self { operation, source }
    }

    /// Builds an error from the calling thread's last OS error.
    #[must_use]
    pub fn last_os_error(operation: &'static str) -> Self {
        Self::new(operation, io::Error::last_os_error())
    }
}

impl std::error::Error for TerminalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The terminal device a prompt reads from.
pub trait Terminal {
    /// Settings captured before entering raw mode.
    type Snapshot;

    /// Whether input comes from an interactive terminal rather than a pipe
    /// or a file.
    fn is_interactive(&self) -> bool;

    /// Switches input to unbuffered, unechoed keystroke delivery.
    fn enter_raw_mode(&self) -> Result<Self::Snapshot, TerminalError>;

    /// Puts back exactly the settings held in `snapshot`.
    fn restore_mode(&self, snapshot: &Self::Snapshot) -> Result<(), TerminalError>;
}

/// Keeps a terminal in raw mode for as long as it lives.
pub struct RawModeGuard<'a, T: Terminal> {
    terminal: &'a T,
    snapshot: Option<T::Snapshot>,
}

impl<'a, T: Terminal> RawModeGuard<'a, T> {
    /// Enters raw mode on `terminal`.
    pub fn acquire(terminal: &'a T) -> Result<Self, TerminalError> {
        let snapshot = terminal.enter_raw_mode()?;
        debug!("terminal entered raw mode");
        Ok(Self {
            terminal,
            snapshot: Some(snapshot),
        })
    }
}

impl<T: Terminal> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            match self.terminal.restore_mode(&snapshot) {
                Ok(()) => debug!("terminal mode restored"),
                Err(e) => warn!("unable to restore terminal mode: {e}"),
            }
        }
    }
}

/// The process's standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinTerminal;

/// Terminal attributes of standard input before raw mode.
#[cfg(unix)]
pub struct StdinSnapshot {
    termios: libc::termios,
}

/// Raw mode state is tracked by crossterm on this platform.
#[cfg(not(unix))]
pub struct StdinSnapshot {
    _private: (),
}

impl Terminal for StdinTerminal {
    type Snapshot = StdinSnapshot;

    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    #[cfg(unix)]
    fn enter_raw_mode(&self) -> Result<StdinSnapshot, TerminalError> {
        use std::mem::MaybeUninit;

        let fd = libc::STDIN_FILENO;
        let mut original: MaybeUninit<libc::termios> = MaybeUninit::uninit();

        // SAFETY: tcgetattr fully initialises the struct when it returns 0.
        let original = unsafe {
            if libc::tcgetattr(fd, original.as_mut_ptr()) != 0 {
                return Err(TerminalError::last_os_error("tcgetattr"));
            }
            original.assume_init()
        };

        let mut raw = original;
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);
        raw.c_iflag &= !(libc::IXON | libc::ICRNL);
        #[allow(clippy::indexing_slicing)]
        {
            raw.c_cc[libc::VMIN] = 1;
            raw.c_cc[libc::VTIME] = 0;
        }

        // SAFETY: `raw` is a valid termios copied from the device.
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(TerminalError::last_os_error("tcsetattr"));
        }

        Ok(StdinSnapshot { termios: original })
    }

    #[cfg(unix)]
    fn restore_mode(&self, snapshot: &StdinSnapshot) -> Result<(), TerminalError> {
        // SAFETY: the snapshot holds attributes previously read by tcgetattr.
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &snapshot.termios) } != 0 {
            return Err(TerminalError::last_os_error("tcsetattr"));
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn enter_raw_mode(&self) -> Result<StdinSnapshot, TerminalError> {
        crossterm::terminal::enable_raw_mode()
            .map_err(|e| TerminalError::new("enable_raw_mode", e))?;
        Ok(StdinSnapshot { _private: () })
    }

    #[cfg(not(unix))]
    fn restore_mode(&self, _snapshot: &StdinSnapshot) -> Result<(), TerminalError> {
        crossterm::terminal::disable_raw_mode()
            .map_err(|e| TerminalError::new("disable_raw_mode", e))
    }
}
