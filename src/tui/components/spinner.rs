//! Animated spinner for long-running operations.

use std::{
    io::{self, ErrorKind, Read, Write},
    process::{Command, ExitStatus, Stdio},
    sync::{
        Arc, Mutex, PoisonError,
        mpsc::{self, RecvTimeoutError, Sender},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use colored::Colorize;
use crossterm::{
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use log::{debug, warn};

use crate::tui::theme::Theme;

const FRAMES: [&str; 4] = ["-", "\\", "|", "/"];
const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

struct Animation {
    stop: Sender<()>,
    handle: JoinHandle<()>,
}

/// A one-line spinner shown while work happens elsewhere.
///
/// The animation runs on its own thread. [`Spinner::stop`] signals it,
/// waits for it to exit and clears the line, so nothing the caller prints
/// afterwards is overwritten.
pub struct Spinner {
    message: String,
    interval: Duration,
    theme: Theme,
    writer: SharedWriter,
    running: Mutex<Option<Animation>>,
}

impl Spinner {
    /// Creates a spinner that draws to standard output.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_writer(message, io::stdout())
    }

    /// Creates a spinner that draws to `writer`.
    #[must_use]
    pub fn with_writer(message: impl Into<String>, writer: impl Write + Send + 'static) -> Self {
        Self {
            message: message.into(),
            interval: DEFAULT_INTERVAL,
            theme: Theme::default(),
            writer: Arc::new(Mutex::new(Box::new(writer))),
            running: Mutex::new(None),
        }
    }

    /// Sets the delay between frames. A zero interval keeps the default.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if !interval.is_zero() {
            self.interval = interval;
        }
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Whether the animation thread is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.running
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Starts the animation. Does nothing if it is already running.
    pub fn start(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.is_some() {
            return;
        }

        let (stop, stopped) = mpsc::channel::<()>();
        let writer = Arc::clone(&self.writer);
        let message = self.message.clone();
        let interval = self.interval;
        let color = self.theme.spinner;

        let handle = thread::spawn(move || {
            for frame in FRAMES.iter().cycle() {
                {
                    let mut out = writer.lock().unwrap_or_else(PoisonError::into_inner);
                    let drawn = write!(out, "\r{} {message}", frame.color(color))
                        .and_then(|()| out.flush());
                    if let Err(e) = drawn {
                        warn!("spinner output failed: {e}");
                        return;
                    }
                }

                match stopped.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {}
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            }
        });

        debug!("spinner started: {}", self.message);
        *running = Some(Animation { stop, handle });
    }

    /// Stops the animation and clears its line. Does nothing if the spinner
    /// is not running.
    pub fn stop(&self) {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(animation) = running.take() else {
            return;
        };

        // The thread may already have exited on a write error.
        let _ = animation.stop.send(());
        if animation.handle.join().is_err() {
            warn!("spinner thread panicked");
        }

        let mut guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let out = &mut *guard;
        let cleared =
            queue!(out, Print('\r'), Clear(ClearType::UntilNewLine)).and_then(|()| out.flush());
        if let Err(e) = cleared {
            warn!("unable to clear spinner line: {e}");
        }
        debug!("spinner stopped: {}", self.message);
    }

    /// Stops the spinner and prints `✓ message`.
    pub fn success(&self, message: &str) {
        self.stop();
        self.print_line(&self.theme.success_line(message));
    }

    /// Stops the spinner and prints `✗ message`.
    pub fn fail(&self, message: &str) {
        self.stop();
        self.print_line(&self.theme.failure_line(message));
    }

    fn print_line(&self, line: &str) {
        let mut out = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!("spinner output failed: {e}");
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Sink for an external command's output while a spinner is on screen.
///
/// In verbose mode output goes straight to standard output; otherwise it
/// is kept so it can be shown if the command fails.
#[derive(Debug, Default)]
pub struct CommandOutput {
    verbose: bool,
    buffer: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            buffer: Vec::new(),
        }
    }

    /// Everything written so far while not verbose.
    #[must_use]
    pub fn captured(&self) -> String {
        String::from_utf8_lossy(&self.buffer).into_owned()
    }

    /// Runs `command` to completion, writing its stdout and stderr here as
    /// they are produced.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started or its output
    /// cannot be read.
    pub fn run(&mut self, command: &mut Command) -> io::Result<ExitStatus> {
        let mut child = command
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        let (Some(mut stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take())
        else {
            return Err(io::Error::other("child output is not piped"));
        };

        let sink = Mutex::new(self);
        let copied = thread::scope(|scope| {
            let errors = scope.spawn(|| pump(&mut stderr, &sink));
            let output = pump(&mut stdout, &sink);
            let errors = errors
                .join()
                .unwrap_or_else(|_| Err(io::Error::other("stderr reader panicked")));
            output.and(errors)
        });

        let status = child.wait()?;
        copied?;
        Ok(status)
    }
}

fn pump(reader: &mut impl Read, sink: &Mutex<&mut CommandOutput>) -> io::Result<()> {
    let mut chunk = [0; 4096];
    loop {
        let read = match reader.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let mut out = sink.lock().unwrap_or_else(PoisonError::into_inner);
        out.write_all(chunk.get(..read).unwrap_or_default())?;
        out.flush()?;
    }
}

impl Write for CommandOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.verbose {
            io::stdout().write(buf)
        } else {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.verbose {
            io::stdout().flush()
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn spinner(buffer: &SharedBuffer) -> Spinner {
        colored::control::set_override(false);
        Spinner::with_writer("Loading", buffer.clone()).with_interval(Duration::from_millis(5))
    }

    #[test]
    fn test_frames_cycle_and_line_is_cleared() {
        let buffer = SharedBuffer::default();
        let spinner = spinner(&buffer);
        spinner.start();
        thread::sleep(Duration::from_millis(60));
        spinner.stop();

        let output = buffer.contents();
        assert!(output.starts_with("\r- Loading"));
        assert!(output.contains("\r\\ Loading"));
        assert!(output.ends_with("\r\x1b[K"));
    }

    #[test]
    fn test_double_stop_is_harmless() {
        let buffer = SharedBuffer::default();
        let spinner = spinner(&buffer);
        spinner.stop();
        spinner.start();
        spinner.stop();
        spinner.stop();
        assert!(!spinner.is_active());
    }

    #[test]
    fn test_double_start_runs_one_animation() {
        let buffer = SharedBuffer::default();
        let spinner = spinner(&buffer);
        spinner.start();
        spinner.start();
        assert!(spinner.is_active());
        thread::sleep(Duration::from_millis(20));
        spinner.stop();

        // A second loop left behind would keep drawing after stop.
        let after_stop = buffer.contents();
        thread::sleep(Duration::from_millis(40));
        assert_eq!(buffer.contents(), after_stop);
        assert!(!spinner.is_active());
    }

    #[test]
    fn test_restart_after_stop() {
        let buffer = SharedBuffer::default();
        let spinner = spinner(&buffer);
        spinner.start();
        spinner.stop();
        spinner.start();
        assert!(spinner.is_active());
        spinner.stop();
    }

    #[test]
    fn test_success_and_fail_lines() {
        let buffer = SharedBuffer::default();
        let spinner = spinner(&buffer);
        spinner.start();
        spinner.success("Template added");
        assert!(!spinner.is_active());
        assert!(buffer.contents().ends_with("\r\x1b[K✓ Template added\n"));

        spinner.fail("Clone failed");
        assert!(buffer.contents().ends_with("✓ Template added\n✗ Clone failed\n"));
    }

    #[test]
    fn test_drop_stops_animation() {
        let buffer = SharedBuffer::default();
        {
            let spinner = spinner(&buffer);
            spinner.start();
        }
        let after_drop = buffer.contents();
        assert!(after_drop.ends_with("\r\x1b[K"));
        thread::sleep(Duration::from_millis(30));
        assert_eq!(buffer.contents(), after_drop);
    }

    #[test]
    fn test_command_output_buffers_when_quiet() {
        let mut output = CommandOutput::new(false);
        write!(output, "Cloning into 'repo'...").unwrap();
        output.flush().unwrap();
        assert_eq!(output.captured(), "Cloning into 'repo'...");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_collects_both_streams() {
        let mut output = CommandOutput::new(false);
        let status = output
            .run(Command::new("sh").args(["-c", "echo out; echo err 1>&2"]))
            .unwrap();

        assert!(status.success());
        let captured = output.captured();
        assert!(captured.contains("out\n"));
        assert!(captured.contains("err\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_output_reports_exit_status() {
        let mut output = CommandOutput::new(false);
        let status = output
            .run(Command::new("sh").args(["-c", "echo partial; exit 3"]))
            .unwrap();

        assert_eq!(status.code(), Some(3));
        assert_eq!(output.captured(), "partial\n");
    }

    #[test]
    fn test_command_output_missing_program() {
        let mut output = CommandOutput::new(false);
        let err = output
            .run(&mut Command::new("lancher-test-no-such-program"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(output.captured().is_empty());
    }
}
