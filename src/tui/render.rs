//! In-place redraw of a block of lines below the current cursor position.

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveToColumn, MoveUp, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

/// One frame of a prompt: the lines to show and, optionally, the column of
/// the first line where the visible cursor should rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub caret: Option<usize>,
}

impl Frame {
    #[must_use]
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines, caret: None }
    }

    #[must_use]
    pub fn with_caret(mut self, column: usize) -> Self {
        self.caret = Some(column);
        self
    }
}

/// Redraws a block of lines in place.
///
/// After every draw the cursor rests on the first row of the block, so the
/// next draw overwrites it without scrolling. The cursor is hidden for the
/// lifetime of the screen when requested, and always shown again on drop.
pub struct Screen<'a, W: Write> {
    out: &'a mut W,
    rendered: usize,
    hide_cursor: bool,
}

impl<'a, W: Write> Screen<'a, W> {
    pub fn new(out: &'a mut W, hide_cursor: bool) -> io::Result<Self> {
        if hide_cursor {
            queue!(out, Hide)?;
            out.flush()?;
        }
        Ok(Self {
            out,
            rendered: 0,
            hide_cursor,
        })
    }

    /// Number of rows the last draw produced.
    #[must_use]
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    /// Rewrites the block with `frame`, clearing rows left over from a
    /// taller previous frame.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        for line in &frame.lines {
            queue!(
                self.out,
                Print('\r'),
                Clear(ClearType::UntilNewLine),
                Print(line),
                Print("\r\n")
            )?;
        }

        let stale = self.rendered.saturating_sub(frame.lines.len());
        for _ in 0..stale {
            queue!(self.out, Print('\r'), Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }

        self.move_to_top(frame.lines.len().max(self.rendered))?;
        self.rendered = frame.lines.len();

        if let Some(column) = frame.caret {
            queue!(self.out, MoveToColumn(saturating_u16(column)))?;
        }

        self.out.flush()
    }

    /// Blanks the whole block and leaves the cursor on its first row.
    pub fn clear(&mut self) -> io::Result<()> {
        for _ in 0..self.rendered {
            queue!(self.out, Print('\r'), Clear(ClearType::UntilNewLine), Print("\r\n"))?;
        }
        self.move_to_top(self.rendered)?;
        queue!(self.out, Print('\r'))?;
        self.rendered = 0;
        self.out.flush()
    }

    /// Clears the block and prints `line` in its place as ordinary output.
    pub fn finish_with(&mut self, line: &str) -> io::Result<()> {
        self.clear()?;
        queue!(self.out, Print(line), Print("\r\n"))?;
        self.out.flush()
    }

    fn move_to_top(&mut self, height: usize) -> io::Result<()> {
        if height > 0 {
            queue!(self.out, MoveUp(saturating_u16(height)))?;
        }
        Ok(())
    }
}

impl<W: Write> Drop for Screen<'_, W> {
    fn drop(&mut self) {
        if self.hide_cursor {
            let _ = queue!(self.out, Show);
        }
        let _ = self.out.flush();
    }
}

fn saturating_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
