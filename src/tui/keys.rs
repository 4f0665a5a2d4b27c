//! Decoding of raw terminal input into logical key events.
//!
//! The reader works on top of a [`BufRead`] and only consumes the bytes that
//! make up the decoded key, so anything typed ahead stays in the buffer for
//! the next prompt. An escape sequence cut off at the end of the buffer is
//! held back until enough bytes arrive to tell which key it is.

use std::io::{self, BufRead, ErrorKind};

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const DELETE: u8 = 0x7f;

/// A logical key event decoded from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    /// Ctrl+C
    Cancel,
    Space,
    Backspace,
    /// A printable ASCII character other than space.
    Char(char),
    /// Any byte sequence that is not part of the set above.
    Unknown,
}

impl Key {
    /// Whether this key cancels a selection menu.
    ///
    /// Menus accept `q` and `Q` in addition to Ctrl+C. Text input does not,
    /// since there they are ordinary characters.
    #[must_use]
    pub fn is_menu_cancel(self) -> bool {
        matches!(self, Self::Cancel | Self::Char('q' | 'Q'))
    }
}

/// Decodes the first key in `bytes`.
///
/// Returns the key and the number of bytes it occupies, or `None` when
/// `bytes` is empty.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<(Key, usize)> {
    let (&first, rest) = bytes.split_first()?;

    let key = match first {
        b'\n' | b'\r' => Key::Enter,
        CTRL_C => Key::Cancel,
        b' ' => Key::Space,
        BACKSPACE | DELETE => Key::Backspace,
        ESC => return Some(decode_escape(rest)),
        0x21..=0x7e => Key::Char(char::from(first)),
        _ => Key::Unknown,
    };

    Some((key, 1))
}

fn decode_escape(rest: &[u8]) -> (Key, usize) {
    match rest {
        [b'[', code, ..] => {
            let key = match code {
                b'A' => Key::Up,
                b'B' => Key::Down,
                b'C' => Key::Right,
                b'D' => Key::Left,
                _ => Key::Unknown,
            };
            (key, 3)
        }
        // A lone escape (or an Alt chord) only consumes the escape byte.
        _ => (Key::Unknown, 1),
    }
}

/// Whether `bytes` is the start of an escape sequence that needs more input.
fn is_partial_escape(bytes: &[u8]) -> bool {
    matches!(bytes, [ESC] | [ESC, b'['])
}

/// Pull-based reader of [`Key`] events.
///
/// Iteration ends when the input is exhausted. A read error is yielded once
/// and also ends iteration.
pub struct KeyReader<'a, R> {
    input: &'a mut R,
    /// Bytes of an escape sequence already taken from `input`.
    pending: Vec<u8>,
    finished: bool,
}

impl<'a, R: BufRead> KeyReader<'a, R> {
    #[must_use]
    pub fn new(input: &'a mut R) -> Self {
        Self {
            input,
            pending: Vec::new(),
            finished: false,
        }
    }

    /// Blocks until one key is available.
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_key(&mut self) -> io::Result<Option<Key>> {
        loop {
            if !self.pending.is_empty() && !is_partial_escape(&self.pending) {
                return Ok(self.take_pending());
            }

            let buf = match self.input.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            let Some(&next) = buf.first() else {
                // Input ended in the middle of a sequence.
                return Ok(self.take_pending());
            };

            if self.pending.is_empty() && !is_partial_escape(buf) {
                let Some((key, consumed)) = decode(buf) else {
                    return Ok(None);
                };
                self.input.consume(consumed);
                return Ok(Some(key));
            }

            self.pending.push(next);
            self.input.consume(1);
        }
    }

    fn take_pending(&mut self) -> Option<Key> {
        let (key, consumed) = decode(&self.pending)?;
        self.pending.drain(..consumed);
        Some(key)
    }
}

impl<R: BufRead> Iterator for KeyReader<'_, R> {
    type Item = io::Result<Key>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_key() {
            Ok(Some(key)) => Some(Ok(key)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::{BufReader, Cursor, Read};

    use super::*;

    fn keys(bytes: &[u8]) -> Vec<Key> {
        let mut input = Cursor::new(bytes.to_vec());
        KeyReader::new(&mut input).map(Result::unwrap).collect()
    }

    #[test]
    fn test_decode_enter_variants() {
        assert_eq!(decode(b"\n"), Some((Key::Enter, 1)));
        assert_eq!(decode(b"\r"), Some((Key::Enter, 1)));
    }

    #[test]
    fn test_decode_control_keys() {
        assert_eq!(decode(&[0x03]), Some((Key::Cancel, 1)));
        assert_eq!(decode(b" "), Some((Key::Space, 1)));
        assert_eq!(decode(&[0x7f]), Some((Key::Backspace, 1)));
        assert_eq!(decode(&[0x08]), Some((Key::Backspace, 1)));
    }

    #[test]
    fn test_decode_printable() {
        assert_eq!(decode(b"a"), Some((Key::Char('a'), 1)));
        assert_eq!(decode(b"~"), Some((Key::Char('~'), 1)));
        assert_eq!(decode(b"!"), Some((Key::Char('!'), 1)));
    }

    #[test]
    fn test_decode_arrows() {
        assert_eq!(decode(b"\x1b[A"), Some((Key::Up, 3)));
        assert_eq!(decode(b"\x1b[B"), Some((Key::Down, 3)));
        assert_eq!(decode(b"\x1b[C"), Some((Key::Right, 3)));
        assert_eq!(decode(b"\x1b[D"), Some((Key::Left, 3)));
    }

    #[test]
    fn test_decode_unknown_sequences() {
        assert_eq!(decode(b"\x1b[Z"), Some((Key::Unknown, 3)));
        assert_eq!(decode(b"\x1b"), Some((Key::Unknown, 1)));
        assert_eq!(decode(&[0x01]), Some((Key::Unknown, 1)));
        assert_eq!(decode(&[0xc3, 0xa9]), Some((Key::Unknown, 1)));
        assert_eq!(decode(b""), None);
    }

    #[test]
    fn test_reader_splits_buffered_input() {
        assert_eq!(
            keys(b"ab\x1b[A \x7f\r"),
            vec![
                Key::Char('a'),
                Key::Char('b'),
                Key::Up,
                Key::Space,
                Key::Backspace,
                Key::Enter
            ]
        );
    }

    #[test]
    fn test_reader_leaves_unread_bytes_in_buffer() {
        let mut input = Cursor::new(b"x\nrest".to_vec());
        {
            let mut reader = KeyReader::new(&mut input);
            assert_eq!(reader.next().unwrap().unwrap(), Key::Char('x'));
            assert_eq!(reader.next().unwrap().unwrap(), Key::Enter);
        }

        let mut remaining = String::new();
        input.read_to_string(&mut remaining).unwrap();
        assert_eq!(remaining, "rest");
    }

    #[test]
    fn test_reader_ends_at_eof() {
        let mut input = Cursor::new(Vec::new());
        let mut reader = KeyReader::new(&mut input);
        assert!(reader.read_key().unwrap().is_none());
        assert!(reader.next().is_none());
    }

    fn keys_in_chunks(bytes: &[u8]) -> Vec<Key> {
        let mut input = BufReader::with_capacity(1, bytes);
        KeyReader::new(&mut input).map(Result::unwrap).collect()
    }

    #[test]
    fn test_reader_joins_escape_split_across_reads() {
        assert_eq!(keys_in_chunks(b"\x1b[Aq"), vec![Key::Up, Key::Char('q')]);
        assert_eq!(
            keys_in_chunks(b"ab\x1b[B\r"),
            vec![Key::Char('a'), Key::Char('b'), Key::Down, Key::Enter]
        );
    }

    #[test]
    fn test_reader_split_escape_without_sequence() {
        assert_eq!(keys_in_chunks(b"\x1bx"), vec![Key::Unknown, Key::Char('x')]);
        assert_eq!(
            keys_in_chunks(b"\x1b[Z1"),
            vec![Key::Unknown, Key::Char('1')]
        );
    }

    #[test]
    fn test_reader_escape_cut_off_by_eof() {
        assert_eq!(keys_in_chunks(b"\x1b"), vec![Key::Unknown]);
        assert_eq!(
            keys_in_chunks(b"a\x1b["),
            vec![Key::Char('a'), Key::Unknown, Key::Char('[')]
        );
    }

    /// Fails with `Interrupted` on every other read.
    struct Flaky<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Flaky<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn test_reader_retries_interrupted_reads() {
        let flaky = Flaky {
            data: b"\x1b[Cz",
            interrupt: false,
        };
        let mut input = BufReader::with_capacity(2, flaky);
        let decoded: Vec<Key> = KeyReader::new(&mut input).map(Result::unwrap).collect();
        assert_eq!(decoded, vec![Key::Right, Key::Char('z')]);
    }

    #[test]
    fn test_menu_cancel_keys() {
        assert!(Key::Cancel.is_menu_cancel());
        assert!(Key::Char('q').is_menu_cancel());
        assert!(Key::Char('Q').is_menu_cancel());
        assert!(!Key::Char('x').is_menu_cancel());
        assert!(!Key::Enter.is_menu_cancel());
    }
}
