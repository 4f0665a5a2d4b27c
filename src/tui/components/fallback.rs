//! Numbered selection for terminals without raw-mode support.
//!
//! Options are listed as `  1) label` and the answer is read as a single
//! line, so piped input and dumb terminals still work.

use std::{
    collections::BTreeSet,
    io::{self, BufRead, Write},
};

use log::debug;

use super::SelectOption;
use crate::tui::{error::PromptError, theme::Theme};

const MULTI_HINT: &str = "(Enter numbers separated by commas, e.g., 1,3,5)";

/// Reads one line and returns it without surrounding whitespace.
///
/// End of input yields an empty string.
pub(crate) fn read_line<R: BufRead>(input: &mut R) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Parses a 1-based option number into an index below `len`.
pub(crate) fn parse_choice(input: &str, len: usize) -> Result<usize, PromptError> {
    let token = input.trim();
    let number: usize = token
        .parse()
        .map_err(|_| PromptError::InvalidSelection(format!("'{token}' is not a number")))?;

    if number == 0 || number > len {
        return Err(PromptError::InvalidSelection(format!(
            "{number} is not between 1 and {len}"
        )));
    }
    Ok(number.saturating_sub(1))
}

/// Parses comma-separated option numbers into indices in ascending order.
///
/// A blank line selects nothing. Repeated numbers count once. Any bad
/// token rejects the whole line.
pub(crate) fn parse_choices(input: &str, len: usize) -> Result<Vec<usize>, PromptError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }

    let indices = input
        .split(',')
        .map(|token| parse_choice(token, len))
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(indices.into_iter().collect())
}

fn print_options<W: Write>(output: &mut W, options: &[SelectOption]) -> io::Result<()> {
    for (idx, option) in options.iter().enumerate() {
        writeln!(output, "  {}) {}", idx.saturating_add(1), option.label())?;
    }
    Ok(())
}

/// Lists `options` and reads a single number.
pub(crate) fn select_numbered<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    theme: &Theme,
    prompt: &str,
    options: &[SelectOption],
) -> Result<String, PromptError> {
    writeln!(output, "{}", theme.title(prompt))?;
    print_options(output, options)?;
    write!(output, "Enter number: ")?;
    output.flush()?;

    let line = read_line(input)?;
    let idx = parse_choice(&line, options.len())?;
    debug!("numbered selection picked option {}", idx.saturating_add(1));

    options
        .get(idx)
        .map(|option| option.value().to_string())
        .ok_or_else(|| PromptError::InvalidSelection(line))
}

/// Lists `options` and reads a comma-separated list of numbers.
pub(crate) fn multi_select_numbered<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    theme: &Theme,
    prompt: &str,
    options: &[SelectOption],
) -> Result<Vec<String>, PromptError> {
    writeln!(output, "{}", theme.title(prompt))?;
    writeln!(output, "{}", theme.help(MULTI_HINT))?;
    print_options(output, options)?;
    write!(output, "Enter numbers: ")?;
    output.flush()?;

    let line = read_line(input)?;
    let indices = parse_choices(&line, options.len())?;
    debug!("numbered multi-selection picked {} option(s)", indices.len());

    Ok(indices
        .into_iter()
        .filter_map(|idx| options.get(idx))
        .map(|option| option.value().to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::io::Cursor;

    use super::*;

    fn abc() -> Vec<SelectOption> {
        SelectOption::list(["a", "b", "c"])
    }

    fn select(typed: &str) -> (Result<String, PromptError>, String) {
        colored::control::set_override(false);
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = select_numbered(&mut input, &mut output, &Theme::default(), "Pick", &abc());
        (result, String::from_utf8(output).unwrap())
    }

    fn multi(typed: &str) -> Result<Vec<String>, PromptError> {
        colored::control::set_override(false);
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        multi_select_numbered(&mut input, &mut output, &Theme::default(), "Pick", &abc())
    }

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 3).unwrap(), 0);
        assert_eq!(parse_choice(" 3 ", 3).unwrap(), 2);
        for bad in ["0", "4", "99", "-1", "", "two", "1.5"] {
            assert!(
                matches!(parse_choice(bad, 3), Err(PromptError::InvalidSelection(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_select_numbered_returns_value() {
        let (result, output) = select("2\n");
        assert_eq!(result.unwrap(), "b");
        assert_eq!(output, "Pick\n  1) a\n  2) b\n  3) c\nEnter number: ");
    }

    #[test]
    fn test_select_numbered_out_of_range() {
        assert!(matches!(select("0\n").0, Err(PromptError::InvalidSelection(_))));
        assert!(matches!(select("99\n").0, Err(PromptError::InvalidSelection(_))));
    }

    #[test]
    fn test_select_numbered_end_of_input_is_invalid() {
        assert!(matches!(select("").0, Err(PromptError::InvalidSelection(_))));
    }

    #[test]
    fn test_select_numbered_uses_labels() {
        colored::control::set_override(false);
        let options = vec![SelectOption::with_label("ts", "TypeScript")];
        let mut input = Cursor::new(b"1\n".to_vec());
        let mut output = Vec::new();
        let value =
            select_numbered(&mut input, &mut output, &Theme::default(), "Lang", &options).unwrap();
        assert_eq!(value, "ts");
        assert!(String::from_utf8(output).unwrap().contains("  1) TypeScript\n"));
    }

    #[test]
    fn test_multi_numbered_returns_option_order() {
        assert_eq!(multi("3,1\n").unwrap(), vec!["a", "c"]);
        assert_eq!(multi(" 2 , 2 ,1\n").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_multi_numbered_blank_selects_nothing() {
        assert!(multi("\n").unwrap().is_empty());
        assert!(multi("").unwrap().is_empty());
    }

    #[test]
    fn test_multi_numbered_rejects_any_bad_token() {
        for bad in ["1,4\n", "1,,2\n", "1,\n", "x\n", "0\n"] {
            assert!(
                matches!(multi(bad), Err(PromptError::InvalidSelection(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_read_line_trims() {
        let mut input = Cursor::new(b"  hello world \r\nnext\n".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), "hello world");
        assert_eq!(read_line(&mut input).unwrap(), "next");
        assert_eq!(read_line(&mut input).unwrap(), "");
    }
}
