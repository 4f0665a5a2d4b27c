//! Yes/no answer parsing for line-read confirmations.

/// Interprets one line typed at a confirmation prompt.
///
/// `y` and `yes` (any case) confirm, a blank line picks `default`, and
/// anything else declines.
pub(crate) fn parse_answer(input: &str, default: bool) -> bool {
    let answer = input.trim().to_lowercase();
    if answer.is_empty() {
        return default;
    }
    answer == "y" || answer == "yes"
}

/// The `(Y/n)` style hint shown after the prompt.
pub(crate) fn hint(default: bool) -> &'static str {
    if default { "Y/n" } else { "y/N" }
}
