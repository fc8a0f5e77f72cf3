//! Token and compound matching.
//!
//! ## Overview
//!
//! Matching is **anchored**: a token either starts at an offset (forward) or
//! ends at it (backward). Two kinds of tokens are distinguished:
//!
//! - **Bare symbols** such as `(` or `\{` match by literal comparison.
//! - **Commands**, any token ending in an ASCII letter (`\left`, `\langle`),
//!   additionally require that the matched name is not continued by another
//!   letter. `\left` never matches inside `\lefttail`.
//!
//! A **compound unit** is a sizing command, optional whitespace and a
//! delimiter, e.g. `\left(` or `\Bigr \rangle`. Compounds are consumed as one
//! atomic length so that the delimiter inside them is never seen on its own.
//!
//! ## Offsets
//!
//! All offsets are UTF-8 byte offsets. Comparison is done on bytes, so an
//! offset that falls inside a multi-byte character simply fails to match
//! instead of panicking.
//!
//! ## Examples
//!
//! ```
//! use tabout_core::matcher::{match_compound, Direction};
//! use tabout_core::Vocabulary;
//!
//! let vocabulary = Vocabulary::default();
//! let text = r"\left\langle x \right\rangle";
//!
//! let len = match_compound(text, vocabulary.left_commands(), vocabulary.delimiters(), 0, Direction::Forward);
//! assert_eq!(&text[..len], r"\left\langle");
//!
//! let len = match_compound(text, vocabulary.right_commands(), vocabulary.delimiters(), text.len(), Direction::Backward);
//! assert_eq!(&text[text.len() - len..], r"\right\rangle");
//! ```

use crate::vocabulary::Vocabulary;

/// Scan direction of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The token starts at the index.
    Forward,
    /// The token ends at the index.
    Backward,
}

/// Returns true if `token` is matched as a command (it ends in an ASCII letter).
pub fn is_command(token: &str) -> bool {
    token.as_bytes().last().is_some_and(u8::is_ascii_alphabetic)
}

fn is_letter_at(text: &str, offset: usize) -> bool {
    text.as_bytes().get(offset).is_some_and(u8::is_ascii_alphabetic)
}

/// Checks whether `token` matches `text` anchored at `index`.
///
/// For commands, the character that follows the matched span in text order
/// must not be a letter. Going forward that is the character after the span;
/// going backward it is the character at `index`, the one the scan came from.
pub fn matches(text: &str, token: &str, index: usize, direction: Direction) -> bool {
    if token.is_empty() {
        return false;
    }
    let bytes = text.as_bytes();
    let (found, boundary) = match direction {
        Direction::Forward => (
            bytes
                .get(index..)
                .is_some_and(|rest| rest.starts_with(token.as_bytes())),
            index + token.len(),
        ),
        Direction::Backward => (
            bytes
                .get(..index)
                .is_some_and(|head| head.ends_with(token.as_bytes())),
            index,
        ),
    };
    found && !(is_command(token) && is_letter_at(text, boundary))
}

/// Length of the first token in `tokens` that matches at `index`, or 0.
///
/// `tokens` must be sorted longest-first for this to be a longest match.
pub fn find_token_length(tokens: &[String], text: &str, index: usize, direction: Direction) -> usize {
    tokens
        .iter()
        .find(|token| matches(text, token, index, direction))
        .map_or(0, |token| token.len())
}

fn whitespace_run(text: &str, index: usize, direction: Direction) -> usize {
    let counted = |c: &char| c.is_whitespace();
    match direction {
        Direction::Forward => text.get(index..).map_or(0, |rest| {
            rest.chars().take_while(counted).map(char::len_utf8).sum()
        }),
        Direction::Backward => text.get(..index).map_or(0, |head| {
            head.chars().rev().take_while(counted).map(char::len_utf8).sum()
        }),
    }
}

/// Matches a `command + whitespace + delimiter` compound anchored at `index`.
///
/// Returns the combined length of the unit, or 0 if no command is involved.
/// A command whose delimiter is missing yields the command's length alone:
/// the unit ends right after the command so the scanner stops on the
/// malformed spot instead of skipping past it.
///
/// Going backward the unit is recognised from its delimiter end: the
/// delimiter must end at `index` with the command before it. A bare command
/// ending at `index` is the degraded match in that direction.
pub fn match_compound(
    text: &str,
    commands: &[String],
    delimiters: &[String],
    index: usize,
    direction: Direction,
) -> usize {
    match direction {
        Direction::Forward => {
            let command = find_token_length(commands, text, index, direction);
            if command == 0 {
                return 0;
            }
            let after_command = index + command;
            let whitespace = whitespace_run(text, after_command, direction);
            let delimiter =
                find_token_length(delimiters, text, after_command + whitespace, direction);
            if delimiter == 0 {
                log::trace!("sizing command at {} has no delimiter", index);
                return command;
            }
            command + whitespace + delimiter
        }
        Direction::Backward => {
            let delimiter = find_token_length(delimiters, text, index, direction);
            if delimiter > 0 {
                let before_delimiter = index - delimiter;
                let whitespace = whitespace_run(text, before_delimiter, direction);
                let command =
                    find_token_length(commands, text, before_delimiter - whitespace, direction);
                if command > 0 {
                    return command + whitespace + delimiter;
                }
            }
            find_token_length(commands, text, index, direction)
        }
    }
}

/// Matches the delimiter units of a [`Vocabulary`] in one text.
///
/// All lookups are forward-anchored; this is what the scanners use while
/// walking a region from its start.
#[derive(Debug, Clone, Copy)]
pub struct UnitMatcher<'a> {
    text: &'a str,
    vocabulary: &'a Vocabulary,
}

impl<'a> UnitMatcher<'a> {
    pub fn new(text: &'a str, vocabulary: &'a Vocabulary) -> Self {
        Self { text, vocabulary }
    }

    /// A right sizing command with its delimiter, or the bare command.
    pub fn right_unit(&self, index: usize) -> usize {
        match_compound(
            self.text,
            self.vocabulary.right_commands(),
            self.vocabulary.delimiters(),
            index,
            Direction::Forward,
        )
    }

    /// A left sizing command with its delimiter, or the bare command.
    pub fn left_unit(&self, index: usize) -> usize {
        match_compound(
            self.text,
            self.vocabulary.left_commands(),
            self.vocabulary.delimiters(),
            index,
            Direction::Forward,
        )
    }

    pub fn opening_symbol(&self, index: usize) -> usize {
        find_token_length(self.vocabulary.opening_symbols(), self.text, index, Direction::Forward)
    }

    pub fn closing_symbol(&self, index: usize) -> usize {
        find_token_length(self.vocabulary.closing_symbols(), self.text, index, Direction::Forward)
    }

    /// Byte length of the character at `index`; 1 off a char boundary.
    pub fn char_len(&self, index: usize) -> usize {
        self.text
            .get(index..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("\\left"));
        assert!(is_command("\\lVert"));
        assert!(!is_command("\\{"));
        assert!(!is_command("\\\\"));
        assert!(!is_command("("));
        assert!(!is_command(""));
    }

    #[test]
    fn test_bare_symbol_match() {
        assert!(matches("a(b", "(", 1, Direction::Forward));
        assert!(!matches("a(b", "(", 0, Direction::Forward));
        assert!(matches("a(b", "(", 2, Direction::Backward));
        assert!(!matches("a(b", "(", 1, Direction::Backward));
    }

    #[test]
    fn test_command_boundary_forward() {
        assert!(matches(r"\left(", "\\left", 0, Direction::Forward));
        assert!(matches(r"\left", "\\left", 0, Direction::Forward));
        assert!(!matches(r"\lefttail", "\\left", 0, Direction::Forward));
        assert!(matches(r"\left\lbrace", "\\left", 0, Direction::Forward));
    }

    #[test]
    fn test_command_boundary_backward() {
        assert!(matches(r"\left(", "\\left", 5, Direction::Backward));
        assert!(!matches(r"\lefttail", "\\left", 5, Direction::Backward));
        // Letters before the backslash are irrelevant.
        assert!(matches(r"x\left(", "\\left", 6, Direction::Backward));
    }

    #[test]
    fn test_out_of_range_and_mid_char() {
        assert!(!matches("ab", "(", 10, Direction::Forward));
        assert!(!matches("ab", "(", 10, Direction::Backward));
        assert!(!matches("é(", "(", 1, Direction::Forward));
        assert!(matches("é(", "(", 2, Direction::Forward));
    }

    #[test]
    fn test_longest_match_wins() {
        let delimiters = tokens(&["\\langle", "\\lt", "<"]);
        assert_eq!(find_token_length(&delimiters, r"\langle", 0, Direction::Forward), 7);
        assert_eq!(find_token_length(&delimiters, r"\lt x", 0, Direction::Forward), 3);
        assert_eq!(find_token_length(&delimiters, r"\ltimes", 0, Direction::Forward), 0);
    }

    #[test]
    fn test_compound_forward() {
        let commands = tokens(&["\\Biggl", "\\bigl", "\\left"]);
        let delimiters = tokens(&["\\langle", "(", "."]);
        assert_eq!(match_compound(r"\left(", &commands, &delimiters, 0, Direction::Forward), 6);
        assert_eq!(
            match_compound("\\Biggl  \\langle", &commands, &delimiters, 0, Direction::Forward),
            15
        );
        assert_eq!(match_compound(r"\left.", &commands, &delimiters, 0, Direction::Forward), 6);
        assert_eq!(match_compound("x(", &commands, &delimiters, 0, Direction::Forward), 0);
    }

    #[test]
    fn test_compound_fallback_is_command_length() {
        let commands = tokens(&["\\left"]);
        let delimiters = tokens(&["("]);
        assert_eq!(match_compound(r"\left ", &commands, &delimiters, 0, Direction::Forward), 5);
        assert_eq!(match_compound(r"\left x", &commands, &delimiters, 0, Direction::Forward), 5);
        assert_eq!(match_compound(r"\left", &commands, &delimiters, 0, Direction::Forward), 5);
    }

    #[test]
    fn test_compound_backward() {
        let commands = tokens(&["\\right"]);
        let delimiters = tokens(&["\\rangle", ")"]);
        let text = r"x \right \rangle";
        assert_eq!(
            match_compound(text, &commands, &delimiters, text.len(), Direction::Backward),
            14
        );
        // A delimiter without a command in front of it is not a compound.
        assert_eq!(match_compound("x)", &commands, &delimiters, 2, Direction::Backward), 0);
        // Bare command is the degraded match.
        assert_eq!(match_compound(r"\right ", &commands, &delimiters, 6, Direction::Backward), 6);
    }

    #[test]
    fn test_unit_matcher() {
        let vocabulary = Vocabulary::default();
        let text = r"\bigl[ a \bigr] \rangle";
        let units = UnitMatcher::new(text, &vocabulary);
        assert_eq!(units.left_unit(0), 6);
        assert_eq!(units.right_unit(9), 6);
        assert_eq!(units.right_unit(0), 0);
        assert_eq!(units.closing_symbol(16), 7);
        assert_eq!(units.opening_symbol(5), 1);
        assert_eq!(units.opening_symbol(4), 0);
    }

    #[test]
    fn test_char_len() {
        let vocabulary = Vocabulary::default();
        let units = UnitMatcher::new("aé", &vocabulary);
        assert_eq!(units.char_len(0), 1);
        assert_eq!(units.char_len(1), 2);
        assert_eq!(units.char_len(2), 1);
    }
}
