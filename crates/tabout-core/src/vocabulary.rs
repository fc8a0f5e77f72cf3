//! Token vocabularies for delimiter scanning.
//!
//! A [`Vocabulary`] bundles the five token lists the scanners consult:
//!
//! - **Opening symbols**: bare delimiters a reverse-tabout may land before (`(`, `\langle`)
//! - **Closing symbols**: bare delimiters a tabout may land after (`)`, `\rangle`)
//! - **Left commands**: sizing commands that open a pair (`\left`, `\bigl`)
//! - **Right commands**: sizing commands that close a pair (`\right`, `\bigr`)
//! - **Delimiters**: anything a sizing command may be followed by (`(`, `\|`, `.`)
//!
//! Every list is kept sorted longest-first, so the first hit while walking a
//! list is always the longest token matching at that offset.

use std::fmt;

use crate::config::{ConfigError, TaboutConfig};

pub const DEFAULT_LEFT_COMMANDS: &[&str] = &["\\left", "\\bigl", "\\Bigl", "\\biggl", "\\Biggl"];

pub const DEFAULT_RIGHT_COMMANDS: &[&str] =
    &["\\right", "\\bigr", "\\Bigr", "\\biggr", "\\Biggr"];

pub const DEFAULT_OPENING_SYMBOLS: &[&str] = &[
    "(",
    "[",
    "\\lbrack",
    "{",
    "\\{",
    "\\lbrace",
    "\\langle",
    "\\lceil",
    "\\lfloor",
    "\\lvert",
    "\\lVert",
    "\\ulcorner",
];

pub const DEFAULT_CLOSING_SYMBOLS: &[&str] = &[
    ")",
    "]",
    "\\rbrack",
    "}",
    "\\}",
    "\\rbrace",
    "\\rangle",
    "\\rceil",
    "\\rfloor",
    "\\rvert",
    "\\rVert",
    "\\urcorner",
];

pub const DEFAULT_DELIMITERS: &[&str] = &[
    "(",
    ")",
    "[",
    "]",
    "\\lbrack",
    "\\rbrack",
    "\\{",
    "\\}",
    "\\lbrace",
    "\\rbrace",
    "<",
    ">",
    "\\langle",
    "\\rangle",
    "\\lt",
    "\\gt",
    "\\lfloor",
    "\\rfloor",
    "\\lceil",
    "\\rceil",
    "/",
    "\\\\",
    "\\backslash",
    "|",
    "\\vert",
    "\\lvert",
    "\\rvert",
    "\\|",
    "\\Vert",
    "\\lVert",
    "\\rVert",
    "\\uparrow",
    "\\downarrow",
    "\\Uparrow",
    "\\Downarrow",
    "\\ulcorner",
    "\\urcorner",
    ".",
];

/// Names one of the five token lists, used in configuration errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenSet {
    OpeningSymbols,
    ClosingSymbols,
    LeftCommands,
    RightCommands,
    Delimiters,
}

impl fmt::Display for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenSet::OpeningSymbols => "openingSymbols",
            TokenSet::ClosingSymbols => "closingSymbols",
            TokenSet::LeftCommands => "leftCommands",
            TokenSet::RightCommands => "rightCommands",
            TokenSet::Delimiters => "delimiters",
        };
        f.write_str(name)
    }
}

/// An immutable snapshot of the five token lists, each sorted longest-first.
///
/// Scanners borrow a vocabulary for the duration of a single call; nothing
/// about it is cached between calls.
///
/// ```
/// use tabout_core::Vocabulary;
///
/// let vocabulary = Vocabulary::default();
/// assert_eq!(vocabulary.left_commands()[0], "\\biggl");
/// assert!(vocabulary.delimiters().iter().any(|d| d == "\\langle"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    opening_symbols: Vec<String>,
    closing_symbols: Vec<String>,
    left_commands: Vec<String>,
    right_commands: Vec<String>,
    delimiters: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from user-supplied lists.
    ///
    /// Duplicates are dropped and each list is sorted longest-first. An empty
    /// token would match everywhere, so it is rejected.
    pub fn new<S: AsRef<str>>(
        opening_symbols: &[S],
        closing_symbols: &[S],
        left_commands: &[S],
        right_commands: &[S],
        delimiters: &[S],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            opening_symbols: validated(TokenSet::OpeningSymbols, opening_symbols)?,
            closing_symbols: validated(TokenSet::ClosingSymbols, closing_symbols)?,
            left_commands: validated(TokenSet::LeftCommands, left_commands)?,
            right_commands: validated(TokenSet::RightCommands, right_commands)?,
            delimiters: validated(TokenSet::Delimiters, delimiters)?,
        })
    }

    pub fn from_config(config: &TaboutConfig) -> Result<Self, ConfigError> {
        Self::new(
            &config.opening_symbols,
            &config.closing_symbols,
            &config.left_commands,
            &config.right_commands,
            &config.delimiters,
        )
    }

    pub fn opening_symbols(&self) -> &[String] {
        &self.opening_symbols
    }

    pub fn closing_symbols(&self) -> &[String] {
        &self.closing_symbols
    }

    pub fn left_commands(&self) -> &[String] {
        &self.left_commands
    }

    pub fn right_commands(&self) -> &[String] {
        &self.right_commands
    }

    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            opening_symbols: sort_longest_first(DEFAULT_OPENING_SYMBOLS),
            closing_symbols: sort_longest_first(DEFAULT_CLOSING_SYMBOLS),
            left_commands: sort_longest_first(DEFAULT_LEFT_COMMANDS),
            right_commands: sort_longest_first(DEFAULT_RIGHT_COMMANDS),
            delimiters: sort_longest_first(DEFAULT_DELIMITERS),
        }
    }
}

fn validated<S: AsRef<str>>(set: TokenSet, tokens: &[S]) -> Result<Vec<String>, ConfigError> {
    if tokens.iter().any(|token| token.as_ref().is_empty()) {
        return Err(ConfigError::EmptyToken(set));
    }
    Ok(sort_longest_first(tokens))
}

/// Deduplicates (keeping first occurrence) and sorts by descending length.
/// The sort is stable, so equal-length tokens keep their configured order.
fn sort_longest_first<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut sorted: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        let token = token.as_ref();
        if !sorted.iter().any(|seen| seen == token) {
            sorted.push(token.to_string());
        }
    }
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
}
