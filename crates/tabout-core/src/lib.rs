//! # Tabout Core
//!
//! Delimiter-aware cursor navigation inside LaTeX math.
//!
//! ## Overview
//!
//! Given a cursor inside a math region, **tabout** moves it past the next
//! closing delimiter and **reverse-tabout** moves it before the previous
//! opening one. Sized delimiters (`\left(`, `\Bigr\rangle`) are treated as
//! single units. When nothing is left in the scan direction and the cursor
//! sits at the edge of the region, it steps out of the math altogether.
//!
//! ## Modules
//!
//! - [`vocabulary`] - The five token lists, sorted longest-first
//! - [`config`] - JSON configuration for the token lists
//! - [`matcher`] - Token and compound (`command + delimiter`) matching
//! - [`tabout`] / [`reverse`] - The forward and backward scanners
//! - [`exit`] - Leaving a region when no delimiter remains
//! - [`region`] / [`buffer`] - Interfaces to the host editor
//! - [`detect`] - A reference math region classifier for `$`, `$$` and fenced math
//!
//! Every scan borrows its [`Vocabulary`] for the duration of the call and keeps
//! no state between calls. The only effects are on the host buffer: a new
//! cursor position, and for block math exits a trimmed line and possibly a new
//! trailing line.
//!
//! ## Examples
//!
//! ```
//! use tabout_core::buffer::{StringBuffer, TextBuffer};
//! use tabout_core::detect::MathDetector;
//! use tabout_core::Navigator;
//!
//! let navigator = Navigator::default();
//! let mut buffer = StringBuffer::from_marked(r"$\left( a‸ + b \right) c$");
//! let context = MathDetector::new(buffer.text(), buffer.cursor());
//!
//! assert!(navigator.tabout(&mut buffer, &context));
//! assert_eq!(buffer.render(), r"$\left( a + b \right)‸ c$");
//! ```

pub mod buffer;
pub mod config;
pub mod detect;
pub mod exit;
pub mod matcher;
pub mod region;
pub mod reverse;
pub mod tabout;
pub mod vocabulary;

pub use buffer::{Selection, StringBuffer, TextBuffer};
pub use config::{ConfigError, TaboutConfig};
pub use detect::MathDetector;
pub use region::{Bounds, MathContext, MathRegion, RegionKind};
pub use reverse::reverse_tabout;
pub use tabout::{close_bracket, should_tabout_by_close_bracket, tabout};
pub use vocabulary::Vocabulary;

/// Owns a [`Vocabulary`] and runs the scanners against it.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    vocabulary: Vocabulary,
}

impl Navigator {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn from_config(config: &TaboutConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(config.vocabulary()?))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn tabout<B, C>(&self, buffer: &mut B, context: &C) -> bool
    where
        B: TextBuffer + ?Sized,
        C: MathContext + ?Sized,
    {
        tabout::tabout(buffer, context, &self.vocabulary)
    }

    pub fn reverse_tabout<B, C>(&self, buffer: &mut B, context: &C) -> bool
    where
        B: TextBuffer + ?Sized,
        C: MathContext + ?Sized,
    {
        reverse::reverse_tabout(buffer, context, &self.vocabulary)
    }

    pub fn close_bracket<B, C>(&self, buffer: &mut B, context: &C, key: char) -> bool
    where
        B: TextBuffer + ?Sized,
        C: MathContext + ?Sized,
    {
        tabout::close_bracket(buffer, context, &self.vocabulary, key)
    }
}
