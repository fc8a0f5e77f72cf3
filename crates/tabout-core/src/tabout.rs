//! Forward navigation (tabout) and the closing-bracket trigger.

use crate::buffer::TextBuffer;
use crate::exit;
use crate::matcher::UnitMatcher;
use crate::region::{MathContext, MathRegion};
use crate::vocabulary::Vocabulary;

/// Typed characters that may jump over an identical character at the cursor.
pub const CLOSING_BRACKETS: [char; 3] = [')', ']', '}'];

/// Moves the cursor past the next closing delimiter of the math region.
///
/// When no closing delimiter follows and only whitespace remains before the
/// region end, the cursor leaves the region instead (see [`exit::exit_forward`]).
/// Returns false if the event does not apply and the host should fall back
/// to its default behaviour.
pub fn tabout<B, C>(buffer: &mut B, context: &C, vocabulary: &Vocabulary) -> bool
where
    B: TextBuffer + ?Sized,
    C: MathContext + ?Sized,
{
    let Some(region) = MathRegion::resolve(context) else {
        return false;
    };
    let cursor = buffer.cursor();
    if !region.contains(cursor) {
        log::debug!("cursor {} is outside math region {:?}", cursor, region);
        return false;
    }

    match find_closing(buffer.text(), &region, cursor, vocabulary) {
        Some(target) => {
            log::debug!("tabout {} -> {}", cursor, target);
            buffer.set_cursor(target);
            true
        }
        None => exit::exit_forward(buffer, &region, cursor),
    }
}

/// Finds the offset just past the first closing unit that ends after `cursor`.
///
/// The scan starts at the region start rather than at the cursor so that
/// every unit is seen whole: a cursor sitting inside `\right)` still jumps
/// past the entire unit, and the `]` of `\left]` is never taken for a
/// closing symbol.
///
/// A left unit that starts at or after the cursor opens a pair lying wholly
/// ahead. The scan then skips to the end of the next right unit and resumes
/// after it, so `‸\left( x \right) y)` lands after the final `)`. This is a
/// single level of pairing, not a depth count: with nested sized pairs ahead
/// of the cursor the first right unit ends the skip. A left unit with no
/// right unit before the region end exhausts the scan.
pub fn find_closing(
    text: &str,
    region: &MathRegion,
    cursor: usize,
    vocabulary: &Vocabulary,
) -> Option<usize> {
    let units = UnitMatcher::new(text, vocabulary);
    let end = region.end.min(text.len());
    let mut skipping_pair = false;
    let mut i = region.start;

    while i < end {
        let right = units.right_unit(i);
        if right > 0 {
            i += right;
            if skipping_pair {
                log::trace!("skipped sized pair ending at {}", i);
                skipping_pair = false;
            } else if i > cursor {
                return Some(i);
            }
            continue;
        }

        if !skipping_pair {
            let closing = units.closing_symbol(i);
            if closing > 0 {
                i += closing;
                if i > cursor {
                    return Some(i);
                }
                continue;
            }

            let left = units.left_unit(i);
            if left > 0 {
                skipping_pair = i >= cursor;
                i += left;
                continue;
            }
        }

        i += units.char_len(i);
    }

    None
}

/// True if typing `key` should jump over the identical closing bracket
/// already at the cursor instead of inserting a second one.
pub fn should_tabout_by_close_bracket<B: TextBuffer + ?Sized>(buffer: &B, key: char) -> bool {
    let selection = buffer.selection();
    if !selection.is_empty() {
        return false;
    }
    buffer
        .char_at(selection.from())
        .is_some_and(|c| c == key && CLOSING_BRACKETS.contains(&c))
}

/// Keystroke handler for closing brackets: tabout when the trigger applies.
pub fn close_bracket<B, C>(buffer: &mut B, context: &C, vocabulary: &Vocabulary, key: char) -> bool
where
    B: TextBuffer + ?Sized,
    C: MathContext + ?Sized,
{
    should_tabout_by_close_bracket(buffer, key) && tabout(buffer, context, vocabulary)
}
