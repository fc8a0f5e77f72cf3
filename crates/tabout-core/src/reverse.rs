//! Backward navigation (reverse-tabout).

use crate::buffer::TextBuffer;
use crate::exit;
use crate::matcher::UnitMatcher;
use crate::region::{MathContext, MathRegion};
use crate::vocabulary::Vocabulary;

/// Moves the cursor before the closest opening delimiter preceding it.
///
/// With only whitespace between the region start and the cursor, the cursor
/// leaves the region backward (see [`exit::exit_backward`]). Returns false
/// only when the cursor is not in a math region.
pub fn reverse_tabout<B, C>(buffer: &mut B, context: &C, vocabulary: &Vocabulary) -> bool
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

    let at_start = buffer
        .text()
        .get(region.start..cursor)
        .is_some_and(|head| head.trim().is_empty());
    if at_start {
        return exit::exit_backward(buffer, &region);
    }

    let target = find_opening(buffer.text(), &region, cursor, vocabulary);
    log::debug!("reverse tabout {} -> {}", cursor, target);
    buffer.set_cursor(target);
    true
}

/// Finds the start of the last opening unit that begins before `cursor`.
///
/// The region is walked from its start so units are recognised whole. Right
/// sized units before the cursor are stepped over without becoming a
/// destination; the scan never looks past the cursor. With no opening unit
/// before the cursor the result is the region start.
pub fn find_opening(text: &str, region: &MathRegion, cursor: usize, vocabulary: &Vocabulary) -> usize {
    let units = UnitMatcher::new(text, vocabulary);
    let end = region.end.min(text.len());
    let mut previous = region.start;
    let mut i = region.start;

    while i < end {
        let opening = match units.left_unit(i) {
            0 => units.opening_symbol(i),
            left => left,
        };
        if opening > 0 {
            if i >= cursor {
                return previous;
            }
            previous = i;
            i += opening;
            if i >= cursor {
                return previous;
            }
            continue;
        }

        let right = units.right_unit(i);
        if right > 0 {
            if i >= cursor {
                return previous;
            }
            i += right;
            continue;
        }

        i += units.char_len(i);
    }

    previous
}
