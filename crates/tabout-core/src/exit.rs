//! Leaving a math region once no delimiter remains in the scan direction.
//!
//! Inline and fenced regions are left by stepping over the single closing
//! (or opening) marker. Block regions are line oriented: going forward the
//! cursor moves to the line after the `$$` closer, creating that line when
//! the closer sits on the last line of the buffer.

use crate::buffer::TextBuffer;
use crate::region::MathRegion;

/// Length of the `$$` marker around block math.
const BLOCK_MARKER_LEN: usize = 2;

/// Exits `region` forward if only whitespace separates `cursor` from its end.
///
/// Returns false, without touching the buffer, when the cursor is not at the
/// trimmed end of the region.
pub fn exit_forward<B: TextBuffer + ?Sized>(
    buffer: &mut B,
    region: &MathRegion,
    cursor: usize,
) -> bool {
    let at_end = buffer
        .text()
        .get(cursor..region.end)
        .is_some_and(|rest| rest.trim().is_empty());
    if !at_end {
        log::debug!("no closing delimiter after {} and not at region end", cursor);
        return false;
    }

    if !region.is_block() {
        log::debug!("leaving inline math at {}", region.end + 1);
        buffer.set_cursor(region.end + 1);
        return true;
    }

    let end = trim_departed_line(buffer, cursor, region.end);
    let closer = buffer.line_at(end + BLOCK_MARKER_LEN);
    if closer.index + 1 == buffer.line_count() {
        let line_ending = buffer.line_ending();
        buffer.replace_range(closer.to, closer.to, line_ending);
    }
    log::debug!("leaving block math below line {}", closer.index);
    let below = closer.to + buffer.line_break_len(closer.to);
    buffer.set_cursor(below);
    true
}

/// Trims the line holding `cursor` and returns where `end` moved to.
fn trim_departed_line<B: TextBuffer + ?Sized>(buffer: &mut B, cursor: usize, end: usize) -> usize {
    let line = buffer.line_at(cursor);
    let content = buffer.slice(line.from, line.to);
    let trimmed = content.trim().to_string();
    let removed = content.len() - trimmed.len();
    if removed == 0 {
        return end;
    }
    let leading = content.len() - content.trim_start().len();

    buffer.replace_range(line.from, line.to, &trimmed);

    if end >= line.to {
        end - removed
    } else {
        line.from + (end - line.from).saturating_sub(leading).min(trimmed.len())
    }
}

/// Exits `region` backward, landing just before its opening marker.
///
/// For block math an indented `$$` on its own line is left by landing at the
/// end of the previous line rather than inside the indentation.
pub fn exit_backward<B: TextBuffer + ?Sized>(buffer: &mut B, region: &MathRegion) -> bool {
    if !region.is_block() {
        let target = region.start.saturating_sub(1);
        log::debug!("leaving inline math backward at {}", target);
        buffer.set_cursor(target);
        return true;
    }

    let opener = region.start.saturating_sub(BLOCK_MARKER_LEN);
    let bytes = buffer.text().as_bytes();
    let before = &bytes[..opener.min(bytes.len())];
    let indent = before
        .iter()
        .rev()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    let run_start = before.len() - indent;
    let target = match &before[..run_start] {
        [.., b'\r', b'\n'] => run_start - 2,
        [.., b'\n'] => run_start - 1,
        _ => opener,
    };

    log::debug!("leaving block math backward at {}", target);
    buffer.set_cursor(target);
    true
}
