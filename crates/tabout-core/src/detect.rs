//! Math region detection for Markdown-with-LaTeX documents.
//!
//! ## Overview
//!
//! [`find_regions`] performs a single left-to-right pass over the document
//! and recognises three kinds of math:
//!
//! - **Inline**: `$ ... $`, not crossing a blank line
//! - **Block**: `$$ ... $$`
//! - **Fenced**: a code fence whose info string is `math`
//!
//! `\$` is an escaped dollar and never opens or closes math. Other code
//! fences are skipped entirely, so dollars inside them are ignored. Markers
//! without a closing counterpart do not produce a region.
//!
//! Offsets follow [`MathRegion`]: `start` is just past the opening marker and
//! `end` is the closing marker. For fenced math the closing marker is the line
//! break that ends the body, right before the closing fence.
//!
//! ## Examples
//!
//! ```
//! use tabout_core::detect::{find_regions, MathDetector};
//! use tabout_core::region::{MathContext, MathRegion};
//!
//! let text = "Let $x$ be\n$$\ny^2\n$$";
//! assert_eq!(
//!     find_regions(text),
//!     vec![MathRegion::inline(5, 6), MathRegion::block(13, 18)],
//! );
//!
//! let detector = MathDetector::new(text, 15);
//! assert!(detector.in_math());
//! assert!(detector.kind().is_block());
//! ```

use crate::region::{Bounds, MathContext, MathRegion, RegionKind};

const FENCE: &[u8] = b"```";

fn at_line_start(bytes: &[u8], index: usize) -> bool {
    index == 0 || bytes[index - 1] == b'\n'
}

/// Offset of the `\n` ending the line at `from`, or the text length.
fn line_end(bytes: &[u8], from: usize) -> usize {
    bytes
        .get(from..)
        .and_then(|rest| rest.iter().position(|&b| b == b'\n'))
        .map_or(bytes.len(), |pos| from + pos)
}

fn starts_blank_line(rest: &[u8]) -> bool {
    matches!(rest, [b'\n', ..] | [b'\r', b'\n', ..])
}

/// Finds the next unescaped `marker` at or after `from`.
fn find_closing(bytes: &[u8], from: usize, marker: &[u8], stop_at_blank_line: bool) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => {
                j += 2;
                continue;
            }
            b'\n' if stop_at_blank_line && starts_blank_line(&bytes[j + 1..]) => return None,
            _ => {}
        }
        if bytes[j..].starts_with(marker) {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Returns every math region in `text`, in document order.
pub fn find_regions(text: &str) -> Vec<MathRegion> {
    let bytes = text.as_bytes();
    let mut regions = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if at_line_start(bytes, i) && bytes[i..].starts_with(FENCE) {
            i = skip_fence(text, i, &mut regions);
            continue;
        }

        match bytes[i] {
            b'\\' => i += 2,
            b'$' if bytes.get(i + 1) == Some(&b'$') => {
                let start = i + 2;
                match find_closing(bytes, start, b"$$", false) {
                    Some(end) => {
                        regions.push(MathRegion::block(start, end));
                        i = end + 2;
                    }
                    None => i = start,
                }
            }
            b'$' => {
                let start = i + 1;
                match find_closing(bytes, start, b"$", true) {
                    Some(end) => {
                        regions.push(MathRegion::inline(start, end));
                        i = end + 1;
                    }
                    None => i = start,
                }
            }
            _ => i += 1,
        }
    }

    regions
}

/// Consumes the fence opened at `open`, recording it if it holds math.
/// Returns the offset to resume scanning from.
fn skip_fence(text: &str, open: usize, regions: &mut Vec<MathRegion>) -> usize {
    let bytes = text.as_bytes();
    let open_end = line_end(bytes, open);
    let info = text[open + FENCE.len()..open_end].trim();
    let body_start = (open_end + 1).min(bytes.len());

    let mut line = body_start;
    let mut close = None;
    while line < bytes.len() {
        if bytes[line..].starts_with(FENCE) {
            close = Some(line);
            break;
        }
        line = line_end(bytes, line) + 1;
    }

    let (body_end, resume) = match close {
        Some(close) => (close.saturating_sub(1).max(body_start), line_end(bytes, close)),
        None => (bytes.len(), bytes.len()),
    };

    if info == "math" {
        regions.push(MathRegion::fenced(body_start, body_end));
    }
    resume
}

/// A [`MathContext`] for one cursor position in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MathDetector {
    region: Option<MathRegion>,
}

impl MathDetector {
    pub fn new(text: &str, cursor: usize) -> Self {
        let region = find_regions(text)
            .into_iter()
            .find(|region| region.contains(cursor));
        log::trace!("cursor {} in math region {:?}", cursor, region);
        Self { region }
    }

    pub fn region(&self) -> Option<MathRegion> {
        self.region
    }
}

impl MathContext for MathDetector {
    fn in_math(&self) -> bool {
        self.region.is_some()
    }

    fn bounds(&self) -> Option<Bounds> {
        self.region.map(|region| Bounds {
            start: region.start,
            end: region.end,
        })
    }

    fn kind(&self) -> RegionKind {
        self.region.map(|region| region.kind()).unwrap_or_default()
    }
}
