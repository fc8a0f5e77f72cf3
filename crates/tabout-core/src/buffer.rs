//! Host text-buffer interface and an in-memory implementation.
//!
//! The scanners only read through [`TextBuffer`]; the region-exit handler is
//! the one place that writes, and it does so with [`TextBuffer::replace_range`]
//! and [`TextBuffer::set_cursor`].

use line_index::{LineCol, LineIndex, TextSize};

/// The primary selection. The cursor is its `to()` end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn point(offset: usize) -> Self {
        Self {
            anchor: offset,
            head: offset,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }
}

/// A line of the buffer. `to` excludes the line break, `\r\n` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    /// Zero-based line number.
    pub index: usize,
    pub from: usize,
    pub to: usize,
}

/// What the scanners need from the host editor.
pub trait TextBuffer {
    fn text(&self) -> &str;

    fn selection(&self) -> Selection;

    /// Collapses the selection to `offset`.
    fn set_cursor(&mut self, offset: usize);

    fn replace_range(&mut self, from: usize, to: usize, insert: &str);

    /// The line containing `offset`, clamped to the buffer.
    fn line_at(&self, offset: usize) -> Line;

    fn line_count(&self) -> usize;

    fn cursor(&self) -> usize {
        self.selection().to()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text().get(offset..)?.chars().next()
    }

    /// `from..to` of the text, or `""` if the range is not on char boundaries.
    fn slice(&self, from: usize, to: usize) -> &str {
        self.text().get(from..to).unwrap_or("")
    }

    /// The line break used for new lines: `\r\n` if the text has one.
    fn line_ending(&self) -> &'static str {
        if self.text().contains("\r\n") {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Length of the line break starting at `offset`, 0 if there is none.
    fn line_break_len(&self, offset: usize) -> usize {
        match self.text().as_bytes().get(offset..) {
            Some([b'\r', b'\n', ..]) => 2,
            Some([b'\n', ..]) => 1,
            _ => 0,
        }
    }
}

fn text_size(offset: usize) -> TextSize {
    TextSize::from(u32::try_from(offset).unwrap_or(u32::MAX))
}

/// An owned `String` buffer with a single selection.
#[derive(Debug, Clone)]
pub struct StringBuffer {
    text: String,
    selection: Selection,
    lines: LineIndex,
}

impl StringBuffer {
    /// Marks the cursor in [`StringBuffer::from_marked`] and [`StringBuffer::render`].
    pub const CURSOR_MARKER: char = '‸';

    pub fn new(text: impl Into<String>) -> Self {
        Self::with_selection(text, Selection::point(0))
    }

    pub fn with_cursor(text: impl Into<String>, cursor: usize) -> Self {
        Self::with_selection(text, Selection::point(cursor))
    }

    pub fn with_selection(text: impl Into<String>, selection: Selection) -> Self {
        let text = text.into();
        let lines = LineIndex::new(&text);
        let len = text.len();
        Self {
            text,
            selection: Selection {
                anchor: selection.anchor.min(len),
                head: selection.head.min(len),
            },
            lines,
        }
    }

    /// Builds a buffer from text containing one [`Self::CURSOR_MARKER`].
    ///
    /// ```
    /// use tabout_core::buffer::{StringBuffer, TextBuffer};
    ///
    /// let buffer = StringBuffer::from_marked("$x^‸2$");
    /// assert_eq!(buffer.text(), "$x^2$");
    /// assert_eq!(buffer.cursor(), 3);
    /// ```
    pub fn from_marked(marked: &str) -> Self {
        match marked.find(Self::CURSOR_MARKER) {
            Some(cursor) => {
                let mut text = marked.to_string();
                text.remove(cursor);
                Self::with_cursor(text, cursor)
            }
            None => Self::new(marked),
        }
    }

    /// The text with [`Self::CURSOR_MARKER`] inserted at the cursor.
    pub fn render(&self) -> String {
        let mut rendered = self.text.clone();
        let cursor = self.cursor();
        if rendered.is_char_boundary(cursor) {
            rendered.insert(cursor, Self::CURSOR_MARKER);
        }
        rendered
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn line_start(&self, line: u32) -> Option<usize> {
        self.lines
            .offset(LineCol { line, col: 0 })
            .map(|offset| u32::from(offset) as usize)
    }
}

/// Moves `offset` through the replacement of `from..to` by `inserted` bytes.
/// Offsets inside the replaced range collapse onto its start.
fn map_offset(offset: usize, from: usize, to: usize, inserted: usize) -> usize {
    if offset <= from {
        offset
    } else if offset >= to {
        offset - (to - from) + inserted
    } else {
        from
    }
}

impl TextBuffer for StringBuffer {
    fn text(&self) -> &str {
        &self.text
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_cursor(&mut self, offset: usize) {
        self.selection = Selection::point(offset.min(self.text.len()));
    }

    fn replace_range(&mut self, from: usize, to: usize, insert: &str) {
        let to = to.min(self.text.len());
        if from > to || !self.text.is_char_boundary(from) || !self.text.is_char_boundary(to) {
            log::warn!("ignoring replacement of invalid range {}..{}", from, to);
            return;
        }
        self.text.replace_range(from..to, insert);
        self.lines = LineIndex::new(&self.text);
        self.selection = Selection {
            anchor: map_offset(self.selection.anchor, from, to, insert.len()),
            head: map_offset(self.selection.head, from, to, insert.len()),
        };
    }

    fn line_at(&self, offset: usize) -> Line {
        let offset = offset.min(self.text.len());
        let line = self.lines.line_col(text_size(offset)).line;
        let from = self.line_start(line).unwrap_or(0);
        let to = match self.line_start(line + 1) {
            Some(next) => {
                let newline = next - 1;
                if newline > from && self.text.as_bytes()[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                }
            }
            None => self.text.len(),
        };
        Line {
            index: line as usize,
            from,
            to,
        }
    }

    fn line_count(&self) -> usize {
        self.lines.line_col(text_size(self.text.len())).line as usize + 1
    }
}
