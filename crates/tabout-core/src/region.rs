//! Math regions and the classifier interface the scanners consult.

use serde::Serialize;

/// Offsets of a math body: `start` is just past the opening marker, `end` is
/// the offset of the closing marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start: usize,
    pub end: usize,
}

/// How a region is delimited; selects the region-exit behaviour.
///
/// A region that is neither inline nor fenced is a `$$ ... $$` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionKind {
    pub inline: bool,
    pub code_fenced: bool,
}

impl RegionKind {
    pub const INLINE: Self = Self {
        inline: true,
        code_fenced: false,
    };
    pub const BLOCK: Self = Self {
        inline: false,
        code_fenced: false,
    };
    pub const FENCED: Self = Self {
        inline: false,
        code_fenced: true,
    };

    pub fn is_block(&self) -> bool {
        !self.inline && !self.code_fenced
    }
}

/// Answers "is the cursor in math, and where does that math start and end".
///
/// Implemented by the host; [`MathDetector`](crate::detect::MathDetector)
/// is a reference implementation over `$`, `$$` and fenced `math` blocks.
pub trait MathContext {
    fn in_math(&self) -> bool;

    /// `None` means the bounds are not available and the scan does not apply.
    fn bounds(&self) -> Option<Bounds>;

    fn kind(&self) -> RegionKind;
}

/// A resolved math region, built fresh for every scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MathRegion {
    pub start: usize,
    pub end: usize,
    pub inline: bool,
    pub code_fenced: bool,
}

impl MathRegion {
    pub fn new(bounds: Bounds, kind: RegionKind) -> Self {
        Self {
            start: bounds.start,
            end: bounds.end,
            inline: kind.inline,
            code_fenced: kind.code_fenced,
        }
    }

    pub fn inline(start: usize, end: usize) -> Self {
        Self::new(Bounds { start, end }, RegionKind::INLINE)
    }

    pub fn block(start: usize, end: usize) -> Self {
        Self::new(Bounds { start, end }, RegionKind::BLOCK)
    }

    pub fn fenced(start: usize, end: usize) -> Self {
        Self::new(Bounds { start, end }, RegionKind::FENCED)
    }

    /// Queries `context`, returning `None` outside math or without bounds.
    pub fn resolve<C: MathContext + ?Sized>(context: &C) -> Option<Self> {
        if !context.in_math() {
            return None;
        }
        let bounds = context.bounds()?;
        if bounds.start > bounds.end {
            log::debug!("ignoring inverted math bounds {:?}", bounds);
            return None;
        }
        Some(Self::new(bounds, context.kind()))
    }

    pub fn kind(&self) -> RegionKind {
        RegionKind {
            inline: self.inline,
            code_fenced: self.code_fenced,
        }
    }

    pub fn is_block(&self) -> bool {
        self.kind().is_block()
    }

    /// True if `offset` lies in `start..=end`.
    pub fn contains(&self, offset: usize) -> bool {
        (self.start..=self.end).contains(&offset)
    }
}

/// A fixed region is its own context: it is always "in math".
impl MathContext for MathRegion {
    fn in_math(&self) -> bool {
        true
    }

    fn bounds(&self) -> Option<Bounds> {
        Some(Bounds {
            start: self.start,
            end: self.end,
        })
    }

    fn kind(&self) -> RegionKind {
        MathRegion::kind(self)
    }
}
