//! Runs: maximal stretches of text sharing one attribute map.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use crate::{Font, FontDef, TextAttributes};

/// A slice of a shared text buffer together with its attributes.
///
/// Slicing a run shares both the buffer and the attribute map, so sub-runs
/// cost no copying. Equality compares the text content and the attributes,
/// never the position within the buffer.
#[derive(Clone)]
pub struct Run {
    buffer: Arc<str>,
    start: usize,
    end: usize,
    attributes: Arc<TextAttributes>,
}

impl Run {
    /// A run covering all of `text`.
    pub fn new(text: impl Into<Arc<str>>, attributes: TextAttributes) -> Self {
        let buffer = text.into();
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
            attributes: Arc::new(attributes),
        }
    }

    /// A run over `range` of `buffer`. `range` must lie on char boundaries.
    pub(crate) fn from_parts(
        buffer: Arc<str>,
        range: Range<usize>,
        attributes: Arc<TextAttributes>,
    ) -> Self {
        debug_assert!(buffer.is_char_boundary(range.start) && buffer.is_char_boundary(range.end));
        Self {
            buffer,
            start: range.start,
            end: range.end,
            attributes,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn attributes(&self) -> &TextAttributes {
        &self.attributes
    }

    pub(crate) fn shared_attributes(&self) -> &Arc<TextAttributes> {
        &self.attributes
    }

    /// Offset of this run within its backing buffer.
    pub fn buffer_offset(&self) -> usize {
        self.start
    }

    /// Part of this run; `range` is relative to the run start.
    pub(crate) fn sub_run(&self, range: Range<usize>) -> Run {
        Self {
            buffer: Arc::clone(&self.buffer),
            start: self.start + range.start,
            end: self.start + range.end,
            attributes: Arc::clone(&self.attributes),
        }
    }

    /// If `next` directly continues this run in the same buffer, the run
    /// covering both.
    pub(crate) fn extended_by(&self, next: &Run) -> Option<Run> {
        (Arc::ptr_eq(&self.buffer, &next.buffer) && self.end == next.start).then(|| Run {
            buffer: Arc::clone(&self.buffer),
            start: self.start,
            end: next.end,
            attributes: Arc::clone(&self.attributes),
        })
    }

    /// The same text with other attributes.
    pub(crate) fn with_attributes(&self, attributes: TextAttributes) -> Run {
        Self {
            buffer: Arc::clone(&self.buffer),
            start: self.start,
            end: self.end,
            attributes: Arc::new(attributes),
        }
    }

    /// Check whether both runs carry equal attributes.
    pub fn same_attributes(&self, other: &Run) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes) || self.attributes == other.attributes
    }

    pub fn font_def(&self) -> FontDef {
        self.attributes.font_def()
    }

    pub fn font(&self, base: &Font) -> Font {
        self.attributes.font(base)
    }
}

impl PartialEq for Run {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str() && self.same_attributes(other)
    }
}

impl fmt::Debug for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Run")
            .field("text", &self.as_str())
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

static_assertions::assert_impl_all!(Run: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Style, attr};

    #[test]
    fn sub_runs_share_buffer() {
        let run = Run::new("hello world", TextAttributes::empty());
        let sub = run.sub_run(6..11);
        assert_eq!(sub.as_str(), "world");
        assert_eq!(sub.buffer_offset(), 6);
        assert!(Arc::ptr_eq(&run.buffer, &sub.buffer));
        assert!(Arc::ptr_eq(run.shared_attributes(), sub.shared_attributes()));
    }

    #[test]
    fn extension_requires_contiguity() {
        let run = Run::new("abcdef", TextAttributes::empty());
        let left = run.sub_run(0..2);
        let middle = run.sub_run(2..4);
        let right = run.sub_run(4..6);
        assert_eq!(left.extended_by(&middle).map(|r| r.len()), Some(4));
        assert!(left.extended_by(&right).is_none());

        let other = Run::new("cd", TextAttributes::empty());
        assert!(left.extended_by(&other).is_none());
    }

    #[test]
    fn equality_ignores_position() {
        let a = Run::new("xx-xx", TextAttributes::empty());
        assert_eq!(a.sub_run(0..2), a.sub_run(3..5));

        let bold = Run::new("xx", TextAttributes::empty().with_style(&Style::bold()));
        assert_ne!(a.sub_run(0..2), bold);
        assert_eq!(bold.font_def().bold, Some(true));
        assert!(bold.attributes().contains_key(attr::STYLES));
    }
}
