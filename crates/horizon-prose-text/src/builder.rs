//! Incremental construction of rich text.

use std::sync::Arc;

use crate::error::{Result, TextError};
use crate::logging::targets;
use crate::{AttrValue, RichText, Run, Style, TextAttributes, attr};

/// Append-only accumulator for [`RichText`].
///
/// Styles are opened with [`push_style`](Self::push_style) and closed with
/// [`pop_style`](Self::pop_style) in LIFO order. Pushing a style remembers
/// the previous value (or absence) of every key it sets, so popping restores
/// the attributes exactly as they were.
///
/// # Example
///
/// ```
/// use horizon_prose_text::{RichTextBuilder, Style};
///
/// let mut builder = RichTextBuilder::new();
/// builder.append("Hello ");
/// builder.push_style(&Style::bold());
/// builder.append("world");
/// builder.pop_style(&Style::bold());
/// builder.append("!");
///
/// let text = builder.to_rich_text();
/// assert_eq!(text.to_string(), "Hello world!");
/// assert_eq!(text.run_count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct RichTextBuilder {
    buffer: String,
    segments: Vec<Segment>,
    current: Arc<TextAttributes>,
    open: Vec<Frame>,
}

/// A stretch of the buffer ending at `end`, starting where the previous one ends.
#[derive(Debug)]
struct Segment {
    end: usize,
    attributes: Arc<TextAttributes>,
}

/// An open style and the values its keys had before it was pushed.
#[derive(Debug)]
struct Frame {
    style: Style,
    prior: Vec<(String, Option<AttrValue>)>,
}

impl RichTextBuilder {
    /// Create a new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with room for `capacity` bytes of text.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Length of the text so far in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The text appended so far, without formatting.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.buffer.ends_with(suffix)
    }

    /// Attributes that the next appended text will carry.
    pub fn current_attributes(&self) -> &TextAttributes {
        &self.current
    }

    /// The currently open styles, outermost first.
    pub fn open_styles(&self) -> impl Iterator<Item = &Style> + '_ {
        self.open.iter().map(|frame| &frame.style)
    }

    /// Append text with the current attributes.
    pub fn append(&mut self, text: &str) -> &mut Self {
        let attributes = Arc::clone(&self.current);
        self.append_with(text, attributes);
        self
    }

    pub fn append_char(&mut self, c: char) -> &mut Self {
        let mut encoded = [0; 4];
        self.append(c.encode_utf8(&mut encoded))
    }

    /// Append rich text, nesting its formatting inside the open styles.
    pub fn append_rich(&mut self, text: &RichText) -> &mut Self {
        for run in text.runs() {
            let attributes = if self.current.is_empty() {
                Arc::clone(run.shared_attributes())
            } else {
                Arc::new(self.current.layered(run.attributes()))
            };
            self.append_with(run.as_str(), attributes);
        }
        self
    }

    fn append_with(&mut self, text: &str, attributes: Arc<TextAttributes>) {
        if text.is_empty() {
            return;
        }
        self.buffer.push_str(text);
        let end = self.buffer.len();
        match self.segments.last_mut() {
            Some(last) if Arc::ptr_eq(&last.attributes, &attributes) => last.end = end,
            _ => self.segments.push(Segment { end, attributes }),
        }
    }

    /// Append `suffix` unless the text already ends with it.
    pub fn ensure_ends_with(&mut self, suffix: &str) -> &mut Self {
        if !self.ends_with(suffix) {
            self.append(suffix);
        }
        self
    }

    /// Open `style`: its properties apply to text appended until it is popped.
    pub fn push_style(&mut self, style: &Style) -> &mut Self {
        let mut prior: Vec<(String, Option<AttrValue>)> =
            Vec::with_capacity(style.properties().len() + 1);
        for key in style.properties().keys().chain([attr::STYLES]) {
            if !prior.iter().any(|(k, _)| k == key) {
                prior.push((key.to_string(), self.current.get(key).cloned()));
            }
        }

        self.current = Arc::new(self.current.with_style(style));
        self.open.push(Frame {
            style: style.clone(),
            prior,
        });
        tracing::trace!(target: targets::TEXT, style = style.name(), depth = self.open.len(), "push style");
        self
    }

    /// Close `style`, which must be the innermost open style.
    ///
    /// # Panics
    ///
    /// Panics if no style is open or `style` is not the innermost one.
    pub fn pop_style(&mut self, style: &Style) -> &mut Self {
        match self.try_pop_style(style) {
            Ok(builder) => builder,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_pop_style(&mut self, style: &Style) -> Result<&mut Self> {
        let Some(innermost) = self.open.last() else {
            return Err(TextError::UnbalancedPop {
                style: label(style),
            });
        };
        if innermost.style != *style {
            return Err(TextError::StyleMismatch {
                expected: label(&innermost.style),
                found: label(style),
            });
        }

        if let Some(frame) = self.open.pop() {
            let attributes = Arc::make_mut(&mut self.current);
            for (key, value) in frame.prior {
                attributes.set(&key, value);
            }
        }
        tracing::trace!(target: targets::TEXT, style = style.name(), depth = self.open.len(), "pop style");
        Ok(self)
    }

    /// Open an anonymous style setting a single attribute.
    pub fn push_attribute(&mut self, key: &str, value: impl Into<AttrValue>) -> &mut Self {
        let style = Style::anonymous(TextAttributes::of([(key, value.into())]));
        self.push_style(&style)
    }

    /// Close the attribute opened by [`push_attribute`](Self::push_attribute).
    ///
    /// # Panics
    ///
    /// Panics if the innermost open style is not an attribute push of `key`.
    pub fn pop_attribute(&mut self, key: &str) -> &mut Self {
        match self.try_pop_attribute(key) {
            Ok(builder) => builder,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_pop_attribute(&mut self, key: &str) -> Result<&mut Self> {
        let Some(innermost) = self.open.last() else {
            return Err(TextError::UnbalancedPop {
                style: key.to_string(),
            });
        };
        let style = &innermost.style;
        let is_attribute_push = style.name().is_empty()
            && style.properties().len() == 1
            && style.properties().contains_key(key);
        if !is_attribute_push {
            return Err(TextError::StyleMismatch {
                expected: label(style),
                found: key.to_string(),
            });
        }
        let style = style.clone();
        self.try_pop_style(&style)
    }

    /// Remove the character starting at byte `index` and return it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or not on a character boundary.
    pub fn delete_char_at(&mut self, index: usize) -> char {
        self.try_delete_char_at(index).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_delete_char_at(&mut self, index: usize) -> Result<char> {
        let len = self.buffer.len();
        if index >= len {
            return Err(TextError::out_of_bounds(index, len));
        }
        if !self.buffer.is_char_boundary(index) {
            return Err(TextError::not_char_boundary(index));
        }
        let removed = self.buffer[index..]
            .chars()
            .next()
            .ok_or(TextError::out_of_bounds(index, len))?;
        let width = removed.len_utf8();
        self.buffer.replace_range(index..index + width, "");

        for segment in &mut self.segments {
            if segment.end > index {
                segment.end -= width;
            }
        }
        let mut previous_end = 0;
        self.segments.retain(|segment| {
            let keep = segment.end > previous_end;
            if keep {
                previous_end = segment.end;
            }
            keep
        });
        Ok(removed)
    }

    /// Finish building and return the normalized text.
    pub fn to_rich_text(self) -> RichText {
        if !self.open.is_empty() {
            tracing::debug!(
                target: targets::TEXT,
                open = self.open.len(),
                "building rich text with unclosed styles"
            );
        }
        let buffer: Arc<str> = Arc::from(self.buffer);
        let mut start = 0;
        let runs = self.segments.into_iter().map(|segment| {
            let run = Run::from_parts(Arc::clone(&buffer), start..segment.end, segment.attributes);
            start = segment.end;
            run
        });
        RichText::from_runs(runs)
    }
}

/// Human-readable identification of a style for error messages.
fn label(style: &Style) -> String {
    if style.name().is_empty() {
        let keys: Vec<&str> = style.properties().keys().collect();
        format!("{{{}}}", keys.join(", "))
    } else {
        style.name().to_string()
    }
}
