//! Immutable rich text.
//!
//! A [`RichText`] is a sequence of [`Run`]s. Every constructor normalizes
//! the sequence: empty runs are dropped and adjacent runs with equal
//! attributes are merged, so two rich texts with the same content and
//! formatting always have the same run structure.
//!
//! All indices are UTF-8 byte offsets into the flattened text. Operations
//! taking an index or range panic when it is out of bounds or splits a
//! character; each has a `try_` variant returning a [`Result`] instead.
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::{RichText, Style};
//!
//! let text = RichText::value_of("Hello ")
//!     + &RichText::styled("world", &Style::bold())
//!     + &RichText::value_of("!");
//!
//! assert_eq!(text.to_string(), "Hello world!");
//! assert_eq!(text.run_count(), 3);
//!
//! let word = text.sub_sequence(6..11);
//! assert_eq!(word, RichText::styled("world", &Style::bold()));
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::{Add, Bound, RangeBounds};
use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, TextError};
use crate::logging::targets;
use crate::{Run, Style, TextAttributes};

/// Immutable text with attributed runs.
///
/// Cloning is cheap: runs share their text buffers and attribute maps.
#[derive(Clone, Default)]
pub struct RichText {
    runs: Vec<Run>,
    /// Offset of each run within the flattened text.
    starts: Vec<usize>,
    len: usize,
}

impl RichText {
    /// The empty text.
    pub const fn empty() -> Self {
        Self {
            runs: Vec::new(),
            starts: Vec::new(),
            len: 0,
        }
    }

    /// Unformatted text.
    pub fn value_of(text: impl Into<String>) -> Self {
        Self::with_attributes(text, TextAttributes::empty())
    }

    /// Text carrying `attributes` throughout.
    pub fn with_attributes(text: impl Into<String>, attributes: TextAttributes) -> Self {
        let text = text.into();
        if text.is_empty() {
            return Self::empty();
        }
        Self::from_normalized(vec![Run::new(text, attributes)])
    }

    /// Text with `style` applied throughout.
    pub fn styled(text: impl Into<String>, style: &Style) -> Self {
        Self::with_attributes(text, TextAttributes::empty().with_style(style))
    }

    /// Build a text from runs, normalizing them.
    pub fn from_runs<I: IntoIterator<Item = Run>>(runs: I) -> Self {
        let mut merged: Vec<Run> = Vec::new();
        for run in runs {
            if run.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.same_attributes(&run) => {
                    *last = match last.extended_by(&run) {
                        Some(extended) => extended,
                        None => {
                            let mut text = String::with_capacity(last.len() + run.len());
                            text.push_str(last.as_str());
                            text.push_str(run.as_str());
                            let len = text.len();
                            Run::from_parts(
                                Arc::from(text),
                                0..len,
                                Arc::clone(last.shared_attributes()),
                            )
                        }
                    };
                }
                _ => merged.push(run),
            }
        }
        Self::from_normalized(merged)
    }

    fn from_normalized(runs: Vec<Run>) -> Self {
        let mut starts = Vec::with_capacity(runs.len());
        let mut len = 0;
        for run in &runs {
            starts.push(len);
            len += run.len();
        }
        Self { runs, starts, len }
    }

    /// Join `parts`, inserting `delimiter` between consecutive parts.
    pub fn join<'a, I>(parts: I, delimiter: &RichText) -> RichText
    where
        I: IntoIterator<Item = &'a RichText>,
    {
        let mut runs = Vec::new();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                runs.extend(delimiter.runs.iter().cloned());
            }
            runs.extend(part.runs.iter().cloned());
        }
        Self::from_runs(runs)
    }

    /// Concatenate owned parts.
    pub(crate) fn concat_all(parts: Vec<RichText>) -> RichText {
        Self::from_runs(parts.into_iter().flat_map(|part| part.runs))
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Runs paired with their offset in the text.
    pub fn runs_with_offsets(&self) -> impl Iterator<Item = (usize, &Run)> + '_ {
        self.starts.iter().copied().zip(self.runs.iter())
    }

    /// The flattened text; borrowed when there is at most one run.
    pub fn as_str(&self) -> Cow<'_, str> {
        match self.runs.as_slice() {
            [] => Cow::Borrowed(""),
            [run] => Cow::Borrowed(run.as_str()),
            runs => Cow::Owned(runs.iter().map(Run::as_str).collect()),
        }
    }

    /// Index of the run containing `pos`; requires `pos < len`.
    fn run_index_at(&self, pos: usize) -> usize {
        match self.starts.binary_search(&pos) {
            Ok(index) => index,
            Err(index) => index - 1,
        }
    }

    /// Check whether `pos` lies on a character boundary of the text.
    pub fn is_char_boundary(&self, pos: usize) -> bool {
        if pos == 0 || pos == self.len {
            return true;
        }
        if pos > self.len {
            return false;
        }
        let index = self.run_index_at(pos);
        self.runs[index].as_str().is_char_boundary(pos - self.starts[index])
    }

    /// The character starting at byte `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or not on a character boundary.
    pub fn char_at(&self, index: usize) -> char {
        self.try_char_at(index).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_char_at(&self, index: usize) -> Result<char> {
        if index >= self.len {
            return Err(TextError::out_of_bounds(index, self.len));
        }
        let run_index = self.run_index_at(index);
        let run = self.runs[run_index].as_str();
        let local = index - self.starts[run_index];
        if !run.is_char_boundary(local) {
            return Err(TextError::not_char_boundary(index));
        }
        run[local..]
            .chars()
            .next()
            .ok_or(TextError::out_of_bounds(index, self.len))
    }

    /// Attributes of the character at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is out of bounds.
    pub fn attributes_at(&self, pos: usize) -> &TextAttributes {
        self.try_attributes_at(pos).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_attributes_at(&self, pos: usize) -> Result<&TextAttributes> {
        if pos >= self.len {
            return Err(TextError::out_of_bounds(pos, self.len));
        }
        Ok(self.runs[self.run_index_at(pos)].attributes())
    }

    /// Shared attributes of the character containing byte `pos`, clamped to
    /// the last character.
    pub(crate) fn shared_attributes_near(&self, pos: usize) -> Arc<TextAttributes> {
        if self.is_empty() {
            return Arc::new(TextAttributes::empty());
        }
        let pos = pos.min(self.len - 1);
        Arc::clone(self.runs[self.run_index_at(pos)].shared_attributes())
    }

    /// Resolve `range` to `start..end`; a bound that overflows `usize` is
    /// an invalid range.
    fn bounds(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize)> {
        let overflow = |start: usize, end: usize| TextError::invalid_range(start, end, self.len);
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start
                .checked_add(1)
                .ok_or_else(|| overflow(start, self.len))?,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.checked_add(1).ok_or_else(|| overflow(start, end))?,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        Ok((start, end))
    }

    fn checked_range(&self, range: impl RangeBounds<usize>) -> Result<(usize, usize)> {
        let (start, end) = self.bounds(range)?;
        if start > end || end > self.len {
            return Err(TextError::invalid_range(start, end, self.len));
        }
        if !self.is_char_boundary(start) {
            return Err(TextError::not_char_boundary(start));
        }
        if !self.is_char_boundary(end) {
            return Err(TextError::not_char_boundary(end));
        }
        Ok((start, end))
    }

    /// The part of the text in `range`, keeping its formatting.
    ///
    /// Runs are shared with this text, not copied.
    ///
    /// # Panics
    ///
    /// Panics if the range is invalid or splits a character.
    pub fn sub_sequence(&self, range: impl RangeBounds<usize>) -> RichText {
        self.try_sub_sequence(range).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_sub_sequence(&self, range: impl RangeBounds<usize>) -> Result<RichText> {
        let (start, end) = self.checked_range(range)?;
        Ok(self.slice(start, end))
    }

    /// Slice a validated range.
    pub(crate) fn slice(&self, start: usize, end: usize) -> RichText {
        if start >= end {
            return Self::empty();
        }
        if start == 0 && end == self.len {
            return self.clone();
        }

        let mut runs = Vec::new();
        for index in self.run_index_at(start)..self.runs.len() {
            let run_start = self.starts[index];
            if run_start >= end {
                break;
            }
            let run_end = run_start + self.runs[index].len();
            let from = start.max(run_start) - run_start;
            let to = end.min(run_end) - run_start;
            runs.push(self.runs[index].sub_run(from..to));
        }
        Self::from_normalized(runs)
    }

    /// This text followed by `other`.
    pub fn concat(&self, other: &RichText) -> RichText {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_runs(self.runs.iter().chain(other.runs.iter()).cloned())
    }

    /// Byte offset of the first occurrence of `pattern`.
    pub fn index_of(&self, pattern: &str) -> Option<usize> {
        self.as_str().find(pattern)
    }

    /// Byte offset of the first occurrence of `pattern` at or after `from`.
    pub fn index_of_from(&self, pattern: &str, from: usize) -> Option<usize> {
        let text = self.as_str();
        text.get(from..)?.find(pattern).map(|index| index + from)
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        self.as_str().starts_with(pattern)
    }

    pub fn ends_with(&self, pattern: &str) -> bool {
        self.as_str().ends_with(pattern)
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.as_str().contains(pattern)
    }

    /// The text without leading and trailing whitespace.
    pub fn trim(&self) -> RichText {
        let text = self.as_str();
        let start = text.len() - text.trim_start().len();
        let end = text.trim_end().len();
        self.slice(start, end.max(start))
    }

    pub fn trim_start(&self) -> RichText {
        let text = self.as_str();
        self.slice(text.len() - text.trim_start().len(), text.len())
    }

    pub fn trim_end(&self) -> RichText {
        self.slice(0, self.as_str().trim_end().len())
    }

    /// Lines of the text, split at `\n` with an optional preceding `\r`.
    ///
    /// Like [`str::lines`], a final line ending does not start an extra
    /// empty line.
    pub fn lines(&self) -> Vec<RichText> {
        let text = self.as_str();
        let mut lines = Vec::new();
        let mut start = 0;
        for (index, _) in text.match_indices('\n') {
            let end = if index > start && text.as_bytes()[index - 1] == b'\r' {
                index - 1
            } else {
                index
            };
            lines.push(self.slice(start, end));
            start = index + 1;
        }
        if start < text.len() {
            lines.push(self.slice(start, text.len()));
        }
        lines
    }

    /// Split around matches of `pattern`.
    pub fn split(&self, pattern: &Regex) -> Vec<RichText> {
        let text = self.as_str();
        let mut parts = Vec::new();
        let mut last = 0;
        for found in pattern.find_iter(&text) {
            parts.push(self.slice(last, found.start()));
            last = found.end();
        }
        parts.push(self.slice(last, text.len()));
        parts
    }

    /// Apply `style` to the whole text as the outermost style.
    ///
    /// Existing attributes take precedence over the style's properties.
    pub fn wrap(&self, style: &Style) -> RichText {
        Self::from_runs(
            self.runs
                .iter()
                .map(|run| run.with_attributes(run.attributes().with_outer_style(style))),
        )
    }

    /// Apply `style` to `range` as the innermost style.
    ///
    /// # Panics
    ///
    /// Panics if the range is invalid or splits a character.
    pub fn apply_style(&self, range: impl RangeBounds<usize>, style: &Style) -> RichText {
        self.try_apply_style(range, style).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_apply_style(&self, range: impl RangeBounds<usize>, style: &Style) -> Result<RichText> {
        let (start, end) = self.checked_range(range)?;
        tracing::trace!(target: targets::TEXT, start, end, style = style.name(), "apply style");

        let styled = self
            .slice(start, end)
            .runs
            .into_iter()
            .map(|run| run.with_attributes(run.attributes().with_style(style)));
        Ok(Self::from_runs(
            self.slice(0, start)
                .runs
                .into_iter()
                .chain(styled)
                .chain(self.slice(end, self.len).runs),
        ))
    }

    /// Compare content segment by segment using `same` for attributes.
    fn segments_match(
        &self,
        other: &RichText,
        same: impl Fn(&TextAttributes, &TextAttributes) -> bool,
    ) -> bool {
        if self.len != other.len {
            return false;
        }
        let (mut i, mut j, mut pos) = (0, 0, 0);
        while pos < self.len {
            let (a, b) = (&self.runs[i], &other.runs[j]);
            let (a_start, b_start) = (self.starts[i], other.starts[j]);
            let (a_end, b_end) = (a_start + a.len(), b_start + b.len());
            let segment_end = a_end.min(b_end);

            let a_bytes = &a.as_str().as_bytes()[pos - a_start..segment_end - a_start];
            let b_bytes = &b.as_str().as_bytes()[pos - b_start..segment_end - b_start];
            if a_bytes != b_bytes || !same(a.attributes(), b.attributes()) {
                return false;
            }

            pos = segment_end;
            if pos == a_end {
                i += 1;
            }
            if pos == b_end {
                j += 1;
            }
        }
        true
    }

    /// Compare the text content only.
    pub fn equals_text(&self, other: &RichText) -> bool {
        self.len == other.len && self.as_str() == other.as_str()
    }

    /// Compare the text content and the resolved font of every character.
    pub fn equals_text_and_font(&self, other: &RichText) -> bool {
        self.segments_match(other, |a, b| a.font_def() == b.font_def())
    }

    /// Compare the text content ignoring case.
    pub fn equals_text_ignore_case(&self, other: &RichText) -> bool {
        self.as_str().to_lowercase() == other.as_str().to_lowercase()
    }
}

impl PartialEq for RichText {
    fn eq(&self, other: &Self) -> bool {
        self.segments_match(other, |a, b| a == b)
    }
}

impl fmt::Debug for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RichText").field("runs", &self.runs).finish()
    }
}

impl fmt::Display for RichText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            f.write_str(run.as_str())?;
        }
        Ok(())
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        Self::value_of(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        Self::value_of(text)
    }
}

impl From<Run> for RichText {
    fn from(run: Run) -> Self {
        Self::from_runs([run])
    }
}

impl Add<&RichText> for &RichText {
    type Output = RichText;

    fn add(self, rhs: &RichText) -> RichText {
        self.concat(rhs)
    }
}

impl Add<&RichText> for RichText {
    type Output = RichText;

    fn add(self, rhs: &RichText) -> RichText {
        self.concat(rhs)
    }
}

impl Add for RichText {
    type Output = RichText;

    fn add(self, rhs: RichText) -> RichText {
        self.concat(&rhs)
    }
}

static_assertions::assert_impl_all!(RichText: Send, Sync);
