//! Regular expression matching over rich text.
//!
//! Matching runs against the flattened text; results can be read back as
//! plain strings or as formatted sub-sequences of the original.
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::{RichText, Style};
//! use regex::Regex;
//!
//! let text = RichText::value_of("width=12 height=")
//!     + RichText::styled("40", &Style::bold());
//! let pattern = Regex::new(r"(\w+)=(\d+)").unwrap();
//!
//! let mut matcher = text.matcher(&pattern);
//! assert!(matcher.find());
//! assert_eq!(matcher.group_n(1), Some("width"));
//! assert!(matcher.find());
//! assert_eq!(matcher.rgroup_n(2), Some(RichText::styled("40", &Style::bold())));
//! assert!(!matcher.find());
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use regex::{CaptureLocations, Regex};

use crate::error::{Result, TextError};
use crate::logging::targets;
use crate::{RichText, Run};

/// Iterates over the matches of a pattern in a [`RichText`].
#[derive(Debug)]
pub struct RichTextMatcher<'t> {
    text: &'t RichText,
    haystack: Cow<'t, str>,
    pattern: Regex,
    locations: CaptureLocations,
    matched: bool,
    next_start: usize,
}

impl<'t> RichTextMatcher<'t> {
    pub fn new(pattern: &Regex, text: &'t RichText) -> Self {
        Self {
            text,
            haystack: text.as_str(),
            pattern: pattern.clone(),
            locations: pattern.capture_locations(),
            matched: false,
            next_start: 0,
        }
    }

    /// Find the next match. Returns `false` when there are no more matches.
    pub fn find(&mut self) -> bool {
        if self.next_start > self.haystack.len() {
            self.matched = false;
            return false;
        }
        let found = self
            .pattern
            .captures_read_at(&mut self.locations, &self.haystack, self.next_start)
            .map(|m| (m.start(), m.end()));

        match found {
            Some((start, end)) => {
                self.next_start = if start == end {
                    // Step over one char so an empty match cannot repeat.
                    end + self.haystack[end..].chars().next().map_or(1, char::len_utf8)
                } else {
                    end
                };
                self.matched = true;
            }
            None => {
                self.matched = false;
                self.next_start = self.haystack.len() + 1;
            }
        }
        self.matched
    }

    /// Reset and find the first match starting at byte `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is out of bounds or not on a character boundary.
    pub fn find_at(&mut self, start: usize) -> bool {
        self.try_find_at(start).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_find_at(&mut self, start: usize) -> Result<bool> {
        if start > self.haystack.len() {
            return Err(TextError::out_of_bounds(start, self.haystack.len()));
        }
        if !self.haystack.is_char_boundary(start) {
            return Err(TextError::not_char_boundary(start));
        }
        self.next_start = start;
        Ok(self.find())
    }

    /// Forget the current match and restart from the beginning.
    pub fn reset(&mut self) {
        self.matched = false;
        self.next_start = 0;
    }

    /// Number of capture groups, not counting the whole match.
    pub fn group_count(&self) -> usize {
        self.pattern.captures_len() - 1
    }

    fn span(&self, group: usize) -> Result<Option<(usize, usize)>> {
        if !self.matched {
            return Err(TextError::NoMatch);
        }
        if group > self.group_count() {
            return Err(TextError::NoSuchGroup { group });
        }
        Ok(self.locations.get(group))
    }

    fn whole_span(&self) -> Result<(usize, usize)> {
        self.span(0)?.ok_or(TextError::NoMatch)
    }

    /// Byte offset where the current match starts.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match.
    pub fn start(&self) -> usize {
        self.try_start().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_start(&self) -> Result<usize> {
        self.whole_span().map(|(start, _)| start)
    }

    /// Byte offset where the current match ends.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match.
    pub fn end(&self) -> usize {
        self.try_end().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_end(&self) -> Result<usize> {
        self.whole_span().map(|(_, end)| end)
    }

    /// Start of group `group`, or `None` if it did not participate.
    pub fn start_n(&self, group: usize) -> Option<usize> {
        self.span_n(group).map(|(start, _)| start)
    }

    /// End of group `group`, or `None` if it did not participate.
    pub fn end_n(&self, group: usize) -> Option<usize> {
        self.span_n(group).map(|(_, end)| end)
    }

    fn span_n(&self, group: usize) -> Option<(usize, usize)> {
        self.span(group).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Text of the whole match.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match.
    pub fn group(&self) -> &str {
        self.try_group().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_group(&self) -> Result<&str> {
        let (start, end) = self.whole_span()?;
        Ok(&self.haystack[start..end])
    }

    /// Text of group `group`, or `None` if it did not participate.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match or the group does not exist.
    pub fn group_n(&self, group: usize) -> Option<&str> {
        self.try_group_n(group).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_group_n(&self, group: usize) -> Result<Option<&str>> {
        Ok(self.span(group)?.map(|(start, end)| &self.haystack[start..end]))
    }

    /// The whole match as formatted text.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match.
    pub fn rgroup(&self) -> RichText {
        self.try_rgroup().unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_rgroup(&self) -> Result<RichText> {
        let (start, end) = self.whole_span()?;
        Ok(self.text.slice(start, end))
    }

    /// Group `group` as formatted text, or `None` if it did not participate.
    ///
    /// # Panics
    ///
    /// Panics if there is no current match or the group does not exist.
    pub fn rgroup_n(&self, group: usize) -> Option<RichText> {
        self.try_rgroup_n(group).unwrap_or_else(|e| panic!("{e}"))
    }

    pub fn try_rgroup_n(&self, group: usize) -> Result<Option<RichText>> {
        Ok(self
            .span(group)?
            .map(|(start, end)| self.text.slice(start, end)))
    }
}

/// Replacement for [`RichText::replace_all`] and [`RichText::replace_first`].
#[derive(Debug, Clone)]
pub enum Replacement {
    /// Plain text; `$n` and `${name}` expand to capture groups. The result
    /// takes the attributes of the first matched character (or of the
    /// character before an empty match).
    Plain(String),
    /// Formatted text inserted as is.
    Rich(RichText),
}

impl From<&str> for Replacement {
    fn from(value: &str) -> Self {
        Replacement::Plain(value.to_string())
    }
}

impl From<String> for Replacement {
    fn from(value: String) -> Self {
        Replacement::Plain(value)
    }
}

impl From<RichText> for Replacement {
    fn from(value: RichText) -> Self {
        Replacement::Rich(value)
    }
}

impl From<&RichText> for Replacement {
    fn from(value: &RichText) -> Self {
        Replacement::Rich(value.clone())
    }
}

impl RichText {
    /// A matcher for `pattern` over this text.
    pub fn matcher<'t>(&'t self, pattern: &Regex) -> RichTextMatcher<'t> {
        RichTextMatcher::new(pattern, self)
    }

    /// Compile `pattern` and create a matcher for it.
    pub fn matcher_for<'t>(&'t self, pattern: &str) -> Result<RichTextMatcher<'t>> {
        let pattern = Regex::new(pattern)?;
        Ok(RichTextMatcher::new(&pattern, self))
    }

    /// Replace every match of `pattern`.
    pub fn replace_all(&self, pattern: &Regex, replacement: impl Into<Replacement>) -> RichText {
        self.replace_n(pattern, &replacement.into(), usize::MAX)
    }

    /// Replace the first match of `pattern`.
    pub fn replace_first(&self, pattern: &Regex, replacement: impl Into<Replacement>) -> RichText {
        self.replace_n(pattern, &replacement.into(), 1)
    }

    fn replace_n(&self, pattern: &Regex, replacement: &Replacement, limit: usize) -> RichText {
        let haystack = self.as_str();
        let mut parts = Vec::new();
        let mut last = 0;
        let mut count = 0;

        for captures in pattern.captures_iter(&haystack).take(limit) {
            let Some(found) = captures.get(0) else {
                continue;
            };
            parts.push(self.slice(last, found.start()));
            match replacement {
                Replacement::Plain(template) => {
                    let mut expanded = String::new();
                    captures.expand(template, &mut expanded);
                    if !expanded.is_empty() {
                        let at = if found.is_empty() {
                            found.start().saturating_sub(1)
                        } else {
                            found.start()
                        };
                        let attributes = self.shared_attributes_near(at);
                        let len = expanded.len();
                        parts.push(RichText::from(Run::from_parts(
                            Arc::from(expanded),
                            0..len,
                            attributes,
                        )));
                    }
                }
                Replacement::Rich(text) => parts.push(text.clone()),
            }
            last = found.end();
            count += 1;
        }

        if count == 0 {
            return self.clone();
        }
        parts.push(self.slice(last, self.len()));
        tracing::trace!(target: targets::TEXT, replacements = count, "replace");
        RichText::concat_all(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Style, attr};

    fn sample() -> RichText {
        RichText::value_of("alpha ")
            + RichText::styled("beta", &Style::bold())
            + RichText::value_of(" gamma")
    }

    #[test]
    fn iterates_matches() {
        let text = sample();
        let pattern = Regex::new(r"[a-z]+").unwrap();
        let mut matcher = text.matcher(&pattern);
        let mut words = Vec::new();
        while matcher.find() {
            words.push((matcher.start(), matcher.group().to_string()));
        }
        assert_eq!(
            words,
            vec![(0, "alpha".into()), (6, "beta".into()), (11, "gamma".into())]
        );
    }

    #[test]
    fn rich_groups_keep_formatting() {
        let text = sample();
        let mut matcher = text.matcher_for(r"a (b\w+) g").unwrap();
        assert!(matcher.find());
        assert_eq!(matcher.group_count(), 1);
        assert_eq!(matcher.rgroup_n(1), Some(RichText::styled("beta", &Style::bold())));
        let whole = matcher.rgroup();
        assert_eq!(whole.to_string(), "a beta g");
        assert_eq!(whole.run_count(), 3);
        assert_eq!(matcher.start_n(1), Some(6));
        assert_eq!(matcher.end_n(1), Some(10));
    }

    #[test]
    fn optional_groups() {
        let text = RichText::value_of("key");
        let mut matcher = text.matcher_for(r"(\w+)(=\w+)?").unwrap();
        assert!(matcher.find());
        assert_eq!(matcher.group_n(2), None);
        assert!(matches!(
            matcher.try_group_n(3),
            Err(TextError::NoSuchGroup { group: 3 })
        ));
    }

    #[test]
    fn errors_before_match() {
        let text = RichText::value_of("abc");
        let pattern = Regex::new("b").unwrap();
        let matcher = text.matcher(&pattern);
        assert!(matches!(matcher.try_group(), Err(TextError::NoMatch)));
        assert!(matches!(text.matcher_for("(["), Err(TextError::InvalidPattern(_))));
    }

    #[test]
    fn empty_matches_advance() {
        let text = RichText::value_of("aé");
        let pattern = Regex::new("x*").unwrap();
        let mut matcher = text.matcher(&pattern);
        let mut starts = Vec::new();
        while matcher.find() {
            starts.push(matcher.start());
        }
        assert_eq!(starts, vec![0, 1, 3]);
    }

    #[test]
    fn find_at_and_reset() {
        let text = RichText::value_of("one two one");
        let pattern = Regex::new("one").unwrap();
        let mut matcher = text.matcher(&pattern);
        assert!(matcher.find_at(1));
        assert_eq!(matcher.start(), 8);
        assert!(!matcher.find());
        matcher.reset();
        assert!(matcher.find());
        assert_eq!(matcher.start(), 0);
    }

    #[test]
    fn plain_replacement_takes_match_attributes() {
        let text = sample();
        let pattern = Regex::new(r"b(e)ta").unwrap();
        let replaced = text.replace_all(&pattern, "B${1}TA");
        assert_eq!(replaced.to_string(), "alpha BeTA gamma");
        assert_eq!(
            replaced.sub_sequence(6..10),
            RichText::styled("BeTA", &Style::bold())
        );
        assert_eq!(replaced.run_count(), 3);
    }

    #[test]
    fn rich_replacement() {
        let text = RichText::value_of("a-b-c");
        let pattern = Regex::new("-").unwrap();
        let dash = RichText::styled("+", &Style::red());

        let all = text.replace_all(&pattern, &dash);
        assert_eq!(all.to_string(), "a+b+c");
        assert_eq!(
            all.attributes_at(3).get_color(attr::COLOR).unwrap(),
            Some(Color::RED)
        );

        let first = text.replace_first(&pattern, "");
        assert_eq!(first, RichText::value_of("ab-c"));

        let none = text.replace_all(&Regex::new("x").unwrap(), "y");
        assert_eq!(none, text);
    }
}
