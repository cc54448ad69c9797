//! Line wrapping and alignment of rich text into positioned fragments.
//!
//! Layout runs in four passes:
//!
//! 1. The text is split into physical lines, which are trimmed according to
//!    the horizontal alignment and tokenized into alternating whitespace and
//!    word fragments, each measured in the font of its run.
//! 2. Tokens are packed greedily onto output lines. Whitespace at a wrap
//!    point is dropped. Words wider than the wrap width overflow on their
//!    own line, or are sliced by grapheme in hard-wrap mode.
//! 3. Each line is aligned horizontally within the layout width.
//! 4. Lines are stacked, aligned vertically within the layout height and
//!    the whole block is translated to its anchor.

use std::sync::{Arc, OnceLock};

use horizon_prose_text::logging::{PerfSpan, targets};
use horizon_prose_text::{Font, RichText};
use unicode_segmentation::UnicodeSegmentation;

use crate::align::{HorizontalAlign, VerticalAlign};
use crate::fragment::{Fragment, FragmentLine};
use crate::metrics::FontMetricsProvider;
use crate::options::LayoutOptions;

/// Rich text laid out into lines of positioned [`Fragment`]s.
///
/// # Example
///
/// ```
/// use horizon_prose_layout::{FixedAdvanceMetrics, FragmentedText, LayoutOptions};
/// use horizon_prose_text::RichText;
///
/// let text = RichText::value_of("The quick brown fox jumps over the lazy dog");
/// let options = LayoutOptions::new().wrap_width(100.0);
/// let layout = FragmentedText::generate(&text, &FixedAdvanceMetrics::default(), &options);
///
/// assert!(layout.line_count() > 1);
/// assert!(layout.lines().iter().all(|line| line.width() <= 100.0));
/// ```
#[derive(Debug, Clone)]
pub struct FragmentedText {
    lines: Vec<FragmentLine>,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
    actual_width: f32,
    actual_height: f32,
    baseline: f32,
}

static_assertions::assert_impl_all!(FragmentedText: Send, Sync);

impl FragmentedText {
    /// The shared layout of empty text; every dimension is zero.
    pub fn empty() -> Arc<FragmentedText> {
        static EMPTY: OnceLock<Arc<FragmentedText>> = OnceLock::new();
        EMPTY
            .get_or_init(|| {
                Arc::new(FragmentedText {
                    lines: Vec::new(),
                    left: 0.0,
                    top: 0.0,
                    width: 0.0,
                    height: 0.0,
                    actual_width: 0.0,
                    actual_height: 0.0,
                    baseline: 0.0,
                })
            })
            .clone()
    }

    /// Lay out `text` with the given metrics provider and options.
    pub fn generate<P>(text: &RichText, metrics: &P, options: &LayoutOptions) -> Arc<FragmentedText>
    where
        P: FontMetricsProvider + ?Sized,
    {
        if text.is_empty() {
            return Self::empty();
        }
        let _span = PerfSpan::new("fragment_layout");

        let align = options.horizontal_align;
        let empty = metrics.measure("", &options.base_font);
        let wrap_width = if options.is_wrapping() {
            options.wrap_width
        } else {
            f32::MAX
        };

        let physical_lines = text.lines();
        let last = physical_lines.len().saturating_sub(1);
        let mut lines = Vec::new();
        for (index, physical) in physical_lines.iter().enumerate() {
            let effective = align.for_line(index == last);
            let physical = trim_for(physical, effective);
            let mut breaker = LineBreaker::new(metrics, wrap_width, options.hard_wrap);
            for unit in tokenize(&physical, metrics, &options.base_font) {
                breaker.push_unit(unit);
            }
            let mut broken = breaker.finish();
            // Only the final output line keeps the trimming of the last line.
            if broken.len() > 1 && effective != align.for_line(false) {
                let leading = broken[0].iter().take_while(|f| f.is_whitespace()).count();
                broken[0].drain(..leading);
            }
            for fragments in broken {
                lines.push(FragmentLine::new(fragments, empty.height, empty.ascent));
            }
        }

        let mut layout = Self::position(lines, options);
        layout.apply_anchor(options);

        tracing::debug!(
            target: targets::LAYOUT,
            lines = layout.lines.len(),
            width = layout.actual_width,
            height = layout.actual_height,
            "generated fragments"
        );
        Arc::new(layout)
    }

    /// Align lines horizontally, stack them and align them vertically.
    fn position(mut lines: Vec<FragmentLine>, options: &LayoutOptions) -> Self {
        let natural_width = lines.iter().map(FragmentLine::width).fold(0.0, f32::max);
        let width = if options.width > 0.0 {
            options.width
        } else {
            natural_width
        };

        let last = lines.len().saturating_sub(1);
        for (index, line) in lines.iter_mut().enumerate() {
            let available = width - line.width();
            match options.horizontal_align.for_line(index == last) {
                HorizontalAlign::Left | HorizontalAlign::Justify => {}
                HorizontalAlign::Center => line.translate(available / 2.0, 0.0),
                HorizontalAlign::Right => line.translate(available, 0.0),
                HorizontalAlign::Distribute => {
                    let whitespace = line.whitespace_width();
                    if whitespace > 0.0 && available > 0.0 {
                        line.inflate_whitespace(1.0 + available / whitespace);
                    }
                }
            }
        }

        let mut y = 0.0;
        for line in &mut lines {
            line.translate(0.0, y);
            y += line.height();
        }
        let mut actual_height = y;
        let height = if options.height > 0.0 {
            options.height
        } else {
            actual_height
        };

        let spare = height - actual_height;
        match options.vertical_align {
            VerticalAlign::Top => {}
            VerticalAlign::Middle => lines.iter_mut().for_each(|l| l.translate(0.0, spare / 2.0)),
            VerticalAlign::Bottom => lines.iter_mut().for_each(|l| l.translate(0.0, spare)),
            VerticalAlign::Distributed => {
                if lines.len() > 1 && spare > 0.0 {
                    let gap = spare / (lines.len() - 1) as f32;
                    for (index, line) in lines.iter_mut().enumerate() {
                        line.translate(0.0, gap * index as f32);
                    }
                    actual_height = height;
                }
            }
        }

        let actual_width = lines.iter().map(FragmentLine::width).fold(0.0, f32::max);
        let baseline = lines.first().map_or(0.0, FragmentLine::baseline);

        Self {
            lines,
            left: 0.0,
            top: 0.0,
            width,
            height,
            actual_width,
            actual_height,
            baseline,
        }
    }

    fn apply_anchor(&mut self, options: &LayoutOptions) {
        let dx = options.horizontal_anchor.offset(self.width);
        let dy = options.vertical_anchor.offset(self.height, self.baseline);
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        for line in &mut self.lines {
            line.translate(dx, dy);
        }
        self.left += dx;
        self.top += dy;
        self.baseline += dy;
    }

    pub fn lines(&self) -> &[FragmentLine] {
        &self.lines
    }

    /// All fragments, line by line.
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> + '_ {
        self.lines.iter().flat_map(|line| line.fragments().iter())
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// X coordinate of the left edge of the layout box.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Y coordinate of the top edge of the layout box.
    pub fn top(&self) -> f32 {
        self.top
    }

    /// Width of the layout box.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the layout box.
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width of the widest line.
    pub fn actual_width(&self) -> f32 {
        self.actual_width
    }

    /// Height of the stacked lines, including distributed gaps.
    pub fn actual_height(&self) -> f32 {
        self.actual_height
    }

    /// Y coordinate of the first baseline.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// The laid-out text, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(FragmentLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn trim_for(line: &RichText, align: HorizontalAlign) -> RichText {
    match (align.trims_start(), align.trims_end()) {
        (true, true) => line.trim(),
        (true, false) => line.trim_start(),
        (false, true) => line.trim_end(),
        (false, false) => line.clone(),
    }
}

/// Consecutive fragments of the same kind, wrapped as a whole.
struct Unit {
    fragments: Vec<Fragment>,
    width: f32,
    whitespace: bool,
}

/// Split `line` into whitespace and word units, measuring each run piece in
/// the font of its run.
fn tokenize<P>(line: &RichText, metrics: &P, base: &Font) -> Vec<Unit>
where
    P: FontMetricsProvider + ?Sized,
{
    let mut units: Vec<Unit> = Vec::new();
    for (offset, run) in line.runs_with_offsets() {
        let font = metrics.derive_font(base, &run.font_def());
        let text = run.as_str();
        for (start, end, whitespace) in whitespace_chunks(text) {
            let measured = metrics.measure(&text[start..end], &font);
            let fragment = Fragment::new(
                line.sub_sequence(offset + start..offset + end),
                font.clone(),
                measured.width,
                measured.height,
                measured.ascent,
                whitespace,
            );
            match units.last_mut() {
                Some(unit) if unit.whitespace == whitespace => {
                    unit.width += fragment.width;
                    unit.fragments.push(fragment);
                }
                _ => units.push(Unit {
                    width: fragment.width,
                    fragments: vec![fragment],
                    whitespace,
                }),
            }
        }
    }
    units
}

/// Byte ranges of the maximal whitespace and non-whitespace chunks.
fn whitespace_chunks(text: &str) -> Vec<(usize, usize, bool)> {
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut current = None;
    for (index, c) in text.char_indices() {
        let whitespace = c.is_whitespace();
        match current {
            Some(flag) if flag == whitespace => {}
            Some(flag) => {
                chunks.push((start, index, flag));
                start = index;
                current = Some(whitespace);
            }
            None => current = Some(whitespace),
        }
    }
    if let Some(flag) = current {
        chunks.push((start, text.len(), flag));
    }
    chunks
}

/// Greedy packing of units onto output lines.
struct LineBreaker<'m, P: ?Sized> {
    metrics: &'m P,
    wrap_width: f32,
    hard_wrap: bool,
    lines: Vec<Vec<Fragment>>,
    current: Vec<Fragment>,
    x: f32,
    wrapped: bool,
}

impl<'m, P: FontMetricsProvider + ?Sized> LineBreaker<'m, P> {
    fn new(metrics: &'m P, wrap_width: f32, hard_wrap: bool) -> Self {
        Self {
            metrics,
            wrap_width,
            hard_wrap,
            lines: Vec::new(),
            current: Vec::new(),
            x: 0.0,
            wrapped: false,
        }
    }

    fn has_content(&self) -> bool {
        self.current.iter().any(|f| !f.is_whitespace())
    }

    fn push_unit(&mut self, unit: Unit) {
        if unit.whitespace {
            if self.current.is_empty() && self.wrapped {
                return;
            }
            unit.fragments.into_iter().for_each(|f| self.append(f));
            return;
        }

        if self.x + unit.width > self.wrap_width && self.has_content() {
            self.break_line();
        }
        if self.hard_wrap && self.x + unit.width > self.wrap_width {
            for fragment in unit.fragments {
                self.push_sliced(fragment);
            }
        } else {
            unit.fragments.into_iter().for_each(|f| self.append(f));
        }
    }

    fn append(&mut self, fragment: Fragment) {
        self.x += fragment.width;
        self.current.push(fragment);
    }

    /// Finish the current line, dropping its trailing whitespace.
    fn break_line(&mut self) {
        while self.current.last().is_some_and(Fragment::is_whitespace) {
            self.current.pop();
        }
        self.lines.push(std::mem::take(&mut self.current));
        self.x = 0.0;
        self.wrapped = true;
        tracing::trace!(target: targets::LAYOUT, line = self.lines.len(), "wrapped line");
    }

    /// Place `fragment`, slicing it by grapheme wherever it overflows.
    fn push_sliced(&mut self, mut fragment: Fragment) {
        loop {
            let remaining = self.wrap_width - self.x;
            if fragment.width <= remaining {
                self.append(fragment);
                return;
            }
            match self.fitting_prefix(&fragment, remaining, self.current.is_empty()) {
                Some(end) => {
                    let (head, tail) = self.split(&fragment, end);
                    self.append(head);
                    self.break_line();
                    fragment = tail;
                }
                None if self.has_content() => self.break_line(),
                None if !self.current.is_empty() => {
                    self.current.clear();
                    self.x = 0.0;
                }
                // A single grapheme wider than the line overflows.
                None => {
                    self.append(fragment);
                    return;
                }
            }
        }
    }

    /// End of the longest grapheme prefix of `fragment` no wider than
    /// `available`. At the start of a line at least one grapheme is taken.
    fn fitting_prefix(&self, fragment: &Fragment, available: f32, at_line_start: bool) -> Option<usize> {
        let text: &str = &fragment.as_str();
        let mut fitting = None;
        let mut first = None;
        for (start, grapheme) in text.grapheme_indices(true) {
            let end = start + grapheme.len();
            if end == text.len() {
                break;
            }
            first.get_or_insert(end);
            if self.metrics.measure(&text[..end], &fragment.font).width > available {
                break;
            }
            fitting = Some(end);
        }
        match fitting {
            Some(end) => Some(end),
            None if at_line_start => first,
            None => None,
        }
    }

    fn split(&self, fragment: &Fragment, at: usize) -> (Fragment, Fragment) {
        let piece = |text: RichText| {
            let measured = self.metrics.measure(&text.as_str(), &fragment.font);
            Fragment::new(
                text,
                fragment.font.clone(),
                measured.width,
                measured.height,
                measured.ascent,
                false,
            )
        };
        (
            piece(fragment.text().sub_sequence(..at)),
            piece(fragment.text().sub_sequence(at..)),
        )
    }

    fn finish(mut self) -> Vec<Vec<Fragment>> {
        self.lines.push(self.current);
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::{HorizontalAnchor, VerticalAnchor};
    use crate::metrics::{CachingMetrics, CellMetrics, FixedAdvanceMetrics};
    use horizon_prose_text::Style;

    const EPSILON: f32 = 1e-3;

    fn cells(text: &str, options: LayoutOptions) -> Arc<FragmentedText> {
        FragmentedText::generate(&RichText::value_of(text), &CellMetrics, &options)
    }

    fn line_texts(layout: &FragmentedText) -> Vec<String> {
        layout.lines().iter().map(FragmentLine::text).collect()
    }

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[test]
    fn empty_text_is_shared() {
        let layout = FragmentedText::generate(&RichText::empty(), &CellMetrics, &LayoutOptions::new());
        assert!(Arc::ptr_eq(&layout, &FragmentedText::empty()));
        assert!(layout.is_empty());
        assert_eq!((layout.width(), layout.height(), layout.baseline()), (0.0, 0.0, 0.0));
    }

    #[test]
    fn single_line() {
        let layout = FragmentedText::generate(
            &RichText::value_of("Hello world"),
            &FixedAdvanceMetrics::default(),
            &LayoutOptions::new(),
        );
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.fragments().count(), 3);
        assert!((layout.actual_width() - 79.2).abs() < EPSILON);
        assert!((layout.height() - 12.0).abs() < EPSILON);
        assert!((layout.baseline() - 9.6).abs() < EPSILON);
        assert_eq!(layout.text(), "Hello world");
    }

    #[test]
    fn wraps_within_width() {
        init_logging();
        let text = RichText::value_of(
            "This is a longer text that should wrap across several lines when laid out",
        );
        let options = LayoutOptions::new().wrap_width(100.0);
        let layout = FragmentedText::generate(&text, &FixedAdvanceMetrics::default(), &options);

        assert!(layout.line_count() > 1);
        for line in layout.lines() {
            let sum: f32 = line.fragments().iter().map(|f| f.width).sum();
            assert!(sum <= 100.0 + EPSILON, "line {:?} is {sum} wide", line.text());
            assert!(!line.fragments().first().is_some_and(Fragment::is_whitespace));
            assert!(!line.fragments().last().is_some_and(Fragment::is_whitespace));
        }
        assert_eq!(
            layout.text().replace('\n', " "),
            "This is a longer text that should wrap across several lines when laid out"
        );
    }

    #[test]
    fn justify_stretches_all_but_last_line() {
        let text = RichText::value_of(
            "Justified text spreads its words so that every line but the last one fills the box",
        );
        let options = LayoutOptions::new()
            .width(100.0)
            .wrap_width(100.0)
            .horizontal_align(HorizontalAlign::Justify);
        let layout = FragmentedText::generate(&text, &FixedAdvanceMetrics::default(), &options);
        assert!(layout.line_count() > 2);

        let (last, rest) = layout.lines().split_last().expect("lines");
        for line in rest.iter().filter(|line| line.whitespace_width() > 0.0) {
            let spaces: Vec<f32> = line
                .fragments()
                .iter()
                .filter(|f| f.is_whitespace())
                .map(|f| f.width)
                .collect();
            assert!(spaces.iter().all(|w| (w - spaces[0]).abs() < EPSILON));
            assert!(spaces[0] >= 7.2 - EPSILON);
            assert!((line.width() - 100.0).abs() < EPSILON);
        }
        for space in last.fragments().iter().filter(|f| f.is_whitespace()) {
            assert!((space.width - 7.2).abs() < EPSILON);
        }
    }

    #[test]
    fn distribute_without_whitespace_is_unchanged() {
        let layout = cells("word", LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Distribute));
        assert_eq!(layout.lines()[0].width(), 4.0);

        let layout = cells("a b", LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Distribute));
        let fragments = layout.lines()[0].fragments();
        assert_eq!(fragments[1].width, 8.0);
        assert_eq!(fragments[2].x, 9.0);
        assert_eq!(layout.actual_width(), 10.0);
    }

    #[test]
    fn right_and_center() {
        let right = cells("  ab", LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Right));
        assert_eq!(right.lines()[0].fragments()[0].x, 8.0);
        assert_eq!(right.lines()[0].text(), "ab");

        let center = cells("ab  ", LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Center));
        assert_eq!(center.lines()[0].fragments()[0].x, 4.0);
        assert_eq!(center.lines()[0].text(), "ab");
    }

    #[test]
    fn justified_last_line_trims_like_left() {
        let justify = LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Justify);
        let layout = cells("  ab  ", justify);
        assert_eq!(line_texts(&layout), vec!["  ab"]);

        let wrapped = LayoutOptions::new()
            .width(5.0)
            .wrap_width(5.0)
            .horizontal_align(HorizontalAlign::Justify);
        let layout = cells("  aa bb cc", wrapped);
        assert_eq!(line_texts(&layout), vec!["aa", "bb cc"]);

        let layout = cells("  x\n  yy zz", LayoutOptions::new().width(10.0).horizontal_align(HorizontalAlign::Justify));
        assert_eq!(line_texts(&layout), vec!["x", "  yy zz"]);
    }

    #[test]
    fn left_keeps_leading_whitespace() {
        let layout = cells("  ab  ", LayoutOptions::new());
        assert_eq!(layout.lines()[0].text(), "  ab");
    }

    #[test]
    fn long_words_overflow_or_slice() {
        let soft = cells("a bcdefgh c", LayoutOptions::new().wrap_width(4.0));
        assert_eq!(line_texts(&soft), vec!["a", "bcdefgh", "c"]);

        let hard = cells("abcdefghij", LayoutOptions::new().wrap_width(4.0).hard_wrap(true));
        assert_eq!(line_texts(&hard), vec!["abcd", "efgh", "ij"]);
        assert!(hard.lines().iter().all(|line| line.width() <= 4.0));
    }

    #[test]
    fn hard_wrap_slices_on_fresh_line() {
        let layout = cells("ab cdefgh", LayoutOptions::new().wrap_width(5.0).hard_wrap(true));
        assert_eq!(line_texts(&layout), vec!["ab", "cdefg", "h"]);
    }

    #[test]
    fn hard_wrap_narrower_than_a_grapheme() {
        let layout = cells("ab", LayoutOptions::new().wrap_width(0.5).hard_wrap(true));
        assert_eq!(line_texts(&layout), vec!["a", "b"]);
    }

    #[test]
    fn physical_lines_and_blank_lines() {
        let layout = cells("a\n\nb", LayoutOptions::new());
        assert_eq!(line_texts(&layout), vec!["a", "", "b"]);
        assert_eq!(layout.lines()[1].height(), 1.0);
        assert_eq!(layout.lines()[2].y(), 2.0);
        assert_eq!(layout.actual_height(), 3.0);
    }

    #[test]
    fn vertical_alignment() {
        let middle = cells("a\nb", LayoutOptions::new().height(10.0).vertical_align(VerticalAlign::Middle));
        assert_eq!(middle.lines()[0].y(), 4.0);

        let bottom = cells("a\nb", LayoutOptions::new().height(10.0).vertical_align(VerticalAlign::Bottom));
        assert_eq!(bottom.lines()[1].y(), 9.0);

        let spread = cells("a\nb", LayoutOptions::new().height(10.0).vertical_align(VerticalAlign::Distributed));
        assert_eq!(spread.lines()[0].y(), 0.0);
        assert_eq!(spread.lines()[1].y(), 9.0);
        assert_eq!(spread.actual_height(), 10.0);
    }

    #[test]
    fn anchors_translate_the_box() {
        let options = LayoutOptions::new()
            .size(10.0, 10.0)
            .horizontal_anchor(HorizontalAnchor::Center)
            .vertical_anchor(VerticalAnchor::Middle);
        let layout = cells("a", options);
        let fragment = &layout.lines()[0].fragments()[0];
        assert_eq!((fragment.x, fragment.y), (-5.0, -5.0));
        assert_eq!((layout.left(), layout.top()), (-5.0, -5.0));

        let baseline = cells("a", LayoutOptions::new().vertical_anchor(VerticalAnchor::Baseline));
        assert_eq!(baseline.baseline(), 0.0);
        assert_eq!(baseline.lines()[0].baseline(), 0.0);
    }

    #[test]
    fn anchors_combine_with_vertical_alignment() {
        let fragment_ys = |layout: &FragmentedText| -> Vec<f32> {
            layout.fragments().map(|f| f.y).collect()
        };

        let bottom = cells(
            "a\nb",
            LayoutOptions::new()
                .height(10.0)
                .vertical_align(VerticalAlign::Bottom)
                .vertical_anchor(VerticalAnchor::Bottom),
        );
        assert_eq!(fragment_ys(&bottom), vec![-2.0, -1.0]);
        assert_eq!(bottom.top(), -10.0);

        let middle = cells(
            "a\nb",
            LayoutOptions::new()
                .height(10.0)
                .vertical_align(VerticalAlign::Middle)
                .vertical_anchor(VerticalAnchor::Bottom),
        );
        assert_eq!(fragment_ys(&middle), vec![-6.0, -5.0]);

        let baseline = cells(
            "a\nb",
            LayoutOptions::new()
                .height(10.0)
                .vertical_align(VerticalAlign::Middle)
                .vertical_anchor(VerticalAnchor::Baseline),
        );
        assert_eq!(fragment_ys(&baseline), vec![-1.0, 0.0]);
        assert_eq!(baseline.baseline(), 0.0);
        assert_eq!(baseline.lines()[0].baseline(), 0.0);

        let baseline_bottom = cells(
            "a",
            LayoutOptions::new()
                .height(10.0)
                .vertical_align(VerticalAlign::Bottom)
                .vertical_anchor(VerticalAnchor::Baseline),
        );
        assert_eq!(fragment_ys(&baseline_bottom), vec![-1.0]);
        assert_eq!(baseline_bottom.top(), -10.0);
    }

    #[test]
    fn runs_keep_their_fonts() {
        let big = Style::builder("big").font_size(24.0).build();
        let text = RichText::value_of("small ") + RichText::styled("BIG", &big);
        let layout = FragmentedText::generate(&text, &FixedAdvanceMetrics::default(), &LayoutOptions::new());

        let fragments: Vec<&Fragment> = layout.fragments().collect();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2].font.size(), 24.0);
        assert!((fragments[0].baseline() - fragments[2].baseline()).abs() < EPSILON);
        assert!((layout.lines()[0].height() - 24.0).abs() < EPSILON);
        assert_eq!(fragments[2].text(), &RichText::styled("BIG", &big));
    }

    #[test]
    fn caching_provider_is_reused() {
        let metrics = CachingMetrics::new(FixedAdvanceMetrics::default());
        let text = RichText::value_of("one two one two");
        let first = FragmentedText::generate(&text, &metrics, &LayoutOptions::new());
        let second = FragmentedText::generate(&text, &metrics, &LayoutOptions::new());
        assert_eq!(first.text(), second.text());
        assert!(metrics.stats().hits > 0);
    }
}
