//! Positioned pieces of laid-out text.

use std::borrow::Cow;

use horizon_prose_text::{Font, RichText};

/// An unsplittable, uniformly styled piece of text at a position.
///
/// Coordinates are those of the top-left corner; y grows downwards.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the top of the fragment to its baseline.
    pub baseline_offset: f32,
    pub font: Font,
    text: RichText,
    whitespace: bool,
}

impl Fragment {
    pub(crate) fn new(text: RichText, font: Font, width: f32, height: f32, ascent: f32, whitespace: bool) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
            baseline_offset: ascent,
            font,
            text,
            whitespace,
        }
    }

    /// The slice of the source text this fragment shows.
    pub fn text(&self) -> &RichText {
        &self.text
    }

    pub fn as_str(&self) -> Cow<'_, str> {
        self.text.as_str()
    }

    /// Check whether the fragment consists of whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.whitespace
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Y coordinate of the baseline.
    pub fn baseline(&self) -> f32 {
        self.y + self.baseline_offset
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

/// One output line of fragments.
#[derive(Debug, Clone)]
pub struct FragmentLine {
    pub(crate) fragments: Vec<Fragment>,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) ascent: f32,
}

impl FragmentLine {
    /// Lay out `fragments` left to right with their baselines aligned.
    pub(crate) fn new(mut fragments: Vec<Fragment>, empty_height: f32, empty_ascent: f32) -> Self {
        let ascent = fragments
            .iter()
            .map(|f| f.baseline_offset)
            .fold(if fragments.is_empty() { empty_ascent } else { 0.0 }, f32::max);
        let descent = fragments
            .iter()
            .map(|f| f.height - f.baseline_offset)
            .fold(0.0, f32::max);
        let height = if fragments.is_empty() {
            empty_height
        } else {
            ascent + descent
        };

        let mut x = 0.0;
        for fragment in &mut fragments {
            fragment.x = x;
            fragment.y = ascent - fragment.baseline_offset;
            x += fragment.width;
        }

        Self {
            fragments,
            x: 0.0,
            y: 0.0,
            width: x,
            height,
            ascent,
        }
    }

    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// X coordinate of the start of the line.
    pub fn x(&self) -> f32 {
        self.x
    }

    /// Y coordinate of the top of the line.
    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Y coordinate of the baseline.
    pub fn baseline(&self) -> f32 {
        self.y + self.ascent
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Total width of the whitespace fragments.
    pub fn whitespace_width(&self) -> f32 {
        self.fragments
            .iter()
            .filter(|f| f.whitespace)
            .map(|f| f.width)
            .sum()
    }

    /// The plain text of the line.
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.as_str()).collect()
    }

    pub(crate) fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        for fragment in &mut self.fragments {
            fragment.translate(dx, dy);
        }
    }

    /// Widen every whitespace fragment by `factor` and reposition the
    /// fragments left to right.
    pub(crate) fn inflate_whitespace(&mut self, factor: f32) {
        let mut x = self.x;
        for fragment in &mut self.fragments {
            if fragment.whitespace {
                fragment.width *= factor;
            }
            fragment.x = x;
            x += fragment.width;
        }
        self.width = x - self.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(text: &str, width: f32, height: f32, ascent: f32) -> Fragment {
        let whitespace = text.chars().all(char::is_whitespace);
        Fragment::new(RichText::value_of(text), Font::default(), width, height, ascent, whitespace)
    }

    #[test]
    fn baselines_are_aligned() {
        let line = FragmentLine::new(
            vec![fragment("small", 10.0, 10.0, 8.0), fragment("BIG", 20.0, 20.0, 16.0)],
            0.0,
            0.0,
        );
        assert_eq!(line.height(), 20.0);
        assert_eq!(line.fragments()[0].y, 8.0);
        assert_eq!(line.fragments()[0].baseline(), 16.0);
        assert_eq!(line.fragments()[1].baseline(), 16.0);
        assert_eq!(line.fragments()[1].x, 10.0);
        assert_eq!(line.width(), 30.0);
        assert_eq!(line.text(), "smallBIG");
    }

    #[test]
    fn empty_line_keeps_height() {
        let line = FragmentLine::new(Vec::new(), 12.0, 9.0);
        assert!(line.is_empty());
        assert_eq!((line.width(), line.height(), line.baseline()), (0.0, 12.0, 9.0));
    }

    #[test]
    fn inflation_moves_following_fragments() {
        let mut line = FragmentLine::new(
            vec![
                fragment("a", 10.0, 10.0, 8.0),
                fragment(" ", 5.0, 10.0, 8.0),
                fragment("b", 10.0, 10.0, 8.0),
            ],
            0.0,
            0.0,
        );
        assert_eq!(line.whitespace_width(), 5.0);
        line.inflate_whitespace(3.0);
        assert_eq!(line.fragments()[1].width, 15.0);
        assert_eq!(line.fragments()[2].x, 25.0);
        assert_eq!(line.width(), 35.0);
    }
}
