//! Alignment and anchor settings.

/// Horizontal placement of each line within the layout width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    /// Stretch whitespace so every line except the last fills the width.
    Justify,
    /// Stretch whitespace so every line fills the width.
    Distribute,
}

impl HorizontalAlign {
    /// The alignment applied to a line, given whether it is the last line of
    /// the text.
    pub fn for_line(self, is_last: bool) -> Self {
        match self {
            Self::Justify if is_last => Self::Left,
            Self::Justify => Self::Distribute,
            other => other,
        }
    }

    pub(crate) fn trims_start(self) -> bool {
        !matches!(self, Self::Left)
    }

    pub(crate) fn trims_end(self) -> bool {
        !matches!(self, Self::Right)
    }
}

/// Vertical placement of the lines within the layout height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
    /// Spread the lines evenly over the height.
    Distributed,
}

/// Which horizontal point of the layout box lies at x = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAnchor {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAnchor {
    /// Horizontal translation for a box of `width`.
    pub fn offset(self, width: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => -width / 2.0,
            Self::Right => -width,
        }
    }
}

/// Which vertical point of the layout box lies at y = 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAnchor {
    #[default]
    Top,
    Middle,
    Bottom,
    /// The baseline of the first line.
    Baseline,
}

impl VerticalAnchor {
    /// Vertical translation for a box of `height` whose first baseline lies
    /// at `baseline` below the top.
    pub fn offset(self, height: f32, baseline: f32) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Middle => -height / 2.0,
            Self::Bottom => -height,
            Self::Baseline => -baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn justify_last_line_is_left() {
        assert_eq!(HorizontalAlign::Justify.for_line(false), HorizontalAlign::Distribute);
        assert_eq!(HorizontalAlign::Justify.for_line(true), HorizontalAlign::Left);
        assert_eq!(HorizontalAlign::Distribute.for_line(true), HorizontalAlign::Distribute);
    }

    #[test]
    fn trimming_follows_alignment() {
        assert!(!HorizontalAlign::Left.trims_start());
        assert!(HorizontalAlign::Left.trims_end());
        assert!(HorizontalAlign::Right.trims_start());
        assert!(!HorizontalAlign::Right.trims_end());
        assert!(HorizontalAlign::Center.trims_start() && HorizontalAlign::Center.trims_end());
    }

    #[test]
    fn anchor_offsets() {
        assert_eq!(HorizontalAnchor::Center.offset(10.0), -5.0);
        assert_eq!(HorizontalAnchor::Right.offset(10.0), -10.0);
        assert_eq!(VerticalAnchor::Bottom.offset(20.0, 8.0), -20.0);
        assert_eq!(VerticalAnchor::Baseline.offset(20.0, 8.0), -8.0);
    }
}
