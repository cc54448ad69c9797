//! Layout configuration.

use horizon_prose_text::Font;

use crate::align::{HorizontalAlign, HorizontalAnchor, VerticalAlign, VerticalAnchor};

/// Wrap width that disables wrapping.
pub const NO_WRAP: f32 = f32::MAX;

/// Options for [`FragmentedText::generate`](crate::FragmentedText::generate).
///
/// # Example
///
/// ```
/// use horizon_prose_layout::{HorizontalAlign, LayoutOptions};
///
/// let options = LayoutOptions::new()
///     .size(200.0, 100.0)
///     .wrap_width(200.0)
///     .horizontal_align(HorizontalAlign::Justify);
/// assert!(options.is_wrapping());
/// ```
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Width of the layout box; 0 means the width of the widest line.
    pub width: f32,
    /// Height of the layout box; 0 means the height of the text.
    pub height: f32,
    pub horizontal_align: HorizontalAlign,
    pub vertical_align: VerticalAlign,
    pub horizontal_anchor: HorizontalAnchor,
    pub vertical_anchor: VerticalAnchor,
    /// Maximum line width before wrapping, or [`NO_WRAP`].
    pub wrap_width: f32,
    /// Break words wider than the wrap width into slices.
    pub hard_wrap: bool,
    /// Font for text without font attributes.
    pub base_font: Font,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            horizontal_align: HorizontalAlign::Left,
            vertical_align: VerticalAlign::Top,
            horizontal_anchor: HorizontalAnchor::Left,
            vertical_anchor: VerticalAnchor::Top,
            wrap_width: NO_WRAP,
            hard_wrap: false,
            base_font: Font::default(),
        }
    }
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout box size.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn horizontal_align(mut self, align: HorizontalAlign) -> Self {
        self.horizontal_align = align;
        self
    }

    pub fn vertical_align(mut self, align: VerticalAlign) -> Self {
        self.vertical_align = align;
        self
    }

    pub fn horizontal_anchor(mut self, anchor: HorizontalAnchor) -> Self {
        self.horizontal_anchor = anchor;
        self
    }

    pub fn vertical_anchor(mut self, anchor: VerticalAnchor) -> Self {
        self.vertical_anchor = anchor;
        self
    }

    /// Wrap lines longer than `width`.
    pub fn wrap_width(mut self, width: f32) -> Self {
        self.wrap_width = width;
        self
    }

    /// Disable wrapping.
    pub fn no_wrap(self) -> Self {
        self.wrap_width(NO_WRAP)
    }

    /// Break words wider than the wrap width.
    pub fn hard_wrap(mut self, hard_wrap: bool) -> Self {
        self.hard_wrap = hard_wrap;
        self
    }

    pub fn base_font(mut self, font: Font) -> Self {
        self.base_font = font;
        self
    }

    /// Check whether lines are wrapped.
    pub fn is_wrapping(&self) -> bool {
        self.wrap_width < NO_WRAP
    }
}
