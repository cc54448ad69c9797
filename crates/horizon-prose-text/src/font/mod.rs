//! Font descriptions.
//!
//! A [`Font`] is a complete, resolved font: every property has a value. A
//! [`FontDef`] is a partial font description as carried by styles; applying
//! it to a base font yields a new `Font`.
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::{Color, Font, FontDef, FontFamily, FontWeight};
//!
//! let base = Font::new(FontFamily::SansSerif, 10.0);
//! let emphasis = FontDef::new().bold(true).color(Color::RED);
//!
//! let font = emphasis.apply(&base);
//! assert_eq!(font.weight(), FontWeight::BOLD);
//! assert_eq!(font.color(), Color::RED);
//! assert_eq!(font.size(), 10.0);
//! ```

mod def;
mod size;
mod types;

pub use def::FontDef;
pub use size::FontSize;
pub use types::{FontFamily, FontStyle, FontWeight};

use crate::Color;

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A fully specified font.
///
/// Sizes are in points.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// The font family (or families for fallback).
    families: Vec<FontFamily>,
    /// Font size in points.
    size: f32,
    weight: FontWeight,
    style: FontStyle,
    color: Color,
    underline: bool,
    strikethrough: bool,
}

impl Font {
    /// Create a new font with the given family and size.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            families: vec![family],
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
            color: Color::BLACK,
            underline: false,
            strikethrough: false,
        }
    }

    /// Create a font builder for more complex font specifications.
    pub fn builder() -> FontBuilder {
        FontBuilder::new()
    }

    /// Get the primary font family.
    pub fn family(&self) -> &FontFamily {
        &self.families[0]
    }

    /// Get all font families (primary + fallbacks).
    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    /// Get the font size in points.
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_bold(&self) -> bool {
        self.weight.is_bold()
    }

    pub fn is_italic(&self) -> bool {
        self.style.is_italic()
    }

    pub fn is_underline(&self) -> bool {
        self.underline
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough
    }

    /// Create a copy of this font with a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Create a copy of this font with a different weight.
    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    /// Create a copy of this font with a different style.
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }

    /// Create a copy of this font with a different color.
    pub fn with_color(&self, color: Color) -> Self {
        Self {
            color,
            ..self.clone()
        }
    }

    /// Create a copy of this font with different families.
    ///
    /// An empty list leaves the families unchanged.
    pub fn with_families(&self, families: Vec<FontFamily>) -> Self {
        if families.is_empty() {
            return self.clone();
        }
        Self {
            families,
            ..self.clone()
        }
    }

    /// Create a copy of this font with underlining switched on or off.
    pub fn with_underline(&self, underline: bool) -> Self {
        Self {
            underline,
            ..self.clone()
        }
    }

    /// Create a copy of this font with strike-through switched on or off.
    pub fn with_strikethrough(&self, strikethrough: bool) -> Self {
        Self {
            strikethrough,
            ..self.clone()
        }
    }

    /// Short identifier usable as a CSS class name, e.g. `font-sans-serif-12-bold`.
    pub fn css_class(&self) -> String {
        let mut class = String::from("font");
        for family in &self.families {
            class.push('-');
            class.extend(family.to_string().chars().map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c.to_ascii_lowercase()
                } else {
                    '_'
                }
            }));
        }
        class.push_str(&format!("-{}", self.size.round() as i32));
        if self.is_bold() {
            class.push_str("-bold");
        }
        if self.is_italic() {
            class.push_str("-italic");
        }
        if self.underline {
            class.push_str("-underline");
        }
        if self.strikethrough {
            class.push_str("-strikethrough");
        }
        if self.color != Color::BLACK {
            class.push_str(&format!("-{:02x}{:02x}{:02x}", self.color.r, self.color.g, self.color.b));
        }
        class
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, DEFAULT_FONT_SIZE)
    }
}

/// Builder for creating `Font` instances.
#[derive(Debug, Clone, Default)]
pub struct FontBuilder {
    families: Vec<FontFamily>,
    size: Option<f32>,
    weight: FontWeight,
    style: FontStyle,
    color: Option<Color>,
    underline: bool,
    strikethrough: bool,
}

impl FontBuilder {
    /// Create a new font builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary font family.
    pub fn family(mut self, family: FontFamily) -> Self {
        if self.families.is_empty() {
            self.families.push(family);
        } else {
            self.families[0] = family;
        }
        self
    }

    /// Add a fallback font family.
    pub fn fallback(mut self, family: FontFamily) -> Self {
        self.families.push(family);
        self
    }

    /// Set the font size in points.
    pub fn size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = underline;
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = strikethrough;
        self
    }

    /// Build the font.
    ///
    /// If no family was specified, uses SansSerif.
    /// If no size was specified, uses [`DEFAULT_FONT_SIZE`].
    pub fn build(self) -> Font {
        let families = if self.families.is_empty() {
            vec![FontFamily::SansSerif]
        } else {
            self.families
        };

        Font {
            families,
            size: self.size.unwrap_or(DEFAULT_FONT_SIZE),
            weight: self.weight,
            style: self.style,
            color: self.color.unwrap_or(Color::BLACK),
            underline: self.underline,
            strikethrough: self.strikethrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let font = Font::builder().build();
        assert_eq!(font, Font::default());
        assert_eq!(font.size(), DEFAULT_FONT_SIZE);
        assert_eq!(font.family(), &FontFamily::SansSerif);
        assert_eq!(font.color(), Color::BLACK);
    }

    #[test]
    fn builder_with_fallbacks() {
        let font = Font::builder()
            .family(FontFamily::name("Inter"))
            .fallback(FontFamily::SansSerif)
            .size(14.0)
            .weight(FontWeight::BOLD)
            .style(FontStyle::Italic)
            .underline(true)
            .build();

        assert_eq!(font.families().len(), 2);
        assert!(font.is_bold());
        assert!(font.is_italic());
        assert!(font.is_underline());
        assert!(!font.is_strikethrough());
    }

    #[test]
    fn with_methods_keep_other_fields() {
        let font = Font::new(FontFamily::Serif, 10.0).with_color(Color::BLUE);
        let bigger = font.with_size(20.0);
        assert_eq!(bigger.size(), 20.0);
        assert_eq!(bigger.color(), Color::BLUE);
        assert_eq!(bigger.family(), &FontFamily::Serif);
        assert_eq!(font.with_families(Vec::new()), font);
    }

    #[test]
    fn css_class_is_identifier() {
        let font = Font::builder()
            .family(FontFamily::name("Fira Code"))
            .size(11.0)
            .weight(FontWeight::BOLD)
            .color(Color::RED)
            .build();
        assert_eq!(font.css_class(), "font-fira_code-11-bold-ff0000");
        assert_eq!(Font::default().css_class(), "font-sans-serif-12");
    }
}
