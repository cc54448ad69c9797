//! Named, immutable bundles of text attributes.
//!
//! A [`Style`] is applied to a range of text, either through a
//! [`RichTextBuilder`](crate::RichTextBuilder) or with
//! [`RichText::apply_style`](crate::RichText::apply_style). Converters use
//! the list of applied styles to decide which markup to emit.
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::{attr, Color, Style};
//!
//! let warning = Style::builder("warning")
//!     .bold()
//!     .color(Color::rgb(200, 80, 0))
//!     .build();
//!
//! assert_eq!(warning.name(), "warning");
//! assert!(warning.is_font_related());
//! assert_eq!(warning.font_def().bold, Some(true));
//! ```

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::logging::targets;
use crate::{AttrValue, Color, Font, FontDef, TextAttributes, attr};

/// A named set of attributes.
///
/// Cloning is cheap. Two styles are equal when their names and properties
/// are equal.
#[derive(Clone)]
pub struct Style {
    inner: Arc<StyleInner>,
}

struct StyleInner {
    name: String,
    properties: TextAttributes,
}

impl Style {
    /// Create a style from key/value pairs.
    ///
    /// Properties with a value of an unexpected type for a well-known key
    /// are kept but logged as a warning.
    pub fn create<K, V, I>(name: impl Into<String>, properties: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let name = name.into();
        let properties = TextAttributes::of(properties);
        for (key, value) in properties.iter() {
            if !attr::accepts(key, value) {
                tracing::warn!(
                    target: targets::STYLE,
                    style = %name,
                    key,
                    found = value.type_name(),
                    "style property has unexpected value type"
                );
            }
        }
        Self::from_parts(name, properties)
    }

    /// An unnamed style holding `properties` as given.
    pub(crate) fn anonymous(properties: TextAttributes) -> Self {
        Self::from_parts(String::new(), properties)
    }

    fn from_parts(name: String, properties: TextAttributes) -> Self {
        Self {
            inner: Arc::new(StyleInner { name, properties }),
        }
    }

    /// Start building a style with the given name.
    pub fn builder(name: impl Into<String>) -> StyleBuilder {
        StyleBuilder::new(name)
    }

    /// The style name; empty for anonymous styles.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn properties(&self) -> &TextAttributes {
        &self.inner.properties
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.inner.properties.get(key)
    }

    /// The partial font described by this style.
    pub fn font_def(&self) -> FontDef {
        self.inner.properties.font_def()
    }

    /// `base` with this style's font properties applied.
    pub fn font(&self, base: &Font) -> Font {
        self.font_def().apply(base)
    }

    /// Check whether any property affects the resolved font.
    pub fn is_font_related(&self) -> bool {
        self.inner.properties.keys().any(attr::is_font_key)
    }

    /// A new style with this style's properties overridden by `overlay`'s.
    pub fn merge(&self, name: impl Into<String>, overlay: &Style) -> Style {
        let mut properties = self.inner.properties.clone();
        for (key, value) in overlay.properties().iter() {
            properties.set(key, Some(value.clone()));
        }
        Self::from_parts(name.into(), properties)
    }

    pub fn bold() -> Style {
        predefined().bold.clone()
    }

    pub fn italic() -> Style {
        predefined().italic.clone()
    }

    pub fn underline() -> Style {
        predefined().underline.clone()
    }

    pub fn line_through() -> Style {
        predefined().line_through.clone()
    }

    /// Italic emphasis, kept distinct from [`Style::italic`] by name.
    pub fn emphasis() -> Style {
        predefined().emphasis.clone()
    }

    pub fn monospace() -> Style {
        predefined().monospace.clone()
    }

    pub fn sans_serif() -> Style {
        predefined().sans_serif.clone()
    }

    pub fn serif() -> Style {
        predefined().serif.clone()
    }

    pub fn red() -> Style {
        predefined().red.clone()
    }

    pub fn green() -> Style {
        predefined().green.clone()
    }

    pub fn blue() -> Style {
        predefined().blue.clone()
    }

    pub fn black() -> Style {
        predefined().black.clone()
    }

    pub fn white() -> Style {
        predefined().white.clone()
    }

    /// Heading style for `level`, clamped to 1-6.
    pub fn heading(level: u8) -> Style {
        let index = usize::from(level.clamp(1, 6)) - 1;
        predefined().headings[index].clone()
    }
}

impl PartialEq for Style {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
            || (self.inner.name == other.inner.name
                && self.inner.properties == other.inner.properties)
    }
}

impl fmt::Debug for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Style")
            .field("name", &self.inner.name)
            .field("properties", &self.inner.properties)
            .finish()
    }
}

static_assertions::assert_impl_all!(Style: Send, Sync);

struct Predefined {
    bold: Style,
    italic: Style,
    underline: Style,
    line_through: Style,
    emphasis: Style,
    monospace: Style,
    sans_serif: Style,
    serif: Style,
    red: Style,
    green: Style,
    blue: Style,
    black: Style,
    white: Style,
    headings: [Style; 6],
}

fn predefined() -> &'static Predefined {
    static PREDEFINED: OnceLock<Predefined> = OnceLock::new();
    PREDEFINED.get_or_init(|| {
        let color = |name: &str, color: Color| Style::create(name, [(attr::COLOR, color)]);
        let family = |name: &str| Style::create(name, [(attr::FONT_FAMILY, name)]);
        Predefined {
            bold: Style::create("bold", [(attr::FONT_WEIGHT, "bold")]),
            italic: Style::create("italic", [(attr::FONT_STYLE, "italic")]),
            underline: Style::create("underline", [(attr::UNDERLINE, true)]),
            line_through: Style::create("line-through", [(attr::LINE_THROUGH, true)]),
            emphasis: Style::create("emphasis", [(attr::FONT_STYLE, "italic")]),
            monospace: family("monospace"),
            sans_serif: family("sans-serif"),
            serif: family("serif"),
            red: color("red", Color::RED),
            green: color("green", Color::GREEN),
            blue: color("blue", Color::BLUE),
            black: color("black", Color::BLACK),
            white: color("white", Color::WHITE),
            headings: std::array::from_fn(|i| {
                Style::create(format!("h{}", i + 1), [(attr::HEADING_LEVEL, (i + 1) as f64)])
            }),
        }
    })
}

/// Builder for [`Style`].
#[derive(Debug, Clone)]
pub struct StyleBuilder {
    name: String,
    properties: Vec<(String, AttrValue)>,
}

impl StyleBuilder {
    /// Create a new style builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    /// Set an arbitrary property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    pub fn font(self, font: Font) -> Self {
        self.property(attr::FONT, font)
    }

    pub fn font_family(self, family: impl Into<String>) -> Self {
        self.property(attr::FONT_FAMILY, family.into())
    }

    /// Set the font size in points.
    pub fn font_size(self, points: f32) -> Self {
        self.property(attr::FONT_SIZE, points)
    }

    /// Set the font size as a CSS value such as `"1.5em"` or `"120%"`.
    pub fn font_size_css(self, size: impl Into<String>) -> Self {
        self.property(attr::FONT_SIZE, size.into())
    }

    pub fn bold(self) -> Self {
        self.property(attr::FONT_WEIGHT, "bold")
    }

    pub fn italic(self) -> Self {
        self.property(attr::FONT_STYLE, "italic")
    }

    pub fn underline(self) -> Self {
        self.property(attr::UNDERLINE, true)
    }

    pub fn line_through(self) -> Self {
        self.property(attr::LINE_THROUGH, true)
    }

    pub fn color(self, color: Color) -> Self {
        self.property(attr::COLOR, color)
    }

    pub fn background_color(self, color: Color) -> Self {
        self.property(attr::BACKGROUND_COLOR, color)
    }

    pub fn heading_level(self, level: u8) -> Self {
        self.property(attr::HEADING_LEVEL, f64::from(level))
    }

    /// Build the style.
    pub fn build(self) -> Style {
        Style::create(self.name, self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FontFamily, FontWeight};

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[test]
    fn predefined_styles_are_shared() {
        let a = Style::bold();
        let b = Style::bold();
        assert!(Arc::ptr_eq(&a.inner, &b.inner));
        assert_eq!(a.name(), "bold");
        assert_ne!(Style::bold(), Style::italic());
        assert_ne!(Style::emphasis(), Style::italic());
        assert_eq!(Style::emphasis().font_def(), Style::italic().font_def());
    }

    #[test]
    fn structural_equality() {
        let a = Style::create("x", [(attr::UNDERLINE, true)]);
        let b = Style::builder("x").underline().build();
        assert_eq!(a, b);
        assert_ne!(a, Style::create("y", [(attr::UNDERLINE, true)]));
    }

    #[test]
    fn font_resolution() {
        let base = Font::new(FontFamily::Serif, 10.0);
        assert_eq!(Style::bold().font(&base).weight(), FontWeight::BOLD);
        assert_eq!(Style::monospace().font(&base).family(), &FontFamily::Monospace);
        assert_eq!(Style::red().font(&base).color(), Color::RED);
        assert!(Style::underline().font(&base).is_underline());
    }

    #[test]
    fn font_related_detection() {
        assert!(Style::bold().is_font_related());
        assert!(!Style::heading(2).is_font_related());
        assert!(
            !Style::builder("hl")
                .background_color(Color::YELLOW)
                .build()
                .is_font_related()
        );
    }

    #[test]
    fn heading_levels_clamp() {
        assert_eq!(Style::heading(0).name(), "h1");
        assert_eq!(Style::heading(3).name(), "h3");
        assert_eq!(Style::heading(9).name(), "h6");
        assert_eq!(
            Style::heading(4).get(attr::HEADING_LEVEL),
            Some(&AttrValue::Number(4.0))
        );
    }

    #[test]
    fn mismatched_types_are_kept() {
        init_logging();
        let style = Style::create("odd", [(attr::COLOR, "not a color")]);
        assert_eq!(style.get(attr::COLOR), Some(&AttrValue::from("not a color")));
        assert!(style.font_def().color.is_none());
    }

    #[test]
    fn merge_overrides() {
        let merged = Style::red().merge("red-bold", &Style::bold());
        assert_eq!(merged.name(), "red-bold");
        assert_eq!(merged.properties().len(), 2);
    }
}
