//! Conversion to HTML.
//!
//! Styles become nested elements: bold, italic, underline and strike-through
//! map to `<b>`, `<i>`, `<u>` and `<s>`, heading levels to `<h1>`..`<h6>`,
//! and all other font properties to a `<span>` carrying either inline
//! declarations or, with [`use_css`](HtmlConverterBuilder::use_css), class
//! references. Properties already implied by enclosing markup (such as the
//! bold weight of a heading) are not repeated.
//!
//! # Example
//!
//! ```
//! use horizon_prose_convert::{Converter, HtmlConverter};
//! use horizon_prose_text::{RichText, Style};
//!
//! let text = RichText::value_of("Hello ")
//!     + RichText::styled("world", &Style::bold())
//!     + RichText::value_of("!");
//!
//! assert_eq!(HtmlConverter::new().convert(&text), "Hello <b>world</b>!");
//! ```

mod mapping;
mod tag;

pub use mapping::{HtmlFragment, HtmlMapper, MappingContext, StandardHtmlMapping};
pub use tag::{CompoundHtmlTag, HtmlTag, TagFormatting};

use horizon_prose_text::logging::{PerfSpan, targets};
use horizon_prose_text::{Font, FontDef, FontSize, RichText, Style, attr};

use crate::protocol::Converter;
use crate::tag_based::TagBasedConverter;

/// Default relative sizes of heading levels 1 to 6.
const HEADING_SCALES: [f32; 6] = [2.0, 1.5, 1.17, 1.0, 0.83, 0.67];

/// Converts rich text to an HTML fragment.
#[derive(Debug, Clone)]
pub struct HtmlConverter {
    mappings: Vec<(String, Vec<HtmlMapper>)>,
    use_css: bool,
    replace_line_breaks: bool,
    heading_fonts: [FontDef; 6],
}

impl HtmlConverter {
    /// A converter with the standard mappings and inline declarations.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> HtmlConverterBuilder {
        HtmlConverterBuilder::new()
    }

    /// The CSS class name used for `font` in class mode.
    pub fn font_class(font: &Font) -> String {
        font.css_class()
    }

    pub fn uses_css(&self) -> bool {
        self.use_css
    }

    /// The font implied by a heading of `level`, clamped to 1-6.
    pub fn heading_font(&self, level: u8) -> &FontDef {
        &self.heading_fonts[usize::from(level.clamp(1, 6)) - 1]
    }

    fn mappers(&self, key: &str) -> Option<&[HtmlMapper]> {
        self.mappings
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, mappers)| mappers.as_slice())
    }
}

impl Default for HtmlConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TagBasedConverter for HtmlConverter {
    type Tag = HtmlTag;
    type Context = FontDef;

    fn open_style(&self, style: &Style, implied: &FontDef) -> (HtmlTag, FontDef) {
        let mut implied = implied.clone();
        let mut tags = Vec::new();
        let mut declarations = Vec::new();
        let mut classes = Vec::new();

        // The heading goes first so that its font is implied for the rest.
        let properties = style.properties();
        let ordered = properties
            .get(attr::HEADING_LEVEL)
            .map(|value| (attr::HEADING_LEVEL, value))
            .into_iter()
            .chain(
                properties
                    .iter()
                    .filter(|(key, _)| *key != attr::HEADING_LEVEL && *key != attr::STYLES),
            );

        for (key, value) in ordered {
            let Some(mappers) = self.mappers(key) else {
                continue;
            };
            for mapper in mappers {
                let context = MappingContext {
                    implied: &implied,
                    use_css: self.use_css,
                    heading_fonts: &self.heading_fonts,
                };
                for fragment in mapper.map(value, &context) {
                    match fragment {
                        HtmlFragment::Tag(tag) => tags.push(tag),
                        HtmlFragment::Declaration(declaration) => declarations.push(declaration),
                        HtmlFragment::Class(class) => classes.push(class),
                        HtmlFragment::Implies(def) => implied = implied.merge(&def),
                    }
                }
            }
        }

        if !classes.is_empty() || !declarations.is_empty() {
            let mut open = String::from("<span");
            if !classes.is_empty() {
                open.push_str(" class=\"");
                escape_into(&classes.join(" "), false, &mut open);
                open.push('"');
            }
            if !declarations.is_empty() {
                open.push_str(" style=\"");
                escape_into(&declarations.join("; "), false, &mut open);
                open.push('"');
            }
            open.push('>');
            tags.push(HtmlTag::simple(open, "</span>"));
        }

        (HtmlTag::compound(tags), implied)
    }

    fn escape_text(&self, text: &str, out: &mut String) {
        escape_into(text, self.replace_line_breaks, out);
    }
}

impl Converter for HtmlConverter {
    fn convert(&self, text: &RichText) -> String {
        let _span = PerfSpan::new("html_convert");
        tracing::debug!(target: targets::CONVERT, runs = text.run_count(), css = self.use_css, "converting to HTML");
        self.convert_tags(text)
    }
}

static_assertions::assert_impl_all!(HtmlConverter: Send, Sync);

fn escape_into(text: &str, replace_line_breaks: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' if replace_line_breaks => out.push_str("<br>\n"),
            c => out.push(c),
        }
    }
}

fn default_heading_fonts() -> [FontDef; 6] {
    HEADING_SCALES.map(|scale| FontDef::new().bold(true).size(FontSize::Scale(scale)))
}

/// Builder for [`HtmlConverter`].
#[derive(Debug, Clone)]
pub struct HtmlConverterBuilder {
    mappings: Vec<(String, Vec<HtmlMapper>)>,
    use_css: bool,
    replace_line_breaks: bool,
    heading_fonts: [FontDef; 6],
}

impl HtmlConverterBuilder {
    /// A builder with the standard mappings installed.
    pub fn new() -> Self {
        StandardHtmlMapping::DEFAULTS
            .into_iter()
            .fold(Self::blank(), |builder, (key, mapping)| builder.map(key, mapping))
    }

    /// A builder without any mappings; every style is ignored until mapped.
    pub fn blank() -> Self {
        Self {
            mappings: Vec::new(),
            use_css: false,
            replace_line_breaks: false,
            heading_fonts: default_heading_fonts(),
        }
    }

    /// Add a mapper for `key`; it runs after any mapper already registered.
    pub fn map(mut self, key: &str, mapper: impl Into<HtmlMapper>) -> Self {
        let mapper = mapper.into();
        match self.mappings.iter_mut().find(|(k, _)| k == key) {
            Some((_, mappers)) => mappers.push(mapper),
            None => self.mappings.push((key.to_string(), vec![mapper])),
        }
        self
    }

    /// Replace every mapper for `key` with `mapper`.
    pub fn replace_mapping(mut self, key: &str, mapper: impl Into<HtmlMapper>) -> Self {
        self.mappings.retain(|(k, _)| k != key);
        self.map(key, mapper)
    }

    /// Reference fonts through CSS classes instead of inline declarations.
    pub fn use_css(mut self, use_css: bool) -> Self {
        self.use_css = use_css;
        self
    }

    /// Emit `<br>` before every line break.
    pub fn replace_line_breaks(mut self, replace: bool) -> Self {
        self.replace_line_breaks = replace;
        self
    }

    /// Set the font implied by headings of `level` (clamped to 1-6).
    pub fn heading_font(mut self, level: u8, font: FontDef) -> Self {
        self.heading_fonts[usize::from(level.clamp(1, 6)) - 1] = font;
        self
    }

    pub fn build(self) -> HtmlConverter {
        HtmlConverter {
            mappings: self.mappings,
            use_css: self.use_css,
            replace_line_breaks: self.replace_line_breaks,
            heading_fonts: self.heading_fonts,
        }
    }
}

impl Default for HtmlConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Standard mappings as `(key, mapper)` pairs, for callers assembling their
/// own converter from [`HtmlConverterBuilder::blank`].
pub fn standard_mappers() -> impl Iterator<Item = (&'static str, HtmlMapper)> {
    StandardHtmlMapping::DEFAULTS
        .into_iter()
        .map(|(key, mapping)| (key, HtmlMapper::from(mapping)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_prose_text::{Color, FontFamily, RichTextBuilder};

    fn hello_world() -> RichText {
        RichText::value_of("Hello ")
            + RichText::styled("world", &Style::bold())
            + RichText::value_of("!")
    }

    #[test]
    fn bold_word() {
        assert_eq!(HtmlConverter::new().convert(&hello_world()), "Hello <b>world</b>!");
    }

    #[test]
    fn nesting_follows_push_order() {
        let mut builder = RichTextBuilder::new();
        builder.push_style(&Style::bold());
        builder.append("a");
        builder.push_style(&Style::italic());
        builder.append("b");
        builder.pop_style(&Style::italic());
        builder.pop_style(&Style::bold());
        builder.append("c");

        assert_eq!(HtmlConverter::new().convert(&builder.to_rich_text()), "<b>a<i>b</i></b>c");
    }

    #[test]
    fn unclosed_styles_are_closed_at_end() {
        let mut builder = RichTextBuilder::new();
        builder.push_style(&Style::bold());
        builder.append("a");
        builder.push_style(&Style::underline());
        builder.append("b");

        assert_eq!(HtmlConverter::new().convert(&builder.to_rich_text()), "<b>a<u>b</u></b>");
    }

    #[test]
    fn heading_implies_bold() {
        let mut builder = RichTextBuilder::new();
        builder.push_style(&Style::heading(1));
        builder.append("Big ");
        builder.push_style(&Style::bold());
        builder.append("bold");
        builder.pop_style(&Style::bold());
        builder.pop_style(&Style::heading(1));
        builder.append("text");

        assert_eq!(
            HtmlConverter::new().convert(&builder.to_rich_text()),
            "<h1>Big bold</h1>\ntext"
        );
    }

    #[test]
    fn custom_heading_font() {
        let converter = HtmlConverter::builder()
            .heading_font(2, FontDef::new().color(Color::BLUE))
            .build();
        let text = RichText::styled("t", &Style::heading(2)).apply_style(.., &Style::blue());
        assert_eq!(converter.convert(&text), "<h2>t</h2>\n");
        assert_eq!(converter.heading_font(2).color, Some(Color::BLUE));
    }

    #[test]
    fn inline_declarations_share_a_span() {
        let fancy = Style::builder("fancy")
            .color(Color::RED)
            .background_color(Color::YELLOW)
            .build();
        assert_eq!(
            HtmlConverter::new().convert(&RichText::styled("x", &fancy)),
            "<span style=\"color: #ff0000; background-color: #ffff00\">x</span>"
        );
    }

    #[test]
    fn full_font_in_class_mode() {
        let font = Font::builder()
            .family(FontFamily::name("Fira Code"))
            .size(11.0)
            .build();
        let code = Style::builder("code").font(font.clone()).build();
        let text = RichText::styled("x", &code);

        let converter = HtmlConverter::builder().use_css(true).build();
        assert!(converter.uses_css());
        assert_eq!(
            converter.convert(&text),
            format!("<span class=\"{}\">x</span>", HtmlConverter::font_class(&font))
        );
        assert_eq!(HtmlConverter::font_class(&font), "font-fira_code-11");

        let inline = HtmlConverter::new().convert(&text);
        assert!(inline.starts_with("<span style=\"font-family: &#39;Fira Code&#39;; font-size: 11pt"));
    }

    #[test]
    fn escaping_and_line_breaks() {
        let text = RichText::value_of("a < b & 'c'\n\"d\"");
        assert_eq!(
            HtmlConverter::new().convert(&text),
            "a &lt; b &amp; &#39;c&#39;\n&quot;d&quot;"
        );
        let converter = HtmlConverter::builder().replace_line_breaks(true).build();
        assert_eq!(converter.convert(&RichText::value_of("a\nb")), "a<br>\nb");
    }

    #[test]
    fn blank_converter_ignores_styles() {
        let converter = HtmlConverterBuilder::blank().build();
        assert_eq!(converter.convert(&hello_world()), "Hello world!");
    }

    #[test]
    fn custom_and_replaced_mappings() {
        let link = Style::create("link", [("href", "https://example.com")]);
        let converter = HtmlConverter::builder()
            .map(
                "href",
                HtmlMapper::custom(|value, _| {
                    let target = value.as_text().unwrap_or_default();
                    vec![HtmlFragment::Tag(HtmlTag::simple(
                        format!("<a href=\"{target}\">"),
                        "</a>",
                    ))]
                }),
            )
            .replace_mapping(
                attr::FONT_WEIGHT,
                HtmlMapper::custom(|_, _| {
                    vec![HtmlFragment::Tag(HtmlTag::element("strong", TagFormatting::Inline))]
                }),
            )
            .build();

        let text = RichText::styled("site", &link) + RichText::styled("!", &Style::bold());
        assert_eq!(
            converter.convert(&text),
            "<a href=\"https://example.com\">site</a><strong>!</strong>"
        );
    }

    #[test]
    fn standard_mappers_rebuild_defaults() {
        let converter = standard_mappers()
            .fold(HtmlConverterBuilder::blank(), |builder, (key, mapper)| {
                builder.map(key, mapper)
            })
            .build();
        assert_eq!(converter.convert(&hello_world()), "Hello <b>world</b>!");
    }

    #[test]
    fn conversion_is_repeatable() {
        let converter = HtmlConverter::new();
        let text = hello_world().wrap(&Style::italic());
        assert_eq!(converter.convert(&text), converter.convert(&text));
        assert_eq!(converter.convert(&text), "<i>Hello <b>world</b>!</i>");
    }
}
