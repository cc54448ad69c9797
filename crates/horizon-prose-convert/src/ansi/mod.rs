//! Conversion to ANSI-escaped terminal text.
//!
//! [`AnsiConverter`] emits SGR sequences at every change of formatting:
//! 24-bit colors, bold, underline, strike-through and italic. Text that
//! returns to the base font color gets the default-foreground sequence
//! rather than an explicit color.
//!
//! # Example
//!
//! ```
//! use horizon_prose_convert::{AnsiConverter, Converter};
//! use horizon_prose_text::{RichText, Style};
//!
//! let text = RichText::value_of("Hello ")
//!     + RichText::styled("world", &Style::bold())
//!     + RichText::value_of("!");
//!
//! let ansi = AnsiConverter::new().convert(&text);
//! assert_eq!(ansi, "Hello \x1b[1mworld\x1b[22m!");
//! ```

pub mod sequences;

use horizon_prose_text::logging::{PerfSpan, targets};
use horizon_prose_text::{AttrValue, Font, RichText, attr};

use crate::attribute_based::{AttributeBasedConverter, AttributeMapper, AttributeMappings};
use crate::protocol::Converter;
use sequences::{attr as sgr, color, toggle};

/// Converts rich text to a string with embedded SGR escape sequences.
#[derive(Debug, Clone)]
pub struct AnsiConverter {
    mappings: AttributeMappings,
    base_font: Font,
    reset: bool,
}

impl AnsiConverter {
    /// A converter with the default mappings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> AnsiConverterBuilder {
        AnsiConverterBuilder::new()
    }

    /// Whether output starts with a full attribute reset.
    pub fn emits_reset(&self) -> bool {
        self.reset
    }
}

impl Default for AnsiConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeBasedConverter for AnsiConverter {
    fn mappings(&self) -> &AttributeMappings {
        &self.mappings
    }

    fn base_font(&self) -> &Font {
        &self.base_font
    }

    fn apply_font_change(&self, before: &Font, after: &Font, out: &mut String) {
        if before.color() != after.color() {
            if after.color() == self.base_font.color() {
                out.push_str(color::FG_DEFAULT);
            } else {
                out.push_str(&color::fg(after.color()));
            }
        }
        if before.is_bold() != after.is_bold() {
            out.push_str(toggle(after.is_bold(), sgr::BOLD, sgr::RESET_INTENSITY));
        }
        if before.is_underline() != after.is_underline() {
            out.push_str(toggle(after.is_underline(), sgr::UNDERLINE, sgr::RESET_UNDERLINE));
        }
        if before.is_strikethrough() != after.is_strikethrough() {
            out.push_str(toggle(
                after.is_strikethrough(),
                sgr::STRIKETHROUGH,
                sgr::RESET_STRIKETHROUGH,
            ));
        }
        if before.is_italic() != after.is_italic() {
            out.push_str(toggle(after.is_italic(), sgr::ITALIC, sgr::RESET_ITALIC));
        }
    }

    fn prologue(&self, out: &mut String) {
        if self.reset {
            out.push_str(sequences::RESET);
        }
    }
}

impl Converter for AnsiConverter {
    fn convert(&self, text: &RichText) -> String {
        let _span = PerfSpan::new("ansi_convert");
        tracing::debug!(target: targets::CONVERT, runs = text.run_count(), "converting to ANSI");
        self.convert_runs(text)
    }
}

static_assertions::assert_impl_all!(AnsiConverter: Send, Sync);

fn background_mapper() -> AttributeMapper {
    AttributeMapper::new(|_, after| match after.and_then(AttrValue::as_color) {
        Some(background) => color::bg(background),
        None => color::BG_DEFAULT.to_string(),
    })
}

/// Builder for [`AnsiConverter`].
#[derive(Debug, Clone)]
pub struct AnsiConverterBuilder {
    mappings: AttributeMappings,
    base_font: Font,
    reset: bool,
}

impl AnsiConverterBuilder {
    /// A builder preloaded with the default background-color mapping.
    pub fn new() -> Self {
        let mut mappings = AttributeMappings::new();
        mappings.map(attr::BACKGROUND_COLOR, background_mapper());
        Self {
            mappings,
            ..Self::blank()
        }
    }

    /// A builder without any attribute mappings.
    pub fn blank() -> Self {
        Self {
            mappings: AttributeMappings::new(),
            base_font: Font::default(),
            reset: false,
        }
    }

    /// Set the font unformatted text is assumed to be displayed in.
    pub fn base_font(mut self, font: Font) -> Self {
        self.base_font = font;
        self
    }

    /// Start the output with a full attribute reset.
    pub fn reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    /// Add a mapper for `key`; it runs after any mapper already registered.
    ///
    /// Mappers for font keys such as [`attr::FONT_WEIGHT`] run after the
    /// built-in font sequences.
    pub fn map<F>(mut self, key: &str, mapper: F) -> Self
    where
        F: Fn(Option<&AttrValue>, Option<&AttrValue>) -> String + Send + Sync + 'static,
    {
        self.mappings.map(key, AttributeMapper::new(mapper));
        self
    }

    /// Replace every mapper for `key` with `mapper`.
    pub fn replace_mapping<F>(mut self, key: &str, mapper: F) -> Self
    where
        F: Fn(Option<&AttrValue>, Option<&AttrValue>) -> String + Send + Sync + 'static,
    {
        self.mappings.replace_mapping(key, AttributeMapper::new(mapper));
        self
    }

    pub fn build(self) -> AnsiConverter {
        AnsiConverter {
            mappings: self.mappings,
            base_font: self.base_font,
            reset: self.reset,
        }
    }
}

impl Default for AnsiConverterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_prose_text::{Color, RichTextBuilder, Style};

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[test]
    fn bold_word() {
        let text = RichText::value_of("Hello ")
            + RichText::styled("world", &Style::bold())
            + RichText::value_of("!");
        assert_eq!(AnsiConverter::new().convert(&text), "Hello \x1b[1mworld\x1b[22m!");
    }

    #[test]
    fn trailing_style_is_closed() {
        let text = RichText::value_of("a") + RichText::styled("b", &Style::italic());
        assert_eq!(AnsiConverter::new().convert(&text), "a\x1b[3mb\x1b[23m");
    }

    #[test]
    fn reset_prefix() {
        let converter = AnsiConverter::builder().reset(true).build();
        assert!(converter.emits_reset());
        assert_eq!(converter.convert(&RichText::value_of("x")), "\x1b[0mx");
    }

    #[test]
    fn color_returns_to_default() {
        let text = RichText::styled("red", &Style::red()) + RichText::value_of(" plain");
        assert_eq!(
            AnsiConverter::new().convert(&text),
            "\x1b[38;2;255;0;0mred\x1b[39m plain"
        );
    }

    #[test]
    fn explicit_base_color_is_default() {
        let converter = AnsiConverter::builder()
            .base_font(Font::default().with_color(Color::WHITE))
            .build();
        let text = RichText::styled("w", &Style::white()) + RichText::styled("b", &Style::black());
        assert_eq!(converter.convert(&text), "w\x1b[38;2;0;0;0mb\x1b[39m");
    }

    #[test]
    fn font_attributes_in_fixed_order() {
        let loud = Style::builder("loud").italic().underline().bold().build();
        let text = RichText::styled("x", &loud);
        assert_eq!(
            AnsiConverter::new().convert(&text),
            "\x1b[1m\x1b[4m\x1b[3mx\x1b[22m\x1b[24m\x1b[23m"
        );
    }

    #[test]
    fn nested_styles_only_emit_changes() {
        let mut builder = RichTextBuilder::new();
        builder.push_style(&Style::bold());
        builder.append("a");
        builder.push_style(&Style::line_through());
        builder.append("b");
        builder.pop_style(&Style::line_through());
        builder.append("c");
        builder.pop_style(&Style::bold());
        let text = builder.to_rich_text();

        assert_eq!(
            AnsiConverter::new().convert(&text),
            "\x1b[1ma\x1b[9mb\x1b[29mc\x1b[22m"
        );
    }

    #[test]
    fn background_mapping() {
        let highlight = Style::builder("hl").background_color(Color::YELLOW).build();
        let text = RichText::styled("hi", &highlight) + RichText::value_of("!");
        assert_eq!(
            AnsiConverter::new().convert(&text),
            "\x1b[48;2;255;255;0mhi\x1b[49m!"
        );
        assert_eq!(AnsiConverterBuilder::blank().build().convert(&text), "hi!");
    }

    #[test]
    fn custom_mappings_compose_and_replace() {
        let highlight = Style::builder("hl").background_color(Color::YELLOW).build();
        let text = RichText::styled("hi", &highlight);

        let composed = AnsiConverter::builder()
            .map(attr::BACKGROUND_COLOR, |_, after| {
                if after.is_some() { "<".into() } else { ">".into() }
            })
            .build();
        assert_eq!(composed.convert(&text), "\x1b[48;2;255;255;0m<hi\x1b[49m>");

        let replaced = AnsiConverter::builder()
            .replace_mapping(attr::BACKGROUND_COLOR, |_, _| "*".into())
            .build();
        assert_eq!(replaced.convert(&text), "*hi*");
    }

    #[test]
    fn conversion_is_repeatable() {
        init_logging();
        let converter = AnsiConverter::new();
        let text = RichText::styled("a", &Style::underline()) + RichText::value_of("b");
        assert_eq!(converter.convert(&text), converter.convert(&text));
    }

    #[test]
    fn font_key_mapping_runs_after_sequences() {
        let converter = AnsiConverter::builder()
            .map(attr::FONT_WEIGHT, |_, after| {
                if after.is_some() { "<w>".into() } else { "</w>".into() }
            })
            .build();
        let text = RichText::styled("x", &Style::bold());
        assert_eq!(converter.convert(&text), "\x1b[1m<w>x\x1b[22m</w>");
    }
}
