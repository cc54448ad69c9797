//! Mapping of attribute values to HTML.
//!
//! A mapper turns one attribute value into [`HtmlFragment`]s. The converter
//! gathers the fragments of every property of a style into a single
//! [`HtmlTag`]: element tags are nested in order and all declarations and
//! classes are collected into one innermost `<span>`.

use std::fmt;
use std::iter;
use std::sync::Arc;

use horizon_prose_text::{AttrValue, FontDef, FontFamily, attr};

use super::tag::{HtmlTag, TagFormatting};

/// One piece of the markup produced for an attribute value.
#[derive(Debug, Clone)]
pub enum HtmlFragment {
    /// An element wrapped around the text.
    Tag(HtmlTag),
    /// An inline CSS declaration such as `color: #ff0000`.
    Declaration(String),
    /// A CSS class reference.
    Class(String),
    /// Font properties the markup implies for nested content.
    Implies(FontDef),
}

/// What a mapper knows about its surroundings.
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    /// Font properties already implied by enclosing markup.
    pub implied: &'a FontDef,
    /// Emit class references instead of inline declarations.
    pub use_css: bool,
    /// Default fonts of heading levels 1 to 6.
    pub heading_fonts: &'a [FontDef; 6],
}

/// The built-in attribute mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardHtmlMapping {
    /// A complete font as a class or as declarations.
    Font,
    FontFamily,
    FontSize,
    /// `<b>` for bold weights.
    FontWeight,
    /// `<i>` for italic styles.
    FontStyle,
    Color,
    BackgroundColor,
    /// `<u>`
    Underline,
    /// `<s>`
    LineThrough,
    /// `<h1>` to `<h6>`.
    Heading,
}

impl StandardHtmlMapping {
    /// The attribute key and mapping pairs installed by default.
    pub const DEFAULTS: [(&'static str, StandardHtmlMapping); 10] = [
        (attr::HEADING_LEVEL, Self::Heading),
        (attr::FONT, Self::Font),
        (attr::FONT_FAMILY, Self::FontFamily),
        (attr::FONT_SIZE, Self::FontSize),
        (attr::FONT_WEIGHT, Self::FontWeight),
        (attr::FONT_STYLE, Self::FontStyle),
        (attr::COLOR, Self::Color),
        (attr::BACKGROUND_COLOR, Self::BackgroundColor),
        (attr::UNDERLINE, Self::Underline),
        (attr::LINE_THROUGH, Self::LineThrough),
    ];

    /// The attribute key this mapping reads.
    pub fn key(self) -> &'static str {
        match self {
            Self::Font => attr::FONT,
            Self::FontFamily => attr::FONT_FAMILY,
            Self::FontSize => attr::FONT_SIZE,
            Self::FontWeight => attr::FONT_WEIGHT,
            Self::FontStyle => attr::FONT_STYLE,
            Self::Color => attr::COLOR,
            Self::BackgroundColor => attr::BACKGROUND_COLOR,
            Self::Underline => attr::UNDERLINE,
            Self::LineThrough => attr::LINE_THROUGH,
            Self::Heading => attr::HEADING_LEVEL,
        }
    }

    pub fn map(self, value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
        match self {
            Self::Font => map_font(value, context),
            Self::FontFamily if context.use_css => map_family_class(value, context),
            Self::FontFamily | Self::FontSize | Self::Color => {
                declarations(self.key(), value, context)
            }
            Self::FontWeight => {
                element_or_declarations(self.key(), value, context, "b", |def| def.bold)
            }
            Self::FontStyle => {
                element_or_declarations(self.key(), value, context, "i", |def| def.italic)
            }
            Self::Underline => {
                element_or_declarations(self.key(), value, context, "u", |def| def.underline)
            }
            Self::LineThrough => {
                element_or_declarations(self.key(), value, context, "s", |def| def.strikethrough)
            }
            Self::BackgroundColor => match value.as_color() {
                Some(color) => vec![HtmlFragment::Declaration(format!(
                    "background-color: {}",
                    color.to_css_hex()
                ))],
                None => Vec::new(),
            },
            Self::Heading => map_heading(value, context),
        }
    }
}

fn font_delta(key: &str, value: &AttrValue, context: &MappingContext<'_>) -> FontDef {
    FontDef::from_attributes(iter::once((key, value))).without_implied(context.implied)
}

fn declarations(key: &str, value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
    let delta = font_delta(key, value, context);
    if delta.is_empty() {
        return Vec::new();
    }
    let mut fragments: Vec<HtmlFragment> = delta
        .css_declarations()
        .into_iter()
        .map(HtmlFragment::Declaration)
        .collect();
    fragments.push(HtmlFragment::Implies(delta));
    fragments
}

/// `<name>` when the flag turns on, declarations when it turns off.
fn element_or_declarations(
    key: &str,
    value: &AttrValue,
    context: &MappingContext<'_>,
    name: &str,
    flag: fn(&FontDef) -> Option<bool>,
) -> Vec<HtmlFragment> {
    let delta = font_delta(key, value, context);
    match flag(&delta) {
        Some(true) => vec![
            HtmlFragment::Tag(HtmlTag::element(name, TagFormatting::Inline)),
            HtmlFragment::Implies(delta),
        ],
        Some(false) => declarations(key, value, context),
        None => Vec::new(),
    }
}

fn map_font(value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
    let Some(font) = value.as_font() else {
        return Vec::new();
    };
    let def = FontDef::from_font(font);
    if context.use_css {
        return vec![
            HtmlFragment::Class(font.css_class()),
            HtmlFragment::Implies(def),
        ];
    }
    let delta = def.without_implied(context.implied);
    let mut fragments: Vec<HtmlFragment> = delta
        .css_declarations()
        .into_iter()
        .map(HtmlFragment::Declaration)
        .collect();
    fragments.push(HtmlFragment::Implies(def));
    fragments
}

fn map_family_class(value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
    let delta = font_delta(attr::FONT_FAMILY, value, context);
    let Some(families) = &delta.families else {
        return Vec::new();
    };
    let classes = families
        .iter()
        .map(|family| HtmlFragment::Class(family_class(family)))
        .collect::<Vec<_>>();
    classes
        .into_iter()
        .chain(iter::once(HtmlFragment::Implies(delta)))
        .collect()
}

/// Class name for a font family, e.g. `font-family-fira_code`.
pub(crate) fn family_class(family: &FontFamily) -> String {
    let slug: String = family
        .to_string()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("font-family-{slug}")
}

fn map_heading(value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
    let Some(level) = value.as_number() else {
        return Vec::new();
    };
    let level = (level.round() as i64).clamp(1, 6) as usize;
    vec![
        HtmlFragment::Tag(HtmlTag::element(
            &format!("h{level}"),
            TagFormatting::BreakAfterClose,
        )),
        HtmlFragment::Implies(context.heading_fonts[level - 1].clone()),
    ]
}

type CustomMapperFn = dyn Fn(&AttrValue, &MappingContext<'_>) -> Vec<HtmlFragment> + Send + Sync;

/// A mapper from an attribute value to HTML fragments.
#[derive(Clone)]
pub enum HtmlMapper {
    Standard(StandardHtmlMapping),
    Custom(Arc<CustomMapperFn>),
}

impl HtmlMapper {
    pub fn custom<F>(mapper: F) -> Self
    where
        F: Fn(&AttrValue, &MappingContext<'_>) -> Vec<HtmlFragment> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(mapper))
    }

    pub fn map(&self, value: &AttrValue, context: &MappingContext<'_>) -> Vec<HtmlFragment> {
        match self {
            Self::Standard(mapping) => mapping.map(value, context),
            Self::Custom(mapper) => mapper(value, context),
        }
    }
}

impl From<StandardHtmlMapping> for HtmlMapper {
    fn from(mapping: StandardHtmlMapping) -> Self {
        Self::Standard(mapping)
    }
}

impl fmt::Debug for HtmlMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard(mapping) => f.debug_tuple("Standard").field(mapping).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
