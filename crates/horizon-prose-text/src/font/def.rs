use super::{Font, FontFamily, FontSize, FontStyle, FontWeight};
use crate::{AttrValue, Color, attr};

/// A partial font description.
///
/// Every property is optional; unset properties are taken from the font the
/// definition is applied to. Styles and text attributes resolve to a
/// `FontDef`, which renderers combine with their base font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontDef {
    pub families: Option<Vec<FontFamily>>,
    pub size: Option<FontSize>,
    pub color: Option<Color>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
}

impl FontDef {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// A definition that pins every property to the value in `font`.
    pub fn from_font(font: &Font) -> Self {
        Self {
            families: Some(font.families().to_vec()),
            size: Some(FontSize::Points(font.size())),
            color: Some(font.color()),
            bold: Some(font.is_bold()),
            italic: Some(font.is_italic()),
            underline: Some(font.is_underline()),
            strikethrough: Some(font.is_strikethrough()),
        }
    }

    /// Resolve the font-related entries of an attribute set.
    ///
    /// A complete `font` value is applied first; the individual keys
    /// (`font-family`, `font-size`, `font-weight`, `font-style`, `color`,
    /// and the text decoration flags) then override it. Attributes are
    /// flat, so an outer style's `font-size` still overrides a `font` value
    /// set by an inner style. Values of an unexpected type are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a AttrValue)>,
        I::IntoIter: Clone,
    {
        let entries = attributes.into_iter();

        let mut def = entries
            .clone()
            .find(|(key, _)| *key == attr::FONT)
            .and_then(|(_, value)| value.as_font())
            .map(Self::from_font)
            .unwrap_or_default();

        for (key, value) in entries {
            match key {
                attr::FONT_FAMILY => {
                    let families = match value {
                        AttrValue::Text(text) => FontFamily::parse_list(text),
                        AttrValue::TextList(list) => {
                            list.iter().filter_map(|name| FontFamily::parse(name)).collect()
                        }
                        _ => Vec::new(),
                    };
                    if !families.is_empty() {
                        def.families = Some(families);
                    }
                }
                attr::FONT_SIZE => {
                    let size = match value {
                        AttrValue::Number(points) => Some(FontSize::Points(*points as f32)),
                        AttrValue::Text(text) => FontSize::parse(text),
                        _ => None,
                    };
                    if size.is_some() {
                        def.size = size;
                    }
                }
                attr::FONT_WEIGHT => {
                    let bold = match value {
                        AttrValue::Text(text) => FontWeight::parse(text).map(FontWeight::is_bold),
                        AttrValue::Number(weight) => Some(*weight >= 600.0),
                        AttrValue::Bool(bold) => Some(*bold),
                        _ => None,
                    };
                    if bold.is_some() {
                        def.bold = bold;
                    }
                }
                attr::FONT_STYLE => {
                    let italic = match value {
                        AttrValue::Text(text) => FontStyle::parse(text).map(FontStyle::is_italic),
                        AttrValue::Bool(italic) => Some(*italic),
                        _ => None,
                    };
                    if italic.is_some() {
                        def.italic = italic;
                    }
                }
                attr::COLOR => {
                    let color = match value {
                        AttrValue::Color(color) => Some(*color),
                        AttrValue::Text(text) => Color::parse(text),
                        _ => None,
                    };
                    if color.is_some() {
                        def.color = color;
                    }
                }
                attr::UNDERLINE => {
                    if let Some(flag) = value.as_bool() {
                        def.underline = Some(flag);
                    }
                }
                attr::LINE_THROUGH => {
                    if let Some(flag) = value.as_bool() {
                        def.strikethrough = Some(flag);
                    }
                }
                _ => {}
            }
        }

        def
    }

    pub fn family(mut self, family: FontFamily) -> Self {
        self.families = Some(vec![family]);
        self
    }

    pub fn families(mut self, families: Vec<FontFamily>) -> Self {
        self.families = Some(families);
        self
    }

    pub fn size(mut self, size: FontSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    pub fn strikethrough(mut self, strikethrough: bool) -> Self {
        self.strikethrough = Some(strikethrough);
        self
    }

    /// Check whether no property is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Combine two definitions; properties set in `overlay` win.
    pub fn merge(&self, overlay: &FontDef) -> FontDef {
        FontDef {
            families: overlay.families.clone().or_else(|| self.families.clone()),
            size: overlay.size.or(self.size),
            color: overlay.color.or(self.color),
            bold: overlay.bold.or(self.bold),
            italic: overlay.italic.or(self.italic),
            underline: overlay.underline.or(self.underline),
            strikethrough: overlay.strikethrough.or(self.strikethrough),
        }
    }

    /// Derive a font from `base` with the properties of this definition.
    ///
    /// Relative sizes are resolved against the size of `base`.
    pub fn apply(&self, base: &Font) -> Font {
        let mut font = base.clone();
        if let Some(families) = &self.families {
            font = font.with_families(families.clone());
        }
        if let Some(size) = self.size {
            font = font.with_size(size.resolve(base.size()));
        }
        if let Some(color) = self.color {
            font = font.with_color(color);
        }
        if let Some(bold) = self.bold {
            font = font.with_weight(if bold { FontWeight::BOLD } else { FontWeight::NORMAL });
        }
        if let Some(italic) = self.italic {
            font = font.with_style(if italic { FontStyle::Italic } else { FontStyle::Normal });
        }
        if let Some(underline) = self.underline {
            font = font.with_underline(underline);
        }
        if let Some(strikethrough) = self.strikethrough {
            font = font.with_strikethrough(strikethrough);
        }
        font
    }

    /// Remove properties whose value is already implied by `implied`.
    pub fn without_implied(&self, implied: &FontDef) -> FontDef {
        fn keep<T: PartialEq + Clone>(own: &Option<T>, implied: &Option<T>) -> Option<T> {
            match (own, implied) {
                (Some(a), Some(b)) if a == b => None,
                _ => own.clone(),
            }
        }
        FontDef {
            families: keep(&self.families, &implied.families),
            size: keep(&self.size, &implied.size),
            color: keep(&self.color, &implied.color),
            bold: keep(&self.bold, &implied.bold),
            italic: keep(&self.italic, &implied.italic),
            underline: keep(&self.underline, &implied.underline),
            strikethrough: keep(&self.strikethrough, &implied.strikethrough),
        }
    }

    /// CSS declarations for the set properties, e.g. `font-weight: bold`.
    pub fn css_declarations(&self) -> Vec<String> {
        let mut declarations = Vec::new();
        if let Some(families) = &self.families {
            let list: Vec<String> = families.iter().map(FontFamily::to_css).collect();
            declarations.push(format!("font-family: {}", list.join(", ")));
        }
        if let Some(size) = self.size {
            declarations.push(format!("font-size: {}", size.to_css()));
        }
        if let Some(color) = self.color {
            declarations.push(format!("color: {}", color.to_css_hex()));
        }
        if let Some(bold) = self.bold {
            declarations.push(format!("font-weight: {}", if bold { "bold" } else { "normal" }));
        }
        if let Some(italic) = self.italic {
            declarations.push(format!("font-style: {}", if italic { "italic" } else { "normal" }));
        }
        if self.underline.is_some() || self.strikethrough.is_some() {
            let mut lines = Vec::new();
            if self.underline == Some(true) {
                lines.push("underline");
            }
            if self.strikethrough == Some(true) {
                lines.push("line-through");
            }
            if lines.is_empty() {
                lines.push("none");
            }
            declarations.push(format!("text-decoration: {}", lines.join(" ")));
        }
        declarations
    }
}
