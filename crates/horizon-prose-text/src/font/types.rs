//! Font-related enumerations and value types.

use std::fmt;

/// Font weight, typically ranging from 100 (thin) to 900 (black).
///
/// Common weight constants are provided for convenience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Thin weight (100).
    pub const THIN: Self = Self(100);
    /// Light weight (300).
    pub const LIGHT: Self = Self(300);
    /// Normal/regular weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Semi-bold weight (600).
    pub const SEMI_BOLD: Self = Self(600);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);
    /// Black/heavy weight (900).
    pub const BLACK: Self = Self(900);

    /// Create a font weight from a numeric value (100-900).
    pub fn new(weight: u16) -> Self {
        Self(weight.clamp(100, 900))
    }

    /// Get the numeric weight value.
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Weights from semi-bold upwards render as bold.
    pub const fn is_bold(self) -> bool {
        self.0 >= Self::SEMI_BOLD.0
    }

    /// Parse a CSS `font-weight` value (`normal`, `bold`, `lighter`, `bolder` or 100-900).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Self::NORMAL),
            "bold" | "bolder" => Some(Self::BOLD),
            "lighter" => Some(Self::LIGHT),
            other => other.parse::<u16>().ok().map(Self::new),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

/// Font style (normal, italic, or oblique).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Normal upright style.
    #[default]
    Normal,
    /// Italic style (designed italic glyphs).
    Italic,
    /// Oblique style (slanted normal glyphs).
    Oblique,
}

impl FontStyle {
    /// Both italic and oblique count as slanted.
    pub const fn is_italic(self) -> bool {
        matches!(self, FontStyle::Italic | FontStyle::Oblique)
    }

    /// Parse a CSS `font-style` value.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(FontStyle::Normal),
            "italic" => Some(FontStyle::Italic),
            "oblique" => Some(FontStyle::Oblique),
            _ => None,
        }
    }

    /// CSS keyword for this style.
    pub const fn css_name(self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
            FontStyle::Oblique => "oblique",
        }
    }
}

/// Font family specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A specific font family by name.
    Name(String),
    /// Generic serif family.
    Serif,
    /// Generic sans-serif family.
    SansSerif,
    /// Generic monospace family.
    Monospace,
    /// Generic cursive family.
    Cursive,
    /// Generic fantasy family.
    Fantasy,
}

impl FontFamily {
    /// Create a named font family.
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Parse a single family name, recognizing the CSS generic keywords.
    ///
    /// Surrounding quotes are stripped. Returns `None` for an empty name.
    pub fn parse(value: &str) -> Option<Self> {
        let name = value.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        if name.is_empty() {
            return None;
        }
        Some(match name.to_ascii_lowercase().as_str() {
            "serif" => FontFamily::Serif,
            "sans-serif" | "sansserif" | "sans" => FontFamily::SansSerif,
            "monospace" | "monospaced" | "mono" => FontFamily::Monospace,
            "cursive" => FontFamily::Cursive,
            "fantasy" => FontFamily::Fantasy,
            _ => FontFamily::Name(name.to_string()),
        })
    }

    /// Parse a comma-separated CSS family list.
    pub fn parse_list(value: &str) -> Vec<Self> {
        value.split(',').filter_map(Self::parse).collect()
    }

    /// Check whether this is one of the generic families.
    pub fn is_generic(&self) -> bool {
        !matches!(self, FontFamily::Name(_))
    }

    /// CSS form of the family; names containing spaces are quoted.
    pub fn to_css(&self) -> String {
        match self {
            FontFamily::Name(name) if name.contains(' ') => format!("'{}'", name),
            other => other.to_string(),
        }
    }
}

impl Default for FontFamily {
    fn default() -> Self {
        Self::SansSerif
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::Name(name) => write!(f, "{}", name),
            FontFamily::Serif => write!(f, "serif"),
            FontFamily::SansSerif => write!(f, "sans-serif"),
            FontFamily::Monospace => write!(f, "monospace"),
            FontFamily::Cursive => write!(f, "cursive"),
            FontFamily::Fantasy => write!(f, "fantasy"),
        }
    }
}
