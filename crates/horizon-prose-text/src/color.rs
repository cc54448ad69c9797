//! RGBA color value used as a text attribute.
//!
//! The rich text model never interprets colors beyond two serializations:
//! CSS hex notation for HTML output and 24-bit SGR escape sequences for
//! terminal output.
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::Color;
//!
//! let accent = Color::parse("#1e90ff").unwrap();
//! assert_eq!(accent.to_css_hex(), "#1e90ff");
//! assert_eq!(accent.ansi_fg(), "\x1b[38;2;30;144;255m");
//!
//! let named = Color::parse("orange").unwrap();
//! assert_eq!(named, Color::rgb(255, 165, 0));
//! ```

use std::fmt;

/// An 8-bit per channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a color from RGBA components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color from a 32-bit RGBA value (0xRRGGBBAA).
    #[inline]
    pub const fn from_u32(rgba: u32) -> Self {
        Self::new(
            ((rgba >> 24) & 0xFF) as u8,
            ((rgba >> 16) & 0xFF) as u8,
            ((rgba >> 8) & 0xFF) as u8,
            (rgba & 0xFF) as u8,
        )
    }

    /// Parse a hex color string.
    ///
    /// Supports `#RGB`, `#RGBA`, `#RRGGBB` and `#RRGGBBAA`; the leading `#`
    /// is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Parse a CSS color value.
    ///
    /// Supports:
    /// - Hex colors: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
    /// - Functions: `rgb(255, 0, 0)`, `rgba(255, 0, 0, 128)`, `rgba(255, 0, 0, 0.5)`
    /// - Common CSS color names
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();

        if value.starts_with('#') {
            return Self::from_hex(value);
        }

        if value.starts_with("rgb") {
            return parse_rgb_function(value);
        }

        parse_named_color(value)
    }

    /// Check whether the color is fully opaque.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Return a copy with a different alpha value.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// CSS hex notation: `#rrggbb`, or `#rrggbbaa` for translucent colors.
    pub fn to_css_hex(self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// 24-bit SGR sequence selecting this color as foreground.
    pub fn ansi_fg(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// 24-bit SGR sequence selecting this color as background.
    pub fn ansi_bg(self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }

    // Common colors
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 128, 0);
    pub const LIME: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const CYAN: Self = Self::rgb(0, 255, 255);
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);
    pub const DARK_GRAY: Self = Self::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Self = Self::rgb(192, 192, 192);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css_hex())
    }
}

fn parse_rgb_function(value: &str) -> Option<Color> {
    let start = value.find('(')?;
    let end = value.rfind(')')?;
    let parts: Vec<&str> = value.get(start + 1..end)?.split(',').map(str::trim).collect();

    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?)),
        [r, g, b, a] => {
            // Alpha can be 0-255 or 0.0-1.0
            let a = if a.contains('.') {
                let a: f32 = a.parse().ok()?;
                (a.clamp(0.0, 1.0) * 255.0).round() as u8
            } else {
                a.parse().ok()?
            };
            Some(Color::new(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?, a))
        }
        _ => None,
    }
}

fn parse_named_color(name: &str) -> Option<Color> {
    let rgb = match name.to_ascii_lowercase().as_str() {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "lime" => (0, 255, 0),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "teal" => (0, 128, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "coral" => (255, 127, 80),
        "crimson" => (220, 20, 60),
        "darkblue" => (0, 0, 139),
        "darkgreen" => (0, 100, 0),
        "darkred" => (139, 0, 0),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "transparent" => return Some(Color::TRANSPARENT),
        _ => return None,
    };
    Some(Color::rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::LIME));
        assert_eq!(Color::from_hex("#f00"), Some(Color::RED));
        assert_eq!(Color::from_hex("#0000ff80"), Some(Color::new(0, 0, 255, 128)));
        assert_eq!(Color::from_hex("#f008"), Some(Color::new(255, 0, 0, 136)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }

    #[test]
    fn css_parsing() {
        assert_eq!(Color::parse("rgb(255, 128, 0)"), Some(Color::rgb(255, 128, 0)));
        assert_eq!(
            Color::parse("rgba(255, 0, 0, 128)"),
            Some(Color::new(255, 0, 0, 128))
        );
        assert_eq!(
            Color::parse("rgba(0, 0, 0, 0.5)"),
            Some(Color::new(0, 0, 0, 128))
        );
        assert_eq!(Color::parse("Navy"), Some(Color::rgb(0, 0, 128)));
        assert_eq!(Color::parse("transparent"), Some(Color::TRANSPARENT));
        assert_eq!(Color::parse("no-such-color"), None);
    }

    #[test]
    fn serializations() {
        let color = Color::rgb(30, 144, 255);
        assert_eq!(color.to_css_hex(), "#1e90ff");
        assert_eq!(color.with_alpha(0x80).to_css_hex(), "#1e90ff80");
        assert_eq!(color.ansi_fg(), "\x1b[38;2;30;144;255m");
        assert_eq!(color.ansi_bg(), "\x1b[48;2;30;144;255m");
        assert_eq!(color.to_string(), "#1e90ff");
    }

    #[test]
    fn from_u32_unpacks_channels() {
        assert_eq!(Color::from_u32(0x11223344), Color::new(0x11, 0x22, 0x33, 0x44));
    }
}
