//! Font size values with CSS-style units.

use std::fmt;

use crate::logging::targets;

/// Conversion factor from CSS pixels to points.
const PT_PER_PX: f32 = 0.75;

/// A font size, either absolute or relative to the enclosing font.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FontSize {
    /// Absolute size in points.
    Points(f32),
    /// Multiple of the base font size (`1.5` for `1.5em` or `150%`).
    Scale(f32),
}

impl FontSize {
    /// Parse a CSS font-size value.
    ///
    /// Accepted forms are `12pt`, `16px`, `1.2em`, `1.2rem`, `120%` and a
    /// bare number (points). `rem` is resolved against the base font like
    /// `em`, since there is no separate root font.
    ///
    /// Viewport units (`vw`, `vh`, `vmin`, `vmax`) cannot be resolved
    /// without a viewport; they log a warning and are treated as a
    /// percentage of the base size.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();

        let (number, unit) = split_unit(&value);
        let number: f32 = number.parse().ok()?;
        if !number.is_finite() || number < 0.0 {
            return None;
        }

        match unit {
            "" | "pt" => Some(FontSize::Points(number)),
            "px" => Some(FontSize::Points(number * PT_PER_PX)),
            "em" | "rem" => Some(FontSize::Scale(number)),
            "%" => Some(FontSize::Scale(number / 100.0)),
            "vw" | "vh" | "vmin" | "vmax" => {
                tracing::warn!(
                    target: targets::STYLE,
                    value = %value,
                    "viewport-relative font size is unsupported, using percentage of base size"
                );
                Some(FontSize::Scale(number / 100.0))
            }
            _ => {
                tracing::warn!(target: targets::STYLE, value = %value, "unknown font-size unit");
                None
            }
        }
    }

    /// Resolve to an absolute size in points.
    pub fn resolve(self, base_size: f32) -> f32 {
        match self {
            FontSize::Points(points) => points,
            FontSize::Scale(scale) => base_size * scale,
        }
    }

    /// CSS representation (`12pt` or `150%`).
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Points(points) => write!(f, "{}pt", points),
            FontSize::Scale(scale) => write!(f, "{}%", (scale * 100.0).round()),
        }
    }
}

fn split_unit(value: &str) -> (&str, &str) {
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(value.len());
    (value[..split].trim(), value[split..].trim())
}
