//! Well-known attribute keys.
//!
//! Attribute maps accept arbitrary string keys; the keys below are the ones
//! interpreted by font resolution and the converters.

use crate::AttrValue;

/// A complete [`Font`](crate::Font) value.
pub const FONT: &str = "font";
/// Family name or comma-separated family list (text or text list).
pub const FONT_FAMILY: &str = "font-family";
/// Size in points (number) or a CSS size such as `"120%"` (text).
pub const FONT_SIZE: &str = "font-size";
/// `"bold"`, `"normal"` or a numeric weight.
pub const FONT_WEIGHT: &str = "font-weight";
/// `"italic"`, `"oblique"` or `"normal"`.
pub const FONT_STYLE: &str = "font-style";
/// Foreground color.
pub const COLOR: &str = "color";
/// Background color.
pub const BACKGROUND_COLOR: &str = "background-color";
/// Underline flag.
pub const UNDERLINE: &str = "text-decoration-underline";
/// Strike-through flag.
pub const LINE_THROUGH: &str = "text-decoration-line-through";
/// Heading level 1-6.
pub const HEADING_LEVEL: &str = "heading-level";
/// Ordered list of the styles applied to a run.
pub const STYLES: &str = "__styles";

/// Keys that contribute to the resolved font.
pub const FONT_KEYS: [&str; 8] = [
    FONT,
    FONT_FAMILY,
    FONT_SIZE,
    FONT_WEIGHT,
    FONT_STYLE,
    COLOR,
    UNDERLINE,
    LINE_THROUGH,
];

/// Check whether `key` contributes to the resolved font.
pub fn is_font_key(key: &str) -> bool {
    FONT_KEYS.contains(&key)
}

/// Value types accepted for a well-known key, or `None` for unknown keys.
pub(crate) fn expected_types(key: &str) -> Option<&'static [&'static str]> {
    let types: &'static [&'static str] = match key {
        FONT => &["font"],
        FONT_FAMILY => &["text", "text list"],
        FONT_SIZE => &["number", "text"],
        FONT_WEIGHT => &["text", "number", "bool"],
        FONT_STYLE => &["text", "bool"],
        COLOR | BACKGROUND_COLOR => &["color"],
        UNDERLINE | LINE_THROUGH => &["bool"],
        HEADING_LEVEL => &["number"],
        STYLES => &["styles"],
        _ => return None,
    };
    Some(types)
}

/// Check whether `value` has a type accepted for `key`.
pub(crate) fn accepts(key: &str, value: &AttrValue) -> bool {
    expected_types(key).is_none_or(|types| types.contains(&value.type_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn font_keys() {
        assert!(is_font_key(COLOR));
        assert!(is_font_key(UNDERLINE));
        assert!(!is_font_key(BACKGROUND_COLOR));
        assert!(!is_font_key(STYLES));
        assert!(!is_font_key("link"));
    }

    #[test]
    fn value_type_validation() {
        assert!(accepts(COLOR, &AttrValue::Color(Color::RED)));
        assert!(!accepts(COLOR, &AttrValue::from("red")));
        assert!(accepts(FONT_SIZE, &AttrValue::from("12pt")));
        assert!(accepts(FONT_SIZE, &AttrValue::from(12.0)));
        assert!(!accepts(UNDERLINE, &AttrValue::from(1.0)));
        assert!(accepts("custom-key", &AttrValue::from(true)));
    }
}
