//! Attribute values.

use std::fmt;

use crate::{Color, Font, Style};

/// A value stored under an attribute key.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A complete font.
    Font(Font),
    Color(Color),
    Text(String),
    Number(f64),
    Bool(bool),
    /// A list of strings, e.g. font families.
    TextList(Vec<String>),
    /// The styles applied to a run, outermost first.
    Styles(Vec<Style>),
}

impl AttrValue {
    /// Name of the value type, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Font(_) => "font",
            AttrValue::Color(_) => "color",
            AttrValue::Text(_) => "text",
            AttrValue::Number(_) => "number",
            AttrValue::Bool(_) => "bool",
            AttrValue::TextList(_) => "text list",
            AttrValue::Styles(_) => "styles",
        }
    }

    pub fn as_font(&self) -> Option<&Font> {
        match self {
            AttrValue::Font(font) => Some(font),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            AttrValue::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(number) => Some(*number),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            AttrValue::TextList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_styles(&self) -> Option<&[Style]> {
        match self {
            AttrValue::Styles(styles) => Some(styles),
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Font(font) => write!(f, "{}", font.css_class()),
            AttrValue::Color(color) => write!(f, "{}", color),
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Number(number) => write!(f, "{}", number),
            AttrValue::Bool(flag) => write!(f, "{}", flag),
            AttrValue::TextList(list) => f.write_str(&list.join(", ")),
            AttrValue::Styles(styles) => {
                let names: Vec<&str> = styles.iter().map(Style::name).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}

impl From<Font> for AttrValue {
    fn from(value: Font) -> Self {
        AttrValue::Font(value)
    }
}

impl From<Color> for AttrValue {
    fn from(value: Color) -> Self {
        AttrValue::Color(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Number(f64::from(value))
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(f64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(value: Vec<String>) -> Self {
        AttrValue::TextList(value)
    }
}

impl From<Vec<Style>> for AttrValue {
    fn from(value: Vec<Style>) -> Self {
        AttrValue::Styles(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors() {
        assert_eq!(AttrValue::from(Color::RED).as_color(), Some(Color::RED));
        assert_eq!(AttrValue::from("bold").as_text(), Some("bold"));
        assert_eq!(AttrValue::from(3).as_number(), Some(3.0));
        assert_eq!(AttrValue::from(true).as_bool(), Some(true));
        assert_eq!(AttrValue::from("bold").as_bool(), None);
        assert_eq!(AttrValue::from(1.5).as_color(), None);
    }

    #[test]
    fn display() {
        assert_eq!(AttrValue::from(Color::BLUE).to_string(), "#0000ff");
        assert_eq!(
            AttrValue::from(vec!["Arial".to_string(), "serif".to_string()]).to_string(),
            "Arial, serif"
        );
        assert_eq!(
            AttrValue::from(vec![Style::bold(), Style::italic()]).to_string(),
            "[bold, italic]"
        );
    }
}
