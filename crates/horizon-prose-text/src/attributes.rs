//! Immutable attribute maps attached to runs of text.

use crate::error::{Result, TextError};
use crate::{AttrValue, Color, Font, FontDef, Style, attr};

/// An immutable, insertion-ordered map from attribute keys to values.
///
/// Keys are unique. Equality ignores insertion order.
///
/// # Example
///
/// ```
/// use horizon_prose_text::{attr, AttrValue, Color, TextAttributes};
///
/// let plain = TextAttributes::empty();
/// let red = plain.with(attr::COLOR, Color::RED);
///
/// let changes = plain.diff(&red);
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].key, attr::COLOR);
/// assert_eq!(changes[0].before, None);
/// assert_eq!(changes[0].after, Some(&AttrValue::Color(Color::RED)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextAttributes {
    entries: Vec<(String, AttrValue)>,
}

/// One entry of an attribute diff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeChange<'a> {
    pub key: &'a str,
    /// Value in the earlier map, if present.
    pub before: Option<&'a AttrValue>,
    /// Value in the later map, if present.
    pub after: Option<&'a AttrValue>,
}

impl TextAttributes {
    /// The empty attribute map.
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a map from key/value pairs. A repeated key keeps its first
    /// position and its last value.
    pub fn of<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut attributes = Self::empty();
        for (key, value) in pairs {
            let key = key.into();
            attributes.set(&key, Some(value.into()));
        }
        attributes
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> + Clone + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of this map with `key` set to `value`.
    pub fn with(&self, key: &str, value: impl Into<AttrValue>) -> Self {
        let mut attributes = self.clone();
        attributes.set(key, Some(value.into()));
        attributes
    }

    /// Copy of this map without `key`.
    pub fn without(&self, key: &str) -> Self {
        let mut attributes = self.clone();
        attributes.set(key, None);
        attributes
    }

    /// Set or remove a key in place.
    pub(crate) fn set(&mut self, key: &str, value: Option<AttrValue>) {
        let position = self.entries.iter().position(|(k, _)| k == key);
        match (position, value) {
            (Some(index), Some(value)) => self.entries[index].1 = value,
            (Some(index), None) => {
                self.entries.remove(index);
            }
            (None, Some(value)) => self.entries.push((key.to_string(), value)),
            (None, None) => {}
        }
    }

    /// Every key whose value differs between `self` and `other`.
    ///
    /// Keys of `self` come first in insertion order, followed by keys that
    /// only `other` contains. Keys present on one side only are reported
    /// with `None` on the other.
    pub fn diff<'a>(&'a self, other: &'a TextAttributes) -> Vec<AttributeChange<'a>> {
        let mut changes = Vec::new();
        for (key, before) in self.iter() {
            let after = other.get(key);
            if after != Some(before) {
                changes.push(AttributeChange {
                    key,
                    before: Some(before),
                    after,
                });
            }
        }
        for (key, after) in other.iter() {
            if !self.contains_key(key) {
                changes.push(AttributeChange {
                    key,
                    before: None,
                    after: Some(after),
                });
            }
        }
        changes
    }

    /// The partial font described by the font-related keys.
    pub fn font_def(&self) -> FontDef {
        FontDef::from_attributes(self.iter())
    }

    /// The font obtained by applying [`font_def`](Self::font_def) to `base`.
    pub fn font(&self, base: &Font) -> Font {
        self.font_def().apply(base)
    }

    /// The styles applied to the text, outermost first.
    pub fn styles(&self) -> &[Style] {
        self.get(attr::STYLES)
            .and_then(AttrValue::as_styles)
            .unwrap_or_default()
    }

    /// The applied styles plus an anonymous innermost style holding the
    /// entries no listed style accounts for.
    ///
    /// An entry is accounted for when the innermost listed style defining
    /// its key defines the same value.
    pub fn resolved_styles(&self) -> Vec<Style> {
        let styles = self.styles();
        let mut loose = TextAttributes::empty();
        for (key, value) in self.iter() {
            if key == attr::STYLES {
                continue;
            }
            let defined = styles.iter().rev().find_map(|style| style.get(key));
            if defined != Some(value) {
                loose.entries.push((key.to_string(), value.clone()));
            }
        }

        let mut resolved = styles.to_vec();
        if !loose.is_empty() {
            resolved.push(Style::anonymous(loose));
        }
        resolved
    }

    /// Apply `style` innermost: its properties override existing ones and it
    /// is appended to the style list.
    pub fn with_style(&self, style: &Style) -> TextAttributes {
        let mut attributes = self.clone();
        for (key, value) in style.properties().iter() {
            attributes.set(key, Some(value.clone()));
        }
        let mut styles = self.styles().to_vec();
        styles.push(style.clone());
        attributes.set(attr::STYLES, Some(AttrValue::Styles(styles)));
        attributes
    }

    /// Apply `style` outermost: existing properties win and it is prepended
    /// to the style list.
    pub fn with_outer_style(&self, style: &Style) -> TextAttributes {
        let mut attributes = self.clone();
        for (key, value) in style.properties().iter() {
            if !attributes.contains_key(key) {
                attributes.set(key, Some(value.clone()));
            }
        }
        let mut styles = vec![style.clone()];
        styles.extend_from_slice(self.styles());
        attributes.set(attr::STYLES, Some(AttrValue::Styles(styles)));
        attributes
    }

    /// Nest `inner` inside this map: its entries override ours and its
    /// style list is appended to ours.
    pub fn layered(&self, inner: &TextAttributes) -> TextAttributes {
        if self.is_empty() {
            return inner.clone();
        }
        let mut attributes = self.clone();
        for (key, value) in inner.iter() {
            if key != attr::STYLES {
                attributes.set(key, Some(value.clone()));
            }
        }
        if !inner.styles().is_empty() {
            let mut styles = self.styles().to_vec();
            styles.extend_from_slice(inner.styles());
            attributes.set(attr::STYLES, Some(AttrValue::Styles(styles)));
        }
        attributes
    }

    /// Typed lookup; fails when the key holds a value of another type.
    pub fn get_color(&self, key: &str) -> Result<Option<Color>> {
        self.typed(key, "color", AttrValue::as_color)
    }

    pub fn get_text(&self, key: &str) -> Result<Option<&str>> {
        self.typed(key, "text", AttrValue::as_text)
    }

    pub fn get_number(&self, key: &str) -> Result<Option<f64>> {
        self.typed(key, "number", AttrValue::as_number)
    }

    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        self.typed(key, "bool", AttrValue::as_bool)
    }

    pub fn get_font(&self, key: &str) -> Result<Option<&Font>> {
        self.typed(key, "font", AttrValue::as_font)
    }

    fn typed<'a, T>(
        &'a self,
        key: &str,
        expected: &'static str,
        extract: impl FnOnce(&'a AttrValue) -> Option<T>,
    ) -> Result<Option<T>> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => match extract(value) {
                Some(typed) => Ok(Some(typed)),
                None => Err(TextError::wrong_type(key, expected, value.type_name())),
            },
        }
    }
}

impl PartialEq for TextAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for TextAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::of(iter)
    }
}

static_assertions::assert_impl_all!(TextAttributes: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_keeps_first_position_last_value() {
        let attrs = TextAttributes::of([
            ("a", AttrValue::from(1)),
            ("b", AttrValue::from(2)),
            ("a", AttrValue::from(3)),
        ]);
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(attrs.get("a"), Some(&AttrValue::Number(3.0)));
    }

    #[test]
    fn equality_ignores_order() {
        let a = TextAttributes::of([("x", true), ("y", false)]);
        let b = TextAttributes::of([("y", false), ("x", true)]);
        assert_eq!(a, b);
        assert_ne!(a, b.with("y", true));
        assert_ne!(a, b.without("y"));
    }

    #[test]
    fn diff_reports_every_changed_key() {
        let before = TextAttributes::of([
            ("kept", AttrValue::from(1)),
            ("changed", AttrValue::from("old")),
            ("removed", AttrValue::from(true)),
        ]);
        let after = TextAttributes::of([
            ("added", AttrValue::from(Color::RED)),
            ("changed", AttrValue::from("new")),
            ("kept", AttrValue::from(1)),
        ]);

        let changes = before.diff(&after);
        let keys: Vec<&str> = changes.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["changed", "removed", "added"]);

        assert_eq!(changes[0].before, Some(&AttrValue::from("old")));
        assert_eq!(changes[0].after, Some(&AttrValue::from("new")));
        assert_eq!(changes[1].after, None);
        assert_eq!(changes[2].before, None);

        assert!(before.diff(&before).is_empty());
    }

    #[test]
    fn typed_lookup_rejects_wrong_type() {
        let attrs = TextAttributes::of([(attr::COLOR, AttrValue::from("red"))]);
        assert!(matches!(
            attrs.get_color(attr::COLOR),
            Err(TextError::WrongAttributeType { expected: "color", found: "text", .. })
        ));
        assert_eq!(attrs.get_text(attr::COLOR).unwrap(), Some("red"));
        assert_eq!(attrs.get_bool("missing").unwrap(), None);
    }

    #[test]
    fn with_style_layers_innermost() {
        let attrs = TextAttributes::empty()
            .with_style(&Style::red())
            .with_style(&Style::blue());
        assert_eq!(attrs.get_color(attr::COLOR).unwrap(), Some(Color::BLUE));
        let names: Vec<&str> = attrs.styles().iter().map(Style::name).collect();
        assert_eq!(names, vec!["red", "blue"]);
    }

    #[test]
    fn with_outer_style_keeps_existing() {
        let attrs = TextAttributes::empty()
            .with_style(&Style::red())
            .with_outer_style(&Style::blue());
        assert_eq!(attrs.get_color(attr::COLOR).unwrap(), Some(Color::RED));
        let names: Vec<&str> = attrs.styles().iter().map(Style::name).collect();
        assert_eq!(names, vec!["blue", "red"]);
    }

    #[test]
    fn resolved_styles_collects_loose_entries() {
        let attrs = TextAttributes::empty()
            .with_style(&Style::bold())
            .with(attr::BACKGROUND_COLOR, Color::YELLOW);
        let resolved = attrs.resolved_styles();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0], Style::bold());
        assert_eq!(
            resolved[1].get(attr::BACKGROUND_COLOR),
            Some(&AttrValue::Color(Color::YELLOW))
        );
        assert!(resolved[1].name().is_empty());
    }

    #[test]
    fn layered_merges_style_lists() {
        let outer = TextAttributes::empty().with_style(&Style::bold());
        let inner = TextAttributes::empty().with_style(&Style::italic());
        let combined = outer.layered(&inner);
        assert_eq!(combined.styles(), &[Style::bold(), Style::italic()]);
        assert!(combined.font_def().bold.unwrap_or(false));
        assert!(combined.font_def().italic.unwrap_or(false));
    }
}
