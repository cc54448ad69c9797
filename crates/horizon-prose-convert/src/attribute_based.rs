//! Converters driven by attribute differences.
//!
//! At every run boundary the attributes before and after are diffed. Changed
//! keys with a registered [`AttributeMapper`] emit that mapper's output.
//! Font-related keys are resolved into a [`Font`] on both sides and handed to
//! [`AttributeBasedConverter::apply_font_change`] in one batch. Mappers
//! registered for a font key run after that batch.

use std::fmt;
use std::sync::Arc;

use horizon_prose_text::{AttrValue, Font, RichText, TextAttributes, attr};

use crate::protocol::{RunTransitionSink, walk_runs};

type MapperFn = dyn Fn(Option<&AttrValue>, Option<&AttrValue>) -> String + Send + Sync;

/// Maps a change of one attribute (`before` → `after`) to output.
#[derive(Clone)]
pub struct AttributeMapper(Arc<MapperFn>);

impl AttributeMapper {
    pub fn new<F>(mapper: F) -> Self
    where
        F: Fn(Option<&AttrValue>, Option<&AttrValue>) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(mapper))
    }

    pub fn apply(&self, before: Option<&AttrValue>, after: Option<&AttrValue>) -> String {
        (self.0)(before, after)
    }
}

impl fmt::Debug for AttributeMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AttributeMapper(..)")
    }
}

/// Ordered registry of attribute mappers.
#[derive(Debug, Clone, Default)]
pub struct AttributeMappings {
    entries: Vec<(String, Vec<AttributeMapper>)>,
}

impl AttributeMappings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `mapper` for `key`. Mappers registered for the same key run in
    /// registration order and their outputs are concatenated.
    pub fn map(&mut self, key: &str, mapper: AttributeMapper) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, mappers)) => mappers.push(mapper),
            None => self.entries.push((key.to_string(), vec![mapper])),
        }
    }

    /// Replace all mappers for `key` with `mapper`.
    pub fn replace_mapping(&mut self, key: &str, mapper: AttributeMapper) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, mappers)) => *mappers = vec![mapper],
            None => self.entries.push((key.to_string(), vec![mapper])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[AttributeMapper]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, mappers)| mappers.as_slice())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// A converter that reacts to attribute changes between runs.
pub trait AttributeBasedConverter {
    fn mappings(&self) -> &AttributeMappings;

    /// Font that unformatted text is rendered in.
    fn base_font(&self) -> &Font;

    /// Emit output for a change of the resolved font.
    fn apply_font_change(&self, before: &Font, after: &Font, out: &mut String);

    /// Output written before the first run.
    fn prologue(&self, _out: &mut String) {}

    /// Write run text to the output.
    fn write_text(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    /// Drive a conversion with a fresh working state.
    fn convert_runs(&self, text: &RichText) -> String {
        let mut sink = AttributeSink {
            converter: self,
            out: String::new(),
        };
        self.prologue(&mut sink.out);
        walk_runs(text, &mut sink);
        sink.out
    }
}

struct AttributeSink<'c, C: ?Sized> {
    converter: &'c C,
    out: String,
}

impl<C: AttributeBasedConverter + ?Sized> RunTransitionSink for AttributeSink<'_, C> {
    fn on_run_transition(&mut self, previous: &TextAttributes, next: &TextAttributes, text: &str) {
        let converter = self.converter;
        let mut font_changed = false;
        let mut font_mapped = Vec::new();
        for change in previous.diff(next) {
            let mappers = converter.mappings().get(change.key);
            if attr::is_font_key(change.key) {
                font_changed = true;
                if let Some(mappers) = mappers {
                    font_mapped.push((change, mappers));
                }
                continue;
            }
            for mapper in mappers.unwrap_or_default() {
                self.out.push_str(&mapper.apply(change.before, change.after));
            }
        }

        if font_changed {
            let base = converter.base_font();
            let before = previous.font(base);
            let after = next.font(base);
            if before != after {
                converter.apply_font_change(&before, &after, &mut self.out);
            }
        }
        for (change, mappers) in font_mapped {
            for mapper in mappers {
                self.out.push_str(&mapper.apply(change.before, change.after));
            }
        }

        converter.write_text(text, &mut self.out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_prose_text::{Color, Style};

    struct Brackets {
        mappings: AttributeMappings,
        base: Font,
    }

    impl AttributeBasedConverter for Brackets {
        fn mappings(&self) -> &AttributeMappings {
            &self.mappings
        }

        fn base_font(&self) -> &Font {
            &self.base
        }

        fn apply_font_change(&self, before: &Font, after: &Font, out: &mut String) {
            if before.is_bold() != after.is_bold() {
                out.push(if after.is_bold() { '[' } else { ']' });
            }
        }
    }

    fn brackets() -> Brackets {
        let mut mappings = AttributeMappings::new();
        mappings.map(
            attr::BACKGROUND_COLOR,
            AttributeMapper::new(|_, after| if after.is_some() { "<".into() } else { ">".into() }),
        );
        Brackets {
            mappings,
            base: Font::default(),
        }
    }

    #[test]
    fn font_changes_are_batched() {
        let text = RichText::value_of("a")
            + RichText::styled("b", &Style::builder("loud").bold().color(Color::RED).build())
            + RichText::value_of("c");
        assert_eq!(brackets().convert_runs(&text), "a[b]c");
    }

    #[test]
    fn mapped_keys_emit_on_change() {
        let highlight = Style::builder("hl").background_color(Color::YELLOW).build();
        let text = RichText::value_of("a") + RichText::styled("b", &highlight);
        assert_eq!(brackets().convert_runs(&text), "a<b>");
    }

    #[test]
    fn unmapped_keys_are_ignored() {
        let text = RichText::value_of("a") + RichText::styled("b", &Style::heading(2));
        assert_eq!(brackets().convert_runs(&text), "ab");
    }

    #[test]
    fn map_composes_and_replace_overwrites() {
        let mut mappings = AttributeMappings::new();
        mappings.map("k", AttributeMapper::new(|_, _| "1".into()));
        mappings.map("k", AttributeMapper::new(|_, _| "2".into()));
        let outputs: Vec<String> = mappings
            .get("k")
            .unwrap_or_default()
            .iter()
            .map(|m| m.apply(None, None))
            .collect();
        assert_eq!(outputs, vec!["1", "2"]);

        mappings.replace_mapping("k", AttributeMapper::new(|_, _| "3".into()));
        assert_eq!(mappings.get("k").map(<[AttributeMapper]>::len), Some(1));
        assert!(!mappings.contains("other"));
    }

    #[test]
    fn font_key_mappers_follow_the_font_change() {
        let mut converter = brackets();
        converter.mappings.map(
            attr::FONT_WEIGHT,
            AttributeMapper::new(|_, after| if after.is_some() { "{".into() } else { "}".into() }),
        );
        let text = RichText::value_of("a") + RichText::styled("b", &Style::bold()) + RichText::value_of("c");
        assert_eq!(converter.convert_runs(&text), "a[{b]}c");
    }
}
