//! Converters emitting paired open/close markup.
//!
//! Each run's attributes are resolved into their list of styles, outermost
//! first. Styles shared with the previous run stay open; the rest of the
//! previous run's styles are closed innermost first and the new ones are
//! opened outermost first. Tags are therefore always closed in reverse
//! order of opening and the output nests correctly.

use horizon_prose_text::{RichText, Style, TextAttributes};

use crate::protocol::{RunTransitionSink, walk_runs};

/// Markup written around a styled range.
pub trait MarkupTag {
    fn write_open(&self, out: &mut String);
    fn write_close(&self, out: &mut String);
}

/// A converter that maps styles to nested tags.
///
/// `Context` is threaded from enclosing to enclosed styles. A converter uses
/// it to know what the surrounding markup already implies.
pub trait TagBasedConverter {
    type Tag: MarkupTag;
    type Context: Clone + Default;

    /// The tag for `style` opened within `context`, and the context for
    /// styles nested inside it.
    fn open_style(&self, style: &Style, context: &Self::Context) -> (Self::Tag, Self::Context);

    /// Write run text, escaped for the target format.
    fn escape_text(&self, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn prologue(&self, _out: &mut String) {}

    fn epilogue(&self, _out: &mut String) {}

    /// Drive a conversion with a fresh tag stack.
    fn convert_tags(&self, text: &RichText) -> String {
        let mut sink = TagSink {
            converter: self,
            open: Vec::new(),
            out: String::new(),
        };
        self.prologue(&mut sink.out);
        walk_runs(text, &mut sink);
        self.epilogue(&mut sink.out);
        sink.out
    }
}

struct OpenStyle<T, C> {
    style: Style,
    tag: T,
    context: C,
}

struct TagSink<'c, C: TagBasedConverter + ?Sized> {
    converter: &'c C,
    open: Vec<OpenStyle<C::Tag, C::Context>>,
    out: String,
}

impl<C: TagBasedConverter + ?Sized> RunTransitionSink for TagSink<'_, C> {
    fn on_run_transition(&mut self, _previous: &TextAttributes, next: &TextAttributes, text: &str) {
        let styles = next.resolved_styles();
        let common = self
            .open
            .iter()
            .zip(&styles)
            .take_while(|(open, style)| open.style == **style)
            .count();

        while self.open.len() > common {
            if let Some(closed) = self.open.pop() {
                closed.tag.write_close(&mut self.out);
            }
        }

        for style in &styles[common..] {
            let context = self
                .open
                .last()
                .map(|open| open.context.clone())
                .unwrap_or_default();
            let (tag, inner) = self.converter.open_style(style, &context);
            tag.write_open(&mut self.out);
            self.open.push(OpenStyle {
                style: style.clone(),
                tag,
                context: inner,
            });
        }

        self.converter.escape_text(text, &mut self.out);
    }
}
