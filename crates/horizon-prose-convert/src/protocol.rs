//! The run-transition protocol shared by all converters.
//!
//! A converter sees a rich text as a sequence of transitions: for each run,
//! the attributes before it, the attributes of the run and the run's text.
//! A final transition to the empty attribute set with empty text lets the
//! converter close whatever is still open.

use horizon_prose_text::{RichText, TextAttributes};

/// Receives run transitions from [`walk_runs`].
pub trait RunTransitionSink {
    /// Called once per run, then once more with `next` empty and `text` empty.
    fn on_run_transition(&mut self, previous: &TextAttributes, next: &TextAttributes, text: &str);
}

/// Feed every run of `text` to `sink`, followed by the closing transition.
pub fn walk_runs<S: RunTransitionSink + ?Sized>(text: &RichText, sink: &mut S) {
    let empty = TextAttributes::empty();
    let mut previous = &empty;
    for run in text.runs() {
        sink.on_run_transition(previous, run.attributes(), run.as_str());
        previous = run.attributes();
    }
    sink.on_run_transition(previous, &empty, "");
}

/// Converts rich text to a target representation.
///
/// Implementations are immutable once configured: every call starts from a
/// fresh working state, so converting the same text twice yields identical
/// output.
pub trait Converter {
    fn convert(&self, text: &RichText) -> String;

    /// Convert each text and concatenate the results.
    fn convert_all<'a, I>(&self, texts: I) -> String
    where
        I: IntoIterator<Item = &'a RichText>,
        Self: Sized,
    {
        texts.into_iter().map(|text| self.convert(text)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_prose_text::Style;

    #[derive(Default)]
    struct Recorder {
        transitions: Vec<(usize, usize, String)>,
    }

    impl RunTransitionSink for Recorder {
        fn on_run_transition(&mut self, previous: &TextAttributes, next: &TextAttributes, text: &str) {
            self.transitions
                .push((previous.len(), next.len(), text.to_string()));
        }
    }

    #[test]
    fn walk_ends_with_closing_transition() {
        let text = RichText::value_of("a") + RichText::styled("b", &Style::bold());
        let mut recorder = Recorder::default();
        walk_runs(&text, &mut recorder);

        assert_eq!(
            recorder.transitions,
            vec![
                (0, 0, "a".to_string()),
                (0, 2, "b".to_string()),
                (2, 0, String::new()),
            ]
        );
    }

    #[test]
    fn empty_text_still_closes() {
        let mut recorder = Recorder::default();
        walk_runs(&RichText::empty(), &mut recorder);
        assert_eq!(recorder.transitions, vec![(0, 0, String::new())]);
    }
}
