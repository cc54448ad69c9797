//! HTML tags with line-break hints.

use std::sync::{Arc, OnceLock};

use crate::tag_based::MarkupTag;

/// Where line breaks go around a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TagFormatting {
    /// No line breaks.
    #[default]
    Inline,
    /// A line break after the closing tag, as for headings.
    BreakAfterClose,
    /// Line breaks after both the opening and the closing tag.
    Block,
}

/// The markup opened and closed around a styled range.
#[derive(Debug, Clone, Default)]
pub enum HtmlTag {
    /// Nothing is written.
    #[default]
    Empty,
    Simple {
        open: String,
        close: String,
        formatting: TagFormatting,
    },
    /// Several tags nested in order.
    Compound(Arc<CompoundHtmlTag>),
}

impl HtmlTag {
    /// A tag pair such as `<b>`/`</b>`.
    pub fn simple(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self::Simple {
            open: open.into(),
            close: close.into(),
            formatting: TagFormatting::Inline,
        }
    }

    /// An element `<name>`/`</name>` with the given formatting.
    pub fn element(name: &str, formatting: TagFormatting) -> Self {
        Self::Simple {
            open: format!("<{name}>"),
            close: format!("</{name}>"),
            formatting,
        }
    }

    /// Combine tags, outermost first. Empty tags are dropped.
    pub fn compound(tags: Vec<HtmlTag>) -> Self {
        let mut tags: Vec<HtmlTag> = tags.into_iter().filter(|tag| !tag.is_empty()).collect();
        match tags.len() {
            0 => Self::Empty,
            1 => tags.pop().unwrap_or_default(),
            _ => Self::Compound(Arc::new(CompoundHtmlTag::new(tags))),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The complete opening markup.
    pub fn open(&self) -> String {
        let mut out = String::new();
        self.write_open(&mut out);
        out
    }

    /// The complete closing markup.
    pub fn close(&self) -> String {
        let mut out = String::new();
        self.write_close(&mut out);
        out
    }
}

impl MarkupTag for HtmlTag {
    fn write_open(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Simple {
                open, formatting, ..
            } => {
                out.push_str(open);
                if *formatting == TagFormatting::Block {
                    out.push('\n');
                }
            }
            Self::Compound(compound) => out.push_str(compound.open()),
        }
    }

    fn write_close(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Simple {
                close, formatting, ..
            } => {
                out.push_str(close);
                if *formatting != TagFormatting::Inline {
                    out.push('\n');
                }
            }
            Self::Compound(compound) => out.push_str(compound.close()),
        }
    }
}

/// A sequence of nested tags whose markup is computed once on first use.
#[derive(Debug)]
pub struct CompoundHtmlTag {
    tags: Vec<HtmlTag>,
    open: OnceLock<String>,
    close: OnceLock<String>,
}

impl CompoundHtmlTag {
    pub fn new(tags: Vec<HtmlTag>) -> Self {
        Self {
            tags,
            open: OnceLock::new(),
            close: OnceLock::new(),
        }
    }

    pub fn tags(&self) -> &[HtmlTag] {
        &self.tags
    }

    /// Opening markup of every tag, outermost first.
    pub fn open(&self) -> &str {
        self.open.get_or_init(|| {
            let mut out = String::new();
            for tag in &self.tags {
                tag.write_open(&mut out);
            }
            out
        })
    }

    /// Closing markup of every tag, innermost first.
    pub fn close(&self) -> &str {
        self.close.get_or_init(|| {
            let mut out = String::new();
            for tag in self.tags.iter().rev() {
                tag.write_close(&mut out);
            }
            out
        })
    }
}

static_assertions::assert_impl_all!(HtmlTag: Send, Sync);
