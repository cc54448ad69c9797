//! Conversion of Horizon Prose rich text to markup.
//!
//! Every converter walks the runs of a [`RichText`](horizon_prose_text::RichText)
//! and reacts to the attribute change at each run boundary. Two strategies
//! share that walk:
//!
//! - [`AttributeBasedConverter`]: emits output for each changed attribute and
//!   explicitly restores prior state, as terminal escape codes require
//!   ([`AnsiConverter`]).
//! - [`TagBasedConverter`]: maps styles to paired tags that are closed in
//!   reverse order of opening ([`HtmlConverter`]).
//!
//! Configured converters are immutable and may be shared between threads.

pub mod ansi;
mod attribute_based;
pub mod html;
mod protocol;
mod tag_based;

pub use ansi::{AnsiConverter, AnsiConverterBuilder};
pub use attribute_based::{AttributeBasedConverter, AttributeMapper, AttributeMappings};
pub use html::{
    HtmlConverter, HtmlConverterBuilder, HtmlFragment, HtmlMapper, HtmlTag, MappingContext,
    StandardHtmlMapping, TagFormatting,
};
pub use protocol::{Converter, RunTransitionSink, walk_runs};
pub use tag_based::{MarkupTag, TagBasedConverter};
