//! Rich text model for Horizon Prose.
//!
//! This crate provides immutable, attributed text:
//!
//! - [`RichText`]: text split into [`Run`]s, each carrying [`TextAttributes`]
//! - [`RichTextBuilder`]: incremental construction with nested [`Style`]s
//! - [`RichTextMatcher`]: regular expression matching with formatted results
//! - [`Font`], [`FontDef`] and [`Color`]: the values attributes resolve to
//!
//! # Example
//!
//! ```
//! use horizon_prose_text::{RichTextBuilder, Style};
//!
//! let mut builder = RichTextBuilder::new();
//! builder.push_style(&Style::heading(1));
//! builder.append("Title");
//! builder.pop_style(&Style::heading(1));
//! builder.append("\nBody with ");
//! builder.push_style(&Style::italic());
//! builder.append("emphasis");
//! builder.pop_style(&Style::italic());
//!
//! let text = builder.to_rich_text();
//! assert_eq!(text.lines().len(), 2);
//! assert_eq!(text.run_count(), 3);
//! ```

pub mod attr;
mod attributes;
mod builder;
mod color;
pub mod error;
pub mod font;
pub mod logging;
mod matcher;
mod rich_text;
mod run;
mod style;
mod value;

pub use attributes::{AttributeChange, TextAttributes};
pub use builder::RichTextBuilder;
pub use color::Color;
pub use error::{Result, TextError};
pub use font::{Font, FontBuilder, FontDef, FontFamily, FontSize, FontStyle, FontWeight};
pub use matcher::{Replacement, RichTextMatcher};
pub use rich_text::RichText;
pub use run::Run;
pub use style::{Style, StyleBuilder};
pub use value::AttrValue;
