//! Horizon Prose - rich text, markup conversion and fragment layout.
//!
//! This is the umbrella crate that re-exports all public APIs.
//!
//! # Example
//!
//! ```
//! use horizon_prose::prelude::*;
//!
//! let mut builder = RichTextBuilder::new();
//! builder.append("Hello ");
//! builder.push_style(&Style::bold());
//! builder.append("world");
//! builder.pop_style(&Style::bold());
//! builder.append("!");
//! let text = builder.to_rich_text();
//!
//! assert_eq!(HtmlConverter::new().convert(&text), "Hello <b>world</b>!");
//! assert_eq!(AnsiConverter::new().convert(&text), "Hello \x1b[1mworld\x1b[22m!");
//!
//! let layout = FragmentedText::generate(&text, &CellMetrics, &LayoutOptions::new());
//! assert_eq!(layout.actual_width(), 12.0);
//! ```

pub mod prelude;

pub use horizon_prose_text::*;

/// Conversion to HTML and ANSI.
pub mod convert {
    pub use horizon_prose_convert::*;
}

/// Line wrapping, alignment and positioned fragments.
pub mod layout {
    pub use horizon_prose_layout::*;
}
