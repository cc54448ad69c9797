//! Prelude module for Horizon Prose.
//!
//! ```ignore
//! use horizon_prose::prelude::*;
//! ```
//!
//! This provides access to:
//! - The text model (`RichText`, `RichTextBuilder`, `Style`, `TextAttributes`)
//! - Fonts and colors (`Font`, `FontDef`, `Color`)
//! - Converters (`HtmlConverter`, `AnsiConverter` and the `Converter` trait)
//! - Layout (`FragmentedText`, `LayoutOptions` and the metrics providers)

// ============================================================================
// Text Model
// ============================================================================

pub use horizon_prose_text::{
    AttrValue, Replacement, RichText, RichTextBuilder, RichTextMatcher, Run, Style, TextAttributes,
    TextError, attr,
};

// ============================================================================
// Fonts and Colors
// ============================================================================

pub use horizon_prose_text::{Color, Font, FontDef, FontFamily, FontSize, FontStyle, FontWeight};

// ============================================================================
// Conversion
// ============================================================================

pub use horizon_prose_convert::{AnsiConverter, Converter, HtmlConverter};

// ============================================================================
// Layout
// ============================================================================

pub use horizon_prose_layout::{
    CachingMetrics, CellMetrics, FixedAdvanceMetrics, FontMetricsProvider, Fragment,
    FragmentedText, HorizontalAlign, HorizontalAnchor, LayoutOptions, VerticalAlign,
    VerticalAnchor,
};
