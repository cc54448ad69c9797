//! Fragment layout for Horizon Prose rich text.
//!
//! [`FragmentedText::generate`] turns a [`RichText`](horizon_prose_text::RichText)
//! into lines of positioned [`Fragment`]s, with greedy line wrapping,
//! horizontal alignment (including justification), vertical alignment and
//! anchoring. Text extents come from a [`FontMetricsProvider`] supplied by
//! the caller, so the layout works the same for a GPU text renderer, a
//! terminal grid or a test.

pub mod align;
mod fragment;
mod fragmented;
pub mod metrics;
pub mod options;

pub use align::{HorizontalAlign, HorizontalAnchor, VerticalAlign, VerticalAnchor};
pub use fragment::{Fragment, FragmentLine};
pub use fragmented::FragmentedText;
pub use metrics::{
    CachingMetrics, CellMetrics, DEFAULT_CACHE_CAPACITY, FixedAdvanceMetrics, FontMetricsProvider,
    MetricsCacheStats, TextMetrics,
};
pub use options::{LayoutOptions, NO_WRAP};
