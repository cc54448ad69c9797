//! Logging facilities for Horizon Prose.
//!
//! Horizon Prose uses the `tracing` crate for instrumentation. Nothing is
//! printed unless the application installs a subscriber:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Warnings are emitted for tolerated data problems (a style property with an
//! unexpected value type, an unsupported font-size unit). Conversion and
//! layout report progress at `debug`/`trace` level.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Style creation and validation.
    pub const STYLE: &str = "horizon_prose::style";
    /// Rich text model (builder, slicing, matching).
    pub const TEXT: &str = "horizon_prose::text";
    /// HTML and ANSI conversion.
    pub const CONVERT: &str = "horizon_prose::convert";
    /// Fragment layout.
    pub const LAYOUT: &str = "horizon_prose::layout";
}

/// A guard that keeps a tracing span entered until it is dropped.
///
/// Used around whole conversions and layout passes to measure their duration.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_prose::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
