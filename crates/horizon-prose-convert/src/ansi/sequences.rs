//! Constant SGR escape sequences.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Text attribute sequences.
pub mod attr {
    pub const BOLD: &str = "\x1b[1m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const UNDERLINE: &str = "\x1b[4m";
    pub const STRIKETHROUGH: &str = "\x1b[9m";

    /// Reset bold and dim.
    pub const RESET_INTENSITY: &str = "\x1b[22m";
    pub const RESET_ITALIC: &str = "\x1b[23m";
    pub const RESET_UNDERLINE: &str = "\x1b[24m";
    pub const RESET_STRIKETHROUGH: &str = "\x1b[29m";
}

/// Color sequences.
pub mod color {
    use horizon_prose_text::Color;

    /// Default foreground color.
    pub const FG_DEFAULT: &str = "\x1b[39m";
    /// Default background color.
    pub const BG_DEFAULT: &str = "\x1b[49m";

    /// 24-bit foreground color.
    #[must_use]
    pub fn fg(color: Color) -> String {
        color.ansi_fg()
    }

    /// 24-bit background color.
    #[must_use]
    pub fn bg(color: Color) -> String {
        color.ansi_bg()
    }
}

/// Sequence switching an attribute on or off.
#[must_use]
pub const fn toggle(on: bool, on_sequence: &'static str, off_sequence: &'static str) -> &'static str {
    if on { on_sequence } else { off_sequence }
}
