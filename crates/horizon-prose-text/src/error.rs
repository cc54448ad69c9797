//! Error types for the rich text model.

/// Result type alias for rich text operations.
pub type Result<T> = std::result::Result<T, TextError>;

/// Errors that can occur while building, slicing or matching rich text.
///
/// Most of these indicate a caller bug. The panicking entry points
/// (`sub_sequence`, `pop`, `group`, ...) report them by panicking with the
/// error message; the `try_*` variants hand them back instead.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// An index lies beyond the end of the text.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A range is reversed or extends past the end of the text.
    #[error("invalid range {start}..{end} for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// An index splits a UTF-8 encoded character.
    #[error("index {index} is not on a char boundary")]
    NotCharBoundary { index: usize },

    /// A style was popped while a different style was innermost.
    #[error("cannot pop style '{found}': innermost open style is '{expected}'")]
    StyleMismatch { expected: String, found: String },

    /// A style was popped while no style was open.
    #[error("cannot pop style '{style}': no style is open")]
    UnbalancedPop { style: String },

    /// A typed accessor found a value of another type.
    #[error("attribute '{key}' holds a {found} value, expected {expected}")]
    WrongAttributeType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A regular expression failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Match data was requested before a successful `find`.
    #[error("no match available")]
    NoMatch,

    /// A capture group index exceeds the number of groups in the pattern.
    #[error("no group {group} in pattern")]
    NoSuchGroup { group: usize },
}

impl TextError {
    /// Create an out-of-bounds error.
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an invalid range error.
    pub fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }

    /// Create a char boundary error.
    pub fn not_char_boundary(index: usize) -> Self {
        Self::NotCharBoundary { index }
    }

    /// Create a wrong attribute type error.
    pub fn wrong_type(key: impl Into<String>, expected: &'static str, found: &'static str) -> Self {
        Self::WrongAttributeType {
            key: key.into(),
            expected,
            found,
        }
    }
}
