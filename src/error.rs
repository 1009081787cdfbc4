//! Error types for path construction, lookup and turtle-string queries.

/// Errors produced by paths, grids and the pattern query engine.
///
/// Invalid adjacency between two path cells is *not* an error: it shows up
/// as [`Turn::Invalid`](crate::Turn::Invalid) in the turtle string.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PathError {
    /// A path was constructed with no positions.
    #[error("empty path: at least one position is required")]
    EmptyPath,

    /// A stored path index (lookup, classifier position or rotation anchor)
    /// was outside `[0, count)`.
    #[error("path index {index} out of range for path of {count} positions")]
    IndexOutOfRange { index: isize, count: usize },

    /// A loop-only operation was requested on an open path.
    #[error("operation requires a closed path")]
    NotClosed,

    /// A grid was given a non-positive width or height.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The turtle alphabet has duplicate or non-ASCII symbols.
    #[error("invalid turtle alphabet: {0}")]
    InvalidAlphabet(String),

    /// A search pattern failed to compile.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PathError>;
