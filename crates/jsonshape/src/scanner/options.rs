/// Configuration options for the [`Scanner`](super::Scanner).
///
/// # Examples
///
/// ```rust
/// use jsonshape::{Scanner, ScannerOptions};
///
/// let scanner = Scanner::with_options(
///     "1 2 3",
///     ScannerOptions {
///         allow_multiple_json_values: true,
///         ..Default::default()
///     },
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScannerOptions {
    /// Whether to allow any Unicode whitespace between tokens.
    ///
    /// By default, the scanner only recognizes the four whitespace characters
    /// defined by the JSON specification: space (U+0020), line feed (U+000A),
    /// carriage return (U+000D), and horizontal tab (U+0009).
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether the input may hold several whitespace-delimited JSON values.
    ///
    /// When `false`, any non-whitespace input after the first complete value
    /// is reported as [`SyntaxError::TrailingInput`](super::SyntaxError) by
    /// the next top-level advance. When `true`, that advance yields the next
    /// value instead, which supports JSON Lines style input.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_multiple_json_values: bool,

    /// Maximum number of simultaneously open arrays and objects.
    ///
    /// The decoder recurses once per nesting level, so this bounds its stack
    /// usage. Exceeding it is a scan error.
    ///
    /// # Default
    ///
    /// `128`
    pub max_depth: usize,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            allow_unicode_whitespace: false,
            allow_multiple_json_values: false,
            max_depth: 128,
        }
    }
}
