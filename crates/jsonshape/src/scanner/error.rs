use thiserror::Error;

/// A lexical or structural fault reported by the [`Scanner`](super::Scanner).
///
/// Positions are 1-based and count characters, not bytes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct ScanError {
    pub(crate) source: SyntaxError,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl ScanError {
    /// Creates an error at the given position. Token sources other than
    /// [`Scanner`](super::Scanner) use this to report their own faults.
    #[must_use]
    pub fn new(source: SyntaxError, line: usize, column: usize) -> Self {
        Self {
            source,
            line,
            column,
        }
    }

    /// The fault itself, without position information.
    #[must_use]
    pub fn syntax(&self) -> &SyntaxError {
        &self.source
    }

    /// Line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column of the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SyntaxError {
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("invalid escape character '{0}'")]
    InvalidEscapeChar(char),
    #[error("invalid unicode escape sequence at character: '{0}'")]
    InvalidUnicodeEscapeChar(char),
    #[error("invalid unicode escape sequence \\u{0:X}")]
    InvalidUnicodeEscapeSequence(u32),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("expected {0}")]
    Expected(&'static str),
    #[error("nesting limit of {0} exceeded")]
    NestingLimitExceeded(usize),
    #[error("unexpected trailing input")]
    TrailingInput,
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}
