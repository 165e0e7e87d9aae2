//! Pull lexer over a complete JSON document.
//!
//! The scanner keeps one token of state: the kind and text of the value it
//! is positioned on, plus a stack of the arrays and objects that are still
//! open. Children of a container are only lexed when the caller asks for
//! them, and whatever the caller skips is drained on the next advance.

mod error;
mod options;

use std::{borrow::Cow, io};

pub use error::{ScanError, SyntaxError};
pub use options::ScannerOptions;

use crate::source::{Kind, TokenSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// A character peeked from the input.
enum PeekedChar {
    Char(char),
    /// The bytes at the cursor are not valid UTF-8.
    Invalid,
    EndOfInput,
}

use PeekedChar::{Char, EndOfInput, Invalid};

#[derive(Debug, Clone, Copy)]
enum Frame {
    Array { first: bool },
    Object { first: bool },
}

/// A [`TokenSource`] over an in-memory JSON document.
///
/// ```rust
/// use jsonshape::{Kind, Scanner, TokenSource};
///
/// let mut scanner = Scanner::new(r#"{"a": [1, 2]}"#);
/// assert!(scanner.advance());
/// assert_eq!(scanner.kind(), Kind::Object);
///
/// let mut members = scanner.object_cursor();
/// assert!(members.advance(&mut scanner));
/// assert_eq!(members.name(), "a");
/// assert_eq!(scanner.kind(), Kind::Array);
///
/// // The rest of the document is skipped.
/// assert!(!scanner.advance());
/// assert!(scanner.last_error().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: Cow<'a, [u8]>,
    pos: usize,
    line: usize,
    column: usize,
    options: ScannerOptions,
    frames: Vec<Frame>,

    kind: Kind,
    boolean: bool,
    /// Unescaped text of the current string, or the literal of the current
    /// number.
    buffer: String,
    /// Name of the member whose value was just lexed.
    name: String,

    started: bool,
    error: Option<ScanError>,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner with default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ScannerOptions::default())
    }

    /// Creates a scanner over raw bytes. Invalid UTF-8 is reported when the
    /// scanner reaches it.
    #[must_use]
    pub fn from_slice(input: &'a [u8]) -> Self {
        Self::from_cow(Cow::Borrowed(input), ScannerOptions::default())
    }

    /// Creates a scanner with the given options.
    #[must_use]
    pub fn with_options(input: &'a str, options: ScannerOptions) -> Self {
        Self::from_cow(Cow::Borrowed(input.as_bytes()), options)
    }

    /// Same as [`from_slice`](Self::from_slice), with options.
    #[must_use]
    pub fn from_slice_with_options(input: &'a [u8], options: ScannerOptions) -> Self {
        Self::from_cow(Cow::Borrowed(input), options)
    }

    fn from_cow(input: Cow<'a, [u8]>, options: ScannerOptions) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            options,
            frames: Vec::new(),
            kind: Kind::Null,
            boolean: false,
            buffer: String::new(),
            name: String::new(),
            started: false,
            error: None,
        }
    }

    /// Current line, 1-based.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current column, 1-based.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Scanner<'static> {
    /// Reads `reader` to the end and scans the result.
    ///
    /// # Errors
    ///
    /// Returns any error raised while reading.
    pub fn from_reader<R: io::Read>(mut reader: R) -> io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_cow(Cow::Owned(bytes), ScannerOptions::default()))
    }
}

impl TokenSource for Scanner<'_> {
    fn advance(&mut self) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.skip_to(0);
        if self.error.is_some() {
            return false;
        }
        self.skip_whitespace();
        match self.peek_char() {
            EndOfInput => {
                if !self.started {
                    self.fail(SyntaxError::UnexpectedEndOfInput);
                }
                false
            }
            _ if self.started && !self.options.allow_multiple_json_values => {
                self.fail(SyntaxError::TrailingInput);
                false
            }
            _ => {
                self.started = true;
                self.read_value()
            }
        }
    }

    fn kind(&self) -> Kind {
        self.kind
    }

    fn raw_value(&self) -> &str {
        match self.kind {
            Kind::Number | Kind::String => &self.buffer,
            _ => "",
        }
    }

    fn bool_value(&self) -> bool {
        self.boolean
    }

    fn last_error(&self) -> Option<&ScanError> {
        self.error.as_ref()
    }

    fn depth(&self) -> usize {
        self.frames.len()
    }

    fn next_element(&mut self, depth: usize) -> bool {
        if !self.drain_to(depth) {
            return false;
        }
        matches!(self.frames.last(), Some(Frame::Array { .. })) && self.step()
    }

    fn next_member(&mut self, depth: usize) -> Option<String> {
        if !self.drain_to(depth) {
            return None;
        }
        if matches!(self.frames.last(), Some(Frame::Object { .. })) && self.step() {
            Some(core::mem::take(&mut self.name))
        } else {
            None
        }
    }
}

impl Scanner<'_> {
    // ------------------------------------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------------------------------------

    /// Drains nested containers until the one opened at `depth` is innermost.
    /// Returns `false` if that container is already closed or the scanner
    /// has failed.
    fn drain_to(&mut self, depth: usize) -> bool {
        if self.error.is_some() || depth == 0 || self.frames.len() < depth {
            return false;
        }
        self.skip_to(depth);
        self.error.is_none() && self.frames.len() == depth
    }

    fn skip_to(&mut self, depth: usize) {
        while self.error.is_none() && self.frames.len() > depth {
            self.step();
        }
    }

    /// Moves to the next child of the innermost container. Returns `false`
    /// when the container closes or on error.
    fn step(&mut self) -> bool {
        let (is_object, was_first) = match self.frames.last_mut() {
            Some(Frame::Array { first }) => (false, core::mem::replace(first, false)),
            Some(Frame::Object { first }) => (true, core::mem::replace(first, false)),
            None => return false,
        };
        let close = if is_object { '}' } else { ']' };

        self.skip_whitespace();
        match self.peek_char() {
            Char(c) if c == close => {
                self.advance_char();
                self.frames.pop();
                return false;
            }
            Char(',') if !was_first => {
                self.advance_char();
                self.skip_whitespace();
            }
            _ if was_first => {}
            c => {
                self.fail_expected(c, if is_object { "',' or '}'" } else { "',' or ']'" });
                return false;
            }
        }

        if is_object {
            match self.peek_char() {
                Char('"') => {
                    if !self.read_string() {
                        return false;
                    }
                    self.name = core::mem::take(&mut self.buffer);
                }
                c => {
                    self.fail_expected(c, "string");
                    return false;
                }
            }
            self.skip_whitespace();
            match self.peek_char() {
                Char(':') => self.advance_char(),
                c => {
                    self.fail_expected(c, "':'");
                    return false;
                }
            }
            self.skip_whitespace();
        }

        self.read_value()
    }

    fn open(&mut self, frame: Frame, kind: Kind) -> bool {
        if self.frames.len() >= self.options.max_depth {
            self.fail(SyntaxError::NestingLimitExceeded(self.options.max_depth));
            return false;
        }
        self.advance_char();
        self.frames.push(frame);
        self.kind = kind;
        true
    }

    // ------------------------------------------------------------------------------------------------
    // Lexer
    // ------------------------------------------------------------------------------------------------

    fn read_value(&mut self) -> bool {
        self.buffer.clear();
        match self.peek_char() {
            Char('{') => self.open(Frame::Object { first: true }, Kind::Object),
            Char('[') => self.open(Frame::Array { first: true }, Kind::Array),
            Char('"') => {
                self.kind = Kind::String;
                self.read_string()
            }
            Char('t') => self.read_literal("true", Kind::Bool, true),
            Char('f') => self.read_literal("false", Kind::Bool, false),
            Char('n') => self.read_literal("null", Kind::Null, false),
            Char(c) if c == '-' || c.is_ascii_digit() => {
                self.kind = Kind::Number;
                self.read_number()
            }
            c => {
                self.fail_on(c);
                false
            }
        }
    }

    fn read_literal(&mut self, literal: &'static str, kind: Kind, value: bool) -> bool {
        for expected in literal.chars() {
            match self.peek_char() {
                Char(c) if c == expected => self.advance_char(),
                c => {
                    self.fail_on(c);
                    return false;
                }
            }
        }
        self.kind = kind;
        self.boolean = value;
        true
    }

    /// Lexes `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?` into
    /// the buffer.
    fn read_number(&mut self) -> bool {
        if self.peek_char() == Char('-') {
            self.push_and_advance('-');
        }

        match self.peek_char() {
            Char('0') => self.push_and_advance('0'),
            Char(c) if c.is_ascii_digit() => self.read_digits(),
            c => {
                self.fail_on(c);
                return false;
            }
        }

        if self.peek_char() == Char('.') {
            self.push_and_advance('.');
            if !self.read_required_digits() {
                return false;
            }
        }

        if let Char(e @ ('e' | 'E')) = self.peek_char() {
            self.push_and_advance(e);
            if let Char(sign @ ('+' | '-')) = self.peek_char() {
                self.push_and_advance(sign);
            }
            if !self.read_required_digits() {
                return false;
            }
        }

        true
    }

    fn read_required_digits(&mut self) -> bool {
        match self.peek_char() {
            Char(c) if c.is_ascii_digit() => {
                self.read_digits();
                true
            }
            c => {
                self.fail_on(c);
                false
            }
        }
    }

    fn read_digits(&mut self) {
        while let Char(c) = self.peek_char() {
            if !c.is_ascii_digit() {
                break;
            }
            self.push_and_advance(c);
        }
    }

    /// Lexes a quoted string into the buffer, resolving escapes.
    fn read_string(&mut self) -> bool {
        self.advance_char();
        self.buffer.clear();
        loop {
            match self.peek_char() {
                Char('"') => {
                    self.advance_char();
                    return true;
                }
                Char('\\') => {
                    self.advance_char();
                    if !self.read_escape() {
                        return false;
                    }
                }
                Char(c) if (c as u32) < 0x20 => {
                    self.fail(SyntaxError::InvalidCharacter(c));
                    return false;
                }
                Char(c) => self.push_and_advance(c),
                c => {
                    self.fail_on(c);
                    return false;
                }
            }
        }
    }

    fn read_escape(&mut self) -> bool {
        let c = match self.peek_char() {
            Char(c) => c,
            c => {
                self.fail_on(c);
                return false;
            }
        };
        let decoded = match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => {
                self.advance_char();
                return self.read_unicode_escape();
            }
            c => {
                self.fail(SyntaxError::InvalidEscapeChar(c));
                return false;
            }
        };
        self.push_and_advance(decoded);
        true
    }

    /// Reads the four hex digits after `\u`, plus the low half when they
    /// name a high surrogate.
    fn read_unicode_escape(&mut self) -> bool {
        let Some(high) = self.read_hex4() else {
            return false;
        };
        let code = match high {
            0xD800..=0xDBFF => {
                if self.peek_char() != Char('\\') {
                    self.fail(SyntaxError::InvalidUnicodeEscapeSequence(high));
                    return false;
                }
                self.advance_char();
                if self.peek_char() != Char('u') {
                    self.fail(SyntaxError::InvalidUnicodeEscapeSequence(high));
                    return false;
                }
                self.advance_char();
                let Some(low) = self.read_hex4() else {
                    return false;
                };
                if !(0xDC00..=0xDFFF).contains(&low) {
                    self.fail(SyntaxError::InvalidUnicodeEscapeSequence(low));
                    return false;
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            code => code,
        };
        match char::from_u32(code) {
            Some(ch) => {
                self.buffer.push(ch);
                true
            }
            None => {
                self.fail(SyntaxError::InvalidUnicodeEscapeSequence(code));
                false
            }
        }
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let mut code = 0;
        for _ in 0..4 {
            match self.peek_char() {
                Char(c) if c.is_ascii_hexdigit() => {
                    code = code * 16 + c.to_digit(16)?;
                    self.advance_char();
                }
                Char(c) => {
                    self.fail(SyntaxError::InvalidUnicodeEscapeChar(c));
                    return None;
                }
                c => {
                    self.fail_on(c);
                    return None;
                }
            }
        }
        Some(code)
    }

    // ------------------------------------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------------------------------------

    fn peek_char(&self) -> PeekedChar {
        let rest = self.input.get(self.pos..).unwrap_or_default();
        match rest.first() {
            None => EndOfInput,
            Some(&b) if b.is_ascii() => Char(b as char),
            Some(_) => match bstr::decode_utf8(rest) {
                (Some(ch), _) => Char(ch),
                (None, _) => Invalid,
            },
        }
    }

    /// Consumes the peeked character. Does nothing at end of input or on
    /// invalid UTF-8.
    fn advance_char(&mut self) {
        if let Char(ch) = self.peek_char() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn push_and_advance(&mut self, ch: char) {
        self.buffer.push(ch);
        self.advance_char();
    }

    fn skip_whitespace(&mut self) {
        while let Char(c) = self.peek_char() {
            if !self.is_whitespace(c) {
                break;
            }
            self.advance_char();
        }
    }

    fn is_whitespace(&self, c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r')
            || (self.options.allow_unicode_whitespace && c.is_whitespace())
    }

    // ------------------------------------------------------------------------------------------------
    // Errors
    // ------------------------------------------------------------------------------------------------

    fn fail(&mut self, source: SyntaxError) {
        if self.error.is_none() {
            self.error = Some(ScanError::new(source, self.line, self.column));
        }
    }

    fn fail_on(&mut self, c: PeekedChar) {
        self.fail(match c {
            Char(c) => SyntaxError::InvalidCharacter(c),
            Invalid => SyntaxError::InvalidUtf8,
            EndOfInput => SyntaxError::UnexpectedEndOfInput,
        });
    }

    fn fail_expected(&mut self, c: PeekedChar, expected: &'static str) {
        match c {
            Char(_) => self.fail(SyntaxError::Expected(expected)),
            c => self.fail_on(c),
        }
    }
}
