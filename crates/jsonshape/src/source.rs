//! The token-source contract the decoder pulls from.
//!
//! A [`TokenSource`] is a forward-only cursor over JSON tokens. The decoder
//! never looks back: every `advance` discards whatever part of the previous
//! token's sub-tree was left unread. [`Scanner`](crate::Scanner) is the
//! in-crate implementation; other producers (a pre-tokenized buffer, a
//! network framing layer) can implement the trait directly.

use core::fmt;

use crate::scanner::ScanError;

/// The kind of the token a [`TokenSource`] is positioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// `null`
    Null,
    /// `true` or `false`
    Bool,
    /// A number literal; its text is available through
    /// [`TokenSource::raw_value`].
    Number,
    /// A string; [`TokenSource::raw_value`] holds the unescaped text.
    String,
    /// The opening bracket of an array.
    Array,
    /// The opening brace of an object.
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        })
    }
}

/// A forward-only cursor over JSON tokens.
///
/// The top-level [`advance`](TokenSource::advance) moves between root
/// values. Inside an array or object, the decoder walks children through
/// [`ArrayCursor`] and [`ObjectCursor`], which are thin wrappers over
/// [`next_element`](TokenSource::next_element) and
/// [`next_member`](TokenSource::next_member).
///
/// Once a source reports an error through
/// [`last_error`](TokenSource::last_error) it must keep returning `false`
/// from every advancing method.
pub trait TokenSource {
    /// Moves to the next root value, skipping whatever remains of the
    /// current one. Returns `false` at end of input or on error.
    fn advance(&mut self) -> bool;

    /// Kind of the current token.
    fn kind(&self) -> Kind;

    /// Text of the current Number or String token. Empty for other kinds.
    fn raw_value(&self) -> &str;

    /// Value of the current Bool token.
    fn bool_value(&self) -> bool;

    /// The fault that stopped the source, if any.
    fn last_error(&self) -> Option<&ScanError>;

    /// Number of arrays and objects currently open, including the one the
    /// source is positioned on.
    fn depth(&self) -> usize;

    /// Moves to the next element of the array opened at `depth`, draining
    /// the unread remainder of the previous element first. Returns `false`
    /// once the array is closed.
    fn next_element(&mut self, depth: usize) -> bool;

    /// Moves to the value of the next member of the object opened at
    /// `depth` and returns the member name. Returns `None` once the object
    /// is closed.
    fn next_member(&mut self, depth: usize) -> Option<String>;

    /// Cursor over the elements of the array the source is positioned on.
    fn array_cursor(&self) -> ArrayCursor {
        ArrayCursor {
            depth: self.depth(),
        }
    }

    /// Cursor over the members of the object the source is positioned on.
    fn object_cursor(&self) -> ObjectCursor {
        ObjectCursor {
            depth: self.depth(),
            name: String::new(),
        }
    }
}

/// Iterates the elements of one array.
#[derive(Debug, Clone)]
pub struct ArrayCursor {
    depth: usize,
}

impl ArrayCursor {
    /// Positions `source` on the next element.
    pub fn advance<S: TokenSource + ?Sized>(&mut self, source: &mut S) -> bool {
        source.next_element(self.depth)
    }
}

/// Iterates the members of one object, remembering the current member name
/// while its value is being decoded.
#[derive(Debug, Clone)]
pub struct ObjectCursor {
    depth: usize,
    name: String,
}

impl ObjectCursor {
    /// Positions `source` on the value of the next member.
    pub fn advance<S: TokenSource + ?Sized>(&mut self, source: &mut S) -> bool {
        match source.next_member(self.depth) {
            Some(name) => {
                self.name = name;
                true
            }
            None => false,
        }
    }

    /// Name of the current member.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Takes the name of the current member, leaving an empty one behind.
    pub fn take_name(&mut self) -> String {
        core::mem::take(&mut self.name)
    }
}
