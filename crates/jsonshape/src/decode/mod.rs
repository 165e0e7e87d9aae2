//! The type-directed decoder and its entry points.
//!
//! Decoding is a single forward pass: the [`Decoder`] looks at the current
//! token, resolves the destination's shape to a strategy, and lets the
//! strategy pull whatever children it needs from the [`TokenSource`].
//! Containers keep going after a child fails, so one call reports the first
//! problem at each level while filling in everything that did fit.

mod container;
mod dynamic;
mod indirect;
mod resolve;
mod scalar;

use std::io;

use log::{debug, trace};

use crate::{
    error::{DecodeError, TypeMismatch},
    scanner::Scanner,
    shape::Shape,
    slot::Decode,
    source::{Kind, TokenSource},
};

use indirect::indirect;

/// Decodes values from a [`TokenSource`] into destinations.
///
/// [`unmarshal`] covers the common case of one document, one destination.
/// Use a `Decoder` directly to pull several root values from one source:
///
/// ```rust
/// use jsonshape::{Decoder, Scanner, ScannerOptions, TokenSource};
///
/// let options = ScannerOptions {
///     allow_multiple_json_values: true,
///     ..Default::default()
/// };
/// let mut scanner = Scanner::with_options("[1, 2]\n[3]\n", options);
/// let mut rows = Vec::new();
/// while scanner.advance() {
///     let mut row: Vec<u32> = Vec::new();
///     Decoder::new(&mut scanner).decode(&mut row).unwrap();
///     rows.push(row);
/// }
/// assert_eq!(rows, [vec![1, 2], vec![3]]);
/// assert!(scanner.last_error().is_none());
/// ```
#[derive(Debug)]
pub struct Decoder<'s, S: ?Sized> {
    source: &'s mut S,
}

impl<'s, S: TokenSource + ?Sized> Decoder<'s, S> {
    /// Creates a decoder reading from `source`.
    pub fn new(source: &'s mut S) -> Self {
        Self { source }
    }

    /// Decodes the token `source` is positioned on, and its children, into
    /// `slot`.
    ///
    /// A `null` token resets `slot` to its zero value whatever its type.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Source`] if the source failed while the value
    /// was being read, otherwise the first [`TypeMismatch`] met at this
    /// level. Children that did fit are written either way.
    pub fn decode(&mut self, slot: &mut dyn Decode) -> Result<(), DecodeError> {
        let kind = self.source.kind();
        if kind == Kind::Null {
            trace!("null into {}, zeroing", slot.shape());
            slot.set_zero();
            return Ok(());
        }

        let (shape, target) = indirect(slot);
        trace!("decoding {kind} into {shape}");
        match Self::resolve(shape) {
            Some(strategy) => strategy(self, shape, target),
            None => Err(self.mismatch(shape)),
        }
    }

    fn mismatch(&self, shape: &'static Shape) -> DecodeError {
        TypeMismatch {
            kind: self.source.kind(),
            type_name: shape.type_name(),
        }
        .into()
    }

    /// Fails with a type mismatch unless the current token is `kind`.
    fn expect(&self, kind: Kind, shape: &'static Shape) -> Result<(), DecodeError> {
        if self.source.kind() == kind {
            Ok(())
        } else {
            Err(self.mismatch(shape))
        }
    }
}

/// Result of decoding the children of one container.
#[derive(Debug, Default)]
struct Outcome {
    first: Option<DecodeError>,
}

impl Outcome {
    /// Keeps the first failure. Later ones are logged and dropped.
    fn record(&mut self, result: Result<(), DecodeError>) {
        if let Err(err) = result {
            if self.first.is_none() {
                self.first = Some(err);
            } else {
                debug!("discarding later child failure: {err}");
            }
        }
    }

    /// A source failure wins over any recorded child failure.
    fn finish<S: TokenSource + ?Sized>(self, source: &S) -> Result<(), DecodeError> {
        if let Some(err) = source.last_error() {
            return Err(err.clone().into());
        }
        self.first.map_or(Ok(()), Err)
    }
}

/// A possibly absent destination for [`unmarshal`].
pub trait IntoDestination<'d> {
    /// The destination slot, or `None` if there is nowhere to write.
    fn into_destination(self) -> Option<&'d mut dyn Decode>;
}

impl<'d, T: Decode> IntoDestination<'d> for &'d mut T {
    fn into_destination(self) -> Option<&'d mut dyn Decode> {
        Some(self)
    }
}

impl<'d, T: Decode> IntoDestination<'d> for Option<&'d mut T> {
    fn into_destination(self) -> Option<&'d mut dyn Decode> {
        self.map(|slot| slot as &mut dyn Decode)
    }
}

/// Decodes the next root value of `source` into `destination`.
///
/// If the source has no value to offer, its own state is returned: its
/// error if it has one, `Ok(())` otherwise, and `destination` is left
/// alone. After a successful decode the source is advanced once more, so
/// trailing input or a late lexical fault is reported.
///
/// # Errors
///
/// - [`DecodeError::InvalidDestination`] if `destination` is `None`.
/// - [`DecodeError::Source`] if the source failed.
/// - [`DecodeError::TypeMismatch`] for the first token that did not fit.
///
/// ```rust
/// use jsonshape::{DecodeError, Scanner, unmarshal};
///
/// let mut n = 0i32;
/// unmarshal(&mut Scanner::new("42"), &mut n).unwrap();
/// assert_eq!(n, 42);
///
/// let err = unmarshal(&mut Scanner::new("42"), None::<&mut i32>).unwrap_err();
/// assert!(matches!(err, DecodeError::InvalidDestination));
/// ```
pub fn unmarshal<'d, S, D>(source: &mut S, destination: D) -> Result<(), DecodeError>
where
    S: TokenSource + ?Sized,
    D: IntoDestination<'d>,
{
    let Some(slot) = destination.into_destination() else {
        return Err(DecodeError::InvalidDestination);
    };

    if !source.advance() {
        return source.last_error().map_or(Ok(()), |err| Err(err.clone().into()));
    }

    Decoder::new(source).decode(slot)?;

    source.advance();
    source.last_error().map_or(Ok(()), |err| Err(err.clone().into()))
}

/// Decodes a JSON document into a new `T`.
///
/// # Errors
///
/// See [`unmarshal`].
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let scores: BTreeMap<String, Vec<u8>> = jsonshape::from_str(r#"{"kim": [3, 4]}"#).unwrap();
/// assert_eq!(scores["kim"], [3, 4]);
/// ```
pub fn from_str<T: Decode + Default>(input: &str) -> Result<T, DecodeError> {
    let mut value = T::default();
    unmarshal(&mut Scanner::new(input), &mut value)?;
    Ok(value)
}

/// Decodes a JSON document given as bytes into a new `T`.
///
/// # Errors
///
/// See [`unmarshal`]. Invalid UTF-8 is a source error.
pub fn from_slice<T: Decode + Default>(input: &[u8]) -> Result<T, DecodeError> {
    let mut value = T::default();
    unmarshal(&mut Scanner::from_slice(input), &mut value)?;
    Ok(value)
}

/// Reads `reader` to the end and decodes the result into a new `T`.
///
/// # Errors
///
/// [`DecodeError::Io`] if reading fails, otherwise see [`unmarshal`].
pub fn from_reader<T: Decode + Default, R: io::Read>(reader: R) -> Result<T, DecodeError> {
    let mut scanner = Scanner::from_reader(reader)?;
    let mut value = T::default();
    unmarshal(&mut scanner, &mut value)?;
    Ok(value)
}
