//! Mutable access to decode destinations.
//!
//! A slot is a `&mut dyn Decode`. Each decode step asks the slot for its
//! [`Target`], a typed view that exposes just enough of the location for
//! one family of strategies. Containers hand out their elements as further
//! slots, so the engine never needs to know the concrete types involved.

use core::any::Any;

use crate::{error::DecodeError, shape::Shape, value::Value};

/// A location the decoder can write into.
///
/// Implemented for the primitive types, `String`, [`Bytes`](crate::Bytes),
/// `Vec<T>`, `[T; N]`, `BTreeMap<String, V>`, `HashMap<String, V>`,
/// `Option<T>`, `Box<T>`, `()` and [`Value`]. Structs get an implementation
/// from [`record!`](crate::record).
pub trait Decode: 'static {
    /// The shape of the location's type.
    fn shape(&self) -> &'static Shape;

    /// Resets the location to its zero value. Called for `null` tokens.
    fn set_zero(&mut self);

    /// The typed view strategies write through.
    fn target(&mut self) -> Target<'_>;
}

/// The typed view of one slot.
#[allow(missing_docs)]
pub enum Target<'a> {
    Bool(&'a mut bool),
    Int(&'a mut dyn NumberSlot),
    Uint(&'a mut dyn NumberSlot),
    Float(&'a mut dyn NumberSlot),
    Str(&'a mut String),
    Bytes(&'a mut Vec<u8>),
    List(&'a mut dyn ListSlot),
    Array(&'a mut dyn ArraySlot),
    Map(&'a mut dyn MapSlot),
    Record(&'a mut dyn RecordSlot),
    Dynamic(&'a mut Value),
    Pointer(&'a mut dyn PointerSlot),
    Opaque,
}

/// A numeric location.
pub trait NumberSlot {
    /// Parses `literal` at the location's width and stores it. Returns
    /// `false`, leaving the location untouched, if the literal does not fit.
    fn parse_from(&mut self, literal: &str) -> bool;
}

/// A growable sequence.
#[allow(clippy::len_without_is_empty)]
pub trait ListSlot {
    /// Number of elements.
    fn len(&self) -> usize;
    /// Number of elements the sequence can hold without reallocating.
    fn capacity(&self) -> usize;
    /// Makes room for exactly `additional` more elements.
    fn reserve_exact(&mut self, additional: usize);
    /// Appends a zero-valued element.
    fn push_zero(&mut self);
    /// The element at `index`.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
    /// Drops every element from `len` onwards.
    fn truncate(&mut self, len: usize);
}

/// A fixed-size sequence.
#[allow(clippy::len_without_is_empty)]
pub trait ArraySlot {
    /// Number of elements.
    fn len(&self) -> usize;
    /// The element at `index`.
    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

/// An associative container with text keys.
pub trait MapSlot {
    /// The container itself, for strategies that special-case one map type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Decodes one entry: `fill` writes into a fresh zero value, which is
    /// then inserted under `name` if `fill` succeeded.
    ///
    /// # Errors
    ///
    /// Returns the error of `fill`; nothing is inserted in that case.
    fn decode_entry(
        &mut self,
        name: String,
        fill: &mut dyn FnMut(&mut dyn Decode) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError>;
}

/// A struct declared with [`record!`](crate::record).
pub trait RecordSlot {
    /// The field at `index` in declaration order.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Decode>;
}

/// A location holding or owning another one.
pub trait PointerSlot {
    /// The location pointed to, created with its zero value if absent.
    fn pointee(&mut self) -> &mut dyn Decode;
}
