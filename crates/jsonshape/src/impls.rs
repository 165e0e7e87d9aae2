//! [`Shaped`] and [`Decode`] for standard library types.

use core::{
    any::Any,
    hash::{BuildHasher, Hash},
    ops::{Deref, DerefMut},
};
use std::collections::{BTreeMap, HashMap};

use crate::{
    error::DecodeError,
    shape::{Def, Shape, Shaped},
    slot::{ArraySlot, Decode, ListSlot, MapSlot, NumberSlot, PointerSlot, Target},
    value::Value,
};

// ------------------------------------------------------------------------------------------------
// Scalars
// ------------------------------------------------------------------------------------------------

macro_rules! impl_integer {
    ($def:ident: $($ty:ty),*) => {$(
        impl NumberSlot for $ty {
            fn parse_from(&mut self, literal: &str) -> bool {
                match literal.parse::<$ty>() {
                    Ok(n) => {
                        *self = n;
                        true
                    }
                    Err(_) => false,
                }
            }
        }

        impl Shaped for $ty {
            const SHAPE: &'static Shape = &Shape::of::<$ty>(Def::$def { bits: <$ty>::BITS });
        }

        impl Decode for $ty {
            fn shape(&self) -> &'static Shape {
                Self::SHAPE
            }

            fn set_zero(&mut self) {
                *self = 0;
            }

            fn target(&mut self) -> Target<'_> {
                Target::$def(self)
            }
        }
    )*};
}

impl_integer!(Int: i8, i16, i32, i64, isize);
impl_integer!(Uint: u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty => $bits:literal),*) => {$(
        impl NumberSlot for $ty {
            fn parse_from(&mut self, literal: &str) -> bool {
                match literal.parse::<$ty>() {
                    Ok(n) if n.is_finite() => {
                        *self = n;
                        true
                    }
                    _ => false,
                }
            }
        }

        impl Shaped for $ty {
            const SHAPE: &'static Shape = &Shape::of::<$ty>(Def::Float { bits: $bits });
        }

        impl Decode for $ty {
            fn shape(&self) -> &'static Shape {
                Self::SHAPE
            }

            fn set_zero(&mut self) {
                *self = 0.0;
            }

            fn target(&mut self) -> Target<'_> {
                Target::Float(self)
            }
        }
    )*};
}

impl_float!(f32 => 32, f64 => 64);

impl Shaped for bool {
    const SHAPE: &'static Shape = &Shape::of::<bool>(Def::Bool);
}

impl Decode for bool {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        *self = false;
    }

    fn target(&mut self) -> Target<'_> {
        Target::Bool(self)
    }
}

impl Shaped for String {
    const SHAPE: &'static Shape = &Shape::of::<String>(Def::Str);
}

impl Decode for String {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        self.clear();
    }

    fn target(&mut self) -> Target<'_> {
        Target::Str(self)
    }
}

macro_rules! impl_opaque {
    ($($ty:ty => $zero:expr),*) => {$(
        impl Shaped for $ty {
            const SHAPE: &'static Shape = &Shape::of::<$ty>(Def::Opaque);
        }

        impl Decode for $ty {
            fn shape(&self) -> &'static Shape {
                Self::SHAPE
            }

            fn set_zero(&mut self) {
                *self = $zero;
            }

            fn target(&mut self) -> Target<'_> {
                Target::Opaque
            }
        }
    )*};
}

impl_opaque!(char => '\0', () => ());

// ------------------------------------------------------------------------------------------------
// Bytes
// ------------------------------------------------------------------------------------------------

/// Binary data carried in JSON as a standard, padded base64 string.
///
/// A plain `Vec<u8>` decodes from an array of numbers instead.
///
/// ```rust
/// use jsonshape::{Bytes, from_str};
///
/// let bytes: Bytes = from_str(r#""aGVsbG8=""#).unwrap();
/// assert_eq!(&bytes[..], b"hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl Deref for Bytes {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Bytes {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<Bytes> for Vec<u8> {
    fn from(bytes: Bytes) -> Self {
        bytes.0
    }
}

impl Shaped for Bytes {
    const SHAPE: &'static Shape = &Shape::of::<Bytes>(Def::Bytes);
}

impl Decode for Bytes {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        self.0.clear();
    }

    fn target(&mut self) -> Target<'_> {
        Target::Bytes(&mut self.0)
    }
}

// ------------------------------------------------------------------------------------------------
// Sequences
// ------------------------------------------------------------------------------------------------

impl<T: Decode + Shaped + Default> Shaped for Vec<T> {
    const SHAPE: &'static Shape = &Shape::of::<Vec<T>>(Def::List(T::SHAPE));
}

impl<T: Decode + Shaped + Default> Decode for Vec<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        self.clear();
    }

    fn target(&mut self) -> Target<'_> {
        Target::List(self)
    }
}

impl<T: Decode + Default> ListSlot for Vec<T> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn capacity(&self) -> usize {
        Vec::capacity(self)
    }

    fn reserve_exact(&mut self, additional: usize) {
        Vec::reserve_exact(self, additional);
    }

    fn push_zero(&mut self) {
        self.push(T::default());
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Decode> {
        self.get_mut(index).map(|e| e as &mut dyn Decode)
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

impl<T: Decode + Shaped, const N: usize> Shaped for [T; N] {
    const SHAPE: &'static Shape = &Shape::of::<[T; N]>(Def::Array {
        elem: T::SHAPE,
        len: N,
    });
}

impl<T: Decode + Shaped, const N: usize> Decode for [T; N] {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        for e in self.iter_mut() {
            e.set_zero();
        }
    }

    fn target(&mut self) -> Target<'_> {
        Target::Array(self)
    }
}

impl<T: Decode, const N: usize> ArraySlot for [T; N] {
    fn len(&self) -> usize {
        N
    }

    fn element_mut(&mut self, index: usize) -> Option<&mut dyn Decode> {
        self.get_mut(index).map(|e| e as &mut dyn Decode)
    }
}

// ------------------------------------------------------------------------------------------------
// Maps
// ------------------------------------------------------------------------------------------------

/// Builds a key from a member name. `None` if `K` is not text.
fn key_from_name<K: Decode + Default>(name: String) -> Option<K> {
    let mut key = K::default();
    match key.target() {
        Target::Str(s) => *s = name,
        _ => return None,
    }
    Some(key)
}

impl<K, V> Shaped for BTreeMap<K, V>
where
    K: Decode + Shaped + Default + Ord,
    V: Decode + Shaped + Default,
{
    const SHAPE: &'static Shape = &Shape::of::<BTreeMap<K, V>>(Def::Map {
        key: K::SHAPE,
        value: V::SHAPE,
    });
}

impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Shaped + Default + Ord,
    V: Decode + Shaped + Default,
{
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        self.clear();
    }

    fn target(&mut self) -> Target<'_> {
        Target::Map(self)
    }
}

impl<K, V> MapSlot for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn decode_entry(
        &mut self,
        name: String,
        fill: &mut dyn FnMut(&mut dyn Decode) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError> {
        let mut value = V::default();
        fill(&mut value)?;
        if let Some(key) = key_from_name::<K>(name) {
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<K, V, S> Shaped for HashMap<K, V, S>
where
    K: Decode + Shaped + Default + Eq + Hash,
    V: Decode + Shaped + Default,
    S: BuildHasher + 'static,
{
    const SHAPE: &'static Shape = &Shape::of::<HashMap<K, V, S>>(Def::Map {
        key: K::SHAPE,
        value: V::SHAPE,
    });
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Shaped + Default + Eq + Hash,
    V: Decode + Shaped + Default,
    S: BuildHasher + 'static,
{
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        self.clear();
    }

    fn target(&mut self) -> Target<'_> {
        Target::Map(self)
    }
}

impl<K, V, S> MapSlot for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher + 'static,
{
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn decode_entry(
        &mut self,
        name: String,
        fill: &mut dyn FnMut(&mut dyn Decode) -> Result<(), DecodeError>,
    ) -> Result<(), DecodeError> {
        let mut value = V::default();
        fill(&mut value)?;
        if let Some(key) = key_from_name::<K>(name) {
            self.insert(key, value);
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Indirection
// ------------------------------------------------------------------------------------------------

impl<T: Decode + Shaped + Default> Shaped for Option<T> {
    const SHAPE: &'static Shape = &Shape::of::<Option<T>>(Def::Pointer(T::SHAPE));
}

impl<T: Decode + Shaped + Default> Decode for Option<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        *self = None;
    }

    fn target(&mut self) -> Target<'_> {
        Target::Pointer(self)
    }
}

impl<T: Decode + Default> PointerSlot for Option<T> {
    fn pointee(&mut self) -> &mut dyn Decode {
        self.get_or_insert_with(T::default)
    }
}

impl<T: Decode + Shaped> Shaped for Box<T> {
    const SHAPE: &'static Shape = &Shape::of::<Box<T>>(Def::Pointer(T::SHAPE));
}

impl<T: Decode + Shaped> Decode for Box<T> {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        (**self).set_zero();
    }

    fn target(&mut self) -> Target<'_> {
        Target::Pointer(self)
    }
}

impl<T: Decode> PointerSlot for Box<T> {
    fn pointee(&mut self) -> &mut dyn Decode {
        &mut **self
    }
}

// ------------------------------------------------------------------------------------------------
// Dynamic
// ------------------------------------------------------------------------------------------------

impl Shaped for Value {
    const SHAPE: &'static Shape = &Shape::of::<Value>(Def::Dynamic);
}

impl Decode for Value {
    fn shape(&self) -> &'static Shape {
        Self::SHAPE
    }

    fn set_zero(&mut self) {
        *self = Value::Null;
    }

    fn target(&mut self) -> Target<'_> {
        Target::Dynamic(self)
    }
}
