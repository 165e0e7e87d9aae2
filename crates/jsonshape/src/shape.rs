//! Static descriptions of decodable types.
//!
//! Every type the decoder can write into carries a [`Shape`]: its name, its
//! [`TypeId`], and a [`Def`] saying which family of types it belongs to.
//! Strategies are chosen from the shape alone, before any token is looked
//! at.

use core::{any::TypeId, fmt};

/// Describes a decodable type.
#[derive(Clone, Copy)]
pub struct Shape {
    type_name: fn() -> &'static str,
    id: fn() -> TypeId,
    /// The family of types this shape belongs to.
    pub def: Def,
}

impl Shape {
    /// Describes `T` as `def`.
    #[must_use]
    pub const fn of<T: ?Sized + 'static>(def: Def) -> Self {
        Self {
            type_name: core::any::type_name::<T>,
            id: TypeId::of::<T>,
            def,
        }
    }

    /// Fully qualified name of the described type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Identity of the described type.
    #[must_use]
    pub fn id(&self) -> TypeId {
        (self.id)()
    }

    /// Returns `true` if this shape describes `T`.
    #[must_use]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id() == TypeId::of::<T>()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Shape {}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("type_name", &self.type_name())
            .field("def", &self.def)
            .finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// The semantic definition of a shape.
#[derive(Clone, Copy)]
pub enum Def {
    /// `bool`
    Bool,
    /// Signed integer of the given width.
    Int {
        /// Width in bits.
        bits: u32,
    },
    /// Unsigned integer of the given width.
    Uint {
        /// Width in bits.
        bits: u32,
    },
    /// Floating point number of the given width.
    Float {
        /// Width in bits.
        bits: u32,
    },
    /// Text, e.g. `String`.
    Str,
    /// Bytes carried as a base64 string, e.g. [`Bytes`](crate::Bytes).
    Bytes,
    /// Growable sequence, e.g. `Vec<T>`.
    List(&'static Shape),
    /// Fixed-size sequence, e.g. `[T; N]`.
    Array {
        /// Element shape.
        elem: &'static Shape,
        /// Number of elements.
        len: usize,
    },
    /// Associative container, e.g. `BTreeMap<K, V>`.
    Map {
        /// Key shape. Only text keys can be decoded.
        key: &'static Shape,
        /// Value shape.
        value: &'static Shape,
    },
    /// Struct with named fields, declared with [`record!`](crate::record).
    Record(&'static [FieldDef]),
    /// Holds whatever the document contains, e.g. [`Value`](crate::Value).
    Dynamic,
    /// Owns or optionally holds a value of the inner shape, e.g. `Box<T>`
    /// or `Option<T>`.
    Pointer(&'static Shape),
    /// Cannot be decoded from anything but `null`.
    Opaque,
}

impl fmt::Debug for Def {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Def::Bool => f.write_str("Bool"),
            Def::Int { bits } => write!(f, "Int({bits})"),
            Def::Uint { bits } => write!(f, "Uint({bits})"),
            Def::Float { bits } => write!(f, "Float({bits})"),
            Def::Str => f.write_str("Str"),
            Def::Bytes => f.write_str("Bytes"),
            Def::List(elem) => write!(f, "List({elem})"),
            Def::Array { elem, len } => write!(f, "Array({elem}; {len})"),
            Def::Map { key, value } => write!(f, "Map({key} => {value})"),
            Def::Record(fields) => f
                .debug_list()
                .entries(fields.iter().map(|field| field.name))
                .finish(),
            Def::Dynamic => f.write_str("Dynamic"),
            Def::Pointer(inner) => write!(f, "Pointer({inner})"),
            Def::Opaque => f.write_str("Opaque"),
        }
    }
}

/// Static description of one field of a record.
///
/// Built by [`record!`](crate::record), or by hand with the `const`
/// builder methods:
///
/// ```rust
/// use jsonshape::{FieldDef, shape_of};
///
/// const ID: FieldDef = FieldDef::new("id", shape_of::<u64>).rename("ID");
/// assert_eq!(ID.external_name(), "ID");
/// ```
#[derive(Clone, Copy)]
pub struct FieldDef {
    /// Rust name of the field.
    pub name: &'static str,
    /// Member name to match instead of `name`.
    pub rename: Option<&'static str>,
    /// Never decode into this field.
    pub skip: bool,
    /// Lift the fields of this nested record into the parent.
    pub embed: bool,
    /// Shape of the field's type. A function so that records can refer to
    /// themselves.
    pub shape: fn() -> &'static Shape,
}

impl FieldDef {
    /// A plain field.
    #[must_use]
    pub const fn new(name: &'static str, shape: fn() -> &'static Shape) -> Self {
        Self {
            name,
            rename: None,
            skip: false,
            embed: false,
            shape,
        }
    }

    /// Matches members called `name` instead of the Rust name.
    #[must_use]
    pub const fn rename(mut self, name: &'static str) -> Self {
        self.rename = Some(name);
        self
    }

    /// Excludes the field from decoding.
    #[must_use]
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Lifts the fields of the nested record into the parent.
    #[must_use]
    pub const fn embed(mut self) -> Self {
        self.embed = true;
        self
    }

    /// The member name this field answers to, before normalization.
    #[must_use]
    pub fn external_name(&self) -> &'static str {
        self.rename.unwrap_or(self.name)
    }

    /// Shape of the field's type.
    #[must_use]
    pub fn shape(&self) -> &'static Shape {
        (self.shape)()
    }
}

impl fmt::Debug for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDef")
            .field("name", &self.name)
            .field("rename", &self.rename)
            .field("skip", &self.skip)
            .field("embed", &self.embed)
            .field("shape", &self.shape().type_name())
            .finish()
    }
}

/// Types with a static [`Shape`].
pub trait Shaped: 'static {
    /// The shape of `Self`.
    const SHAPE: &'static Shape;
}

/// Returns the shape of `T`.
///
/// Usable as a `fn() -> &'static Shape` in [`FieldDef::new`].
#[must_use]
pub fn shape_of<T: Shaped>() -> &'static Shape {
    T::SHAPE
}
