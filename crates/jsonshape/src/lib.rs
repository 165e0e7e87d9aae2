//! A single-pass, shape-directed JSON decoder.
//!
//! `jsonshape` reads JSON from a forward-only [`TokenSource`] and writes it
//! straight into existing Rust values, guided by the static [`Shape`] of
//! each destination. There is no intermediate tree: the decoder pulls a
//! token, picks a strategy for the destination's type, and recurses into
//! containers as it goes.
//!
//! Decoding is best effort. When a member does not fit its field, the
//! decoder records the mismatch, keeps filling in the rest, and reports
//! the first problem at the end. Lexical faults from the source always
//! take precedence.
//!
//! ```rust
//! use jsonshape::{DecodeError, Value, from_str, record};
//!
//! record! {
//!     #[derive(Debug, Default)]
//!     pub struct Order {
//!         pub id: u32,
//!         pub items: Vec<String>,
//!         pub note: Option<String>,
//!         pub extra: Value,
//!     }
//! }
//!
//! let order: Order = from_str(r#"{"ID": 7, "items": ["tea"], "extra": {"x": [1]}}"#).unwrap();
//! assert_eq!(order.id, 7);
//! assert_eq!(order.items, ["tea"]);
//! assert_eq!(order.note, None);
//! assert_eq!(order.extra.to_string(), r#"{"x":[1]}"#);
//!
//! let err = from_str::<Order>(r#"{"id": "seven"}"#).unwrap_err();
//! assert!(matches!(err, DecodeError::TypeMismatch(_)));
//! assert_eq!(err.to_string(), "cannot decode string into value of type u32");
//! ```
//!
//! Destinations implement [`Decode`]. The standard scalar types, `String`,
//! `Vec`, fixed-size arrays, `BTreeMap` and `HashMap` with `String` keys,
//! `Option`, `Box`, [`Bytes`] and [`Value`] are covered; structs are
//! declared with [`record!`].

mod decode;
mod error;
mod impls;
mod record;
mod scanner;
mod shape;
mod slot;
mod source;
mod value;

#[cfg(test)]
mod tests;

pub use decode::{Decoder, IntoDestination, from_reader, from_slice, from_str, unmarshal};
pub use error::{DecodeError, TypeMismatch};
pub use impls::Bytes;
pub use record::{FieldSpec, FieldTable, field_table, normalize};
pub use scanner::{ScanError, Scanner, ScannerOptions, SyntaxError};
pub use shape::{Def, FieldDef, Shape, Shaped, shape_of};
pub use slot::{
    ArraySlot, Decode, ListSlot, MapSlot, NumberSlot, PointerSlot, RecordSlot, Target,
};
pub use source::{ArrayCursor, Kind, ObjectCursor, TokenSource};
pub use value::{Array, Map, Value};
