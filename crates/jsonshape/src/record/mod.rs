//! Structs with named fields.
//!
//! A record is declared with [`record!`](crate::record), which emits the
//! struct together with its [`Shaped`](crate::Shaped),
//! [`Decode`](crate::Decode) and [`RecordSlot`](crate::RecordSlot)
//! implementations. The decoder matches object members to fields through
//! a [`FieldTable`] built once per record type.

mod cache;

pub use cache::{FieldSpec, FieldTable, field_table, normalize};

/// Declares a struct that decodes from a JSON object.
///
/// Members are matched to fields case-insensitively. Fields accept a
/// `#[json(...)]` attribute after their doc comments:
///
/// - `rename = "name"` matches members called `name` instead of the field
///   name,
/// - `skip` ignores the member entirely,
/// - `embed` lifts the fields of a nested record into this one, the way an
///   anonymous struct field would. Fields of the outer record shadow
///   embedded ones with the same name.
///
/// The struct must implement [`Default`], which is its zero value, and every
/// field type must implement [`Decode`](crate::Decode) and
/// [`Shaped`](crate::Shaped).
///
/// ```rust
/// use jsonshape::{from_str, record};
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Audit {
///         pub author: String,
///     }
/// }
///
/// record! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Ticket {
///         /// Ticket number.
///         #[json(rename = "ID")]
///         pub id: u64,
///         pub tags: Vec<String>,
///         #[json(embed)]
///         pub audit: Audit,
///         #[json(skip)]
///         pub cached: bool,
///     }
/// }
///
/// let ticket: Ticket = from_str(
///     r#"{"id": 7, "TAGS": ["a"], "Author": "kim", "cached": true}"#,
/// )
/// .unwrap();
/// assert_eq!(ticket.id, 7);
/// assert_eq!(ticket.tags, ["a"]);
/// assert_eq!(ticket.audit.author, "kim");
/// assert!(!ticket.cached);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[doc = $doc:literal])*
                $(#[json($($opt:ident $(= $value:literal)?),* $(,)?)])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[doc = $doc])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Shaped for $name {
            const SHAPE: &'static $crate::Shape = &$crate::Shape::of::<$name>($crate::Def::Record({
                const FIELDS: &[$crate::FieldDef] = &[
                    $(
                        $crate::FieldDef::new(::core::stringify!($field), $crate::shape_of::<$ty>)
                            $($(.$opt($($value)?))*)?
                    ),*
                ];
                FIELDS
            }));
        }

        impl $crate::Decode for $name {
            fn shape(&self) -> &'static $crate::Shape {
                <Self as $crate::Shaped>::SHAPE
            }

            fn set_zero(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }

            fn target(&mut self) -> $crate::Target<'_> {
                $crate::Target::Record(self)
            }
        }

        impl $crate::RecordSlot for $name {
            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_mut(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn $crate::Decode> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return ::core::option::Option::Some(&mut self.$field);
                    }
                    position += 1;
                )*
                ::core::option::Option::None
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Decode, Def, RecordSlot, Shaped, Target};

    record! {
        #[derive(Debug, Default, PartialEq)]
        struct Point {
            x: i32,
            #[json(rename = "Y", skip)]
            y: i32,
        }
    }

    record! {
        #[derive(Debug, Default)]
        struct Empty {}
    }

    #[test]
    fn field_defs_follow_declaration() {
        let Def::Record(fields) = Point::SHAPE.def else {
            panic!("not a record: {:?}", Point::SHAPE);
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "x");
        assert!(fields[0].shape().is::<i32>());
        assert_eq!(fields[1].rename, Some("Y"));
        assert!(fields[1].skip);
        assert!(!fields[1].embed);
    }

    #[test]
    fn fields_are_reachable_by_index() {
        let mut p = Point { x: 1, y: 2 };
        let Some(field) = p.field_mut(1) else {
            panic!("missing field");
        };
        if let Target::Int(n) = field.target() {
            assert!(n.parse_from("9"));
        }
        assert!(p.field_mut(2).is_none());
        assert_eq!(p, Point { x: 1, y: 9 });
    }

    #[test]
    fn zero_is_default() {
        let mut p = Point { x: 1, y: 2 };
        p.set_zero();
        assert_eq!(p, Point::default());
        assert!(Empty::default().field_mut(0).is_none());
    }
}
