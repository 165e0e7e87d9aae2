use crate::{
    shape::Shape,
    slot::{Decode, Target},
    value::Value,
};

/// Follows pointers and non-null dynamic values down to the location a
/// strategy should write into.
///
/// An empty `Option` gets a zero value to point at. A `Value` that already
/// holds something exposes that thing, so decoding into it keeps its type.
pub(crate) fn indirect(slot: &mut dyn Decode) -> (&'static Shape, Target<'_>) {
    let mut shape = slot.shape();
    let mut target = slot.target();
    loop {
        let inner: &mut dyn Decode = match target {
            Target::Pointer(pointer) => pointer.pointee(),
            Target::Dynamic(value) => match value {
                Value::Null => return (shape, Target::Dynamic(value)),
                Value::Boolean(b) => b,
                Value::Number(n) => n,
                Value::String(s) => s,
                Value::Array(items) => items,
                Value::Object(members) => members,
            },
            other => return (shape, other),
        };
        shape = inner.shape();
        target = inner.target();
    }
}
