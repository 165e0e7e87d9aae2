use super::{Decoder, Outcome};
use crate::{
    error::DecodeError,
    shape::{Shape, Shaped},
    slot::{NumberSlot, Target},
    source::{Kind, TokenSource},
    value::{Map, Value},
};

impl<S: TokenSource + ?Sized> Decoder<'_, S> {
    /// An empty [`Value`]. The value is only replaced if the whole sub-tree
    /// decoded cleanly.
    pub(super) fn decode_dynamic(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Dynamic(value) = target else {
            return Err(self.mismatch(shape));
        };
        let mut fresh = Value::Null;
        self.decode_value_into(&mut fresh)?;
        *value = fresh;
        Ok(())
    }

    /// A [`Map`] of dynamic values. Members that fail to decode are left out.
    pub(super) fn decode_dynamic_map(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Map(slot) = target else {
            return Err(self.mismatch(shape));
        };
        let Some(map) = slot.as_any_mut().downcast_mut::<Map>() else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Object, shape)?;

        let mut outcome = Outcome::default();
        let mut cursor = self.source.object_cursor();
        while cursor.advance(self.source) {
            let mut value = Value::Null;
            let result = self.decode_value_into(&mut value);
            if result.is_ok() {
                map.insert(cursor.take_name(), value);
            }
            outcome.record(result);
        }

        outcome.finish(self.source)
    }

    /// Builds a [`Value`] from the current token. Container members are
    /// kept even when they failed, holding whatever was decoded.
    fn decode_value_into(&mut self, out: &mut Value) -> Result<(), DecodeError> {
        match self.source.kind() {
            Kind::Null => *out = Value::Null,
            Kind::Bool => *out = Value::Boolean(self.source.bool_value()),
            Kind::Number => {
                let mut n = 0.0f64;
                if !n.parse_from(self.source.raw_value()) {
                    return Err(self.mismatch(Value::SHAPE));
                }
                *out = Value::Number(n);
            }
            Kind::String => *out = Value::String(self.source.raw_value().to_owned()),
            Kind::Array => {
                let mut items = Vec::new();
                let mut outcome = Outcome::default();
                let mut cursor = self.source.array_cursor();
                while cursor.advance(self.source) {
                    let mut item = Value::Null;
                    outcome.record(self.decode_value_into(&mut item));
                    items.push(item);
                }
                *out = Value::Array(items);
                return outcome.finish(self.source);
            }
            Kind::Object => {
                let mut members = Map::new();
                let mut outcome = Outcome::default();
                let mut cursor = self.source.object_cursor();
                while cursor.advance(self.source) {
                    let mut member = Value::Null;
                    outcome.record(self.decode_value_into(&mut member));
                    members.insert(cursor.take_name(), member);
                }
                *out = Value::Object(members);
                return outcome.finish(self.source);
            }
        }
        Ok(())
    }
}
