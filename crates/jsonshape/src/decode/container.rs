use super::{Decoder, Outcome};
use crate::{
    error::DecodeError,
    record::{field_table, normalize},
    shape::{Def, Shape},
    slot::{Decode, RecordSlot, Target},
    source::{Kind, TokenSource},
};

impl<S: TokenSource + ?Sized> Decoder<'_, S> {
    /// Growable sequences. Capacity grows by half, to at least 4, whenever
    /// the next element would not fit; the sequence ends up exactly as long
    /// as the array.
    pub(super) fn decode_list(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::List(list) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Array, shape)?;

        let mut outcome = Outcome::default();
        let mut cursor = self.source.array_cursor();
        let mut len = 0;
        while cursor.advance(self.source) {
            if len >= list.len() {
                let cap = list.capacity();
                if list.len() == cap {
                    list.reserve_exact((cap + cap / 2).max(4) - cap);
                }
                list.push_zero();
            }
            if let Some(element) = list.element_mut(len) {
                outcome.record(self.decode(element));
            }
            len += 1;
        }
        list.truncate(len);

        outcome.finish(self.source)
    }

    /// Fixed-size sequences. Surplus elements are read and dropped; missing
    /// ones leave the tail untouched.
    pub(super) fn decode_array(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Array(array) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Array, shape)?;

        let mut outcome = Outcome::default();
        let mut cursor = self.source.array_cursor();
        let mut index = 0;
        while cursor.advance(self.source) {
            if let Some(element) = array.element_mut(index) {
                outcome.record(self.decode(element));
            }
            index += 1;
        }

        outcome.finish(self.source)
    }

    /// Maps with text keys. Each member decodes into a fresh value that is
    /// only inserted if it decoded cleanly.
    pub(super) fn decode_map(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Map(map) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Object, shape)?;
        let Def::Map { key, .. } = shape.def else {
            return Err(self.mismatch(shape));
        };
        if !matches!(key.def, Def::Str) {
            return Err(self.mismatch(shape));
        }

        let mut outcome = Outcome::default();
        let mut cursor = self.source.object_cursor();
        while cursor.advance(self.source) {
            let name = cursor.take_name();
            outcome.record(map.decode_entry(name, &mut |slot| self.decode(slot)));
        }

        outcome.finish(self.source)
    }

    /// Records. Members are matched case-insensitively against the record's
    /// field table; unknown and skipped members are ignored.
    pub(super) fn decode_record(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Record(record) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Object, shape)?;

        let table = field_table(shape);
        let mut outcome = Outcome::default();
        let mut cursor = self.source.object_cursor();
        while cursor.advance(self.source) {
            let Some(spec) = table.get(&normalize(cursor.name())) else {
                continue;
            };
            if !spec.included {
                continue;
            }
            if let Some(field) = field_by_path(&mut *record, &spec.path) {
                outcome.record(self.decode(field));
            }
        }

        outcome.finish(self.source)
    }
}

/// Walks `path` down through embedded records.
fn field_by_path<'r>(record: &'r mut dyn RecordSlot, path: &[usize]) -> Option<&'r mut dyn Decode> {
    let (&index, rest) = path.split_first()?;
    let field = record.field_mut(index)?;
    if rest.is_empty() {
        return Some(field);
    }
    match field.target() {
        Target::Record(inner) => field_by_path(inner, rest),
        _ => None,
    }
}
