use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::Decoder;
use crate::{error::DecodeError, shape::Shape, slot::Target, source::Kind, source::TokenSource};

impl<S: TokenSource + ?Sized> Decoder<'_, S> {
    pub(super) fn decode_bool(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Bool(b) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Bool, shape)?;
        *b = self.source.bool_value();
        Ok(())
    }

    /// Integers and floats. The slot parses the literal at its own width.
    pub(super) fn decode_number(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let (Target::Int(n) | Target::Uint(n) | Target::Float(n)) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::Number, shape)?;
        if n.parse_from(self.source.raw_value()) {
            Ok(())
        } else {
            Err(self.mismatch(shape))
        }
    }

    pub(super) fn decode_str(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Str(s) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::String, shape)?;
        s.clear();
        s.push_str(self.source.raw_value());
        Ok(())
    }

    /// Standard padded base64. The existing buffer is reused when it is
    /// large enough.
    pub(super) fn decode_bytes(
        &mut self,
        shape: &'static Shape,
        target: Target<'_>,
    ) -> Result<(), DecodeError> {
        let Target::Bytes(buf) = target else {
            return Err(self.mismatch(shape));
        };
        self.expect(Kind::String, shape)?;
        buf.clear();
        if STANDARD.decode_vec(self.source.raw_value(), buf).is_err() {
            buf.clear();
            return Err(self.mismatch(shape));
        }
        Ok(())
    }
}
