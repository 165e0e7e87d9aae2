use super::Decoder;
use crate::{
    error::DecodeError,
    shape::{Def, Shape},
    slot::Target,
    source::TokenSource,
    value::{Map, Value},
};

impl<S: TokenSource + ?Sized> Decoder<'_, S> {
    /// Picks the strategy for a resolved shape. Exact types take precedence
    /// over their category; `None` means nothing but `null` fits.
    #[allow(clippy::type_complexity)]
    pub(super) fn resolve(
        shape: &'static Shape,
    ) -> Option<fn(&mut Self, &'static Shape, Target<'_>) -> Result<(), DecodeError>> {
        if shape.is::<Value>() {
            return Some(Self::decode_dynamic);
        }
        if shape.is::<Map>() {
            return Some(Self::decode_dynamic_map);
        }

        let strategy: fn(&mut Self, &'static Shape, Target<'_>) -> Result<(), DecodeError> =
            match shape.def {
                Def::Bool => Self::decode_bool,
                Def::Int { .. } | Def::Uint { .. } | Def::Float { .. } => Self::decode_number,
                Def::Str => Self::decode_str,
                Def::Bytes => Self::decode_bytes,
                Def::List(_) => Self::decode_list,
                Def::Array { .. } => Self::decode_array,
                Def::Map { .. } => Self::decode_map,
                Def::Record(_) => Self::decode_record,
                Def::Dynamic | Def::Pointer(_) | Def::Opaque => return None,
            };
        Some(strategy)
    }
}
