use std::io;

use thiserror::Error;

use crate::{scanner::ScanError, source::Kind};

/// Why a decode call failed.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The destination was an absent reference.
    #[error("destination must not be nil")]
    InvalidDestination,
    /// A token could not be stored in the location it was decoded into.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatch),
    /// The token source stopped with a lexical or structural fault.
    #[error(transparent)]
    Source(#[from] ScanError),
    /// Reading the input failed before decoding started.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// The type mismatch, if that is what this error is.
    #[must_use]
    pub fn as_type_mismatch(&self) -> Option<&TypeMismatch> {
        match self {
            Self::TypeMismatch(e) => Some(e),
            _ => None,
        }
    }

    /// The source fault, if that is what this error is.
    #[must_use]
    pub fn as_source(&self) -> Option<&ScanError> {
        match self {
            Self::Source(e) => Some(e),
            _ => None,
        }
    }
}

/// A token of kind `kind` met a location of type `type_name` that cannot
/// hold it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot decode {kind} into value of type {type_name}")]
pub struct TypeMismatch {
    /// Kind of the offending token.
    pub kind: Kind,
    /// Name of the type the token was decoded into.
    pub type_name: &'static str,
}
