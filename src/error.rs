//! Top-level error type.

use thiserror::Error;

use kewt_core::MappingError;
use kewt_registry::SchemaError;

use crate::context::ContextError;

pub type Result<T> = std::result::Result<T, KewtError>;

/// Any failure surfaced by the `kewt` facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KewtError {
    /// A host option has an unusable value.
    #[error("invalid option {key}={value}: {reason}")]
    InvalidOption {
        key: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl KewtError {
    pub fn is_invalid_option(&self) -> bool {
        matches!(self, KewtError::InvalidOption { .. })
    }

    /// The mapping failure, if this error is one.
    pub fn as_mapping(&self) -> Option<&MappingError> {
        match self {
            KewtError::Mapping(err) => Some(err),
            _ => None,
        }
    }
}
