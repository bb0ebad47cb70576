//! Module reader errors

use wasmparser::BinaryReaderError;

/// Why a read pass stopped
///
/// `E` is the error type of the visitor being driven.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError<E> {
    /// The module bytes could not be decoded
    #[error("malformed module at offset {offset:#x}: {message}")]
    Malformed { offset: usize, message: String },

    /// The visitor rejected an event
    #[error("{event} rejected by visitor: {error}")]
    Callback { event: &'static str, error: E },
}

impl<E> DecodeError<E> {
    pub(crate) fn malformed(offset: usize, message: impl Into<String>) -> Self {
        DecodeError::Malformed {
            offset,
            message: message.into(),
        }
    }

    /// An encoding this reader has no event for
    pub(crate) fn unsupported(offset: usize, what: impl std::fmt::Display) -> Self {
        Self::malformed(offset, format!("unsupported {}", what))
    }

    /// Byte offset of a decoding failure
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::Malformed { offset, .. } => Some(*offset),
            DecodeError::Callback { .. } => None,
        }
    }
}

impl<E> From<BinaryReaderError> for DecodeError<E> {
    fn from(err: BinaryReaderError) -> Self {
        DecodeError::Malformed {
            offset: err.offset(),
            message: err.message().to_string(),
        }
    }
}
