use transport::TransportError;

use crate::WireTag;

/// Coarse error taxonomy surfaced through
/// [`Codec::last_error`](crate::Codec::last_error) and the error handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorKind {
    /// No error recorded.
    #[default]
    None,
    /// Expected tag differs from the observed octet.
    TypeMismatch,
    /// The transport reported short or failed I/O.
    StreamError,
    /// A size prefix exceeds the receiving buffer's capacity.
    StringTooLong,
    /// An encoded collection or record exceeds the 16-bit size prefix.
    SizeOverflow,
    /// Malformed framing.
    Invalid,
    /// The source ran out while more input was expected.
    EndOfStream,
}

/// Error returned when encoding or decoding a value fails.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("expected {expected:?} tag, found {found:#04x}")]
    TypeMismatch { expected: WireTag, found: u8 },

    #[error("unrecognized wire tag {0:#04x}")]
    UnknownTag(u8),

    #[error("transport failure: {0}")]
    Stream(#[from] TransportError),

    #[error("decoded string of {size} octets exceeds the buffer capacity of {capacity}")]
    StringTooLong { size: usize, capacity: usize },

    #[error("{shape:?} of {len} elements does not fit the 16-bit size prefix")]
    SizeOverflow { shape: WireTag, len: usize },

    #[error("malformed framing: {0}")]
    Invalid(String),

    #[error("source exhausted: needed {needed} octets, {available} available")]
    EndOfStream { needed: usize, available: usize },
}

impl CodecError {
    /// Taxonomy bucket of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::TypeMismatch { .. } | CodecError::UnknownTag(_) => ErrorKind::TypeMismatch,
            CodecError::Stream(_) => ErrorKind::StreamError,
            CodecError::StringTooLong { .. } => ErrorKind::StringTooLong,
            CodecError::SizeOverflow { .. } => ErrorKind::SizeOverflow,
            CodecError::Invalid(_) => ErrorKind::Invalid,
            CodecError::EndOfStream { .. } => ErrorKind::EndOfStream,
        }
    }
}
