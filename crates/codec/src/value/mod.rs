//! Encode/decode routines for everything that travels on the wire.
//!
//! One trait covers the whole value surface; dispatch is by the
//! implementing type's category: numeric primitives (`literal`), narrow
//! and wide strings and fixed-capacity buffers (`text`), and the four
//! container shapes plus owned pointers (`container`).

mod container;
mod literal;
mod text;

pub use container::BoolVec;
pub use text::{FixedStr, WideString};

use crate::{Reader, Writer, error::CodecError};

/// A value that can travel on the wire.
///
/// Decoding is in-place: the target starts from its [`Default`] and is only
/// touched when its field is actually present on the wire, which is what
/// preserves defaults when reading a record written by an older schema.
pub trait Wire: Default {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError>;
    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError>;
}
