//! Tagged binary message codec.
//!
//! Encodes structured, user-defined records into a self-describing octet
//! stream and decodes them back, across byte orders and across schema
//! revisions. Every value travels as a one-octet wire tag, a 16-bit size
//! prefix for variable-length shapes, and the value octets. Records are
//! length-prefixed blobs: the length is what lets an old reader skip fields
//! a newer writer appended, and a new reader keep defaults for fields an
//! old writer never produced.
//!
//! Wire layout per value:
//! - tag octet ([`WireTag`])
//! - for variable-length shapes, a 16-bit count in the stream byte order
//! - the value octets, multi-octet cells in the stream byte order

pub mod codec;
pub mod endian;
pub mod error;
pub mod reader;
pub mod record;
pub mod value;
pub mod writer;

pub use codec::{Codec, ErrorHandler, ProgressHandler};
pub use endian::ByteOrder;
pub use error::{CodecError, ErrorKind};
pub use reader::Reader;
pub use record::RecordCodec;
pub use value::{BoolVec, FixedStr, WideString, Wire};
pub use writer::Writer;

/// One-octet enumerator introducing every value on the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireTag {
    /// Reserved; never valid on the wire.
    Unknown = 0,
    /// Fixed-width numeric value; the octet count is the value's width.
    Literal = 1,
    /// Narrow string: 16-bit code-unit count, then one octet per unit.
    String = 8,
    /// Wide string: 16-bit code-unit count, then two octets per unit.
    WString = 9,
    /// Ordered contiguous sequence.
    Vector = 20,
    /// Keyed mapping, entries in ascending key order.
    Map = 21,
    /// Linked sequence.
    List = 22,
    /// Unique ordered set.
    Set = 23,
    /// Byte-order marker prologue.
    Endian = 30,
    /// User record: 16-bit payload octet length, then the fields.
    UserDefined = 31,
}

impl TryFrom<u8> for WireTag {
    type Error = u8;

    fn try_from(octet: u8) -> Result<Self, Self::Error> {
        match octet {
            0 => Ok(WireTag::Unknown),
            1 => Ok(WireTag::Literal),
            8 => Ok(WireTag::String),
            9 => Ok(WireTag::WString),
            20 => Ok(WireTag::Vector),
            21 => Ok(WireTag::Map),
            22 => Ok(WireTag::List),
            23 => Ok(WireTag::Set),
            30 => Ok(WireTag::Endian),
            31 => Ok(WireTag::UserDefined),
            other => Err(other),
        }
    }
}
