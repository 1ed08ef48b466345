use core::panic::Location;

use bytes::Buf;
use tracing::debug;
use transport::{OctetSource, TransportError};

use crate::{Codec, WireTag, endian::ByteOrder, error::CodecError};

/// Streaming decoder over an octet source.
///
/// Tracks the payload bound of each record being decoded; the bound drives
/// both evolution paths: skipping unknown trailing values a newer writer
/// appended, and leaving defaults for values an older writer never wrote.
pub struct Reader<'a> {
    pub(crate) codec: &'a mut Codec,
    pub(crate) source: &'a mut dyn OctetSource,
    /// End positions of in-flight record payloads, innermost last.
    pub(crate) bounds: Vec<u64>,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(codec: &'a mut Codec, source: &'a mut dyn OctetSource) -> Self {
        Self { codec, source, bounds: Vec::new() }
    }

    /// Byte order multi-octet values are deserialised in.
    pub fn order(&self) -> ByteOrder {
        self.codec.stream_order()
    }

    /// True while decoding a record whose declared payload is already fully
    /// consumed. Field decodes observing this return without touching the
    /// target, which keeps the default value in place.
    pub fn field_absent(&self) -> bool {
        self.bounds.last().is_some_and(|&end| self.source.position() >= end)
    }

    /// Records `error` against the codec, notifies the error handler, and
    /// marks the source unhealthy so later operations short-circuit.
    ///
    /// Returns the error for propagation with `?` or `return Err(..)`.
    #[track_caller]
    pub fn fail(&mut self, error: CodecError) -> CodecError {
        let location = Location::caller();
        self.codec.note_error(error.kind(), location);
        self.source.set_unhealthy();
        error
    }

    /// Consumes exactly `buf.len()` octets into `buf`.
    #[track_caller]
    pub fn read_octets(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        match self.source.consume(buf) {
            Ok(()) => Ok(()),
            Err(TransportError::Exhausted { needed, available }) => {
                Err(self.fail(CodecError::EndOfStream { needed, available }))
            }
            Err(error) => Err(self.fail(CodecError::Stream(error))),
        }
    }

    /// Consumes `len` octets into a fresh buffer.
    #[track_caller]
    pub fn read_octet_vec(&mut self, len: usize) -> Result<Vec<u8>, CodecError> {
        let mut buf = vec![0u8; len];
        self.read_octets(&mut buf)?;
        Ok(buf)
    }

    /// Consumes the next tag octet and checks it against `expected`.
    #[track_caller]
    pub fn expect_tag(&mut self, expected: WireTag) -> Result<(), CodecError> {
        let mut raw = [0u8; 1];
        self.read_octets(&mut raw)?;
        if raw[0] == expected as u8 {
            Ok(())
        } else {
            Err(self.fail(CodecError::TypeMismatch { expected, found: raw[0] }))
        }
    }

    /// Consumes a 16-bit cell in the stream byte order.
    #[track_caller]
    pub fn read_word(&mut self) -> Result<u16, CodecError> {
        let mut raw = [0u8; 2];
        self.read_octets(&mut raw)?;
        Ok(match self.order() {
            ByteOrder::Big => (&raw[..]).get_u16(),
            ByteOrder::Little => (&raw[..]).get_u16_le(),
        })
    }

    /// Expects `tag` and returns the count that follows it.
    #[track_caller]
    pub fn read_sized(&mut self, tag: WireTag) -> Result<u16, CodecError> {
        self.expect_tag(tag)?;
        self.read_word()
    }

    #[track_caller]
    pub(crate) fn skip_octets(&mut self, count: u64) -> Result<(), CodecError> {
        match self.source.advance(count) {
            Ok(()) => Ok(()),
            Err(TransportError::Exhausted { needed, available }) => {
                Err(self.fail(CodecError::EndOfStream { needed, available }))
            }
            Err(error) => Err(self.fail(CodecError::Stream(error))),
        }
    }

    /// Remaining octets of the innermost record payload, if inside one.
    pub(crate) fn record_remaining(&self) -> Option<u64> {
        self.bounds.last().map(|&end| end.saturating_sub(self.source.position()))
    }

    /// Consumes the byte-order marker if one is pending at the source.
    pub(crate) fn consume_order_marker(&mut self) -> Result<(), CodecError> {
        if self.source.peek() != Some(WireTag::Endian as u8) {
            return Ok(());
        }
        let mut raw = [0u8; 2];
        self.read_octets(&mut raw)?;
        match ByteOrder::from_code(raw[1]) {
            Some(order) => {
                self.codec.set_stream_order(order);
                debug!(?order, "stream byte order negotiated");
                Ok(())
            }
            None => {
                Err(self.fail(CodecError::Invalid(format!(
                    "unknown byte-order code {:#04x}",
                    raw[1]
                ))))
            }
        }
    }

    /// Advances past one complete value of any shape, using its
    /// self-contained tag and size information.
    ///
    /// Literal widths are not self-describing, so a literal consumes the
    /// rest of the enclosing record payload; outside a record there is no
    /// bound to consult and the skip is refused.
    pub(crate) fn skip_value(&mut self) -> Result<(), CodecError> {
        let mut raw = [0u8; 1];
        self.read_octets(&mut raw)?;
        let tag = match WireTag::try_from(raw[0]) {
            Ok(tag) => tag,
            Err(found) => return Err(self.fail(CodecError::UnknownTag(found))),
        };
        match tag {
            WireTag::Literal => {
                let Some(remaining) = self.record_remaining() else {
                    return Err(self.fail(CodecError::Invalid(
                        "cannot skip a literal of unknown width outside a record".into(),
                    )));
                };
                self.skip_octets(remaining)
            }
            WireTag::String | WireTag::UserDefined => {
                let len = self.read_word()? as u64;
                self.skip_octets(len)
            }
            WireTag::WString => {
                let len = self.read_word()? as u64;
                self.skip_octets(len * 2)
            }
            WireTag::Vector | WireTag::List | WireTag::Set => {
                let count = self.read_word()?;
                for _ in 0..count {
                    self.skip_value()?;
                }
                Ok(())
            }
            WireTag::Map => {
                let count = self.read_word()?;
                for _ in 0..count {
                    self.skip_value()?;
                    self.skip_value()?;
                }
                Ok(())
            }
            WireTag::Endian => self.skip_octets(1),
            WireTag::Unknown => Err(self.fail(CodecError::UnknownTag(raw[0]))),
        }
    }
}
