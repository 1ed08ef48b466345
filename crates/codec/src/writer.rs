use core::panic::Location;

use bytes::BufMut;
use transport::OctetSink;

use crate::{Codec, WireTag, endian::ByteOrder, error::CodecError};

/// Streaming encoder over an octet sink.
///
/// Handed to [`Wire::encode`](crate::Wire::encode) implementations by
/// [`Codec::write`]; carries the stream byte order and the error-reporting
/// plumbing.
pub struct Writer<'a> {
    pub(crate) codec: &'a mut Codec,
    pub(crate) sink: &'a mut dyn OctetSink,
}

impl<'a> Writer<'a> {
    pub(crate) fn new(codec: &'a mut Codec, sink: &'a mut dyn OctetSink) -> Self {
        Self { codec, sink }
    }

    /// Byte order multi-octet values are serialised in.
    pub fn order(&self) -> ByteOrder {
        self.codec.stream_order()
    }

    /// Records `error` against the codec, notifies the error handler, and
    /// marks the sink unhealthy so later operations short-circuit.
    ///
    /// Returns the error for propagation with `?` or `return Err(..)`.
    #[track_caller]
    pub fn fail(&mut self, error: CodecError) -> CodecError {
        let location = Location::caller();
        self.codec.note_error(error.kind(), location);
        self.sink.set_unhealthy();
        error
    }

    /// Appends raw octets.
    #[track_caller]
    pub fn put_octets(&mut self, octets: &[u8]) -> Result<(), CodecError> {
        match self.sink.append(octets) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.fail(CodecError::Stream(error))),
        }
    }

    /// Appends a wire tag octet.
    #[track_caller]
    pub fn put_tag(&mut self, tag: WireTag) -> Result<(), CodecError> {
        self.put_octets(&[tag as u8])
    }

    /// Appends a 16-bit cell in the stream byte order. Size prefixes and
    /// wide code units travel through here.
    #[track_caller]
    pub fn put_word(&mut self, value: u16) -> Result<(), CodecError> {
        let raw = self.word_octets(value);
        self.put_octets(&raw)
    }

    /// Appends `tag` and the count of a variable-length shape.
    ///
    /// Counts above the 16-bit maximum are a
    /// [`CodecError::SizeOverflow`].
    #[track_caller]
    pub fn begin_sized(&mut self, tag: WireTag, len: usize) -> Result<(), CodecError> {
        if len > u16::MAX as usize {
            return Err(self.fail(CodecError::SizeOverflow { shape: tag, len }));
        }
        self.put_tag(tag)?;
        self.put_word(len as u16)
    }

    /// Overwrites a previously appended 16-bit cell at `position`.
    #[track_caller]
    pub(crate) fn patch_word(&mut self, position: u64, value: u16) -> Result<(), CodecError> {
        let raw = self.word_octets(value);
        match self.sink.patch(position, &raw) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.fail(CodecError::Stream(error))),
        }
    }

    pub(crate) fn emit_order_marker(&mut self) -> Result<(), CodecError> {
        self.put_tag(WireTag::Endian)?;
        let code = self.order().code();
        self.put_octets(&[code])
    }

    fn word_octets(&self, value: u16) -> [u8; 2] {
        let mut raw = [0u8; 2];
        let mut buf = &mut raw[..];
        match self.order() {
            ByteOrder::Big => buf.put_u16(value),
            ByteOrder::Little => buf.put_u16_le(value),
        }
        raw
    }
}
