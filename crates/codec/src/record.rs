//! Record framing and the schema-evolution engine.
//!
//! A record travels as `USER_DEFINED` tag, a 16-bit payload length, and its
//! fields in declared order. The length is back-patched after the fields
//! are written, and on decode it bounds the payload so writer and reader
//! schemas may diverge at the tail in either direction.

use tracing::{debug, trace};
use transport::{OctetSink, OctetSource};

use crate::{Reader, WireTag, Writer, error::CodecError};

/// Capability pair a user record supplies to travel on the wire.
///
/// `encode_fields` and `decode_fields` run the record's fields in their
/// declared order against the streaming halves of the codec; the envelope
/// (tag, payload length, evolution handling) is applied by
/// [`Writer::put_record`] and [`Reader::read_record`].
///
/// Contract for implementors whose records have shipped:
/// - never remove, reorder, or retype a serialised field;
/// - append new fields at the end only;
/// - a record embedding another record's fields delegates to it first.
pub trait RecordCodec {
    /// Identity token reported to the progress handler.
    const NAME: &'static str;

    fn encode_fields(&self, writer: &mut Writer<'_>) -> Result<(), CodecError>;
    fn decode_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError>;
}

/// Implements [`Wire`](crate::Wire) for a [`RecordCodec`] type by
/// delegating to the record envelope, so records nest and sit in containers
/// like any other value.
#[macro_export]
macro_rules! wire_record {
    ($ty:ty) => {
        impl $crate::Wire for $ty {
            fn encode(&self, writer: &mut $crate::Writer<'_>) -> Result<(), $crate::CodecError> {
                writer.put_record(self)
            }

            fn decode(
                &mut self,
                reader: &mut $crate::Reader<'_>,
            ) -> Result<(), $crate::CodecError> {
                reader.read_record(self)
            }
        }
    };
}

impl Writer<'_> {
    /// Encodes `record` as a tagged, length-prefixed payload.
    ///
    /// The 16-bit length is emitted as a placeholder and back-patched once
    /// the fields are written; a payload past the 16-bit maximum is a
    /// [`CodecError::SizeOverflow`].
    pub fn put_record<R: RecordCodec>(&mut self, record: &R) -> Result<(), CodecError> {
        self.put_tag(WireTag::UserDefined)?;
        let placeholder = self.sink.position();
        self.put_word(0)?;
        let body_start = self.sink.position();
        record.encode_fields(self)?;
        let len = self.sink.position() - body_start;
        if len > u16::MAX as u64 {
            return Err(self.fail(CodecError::SizeOverflow {
                shape: WireTag::UserDefined,
                len: len as usize,
            }));
        }
        self.patch_word(placeholder, len as u16)?;
        trace!(record = R::NAME, len, "encoded record");
        Ok(())
    }
}

impl Reader<'_> {
    /// Decodes `record` from a tagged, length-prefixed payload, reconciling
    /// schema differences between writer and reader.
    ///
    /// A payload longer than the fields the record consumed carries unknown
    /// trailing fields from a newer writer; they are skipped. A payload
    /// that runs out before the record's fields leaves the remaining fields
    /// at their defaults.
    pub fn read_record<R: RecordCodec>(&mut self, record: &mut R) -> Result<(), CodecError> {
        if self.field_absent() {
            return Ok(());
        }
        self.expect_tag(WireTag::UserDefined)?;
        let len = self.read_word()? as u64;
        let start = self.source.position();
        if let Some(&outer) = self.bounds.last() {
            if start + len > outer {
                return Err(self.fail(CodecError::Invalid(format!(
                    "nested record payload of {len} octets overruns its enclosing record"
                ))));
            }
        }
        self.bounds.push(start + len);
        let result = self.record_body(record, start, len);
        self.bounds.pop();
        result?;
        self.codec.notify_progress(R::NAME, len as u16);
        Ok(())
    }

    fn record_body<R: RecordCodec>(
        &mut self,
        record: &mut R,
        start: u64,
        len: u64,
    ) -> Result<(), CodecError> {
        record.decode_fields(self)?;
        let end = start + len;
        let consumed = self.source.position() - start;
        if consumed > len {
            return Err(self.fail(CodecError::Invalid(format!(
                "record consumed {consumed} octets but declared a payload of {len}"
            ))));
        }
        if consumed < len {
            debug!(record = R::NAME, excess = len - consumed, "skipping unknown trailing fields");
            while self.source.position() < end {
                self.skip_value()?;
            }
            if self.source.position() > end {
                return Err(self.fail(CodecError::Invalid(
                    "trailing value spans past the record payload".into(),
                )));
            }
        }
        Ok(())
    }
}
