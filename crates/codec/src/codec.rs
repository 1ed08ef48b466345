use core::panic::Location;

use tracing::warn;
use transport::{OctetSink, OctetSource, TransportError};

use crate::{
    Reader, Writer,
    endian::ByteOrder,
    error::{CodecError, ErrorKind},
    value::Wire,
};

/// Called with the error kind and the library-internal site (line, file)
/// that detected it. The site is advisory.
pub type ErrorHandler = Box<dyn FnMut(ErrorKind, u32, &'static str)>;

/// Called after each successfully decoded record with its name and payload
/// length in octets.
pub type ProgressHandler = Box<dyn FnMut(&'static str, u16)>;

/// Codec façade: holds the stream byte order and the handler pair, and runs
/// values against sinks and sources.
///
/// One codec serves one logical in-flight operation at a time; the `&mut`
/// receivers keep interleaved use unrepresentable. Construct, set handlers,
/// use across many streams, drop.
pub struct Codec {
    stream_order: ByteOrder,
    host_order: ByteOrder,
    emit_order_marker: bool,
    last_error: ErrorKind,
    error_handler: Option<ErrorHandler>,
    progress_handler: Option<ProgressHandler>,
}

impl Codec {
    /// Codec with the default big-endian stream order and no marker
    /// emission.
    pub fn new() -> Self {
        Self::with_stream_order(ByteOrder::default())
    }

    /// Codec that serialises multi-octet values in `order`.
    pub fn with_stream_order(order: ByteOrder) -> Self {
        Self {
            stream_order: order,
            host_order: ByteOrder::host(),
            emit_order_marker: false,
            last_error: ErrorKind::None,
            error_handler: None,
            progress_handler: None,
        }
    }

    /// When enabled, a write that starts an empty stream is preceded by the
    /// byte-order marker, letting readers negotiate instead of assuming
    /// network order.
    pub fn set_emit_order_marker(&mut self, emit: bool) {
        self.emit_order_marker = emit;
    }

    pub fn stream_order(&self) -> ByteOrder {
        self.stream_order
    }

    /// Byte order of the machine this codec was constructed on.
    pub fn host_order(&self) -> ByteOrder {
        self.host_order
    }

    pub fn set_error_handler(
        &mut self,
        handler: impl FnMut(ErrorKind, u32, &'static str) + 'static,
    ) {
        self.error_handler = Some(Box::new(handler));
    }

    pub fn set_progress_handler(&mut self, handler: impl FnMut(&'static str, u16) + 'static) {
        self.progress_handler = Some(Box::new(handler));
    }

    /// Kind of the most recent error, or [`ErrorKind::None`].
    pub fn last_error(&self) -> ErrorKind {
        self.last_error
    }

    pub fn clear_last_error(&mut self) {
        self.last_error = ErrorKind::None;
    }

    /// Encodes `value` into `sink`.
    ///
    /// Refuses to run against an unhealthy sink so the first failure stays
    /// the reported one.
    pub fn write(&mut self, sink: &mut dyn OctetSink, value: &impl Wire) -> Result<(), CodecError> {
        if !sink.healthy() {
            return Err(CodecError::Stream(TransportError::Unhealthy));
        }
        let marker_due = self.emit_order_marker && sink.position() == 0;
        let mut writer = Writer::new(self, sink);
        if marker_due {
            writer.emit_order_marker()?;
        }
        value.encode(&mut writer)
    }

    /// Decodes into `value` from `source`.
    ///
    /// A pending byte-order marker is consumed first and updates the stream
    /// order for this and later reads.
    pub fn read(
        &mut self,
        source: &mut dyn OctetSource,
        value: &mut impl Wire,
    ) -> Result<(), CodecError> {
        if !source.healthy() {
            return Err(CodecError::Stream(TransportError::Unhealthy));
        }
        let mut reader = Reader::new(self, source);
        reader.consume_order_marker()?;
        value.decode(&mut reader)
    }

    pub(crate) fn set_stream_order(&mut self, order: ByteOrder) {
        self.stream_order = order;
    }

    pub(crate) fn note_error(&mut self, kind: ErrorKind, location: &'static Location<'static>) {
        self.last_error = kind;
        warn!(?kind, file = location.file(), line = location.line(), "codec error");
        if let Some(handler) = self.error_handler.as_mut() {
            handler(kind, location.line(), location.file());
        }
    }

    pub(crate) fn notify_progress(&mut self, name: &'static str, len: u16) {
        if let Some(handler) = self.progress_handler.as_mut() {
            handler(name, len);
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
