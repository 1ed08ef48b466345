use bytes::{BufMut, Bytes, BytesMut};

use crate::TransportError;

/// Ordered octet output with positional back-patching.
pub trait OctetSink {
    /// Appends `octets` at the current position.
    fn append(&mut self, octets: &[u8]) -> Result<(), TransportError>;

    /// Overwrites previously appended octets starting at `position`.
    ///
    /// The append position does not move. The whole patched range must lie
    /// within the octets already written.
    fn patch(&mut self, position: u64, octets: &[u8]) -> Result<(), TransportError>;

    /// Current append position, in octets from the start of the stream.
    fn position(&self) -> u64;

    fn healthy(&self) -> bool;

    /// Marks the sink failed; later operations return [`TransportError::Unhealthy`].
    fn set_unhealthy(&mut self);
}

/// Growable in-memory sink backed by [`BytesMut`].
#[derive(Debug)]
pub struct BufferSink {
    buf: BytesMut,
    healthy: bool,
}

impl BufferSink {
    pub fn new() -> Self {
        Self { buf: BytesMut::new(), healthy: true }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity), healthy: true }
    }

    /// All octets written so far.
    pub fn octets(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the sink and returns the written stream.
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

impl Default for BufferSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OctetSink for BufferSink {
    fn append(&mut self, octets: &[u8]) -> Result<(), TransportError> {
        if !self.healthy {
            return Err(TransportError::Unhealthy);
        }
        self.buf.put_slice(octets);
        Ok(())
    }

    fn patch(&mut self, position: u64, octets: &[u8]) -> Result<(), TransportError> {
        if !self.healthy {
            return Err(TransportError::Unhealthy);
        }
        let written = self.buf.len() as u64;
        if position + octets.len() as u64 > written {
            self.healthy = false;
            return Err(TransportError::PatchOutOfBounds {
                position,
                len: octets.len(),
                written,
            });
        }
        let start = position as usize;
        self.buf[start..start + octets.len()].copy_from_slice(octets);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.buf.len() as u64
    }

    fn healthy(&self) -> bool {
        self.healthy
    }

    fn set_unhealthy(&mut self) {
        self.healthy = false;
    }
}
