//! Narrow strings, wide strings, and fixed-capacity character buffers.

use std::fmt;

use crate::{Reader, WireTag, Writer, error::CodecError, value::Wire};

impl Wire for String {
    /// `STRING` tag, 16-bit octet count, then the UTF-8 octets.
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::String, self.len())?;
        writer.put_octets(self.as_bytes())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let len = reader.read_sized(WireTag::String)? as usize;
        let octets = reader.read_octet_vec(len)?;
        match String::from_utf8(octets) {
            Ok(value) => {
                *self = value;
                Ok(())
            }
            Err(_) => {
                Err(reader.fail(CodecError::Invalid("string payload is not valid UTF-8".into())))
            }
        }
    }
}

/// Wide string travelling as 16-bit code units.
///
/// The wire width is fixed at two octets per unit whatever the host's
/// native wide width; supplementary-plane characters take two units (a
/// surrogate pair), so every unit fits the cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WideString(String);

impl WideString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of 16-bit code units this string occupies on the wire.
    pub fn unit_len(&self) -> usize {
        self.0.encode_utf16().count()
    }
}

impl From<&str> for WideString {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for WideString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WideString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Wire for WideString {
    /// `WSTRING` tag, 16-bit unit count, then two octets per unit in the
    /// stream byte order.
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        let units: Vec<u16> = self.0.encode_utf16().collect();
        writer.begin_sized(WireTag::WString, units.len())?;
        for unit in units {
            writer.put_word(unit)?;
        }
        Ok(())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let len = reader.read_sized(WireTag::WString)? as usize;
        let mut units = Vec::with_capacity(len);
        for _ in 0..len {
            units.push(reader.read_word()?);
        }
        match String::from_utf16(&units) {
            Ok(value) => {
                self.0 = value;
                Ok(())
            }
            Err(_) => Err(reader
                .fail(CodecError::Invalid("wide string payload is not valid UTF-16".into()))),
        }
    }
}

/// Fixed-capacity, NUL-terminated character buffer.
///
/// Mirrors a C character array on the wire: tag `STRING`, size = content
/// length + 1 (the terminator is counted and transmitted). Decoding a size
/// larger than the capacity is a
/// [`StringTooLong`](crate::ErrorKind::StringTooLong) error.
#[derive(Clone, Copy)]
pub struct FixedStr<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> FixedStr<N> {
    pub fn new() -> Self {
        Self { bytes: [0; N] }
    }

    /// Builds from `content`, or `None` when it does not fit alongside the
    /// terminator.
    pub fn try_new(content: &str) -> Option<Self> {
        if content.len() + 1 > N {
            return None;
        }
        let mut value = Self::new();
        value.bytes[..content.len()].copy_from_slice(content.as_bytes());
        Some(value)
    }

    /// Content octets up to the terminator.
    pub fn as_octets(&self) -> &[u8] {
        &self.bytes[..self.content_len()]
    }

    /// Content as UTF-8, when it is.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self.as_octets()).ok()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn is_empty(&self) -> bool {
        self.content_len() == 0
    }

    fn content_len(&self) -> usize {
        self.bytes.iter().position(|&octet| octet == 0).unwrap_or(N)
    }
}

impl<const N: usize> Default for FixedStr<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> PartialEq for FixedStr<N> {
    fn eq(&self, other: &Self) -> bool {
        self.as_octets() == other.as_octets()
    }
}

impl<const N: usize> Eq for FixedStr<N> {}

impl<const N: usize> fmt::Debug for FixedStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedStr<{N}>({:?})", String::from_utf8_lossy(self.as_octets()))
    }
}

impl<const N: usize> Wire for FixedStr<N> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        let len = (self.content_len() + 1).min(N);
        writer.begin_sized(WireTag::String, len)?;
        writer.put_octets(&self.bytes[..len])
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let len = reader.read_sized(WireTag::String)? as usize;
        if len > N {
            return Err(reader.fail(CodecError::StringTooLong { size: len, capacity: N }));
        }
        self.bytes = [0; N];
        reader.read_octets(&mut self.bytes[..len])
    }
}
