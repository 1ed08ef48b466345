//! Container shapes: ordered and linked sequences, keyed mappings, unique
//! sets, owned pointers, and the packed boolean sequence.
//!
//! Containers encode as their shape tag, a 16-bit element count, then each
//! element as a standalone value. Decode clears the target and reads
//! exactly the counted elements, default-constructing each one first; boxed
//! elements are freshly allocated and owned by the container afterwards.

use std::collections::{BTreeMap, BTreeSet, LinkedList};
use std::ops::{Deref, DerefMut};

use crate::{Reader, WireTag, Writer, error::CodecError, value::Wire};

impl<T: Wire> Wire for Vec<T> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::Vector, self.len())?;
        for element in self {
            element.encode(writer)?;
        }
        Ok(())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let count = reader.read_sized(WireTag::Vector)?;
        self.clear();
        self.reserve(count as usize);
        for _ in 0..count {
            let mut element = T::default();
            element.decode(reader)?;
            self.push(element);
        }
        Ok(())
    }
}

impl<T: Wire> Wire for LinkedList<T> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::List, self.len())?;
        for element in self {
            element.encode(writer)?;
        }
        Ok(())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let count = reader.read_sized(WireTag::List)?;
        self.clear();
        for _ in 0..count {
            let mut element = T::default();
            element.decode(reader)?;
            self.push_back(element);
        }
        Ok(())
    }
}

impl<K: Wire + Ord, V: Wire> Wire for BTreeMap<K, V> {
    /// Entries travel in ascending key order, key then mapped value, each
    /// tagged independently.
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::Map, self.len())?;
        for (key, value) in self {
            key.encode(writer)?;
            value.encode(writer)?;
        }
        Ok(())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let count = reader.read_sized(WireTag::Map)?;
        self.clear();
        for _ in 0..count {
            let mut key = K::default();
            key.decode(reader)?;
            let mut value = V::default();
            value.decode(reader)?;
            self.insert(key, value);
        }
        Ok(())
    }
}

impl<T: Wire + Ord> Wire for BTreeSet<T> {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::Set, self.len())?;
        for element in self {
            element.encode(writer)?;
        }
        Ok(())
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let count = reader.read_sized(WireTag::Set)?;
        self.clear();
        for _ in 0..count {
            let mut element = T::default();
            element.decode(reader)?;
            self.insert(element);
        }
        Ok(())
    }
}

impl<T: Wire> Wire for Box<T> {
    /// The pointee travels; the box itself has no wire presence.
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        (**self).encode(writer)
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        (**self).decode(reader)
    }
}

/// Ordered boolean sequence with the packed wire form: `VECTOR` tag,
/// element count, then one untagged octet per element (`0x00`/`0x01`).
///
/// `bool` has no standalone wire shape, so `Vec<bool>` does not implement
/// [`Wire`]; this wrapper is the boolean sequence type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoolVec(pub Vec<bool>);

impl BoolVec {
    pub fn new() -> Self {
        Self(Vec::new())
    }
}

impl From<Vec<bool>> for BoolVec {
    fn from(flags: Vec<bool>) -> Self {
        Self(flags)
    }
}

impl Deref for BoolVec {
    type Target = Vec<bool>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for BoolVec {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Wire for BoolVec {
    fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
        writer.begin_sized(WireTag::Vector, self.0.len())?;
        let octets: Vec<u8> = self.0.iter().map(|&flag| flag as u8).collect();
        writer.put_octets(&octets)
    }

    fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
        if reader.field_absent() {
            return Ok(());
        }
        let count = reader.read_sized(WireTag::Vector)? as usize;
        let octets = reader.read_octet_vec(count)?;
        self.0 = octets.into_iter().map(|octet| octet != 0).collect();
        Ok(())
    }
}
