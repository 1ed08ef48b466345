//! Numeric primitives: `LITERAL` tag, then exactly the value's width in
//! octets, in the stream byte order. Floats travel as their IEEE-754 bit
//! pattern and are swapped without revalidation.

use bytes::{Buf, BufMut};

use crate::{Reader, WireTag, Writer, endian::ByteOrder, error::CodecError, value::Wire};

macro_rules! wire_literal {
    ($ty:ty, $width:expr, $put_be:ident, $put_le:ident, $get_be:ident, $get_le:ident) => {
        impl Wire for $ty {
            fn encode(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
                writer.put_tag(WireTag::Literal)?;
                let mut raw = [0u8; $width];
                {
                    let mut buf = &mut raw[..];
                    match writer.order() {
                        ByteOrder::Big => buf.$put_be(*self),
                        ByteOrder::Little => buf.$put_le(*self),
                    }
                }
                writer.put_octets(&raw)
            }

            fn decode(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
                if reader.field_absent() {
                    return Ok(());
                }
                reader.expect_tag(WireTag::Literal)?;
                let mut raw = [0u8; $width];
                reader.read_octets(&mut raw)?;
                *self = match reader.order() {
                    ByteOrder::Big => (&raw[..]).$get_be(),
                    ByteOrder::Little => (&raw[..]).$get_le(),
                };
                Ok(())
            }
        }
    };
}

wire_literal!(u8, 1, put_u8, put_u8, get_u8, get_u8);
wire_literal!(i8, 1, put_i8, put_i8, get_i8, get_i8);
wire_literal!(u16, 2, put_u16, put_u16_le, get_u16, get_u16_le);
wire_literal!(i16, 2, put_i16, put_i16_le, get_i16, get_i16_le);
wire_literal!(u32, 4, put_u32, put_u32_le, get_u32, get_u32_le);
wire_literal!(i32, 4, put_i32, put_i32_le, get_i32, get_i32_le);
wire_literal!(u64, 8, put_u64, put_u64_le, get_u64, get_u64_le);
wire_literal!(i64, 8, put_i64, put_i64_le, get_i64, get_i64_le);
wire_literal!(f32, 4, put_f32, put_f32_le, get_f32, get_f32_le);
wire_literal!(f64, 8, put_f64, put_f64_le, get_f64, get_f64_le);
