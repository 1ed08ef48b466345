//! End-to-end round trips through the codec façade.

use std::collections::BTreeMap;

use codec::{
    BoolVec, ByteOrder, Codec, CodecError, ErrorKind, FixedStr, Reader, RecordCodec, WideString,
    Wire, Writer,
};
use transport::BufferSource;

use crate::records::{AlarmLog, Date, DeviceProfile, LOG_TYPE_ALARM};
use crate::util;

#[test]
fn date_wire_layout_and_roundtrip() {
    util::init_tracing();
    let mut codec = Codec::new();
    let original = Date::new(31, 12, 2024);
    let wire = util::encode(&mut codec, &original);

    // tag, payload length 9, then three framed 16-bit literals
    assert_eq!(
        wire,
        [0x1F, 0x00, 0x09, 0x01, 0x00, 0x1F, 0x01, 0x00, 0x0C, 0x01, 0x07, 0xE8]
    );
    assert_eq!(util::decode::<Date>(&mut codec, wire), original);
}

#[test]
fn alarm_log_roundtrip_preserves_nested_record() {
    util::init_tracing();
    let mut codec = Codec::new();
    let original = AlarmLog {
        log_type: LOG_TYPE_ALARM,
        date: Date::new(1, 1, 2001),
        alarm_value: 0x1122_3344,
    };
    let wire = util::encode(&mut codec, &original);
    let decoded = util::decode::<AlarmLog>(&mut codec, wire);

    assert_eq!(decoded.alarm_value, 0x1122_3344);
    assert_eq!(decoded.date.year, 2001);
    assert_eq!(decoded, original);
}

#[test]
fn map_of_records_iterates_keys_ascending() {
    util::init_tracing();
    let mut codec = Codec::new();
    let mut original = BTreeMap::new();
    original.insert(1i32, Date::new(2, 2, 2002));
    original.insert(0i32, Date::new(1, 1, 2001));

    let wire = util::encode(&mut codec, &original);
    let decoded = util::decode::<BTreeMap<i32, Date>>(&mut codec, wire);

    let keys: Vec<i32> = decoded.keys().copied().collect();
    assert_eq!(keys, vec![0, 1]);
    assert_eq!(decoded[&0], Date::new(1, 1, 2001));
    assert_eq!(decoded[&1], Date::new(2, 2, 2002));
}

#[test]
fn device_profile_roundtrip_covers_every_shape() {
    util::init_tracing();
    let mut codec = Codec::new();
    let original = DeviceProfile {
        name: "probe-7".to_owned(),
        label: WideString::from("Größenmaßstäbe"),
        serial: FixedStr::try_new("SN-0042").unwrap(),
        flags: BoolVec::from(vec![true, false, true]),
        readings: vec![10, 20, 30],
        thresholds: [(1u8, -5i32), (2u8, 40i32)].into_iter().collect(),
    };
    let wire = util::encode(&mut codec, &original);
    assert_eq!(util::decode::<DeviceProfile>(&mut codec, wire), original);
}

#[test]
fn boxed_record_container_roundtrip() {
    util::init_tracing();
    let mut codec = Codec::new();
    let original = vec![Box::new(Date::new(5, 6, 2020)), Box::new(Date::new(7, 8, 2021))];
    let wire = util::encode(&mut codec, &original);
    let decoded: Vec<Box<Date>> = util::decode(&mut codec, wire);
    assert_eq!(decoded, original);
}

#[test]
fn all_primitive_widths_roundtrip_in_both_orders() {
    #[derive(Debug, Default, PartialEq)]
    struct Widths {
        a: u8,
        b: i8,
        c: u16,
        d: i16,
        e: u32,
        f: i32,
        g: u64,
        h: i64,
        i: f32,
        j: f64,
    }

    impl RecordCodec for Widths {
        const NAME: &'static str = "Widths";

        fn encode_fields(&self, writer: &mut Writer<'_>) -> Result<(), CodecError> {
            self.a.encode(writer)?;
            self.b.encode(writer)?;
            self.c.encode(writer)?;
            self.d.encode(writer)?;
            self.e.encode(writer)?;
            self.f.encode(writer)?;
            self.g.encode(writer)?;
            self.h.encode(writer)?;
            self.i.encode(writer)?;
            self.j.encode(writer)
        }

        fn decode_fields(&mut self, reader: &mut Reader<'_>) -> Result<(), CodecError> {
            self.a.decode(reader)?;
            self.b.decode(reader)?;
            self.c.decode(reader)?;
            self.d.decode(reader)?;
            self.e.decode(reader)?;
            self.f.decode(reader)?;
            self.g.decode(reader)?;
            self.h.decode(reader)?;
            self.i.decode(reader)?;
            self.j.decode(reader)
        }
    }

    codec::wire_record!(Widths);

    util::init_tracing();
    let original = Widths {
        a: 0xFE,
        b: -2,
        c: 0xBEEF,
        d: -30_000,
        e: 0xDEAD_BEEF,
        f: i32::MIN,
        g: u64::MAX,
        h: -1,
        i: 2.5,
        j: -1.0e300,
    };
    for order in [ByteOrder::Big, ByteOrder::Little] {
        let mut codec = Codec::with_stream_order(order);
        let wire = util::encode(&mut codec, &original);
        assert_eq!(util::decode::<Widths>(&mut codec, wire), original);
    }
}

#[test]
fn cross_endian_roundtrip_negotiated_by_marker() {
    util::init_tracing();
    let mut writer_codec = Codec::with_stream_order(ByteOrder::Little);
    writer_codec.set_emit_order_marker(true);
    let original = AlarmLog {
        log_type: LOG_TYPE_ALARM,
        date: Date::new(3, 3, 2003),
        alarm_value: 0x0A0B_0C0D,
    };
    let wire = util::encode(&mut writer_codec, &original);
    assert_eq!(&wire[..2], &[0x1E, 0x02]);

    // the reader assumes network order until the marker says otherwise
    let mut reader_codec = Codec::new();
    let decoded = util::decode::<AlarmLog>(&mut reader_codec, wire);
    assert_eq!(decoded, original);
    assert_eq!(reader_codec.stream_order(), ByteOrder::Little);
}

#[test]
fn little_endian_stream_without_marker_needs_a_configured_reader() {
    util::init_tracing();
    let mut writer_codec = Codec::with_stream_order(ByteOrder::Little);
    let original = Date::new(9, 9, 1999);
    let wire = util::encode(&mut writer_codec, &original);

    let mut reader_codec = Codec::with_stream_order(ByteOrder::Little);
    assert_eq!(util::decode::<Date>(&mut reader_codec, wire), original);
}

#[test]
fn decode_leaves_stream_position_at_the_next_value() {
    util::init_tracing();
    let mut codec = Codec::new();
    let mut wire = util::encode(&mut codec, &Date::new(1, 2, 2003));
    wire.extend_from_slice(&util::encode(&mut codec, &0x55AAu16));

    let mut source = BufferSource::from(wire);
    let mut date = Date::default();
    codec.read(&mut source, &mut date).unwrap();
    let mut trailing = 0u16;
    codec.read(&mut source, &mut trailing).unwrap();

    assert_eq!(date, Date::new(1, 2, 2003));
    assert_eq!(trailing, 0x55AA);
    assert_eq!(source.remaining(), 0);
    assert_eq!(codec.last_error(), ErrorKind::None);
}
