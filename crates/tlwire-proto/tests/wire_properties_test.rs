//! Property tests for the wire rules.
//!
//! Buffers are produced by [`Writer`] and read back by [`Cursor`] and
//! [`ObjectReader`]; lengths, consumed byte counts, and failure modes must
//! all line up with the format.

use hex_literal::hex;
use proptest::prelude::*;
use tlwire_proto::{
    Constructor, Cursor, ObjectReader, ProtocolError, TypeRegistry, Writer,
    bytestring::encoded_len,
};

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Number(Number),
    Blob(Blob),
}

#[derive(Debug, Clone, PartialEq)]
struct Number {
    value: i32,
}

#[derive(Debug, Clone, PartialEq)]
struct Blob {
    tag: i64,
    data: Vec<u8>,
    flag: bool,
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Blob> for Value {
    fn from(b: Blob) -> Self {
        Self::Blob(b)
    }
}

impl Constructor<Value> for Number {
    const ID: u32 = 0x0000_0001;
    const NAME: &'static str = "number";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Value>) -> tlwire_proto::Result<Self> {
        Ok(Self { value: cursor.read_i32()? })
    }
}

impl Constructor<Value> for Blob {
    const ID: u32 = 0x7b1d_c0de;
    const NAME: &'static str = "blob";

    fn populate(cursor: &mut Cursor, _: &mut ObjectReader<'_, Value>) -> tlwire_proto::Result<Self> {
        let tag = cursor.read_i64()?;
        let data = cursor.read_bytes()?.to_vec();
        let flag = cursor.read_bool()?;
        Ok(Self { tag, data, flag })
    }
}

fn registry() -> TypeRegistry<Value> {
    let mut registry = TypeRegistry::new();
    registry.register::<Number>().unwrap();
    registry.register::<Blob>().unwrap();
    registry
}

fn encode_blob(blob: &Blob) -> Vec<u8> {
    let mut writer = Writer::new();
    writer.write_u32(Blob::ID);
    writer.write_i64(blob.tag);
    writer.write_bytes(&blob.data).unwrap();
    writer.write_bool(blob.flag);
    writer.into_bytes().to_vec()
}

fn padding(need: usize) -> usize {
    (4 - need) % 4
}

proptest! {
    #[test]
    fn short_form_round_trip(data in prop::collection::vec(any::<u8>(), 0..=253)) {
        let mut writer = Writer::new();
        writer.write_bytes(&data).unwrap();

        let mut cursor = Cursor::new(writer.into_bytes());
        let decoded = cursor.read_bytes().unwrap();

        prop_assert_eq!(decoded.as_ref(), data.as_slice());
        prop_assert_eq!(cursor.tell(), 1 + data.len() + padding((data.len() + 1) % 4));
        prop_assert_eq!(cursor.tell() % 4, 0);
        prop_assert!(cursor.is_exhausted());
    }

    #[test]
    fn long_form_round_trip(data in prop::collection::vec(any::<u8>(), 254..4096)) {
        let mut writer = Writer::new();
        writer.write_bytes(&data).unwrap();

        let mut cursor = Cursor::new(writer.into_bytes());
        let decoded = cursor.read_bytes().unwrap();

        prop_assert_eq!(decoded.as_ref(), data.as_slice());
        prop_assert_eq!(cursor.tell(), 4 + data.len() + padding(data.len() % 4));
        prop_assert_eq!(cursor.tell(), encoded_len(data.len()));
    }

    #[test]
    fn truncated_byte_string_never_decodes(
        data in prop::collection::vec(any::<u8>(), 0..600),
        cut in any::<prop::sample::Index>(),
    ) {
        let mut writer = Writer::new();
        writer.write_bytes(&data).unwrap();
        let full = writer.into_bytes();
        let short = full.slice(..cut.index(full.len()));

        let mut cursor = Cursor::new(short);
        let is_underrun = matches!(cursor.read_bytes(), Err(ProtocolError::BufferUnderrun { .. }));
        prop_assert!(is_underrun);
    }

    #[test]
    fn object_decode_is_deterministic(tag in any::<i64>(), data in prop::collection::vec(any::<u8>(), 0..512), flag in any::<bool>()) {
        let registry = registry();
        let blob = Blob { tag, data, flag };
        let bytes = encode_blob(&blob);

        let first = ObjectReader::new(&registry).decode(bytes.clone()).unwrap();
        let second = ObjectReader::new(&registry).decode(bytes).unwrap();

        prop_assert_eq!(&first, &Value::Blob(blob));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn truncated_object_fails_with_underrun(
        tag in any::<i64>(),
        data in prop::collection::vec(any::<u8>(), 0..300),
        cut in any::<prop::sample::Index>(),
    ) {
        let registry = registry();
        let bytes = encode_blob(&Blob { tag, data, flag: true });
        let short = bytes[..cut.index(bytes.len())].to_vec();

        let result = ObjectReader::new(&registry).decode(short);
        let is_underrun = matches!(result, Err(ProtocolError::BufferUnderrun { .. }));
        prop_assert!(is_underrun);
    }

    #[test]
    fn unknown_identifier_consumes_four_bytes(
        id in any::<u32>().prop_filter("registered", |id| *id != Number::ID && *id != Blob::ID),
        tail in prop::collection::vec(any::<u8>(), 0..32),
    ) {
        let registry = registry();
        let mut bytes = id.to_le_bytes().to_vec();
        bytes.extend_from_slice(&tail);

        let mut cursor = Cursor::new(bytes);
        let result = ObjectReader::new(&registry).read_object(&mut cursor);

        prop_assert_eq!(result, Err(ProtocolError::UnknownTypeIdentifier(id)));
        prop_assert_eq!(cursor.tell(), 4);
    }
}

#[test]
fn scenario_short_string() {
    let mut cursor = Cursor::from_slice(&hex!("02 41 42 00"));
    assert_eq!(cursor.read_bytes().unwrap().as_ref(), b"AB");
    assert_eq!(cursor.tell(), 4);
}

#[test]
fn scenario_long_string() {
    let mut bytes = hex!("fe 2c 01 00").to_vec();
    bytes.extend(std::iter::repeat_n(0x5a, 300));

    let mut cursor = Cursor::new(bytes);
    let payload = cursor.read_bytes().unwrap();
    assert_eq!(payload.len(), 300);
    assert!(payload.iter().all(|b| *b == 0x5a));
    assert_eq!(cursor.tell(), 4 + 300);
}

#[test]
fn scenario_single_int_object() {
    let registry = registry();
    let value = ObjectReader::new(&registry).decode(hex!("01000000 2a000000").to_vec()).unwrap();
    assert_eq!(value, Value::Number(Number { value: 42 }));
}

#[test]
fn scenario_empty_registry() {
    let registry = TypeRegistry::<Value>::new();
    let err = ObjectReader::new(&registry).decode(hex!("ffffffff").to_vec()).unwrap_err();
    assert_eq!(err, ProtocolError::UnknownTypeIdentifier(0xffff_ffff));
    assert_eq!(err.to_string(), "unknown type identifier 0xffffffff");
}

#[test]
fn short_buffers_fail_every_primitive() {
    let mut cursor = Cursor::from_slice(&[0; 3]);
    assert!(matches!(cursor.read_u32(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_i64(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_f32(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_f64(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_int128(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_int256(), Err(ProtocolError::BufferUnderrun { .. })));
    assert!(matches!(cursor.read_bool(), Err(ProtocolError::BufferUnderrun { .. })));
    assert_eq!(cursor.tell(), 0);
}
