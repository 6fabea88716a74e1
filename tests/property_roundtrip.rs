use binstream::*;
use proptest::prelude::*;
use std::io::Cursor;

binary_struct! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Reading {
        sensor: u8,
        stamp: i64,
        value: f64,
        flags: [bool; 3],
    }
}

fn reading() -> impl Strategy<Value = Reading> {
    (
        any::<u8>(),
        any::<i64>(),
        prop::num::f64::NORMAL,
        any::<[bool; 3]>(),
    )
        .prop_map(|(sensor, stamp, value, flags)| Reading {
            sensor,
            stamp,
            value,
            flags,
        })
}

proptest! {
    #[test]
    fn roundtrip_scalars_both_orders(b in any::<u16>(), c in any::<i32>(), d in any::<u128>()) {
        let le = binary::pack::<LittleEndian, _>((b, c, d));
        let be = binary::pack::<BigEndian, _>((b, c, d));
        prop_assert_eq!(le.len(), 22);
        prop_assert_eq!(binary::unpack::<LittleEndian, (u16, i32, u128)>(&le).unwrap(), (b, c, d));
        prop_assert_eq!(binary::unpack::<BigEndian, (u16, i32, u128)>(&be).unwrap(), (b, c, d));
    }

    #[test]
    fn roundtrip_structs(ref values in prop::collection::vec(reading(), 1..16)) {
        for value in values {
            let bytes = binary::to_bytes::<BigEndian, _>(value);
            prop_assert_eq!(bytes.len(), Reading::SIZE);
            prop_assert_eq!(binary::from_bytes::<BigEndian, Reading>(&bytes).unwrap(), *value);
        }
    }

    #[test]
    fn reversed_order_reverses_scalar_bytes(c in any::<u32>(), d in any::<u64>()) {
        let mut le = binary::to_bytes::<LittleEndian, _>(&c);
        le.reverse();
        prop_assert_eq!(le, binary::to_bytes::<BigEndian, _>(&c));

        let mut le = binary::to_bytes::<LittleEndian, _>(&d);
        le.reverse();
        prop_assert_eq!(le, binary::to_bytes::<BigEndian, _>(&d));
    }

    #[test]
    fn packing_is_concatenation(a in any::<u8>(), b in any::<u16>(), value in reading()) {
        let together = binary::pack::<LittleEndian, _>((a, b, value));
        let mut apart = binary::to_bytes::<LittleEndian, _>(&a);
        apart.extend(binary::to_bytes::<LittleEndian, _>(&b));
        apart.extend(binary::to_bytes::<LittleEndian, _>(&value));
        prop_assert_eq!(together, apart);
    }

    #[test]
    fn arrays_are_repeated_elements(values in any::<[u32; 6]>()) {
        let whole = binary::to_bytes::<BigEndian, _>(&values);
        let parts: Vec<u8> = values
            .iter()
            .flat_map(|v| binary::to_bytes::<BigEndian, _>(v))
            .collect();
        prop_assert_eq!(whole, parts);
    }

    #[test]
    fn unpack_ignores_trailing_bytes(b in any::<u16>(), ref tail in prop::collection::vec(any::<u8>(), 0..32)) {
        let mut bytes = binary::to_bytes::<BigEndian, _>(&b);
        bytes.extend_from_slice(tail);
        prop_assert_eq!(binary::unpack::<BigEndian, u16>(&bytes).unwrap(), b);
    }

    #[test]
    fn short_input_is_rejected(ref bytes in prop::collection::vec(any::<u8>(), 0..8)) {
        let is_size_mismatch = matches!(
            binary::unpack::<LittleEndian, u64>(bytes),
            Err(Error::SizeMismatch { expected: 8, .. })
        );
        prop_assert!(is_size_mismatch);
    }
}

proptest! {
    #[test]
    fn synchronized_cursors_never_diverge(ref values in prop::collection::vec(any::<(u8, u32)>(), 1..32), seek in any::<prop::sample::Index>()) {
        let mut stream = BinaryStream::<_, Synchronized, LittleEndian>::new(Cursor::new(Vec::new())).unwrap();
        for value in values {
            stream.write(value).unwrap();
            prop_assert_eq!(stream.tell_input(), stream.tell_output());
        }
        let records = values.len();
        let start = seek.index(records);
        stream.to_begin((start * 5) as u64).unwrap();
        prop_assert_eq!(stream.tell_input(), stream.tell_output());
        for value in &values[start..] {
            prop_assert_eq!(stream.read::<(u8, u32)>().unwrap(), *value);
            prop_assert_eq!(stream.tell_input(), stream.tell_output());
        }
        prop_assert!(stream.eof().unwrap());
    }

    #[test]
    fn unsynchronized_cursors_move_independently(ref values in prop::collection::vec(any::<u16>(), 1..32)) {
        let mut stream = BinaryStream::<_, Unsynchronized, BigEndian>::new(Cursor::new(Vec::new())).unwrap();
        for (i, value) in values.iter().enumerate() {
            stream.write(value).unwrap();
            prop_assert_eq!(stream.tell_output(), 2 * (i as u64 + 1));
            prop_assert_eq!(stream.tell_input(), i as u64 * 2);

            prop_assert_eq!(stream.read::<u16>().unwrap(), *value);
            prop_assert_eq!(stream.tell_input(), stream.tell_output());
        }
    }

    #[test]
    fn text_roundtrip_unicode(ref s in "\\PC{0,64}") {
        let codec = TextCodec::unicode();
        for encoding in ["UTF-8", "UTF-16", "UTF-16LE", "UTF-16BE", "UTF-32", "UTF-32LE", "UTF-32BE"] {
            let raw = codec.encode_str(s, encoding).unwrap();
            prop_assert_eq!(&codec.decode_string(&raw, encoding).unwrap(), s);
        }
    }

    #[test]
    fn raw_text_is_byte_copy(ref s in "[a-zA-Z0-9 _-]{0,64}") {
        let codec = TextCodec::raw();
        prop_assert_eq!(codec.encode_str(s, DEFAULT_ENCODING).unwrap(), s.as_bytes().to_vec());
    }
}
