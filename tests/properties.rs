//! Property tests for the sink, reader and string directives.

use binpacker::{pack, unpack, ByteReader, ByteSink, Endianness, Value};
use proptest::prelude::*;

fn endianness() -> impl Strategy<Value = Endianness> {
    prop_oneof![Just(Endianness::Big), Just(Endianness::Little)]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    #[test]
    fn integers_round_trip(
        order in endianness(),
        a in any::<u16>(),
        b in any::<u32>(),
        c in any::<u64>()
    ) {
        let mut sink = ByteSink::new(order, Vec::new());
        sink.push_u16(a).push_u32(b).push_u64(c);
        let bytes = sink.finish().unwrap();
        prop_assert_eq!(bytes.len(), 14);

        let mut reader = ByteReader::new(order, &bytes);
        prop_assert_eq!(reader.read_u16().unwrap(), a);
        prop_assert_eq!(reader.read_u32().unwrap(), b);
        prop_assert_eq!(reader.read_u64().unwrap(), c);
        prop_assert!(!reader.has_bytes());
    }

    #[test]
    fn floats_round_trip(order in endianness(), x in any::<f32>(), y in any::<f64>()) {
        prop_assume!(x.is_finite() && y.is_finite());

        let mut sink = ByteSink::new(order, Vec::new());
        sink.push_f32(x).push_f64(y);
        let bytes = sink.finish().unwrap();

        let mut reader = ByteReader::new(order, &bytes);
        prop_assert_eq!(f32::from_bits(reader.read_u32().unwrap()).to_bits(), x.to_bits());
        prop_assert_eq!(f64::from_bits(reader.read_u64().unwrap()).to_bits(), y.to_bits());
    }

    #[test]
    fn fixed_string_has_exact_width(text in "[a-zA-Z0-9 ]{0,40}", width in 0usize..32) {
        let bytes = pack(&format!("a{width}"), &[Value::from(text.as_str())]).unwrap();
        prop_assert_eq!(bytes.len(), width);

        let kept = text.len().min(width);
        prop_assert_eq!(&bytes[..kept], &text.as_bytes()[..kept]);
        prop_assert!(bytes[kept..].iter().all(|&b| b == 0));
    }

    #[test]
    fn tail_string_strips_only_trailing_nul(body in "[a-z\\x00]{0,20}[a-z]", nuls in 0usize..5) {
        let input = format!("{body}{}", "\0".repeat(nuls));
        let bytes = pack("a*", &[Value::from(input)]).unwrap();
        prop_assert_eq!(bytes, body.into_bytes());
    }

    #[test]
    fn packed_record_unpacks(
        order in endianness(),
        a in any::<u16>(),
        b in any::<u32>(),
        text in "[a-z]{0,12}"
    ) {
        let values = vec![Value::UInt16(a), Value::UInt32(b), Value::from(text.as_str())];
        let packer = binpacker::Packer::new(order);

        let bytes = packer.pack("nNa*", &values).unwrap();
        let fields = packer.unpack("nfirst/Nsecond/a*xthird", &bytes).unwrap();

        prop_assert_eq!(fields.into_vec(), vec![
            ("first".to_string(), Value::UInt16(a)),
            ("second".to_string(), Value::UInt32(b)),
            ("third".to_string(), Value::Text(text)),
        ]);
    }
}

#[test]
fn smallest_subnormals_encode_to_one() {
    let mut sink = ByteSink::new(Endianness::Big, Vec::new());
    sink.push_f32(f32::from_bits(1)).push_f64(f64::from_bits(1));
    assert_eq!(
        sink.finish().unwrap(),
        vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1]
    );
}

#[test]
fn unpack_ignores_trailing_bytes() {
    let fields = unpack("nonly", &[0, 3, 0xFF, 0xFF]).unwrap();
    assert_eq!(fields.get("only"), Some(&Value::UInt16(3)));
}
