//! Property tests for line splitting and the payload codec.

use proptest::prelude::*;
use taglog_core::{FormatSpec, LineBuffer, Value, decode, encode};

fn split_all(bytes: &[u8], cuts: &[usize]) -> (Vec<String>, Option<String>) {
    let mut buffer = LineBuffer::new();
    let mut lines = Vec::new();
    let mut start = 0;
    for &cut in cuts {
        let end = cut.clamp(start, bytes.len());
        lines.extend(buffer.feed(&bytes[start..end]));
        start = end;
    }
    lines.extend(buffer.feed(&bytes[start..]));
    (lines, buffer.finish())
}

// Property: line output does not depend on how the stream is chunked
proptest! {
    #[test]
    fn prop_chunking_does_not_change_lines(
        text in "[a-zA-Z0-9:<=+/ \n]{0,200}",
        mut cuts in prop::collection::vec(0usize..200, 0..12),
    ) {
        cuts.sort_unstable();
        let whole = split_all(text.as_bytes(), &[]);
        let chunked = split_all(text.as_bytes(), &cuts);
        prop_assert_eq!(chunked, whole);
    }
}

// Property: values that fit their fields survive encode then decode
proptest! {
    #[test]
    fn prop_network_data_codec(send_count in any::<u32>(), voltage in any::<u16>()) {
        let spec = FormatSpec::compile("<IH").unwrap();
        let values = vec![Value::Int(i64::from(send_count)), Value::Int(i64::from(voltage))];
        let payload = encode(&spec, &values).unwrap();
        prop_assert_eq!(payload.len(), 6);
        prop_assert_eq!(decode(&spec, &payload).unwrap(), values);
    }
}

// Property: decoding arbitrary bytes never panics and only succeeds at the exact length
proptest! {
    #[test]
    fn prop_decode_requires_exact_length(payload in prop::collection::vec(any::<u8>(), 0..64)) {
        let spec = FormatSpec::compile("<B3x2I3i3bx2I2B2x").unwrap();
        let decoded = decode(&spec, &payload);
        prop_assert_eq!(decoded.is_ok(), payload.len() == 40);
    }
}

// Property: any 92-byte payload re-encodes to itself under the NAV-PVT layout
proptest! {
    #[test]
    fn prop_pvt_bytes_round_trip(payload in prop::collection::vec(any::<u8>(), 92)) {
        let spec = FormatSpec::compile("<IH6BIi4B4i2I5i2I2HIihH").unwrap();
        let values = decode(&spec, &payload).unwrap();
        prop_assert_eq!(values.len(), 33);
        prop_assert_eq!(encode(&spec, &values).unwrap(), payload);
    }
}
