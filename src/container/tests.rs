use crate::bitstreams::BinaryWriterBuilder;

use super::*;

fn build(input: &[u8]) -> Container {
    let table = CodeTable::from_bytes(input).unwrap();
    let mut writer = BinaryWriterBuilder::new();
    table.encode_into(input, &mut writer).unwrap();
    Container::new(&table, writer.build())
}

fn assert_malformed(res: Result<Container>) {
    assert!(
        matches!(res, Err(CodecError::MalformedContainer { .. })),
        "expected a malformed container, got {:?}",
        res
    );
}

#[test]
fn test_exact_layout() {
    let serialized = build(b"AAAABBBCCD").serialize().unwrap();

    #[rustfmt::skip]
    let expected = vec![
        1, 0, 0, 0, 0x00, b'A',
        2, 0, 0, 0, 0x01, b'B',
        3, 0, 0, 0, 0x07, b'C',
        3, 0, 0, 0, 0x03, b'D',
        0, 0, 0, 0,
        19, 0, 0, 0,
        0x50, 0xFD, 0x03,
    ];

    assert_eq!(serialized, expected);
}

#[test]
fn test_empty_input_layout() {
    let container = build(&[]);
    let serialized = container.serialize().unwrap();

    assert_eq!(serialized, vec![0u8; 8]);
    assert_eq!(container.serialized_len(), 8);

    let parsed = Container::parse(&serialized).unwrap();
    assert!(parsed.entries().is_empty());
    assert_eq!(parsed.payload_bits(), 0);
    assert!(parsed.payload().is_empty());
}

#[test]
fn test_serialize_then_parse() {
    let container = build(b"the quick brown fox jumps over the lazy dog");
    let serialized = container.serialize().unwrap();

    assert_eq!(serialized.len(), container.serialized_len());

    let parsed = Container::parse(&serialized).unwrap();
    assert_eq!(parsed, container);
    assert_eq!(parsed.decode_table().len(), container.entries().len());
}

#[test]
fn test_table_len() {
    let container = build(b"AAAABBBCCD");

    assert_eq!(container.table_len(), 4 * 6 + 4);
}

#[test]
fn test_every_truncation_is_malformed() {
    let serialized = build(b"mississippi river").serialize().unwrap();

    for len in 0..serialized.len() {
        assert_malformed(Container::parse(&serialized[..len]));
    }
}

#[test]
fn test_trailing_bytes_are_malformed() {
    let mut serialized = build(b"abracadabra").serialize().unwrap();
    serialized.push(0);

    assert_malformed(Container::parse(&serialized));
}

#[test]
fn test_code_too_wide() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&65u32.to_le_bytes());
    bytes.extend_from_slice(&[0xFF; 9]);
    bytes.push(b'x');
    bytes.extend_from_slice(&[0; 8]);

    assert_malformed(Container::parse(&bytes));
}

#[test]
fn test_duplicate_code() {
    #[rustfmt::skip]
    let bytes = vec![
        1, 0, 0, 0, 0x01, b'a',
        1, 0, 0, 0, 0x01, b'b',
        0, 0, 0, 0,
        0, 0, 0, 0,
    ];

    assert_malformed(Container::parse(&bytes));
}

#[test]
fn test_duplicate_symbol() {
    #[rustfmt::skip]
    let bytes = vec![
        1, 0, 0, 0, 0x00, b'a',
        1, 0, 0, 0, 0x01, b'a',
        0, 0, 0, 0,
        0, 0, 0, 0,
    ];

    assert_malformed(Container::parse(&bytes));
}

#[test]
fn test_unused_code_bits_are_masked() {
    #[rustfmt::skip]
    let bytes = vec![
        1, 0, 0, 0, 0xF0, b'a',
        1, 0, 0, 0, 0xF1, b'b',
        0, 0, 0, 0,
        3, 0, 0, 0, 0b0000_0110,
    ];

    let parsed = Container::parse(&bytes).unwrap();
    let table = parsed.decode_table();

    assert_eq!(table.get(&Code::from_raw(0, 1).unwrap()), Some(b'a'));
    assert_eq!(table.get(&Code::from_raw(1, 1).unwrap()), Some(b'b'));
}

#[test]
fn test_zero_payload_with_table() {
    #[rustfmt::skip]
    let bytes = vec![
        1, 0, 0, 0, 0x00, b'a',
        0, 0, 0, 0,
        0, 0, 0, 0,
    ];

    let parsed = Container::parse(&bytes).unwrap();

    assert_eq!(parsed.entries().len(), 1);
    assert_eq!(parsed.payload_bits(), 0);
}

#[test]
fn test_error_reports_offset() {
    let serialized = build(b"AAAABBBCCD").serialize().unwrap();

    // Cut inside the payload length field
    match Container::parse(&serialized[..30]) {
        Err(CodecError::MalformedContainer { offset, .. }) => assert_eq!(offset, 28),
        other => panic!("unexpected {:?}", other),
    }
}
