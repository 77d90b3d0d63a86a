use rand::Rng;

use super::*;

fn random_bits(n: usize) -> Vec<bool> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.gen_bool(0.5)).collect()
}

#[test]
fn test_writer_layout_is_lsb_first() {
    let mut writer_builder = BinaryWriterBuilder::new();

    for bit in [true, false, true, true, false, false, false, false, true] {
        writer_builder.push_bit(bit);
    }

    let written = writer_builder.build();

    assert_eq!(written.written_bits, 9);
    assert_eq!(&*written.os, &[0b0000_1101, 0b0000_0001]);
}

#[test]
fn test_writer_grows_one_byte_at_a_time() {
    let mut writer_builder = BinaryWriterBuilder::new();

    for i in 0..17 {
        writer_builder.push_bit(false);
        assert_eq!(writer_builder.os.len(), bytes_for_bits(i + 1));
    }
}

#[test]
fn test_write_and_read_random() {
    let bits = random_bits(10_000);

    let mut writer_builder = BinaryWriterBuilder::new();
    for &bit in bits.iter() {
        writer_builder.push_bit(bit);
    }

    let written = writer_builder.build();
    let reader = BinaryReader::new(&written.os, written.written_bits);

    assert_eq!(reader.len(), bits.len());
    let read: Vec<bool> = reader.collect();
    assert_eq!(read, bits);
}

#[test]
fn test_indexed_read_matches_sequential() {
    let bits = random_bits(333);

    let mut writer_builder = BinaryWriterBuilder::new();
    for &bit in bits.iter() {
        writer_builder.push_bit(bit);
    }

    for (i, &bit) in bits.iter().enumerate() {
        assert_eq!(writer_builder.bit(i), bit);
    }

    let written = writer_builder.build();
    assert!(written.bits().eq(bits.iter().copied()));
}

#[test]
fn test_reader_ignores_unused_high_bits() {
    let stream = [0xFFu8, 0b1111_1010];
    let mut reader = BinaryReader::new(&stream, 11);

    let read: Vec<bool> = reader.by_ref().collect();

    assert_eq!(read.len(), 11);
    assert_eq!(&read[8..], &[false, true, false]);
    assert_eq!(reader.read_bit(), None);
}

#[test]
fn test_reader_clamps_to_stream() {
    let stream = [0u8; 2];
    let reader = BinaryReader::new(&stream, 100);

    assert_eq!(reader.len(), 16);
}

#[test]
fn test_reader_iterator_tracks_remaining() {
    let stream = [0b0010_0000u8];
    let mut reader = BinaryReader::new(&stream, 8);

    assert_eq!(reader.size_hint(), (8, Some(8)));
    assert_eq!(reader.by_ref().nth(5), Some(true));
    assert_eq!(reader.remaining(), 2);
    assert_eq!(reader.size_hint(), (2, Some(2)));
    assert_eq!(reader.read_bits, 6);
}

#[test]
fn test_code_push_until_full() {
    let mut code = Code::new();

    for i in 0..MAX_CODE_BITS {
        assert!(code.push(i % 3 == 0));
    }

    assert!(code.is_full());
    assert!(!code.push(true));
    assert_eq!(code.len(), MAX_CODE_BITS);
    assert_eq!(code.with_bit(false), None);
}

#[test]
fn test_code_equality_is_bit_exact() {
    let a = Code::new().with_bit(true).unwrap().with_bit(false).unwrap();
    let b = Code::from_raw(0b1111_1101, 2).unwrap();
    let c = Code::from_raw(0b01, 3).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string(), "10");
    assert_eq!(c.to_string(), "100");
}

#[test]
fn test_code_packed_form() {
    let mut code = Code::new();
    for bit in [true, true, false, false, false, false, false, false, false, true] {
        code.push(bit);
    }

    let packed = code.packed();

    assert_eq!(packed, vec![0b0000_0011, 0b0000_0010]);
    assert_eq!(Code::from_packed(&packed, 10), Some(code));
    assert_eq!(Code::from_packed(&packed[..1], 10), None);
    assert_eq!(Code::from_packed(&[0u8; 9], 65), None);
}

#[test]
fn test_code_prefix() {
    let short = Code::from_raw(0b01, 2).unwrap();
    let long = Code::from_raw(0b101, 3).unwrap();
    let other = Code::from_raw(0b110, 3).unwrap();

    assert!(short.is_prefix_of(&long));
    assert!(short.is_prefix_of(&short));
    assert!(!short.is_prefix_of(&other));
    assert!(!long.is_prefix_of(&short));
}

#[test]
fn test_append_sequence() {
    let code = Code::from_raw(0b110, 3).unwrap();

    let mut writer_builder = BinaryWriterBuilder::new();
    writer_builder.push_bit(true);
    writer_builder.append_sequence(&code);
    writer_builder.append_sequence(&code);

    let written = writer_builder.build();
    assert_eq!(written.written_bits, 7);
    assert_eq!(written.to_string_bits(), "1011011");

    let mut joined = Code::new();
    assert!(joined.append_sequence(&written));
    assert_eq!(joined.len(), 7);

    let full = Code::from_raw(u64::MAX, MAX_CODE_BITS).unwrap();
    assert!(!joined.append_sequence(&full));
    assert_eq!(joined.len(), 7);
}

trait ToStringBits {
    fn to_string_bits(&self) -> String;
}

impl<S: BitSequence> ToStringBits for S {
    fn to_string_bits(&self) -> String {
        self.bits().map(|b| if b { '1' } else { '0' }).collect()
    }
}
