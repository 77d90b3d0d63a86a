use serde::{Deserialize, Serialize};

use crate::{
    bitstreams::BinaryWriterBuilder,
    container::Container,
    error::Result,
    huffman::{CodeTable, SymbolDecoder},
};

/// What one call to [`encode_with_stats`] produced.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CompressionStats {
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub distinct_symbols: usize,
    pub table_bytes: usize,
    pub payload_bits: usize,
    pub min_code_len: usize,
    pub max_code_len: usize,
}

impl CompressionStats {
    /// Output size over input size; 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }

    /// Average payload bits spent per input byte.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.payload_bits as f64 / self.input_bytes as f64
    }
}

/// Compresses `input` into a self-describing container.
///
/// The code table is built from `input` itself, so every byte has a code and
/// [`UnknownSymbol`](crate::CodecError::UnknownSymbol) cannot come out of
/// here. The only failures are
/// [`UnrepresentableCode`](crate::CodecError::UnrepresentableCode), for a tree
/// deeper than 64 bits, and [`PayloadTooLarge`](crate::CodecError::PayloadTooLarge),
/// for a payload of `2^32` bits or more.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    encode_with_stats(input).map(|(output, _)| output)
}

pub fn encode_with_stats(input: &[u8]) -> Result<(Vec<u8>, CompressionStats)> {
    let table = CodeTable::from_bytes(input)?;

    let mut writer = BinaryWriterBuilder::with_capacity(table.encoded_len(input)?);
    table.encode_into(input, &mut writer)?;

    let container = Container::new(&table, writer.build());
    let output = container.serialize()?;

    let stats = CompressionStats {
        input_bytes: input.len(),
        output_bytes: output.len(),
        distinct_symbols: table.len(),
        table_bytes: container.table_len(),
        payload_bits: container.payload_bits(),
        min_code_len: table.min_code_len(),
        max_code_len: table.max_code_len(),
    };

    log::debug!("Encoded {} bytes into {} ({:.3})", stats.input_bytes, stats.output_bytes, stats.ratio());

    Ok((output, stats))
}

/// Rebuilds the original bytes from a container made by [`encode`].
pub fn decode(input: &[u8]) -> Result<Vec<u8>> {
    let container = Container::parse(input)?;
    let table = container.decode_table();

    let mut output = Vec::new();
    SymbolDecoder::new(&table).decode_into(&mut container.payload_reader(), &mut output)?;

    log::debug!("Decoded {} bytes into {}", input.len(), output.len());

    Ok(output)
}
