use crate::{
    bitstreams::{BinaryReader, BitSequence, Code},
    error::{CodecError, Result},
    huffman::code_table::DecodeTable,
};

/// Turns a packed payload back into bytes by growing a code one bit at a
/// time until it matches a table entry.
pub struct SymbolDecoder<'a> {
    table: &'a DecodeTable,
}

impl<'a> SymbolDecoder<'a> {
    pub fn new(table: &'a DecodeTable) -> Self {
        Self { table }
    }

    /// Decodes the first `bit_length` bits of `payload`.
    ///
    /// Prefix-freeness makes the first match the right one. Bits left over
    /// without a match, or an accumulator longer than every code in the
    /// table, mean the payload is corrupt.
    pub fn decode(&self, bit_length: usize, payload: &[u8]) -> Result<Vec<u8>> {
        let mut reader = BinaryReader::new(payload, bit_length);
        if reader.len() < bit_length {
            return Err(CodecError::CorruptPayload { pending_bits: bit_length - reader.len() });
        }

        let mut out = Vec::new();
        self.decode_into(&mut reader, &mut out)?;
        Ok(out)
    }

    /// Decodes every bit left in `reader`, appending the bytes to `out`.
    pub fn decode_into(&self, reader: &mut BinaryReader<'_>, out: &mut Vec<u8>) -> Result<()> {
        let max_code_len = self.table.max_code_len();
        let total = reader.remaining();
        let mut acc = Code::new();

        for (consumed, bit) in reader.by_ref().enumerate() {
            if acc.len() >= max_code_len || !acc.push(bit) {
                return Err(CodecError::CorruptPayload { pending_bits: acc.len() + total - consumed });
            }

            if let Some(byte) = self.table.get(&acc) {
                out.push(byte);
                acc.clear();
            }
        }

        if !acc.is_empty() {
            return Err(CodecError::CorruptPayload { pending_bits: acc.len() });
        }

        Ok(())
    }
}
