//! The on-disk layout of a compressed buffer.
//!
//! ```text
//! for each code table entry:
//!     code_bit_length : u32 LE (> 0)
//!     code_bits       : ceil(code_bit_length / 8) bytes
//!     symbol          : u8
//! terminator          : u32 LE, 0
//! payload_bit_length  : u32 LE
//! payload             : ceil(payload_bit_length / 8) bytes
//! ```
//!
//! Bits are packed as described in [`crate::bitstreams`].

use std::collections::HashSet;

use crate::{
    bitstreams::{bytes_for_bits, BinaryReader, BinaryWriter, BitSequence, Code, MAX_CODE_BITS},
    error::{CodecError, Result},
    huffman::{code_table::DecodeTable, CodeTable, K_NUM_SYMBOLS},
};

/// Marks the end of the code table; no real code has length zero.
pub const TABLE_TERMINATOR: u32 = 0;
pub const LENGTH_FIELD_BYTES: usize = 4;

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Container {
    entries: Vec<(Code, u8)>,
    payload_bits: usize,
    payload: Box<[u8]>,
}

impl Container {
    pub fn new(table: &CodeTable, payload: BinaryWriter) -> Self {
        Self {
            entries: table.iter().map(|(b, c)| (c, b)).collect(),
            payload_bits: payload.written_bits,
            payload: payload.os,
        }
    }

    pub fn entries(&self) -> &[(Code, u8)] {
        &self.entries
    }

    pub fn payload_bits(&self) -> usize {
        self.payload_bits
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn payload_reader(&self) -> BinaryReader<'_> {
        BinaryReader::new(&self.payload, self.payload_bits)
    }

    pub fn decode_table(&self) -> DecodeTable {
        self.entries.iter().copied().collect()
    }

    /// Bytes taken by the code table, terminator included.
    pub fn table_len(&self) -> usize {
        self.entries
            .iter()
            .map(|(code, _)| LENGTH_FIELD_BYTES + bytes_for_bits(code.len()) + 1)
            .sum::<usize>()
            + LENGTH_FIELD_BYTES
    }

    pub fn serialized_len(&self) -> usize {
        self.table_len() + LENGTH_FIELD_BYTES + bytes_for_bits(self.payload_bits)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let payload_bits = u32::try_from(self.payload_bits)
            .map_err(|_| CodecError::PayloadTooLarge { bits: self.payload_bits })?;

        let mut out = Vec::with_capacity(self.serialized_len());

        for (code, symbol) in self.entries.iter() {
            out.extend_from_slice(&(code.len() as u32).to_le_bytes());
            out.extend_from_slice(&code.packed());
            out.push(*symbol);
        }
        out.extend_from_slice(&TABLE_TERMINATOR.to_le_bytes());

        out.extend_from_slice(&payload_bits.to_le_bytes());
        out.extend_from_slice(&self.payload[..bytes_for_bits(self.payload_bits)]);

        log::debug!(
            "Serialized container: {} entries, {} table bytes, {} payload bits",
            self.entries.len(),
            self.table_len(),
            self.payload_bits
        );

        Ok(out)
    }

    /// Parses a serialized container.
    ///
    /// Besides short reads, rejects codes wider than [`MAX_CODE_BITS`], a code
    /// or symbol appearing twice, and bytes left after the payload.
    pub fn parse(input: &[u8]) -> Result<Self> {
        let mut reader = ContainerReader::new(input);

        let mut entries = Vec::new();
        let mut seen_codes = HashSet::new();
        let mut seen_symbols = [false; K_NUM_SYMBOLS];

        loop {
            let entry_start = reader.pos;
            let code_len = reader.read_u32("code length")?;
            if code_len == TABLE_TERMINATOR {
                break;
            }

            let code_len = code_len as usize;
            if code_len > MAX_CODE_BITS {
                return Err(CodecError::malformed(
                    entry_start,
                    format!("code length {} exceeds {} bits", code_len, MAX_CODE_BITS),
                ));
            }

            let code_bytes = reader.take(bytes_for_bits(code_len), "code bits")?;
            let code = Code::from_packed(code_bytes, code_len)
                .ok_or_else(|| CodecError::malformed(entry_start, "invalid code"))?;
            let symbol = reader.read_u8("symbol")?;

            if !seen_codes.insert(code) {
                return Err(CodecError::malformed(entry_start, format!("code {} appears twice", code)));
            }
            if std::mem::replace(&mut seen_symbols[symbol as usize], true) {
                return Err(CodecError::malformed(entry_start, format!("symbol {:#04x} appears twice", symbol)));
            }

            entries.push((code, symbol));
        }

        let payload_bits = reader.read_u32("payload length")? as usize;
        let payload = reader.take(bytes_for_bits(payload_bits), "payload")?;

        if reader.remaining() != 0 {
            return Err(CodecError::malformed(
                reader.pos,
                format!("{} trailing bytes after the payload", reader.remaining()),
            ));
        }

        log::debug!("Parsed container: {} entries, {} payload bits", entries.len(), payload_bits);

        Ok(Self {
            entries,
            payload_bits,
            payload: payload.into(),
        })
    }
}

/// Bounds-checked cursor over a serialized container.
struct ContainerReader<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> ContainerReader<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.input.len() - self.pos
    }

    fn take(&mut self, n: usize, what: &str) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(CodecError::malformed(
                self.pos,
                format!("truncated {}: need {} bytes, {} left", what, n, self.remaining()),
            ));
        }
        let bytes = &self.input[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn read_u32(&mut self, what: &str) -> Result<u32> {
        let mut raw = [0u8; LENGTH_FIELD_BYTES];
        raw.copy_from_slice(self.take(LENGTH_FIELD_BYTES, what)?);
        Ok(u32::from_le_bytes(raw))
    }

    fn read_u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }
}

#[cfg(test)]
mod tests;
