//! Bit sequences used by the codec.
//!
//! Bits are numbered from 0 and bit `i` lives at bit `i % 8` of byte `i / 8`,
//! i.e. the stream is filled from the least significant bit of each byte up.
//! This is the layout of both the codes and the payload in a container.

use std::fmt;

/// Width of the bounded [`Code`] sequence.
pub const MAX_CODE_BITS: usize = 64;

/// Number of bytes needed to hold `bits` bits.
#[inline(always)]
pub fn bytes_for_bits(bits: usize) -> usize {
    (bits + 7) / 8
}

/// Read access shared by every bit sequence.
pub trait BitSequence {
    fn len(&self) -> usize;

    /// The bit at `index`. Panics when `index >= len()`.
    fn bit(&self, index: usize) -> bool;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bits(&self) -> Bits<'_, Self> {
        Bits { seq: self, pos: 0 }
    }
}

pub struct Bits<'a, S: ?Sized> {
    seq: &'a S,
    pos: usize,
}

impl<'a, S: BitSequence + ?Sized> Iterator for Bits<'a, S> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        if self.pos >= self.seq.len() {
            return None;
        }
        self.pos += 1;
        Some(self.seq.bit(self.pos - 1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.seq.len() - self.pos;
        (left, Some(left))
    }
}

/// A bit sequence of at most [`MAX_CODE_BITS`] bits.
///
/// Bits above `len` are always zero, so two codes compare (and hash) equal
/// exactly when they hold the same bits.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a code from the first `len` bits of `raw`, dropping the rest.
    pub fn from_raw(raw: u64, len: usize) -> Option<Self> {
        if len > MAX_CODE_BITS {
            return None;
        }
        let mask = if len == MAX_CODE_BITS { u64::MAX } else { (1u64 << len) - 1 };
        Some(Code { bits: raw & mask, len: len as u8 })
    }

    /// Builds a code from its packed little-endian byte form.
    pub fn from_packed(bytes: &[u8], len: usize) -> Option<Self> {
        if len > MAX_CODE_BITS || bytes.len() < bytes_for_bits(len) {
            return None;
        }
        let mut raw = [0u8; 8];
        let n = bytes_for_bits(len);
        raw[..n].copy_from_slice(&bytes[..n]);
        Code::from_raw(u64::from_le_bytes(raw), len)
    }

    /// The packed form, `bytes_for_bits(len())` bytes long.
    pub fn packed(&self) -> Vec<u8> {
        self.bits.to_le_bytes()[..bytes_for_bits(self.len())].to_vec()
    }

    pub fn is_full(&self) -> bool {
        self.len() == MAX_CODE_BITS
    }

    /// Appends one bit. Returns `false`, leaving the code untouched, when full.
    #[inline(always)]
    pub fn push(&mut self, bit: bool) -> bool {
        if self.is_full() {
            return false;
        }
        if bit {
            self.bits |= 1 << self.len;
        }
        self.len += 1;
        true
    }

    /// This code extended by `bit`, or `None` when it is already full.
    pub fn with_bit(mut self, bit: bool) -> Option<Self> {
        if self.push(bit) {
            Some(self)
        } else {
            None
        }
    }

    /// Appends every bit of `other`; fails without modifying `self` on overflow.
    pub fn append_sequence<S: BitSequence + ?Sized>(&mut self, other: &S) -> bool {
        if self.len() + other.len() > MAX_CODE_BITS {
            return false;
        }
        for bit in other.bits() {
            self.push(bit);
        }
        true
    }

    pub fn clear(&mut self) {
        *self = Code::default();
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && Code::from_raw(other.bits, self.len()) == Some(*self)
    }
}

impl BitSequence for Code {
    #[inline(always)]
    fn len(&self) -> usize {
        self.len as usize
    }

    #[inline(always)]
    fn bit(&self, index: usize) -> bool {
        assert!(index < self.len(), "Bit {} out of a {}-bit code", index, self.len);
        (self.bits >> index) & 1 == 1
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Code({}/{})", self, self.len)
    }
}

/// The packed, immutable result of a [`BinaryWriterBuilder`].
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct BinaryWriter {
    pub os: Box<[u8]>,
    pub written_bits: usize,
}

impl BitSequence for BinaryWriter {
    fn len(&self) -> usize {
        self.written_bits
    }

    fn bit(&self, index: usize) -> bool {
        assert!(index < self.written_bits, "Bit {} out of a {}-bit stream", index, self.written_bits);
        self.os[index >> 3] & (1 << (index & 7)) != 0
    }
}

/// Growable bit sequence; storage grows one byte at a time.
#[derive(Clone, Default, Debug)]
pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
}

impl BinaryWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { os: Vec::with_capacity(bytes_for_bits(bits)), written_bits: 0 }
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        if self.written_bits & 7 == 0 {
            self.os.push(0);
        }
        if bit {
            self.os[self.written_bits >> 3] |= 1 << (self.written_bits & 7);
        }
        self.written_bits += 1;
    }

    pub fn append_sequence<S: BitSequence + ?Sized>(&mut self, other: &S) {
        for bit in other.bits() {
            self.push_bit(bit);
        }
    }

    pub fn build(self) -> BinaryWriter {
        BinaryWriter {
            os: self.os.into_boxed_slice(),
            written_bits: self.written_bits,
        }
    }
}

impl BitSequence for BinaryWriterBuilder {
    fn len(&self) -> usize {
        self.written_bits
    }

    fn bit(&self, index: usize) -> bool {
        assert!(index < self.written_bits, "Bit {} out of a {}-bit stream", index, self.written_bits);
        self.os[index >> 3] & (1 << (index & 7)) != 0
    }
}

/// Reads a packed stream one bit at a time, stopping after `len` bits even
/// when the last byte has unused high bits.
#[derive(Clone, Debug)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    len: usize,
    pub read_bits: usize,
}

impl<'a> BinaryReader<'a> {
    /// `len` is clamped to the number of bits `input_stream` actually holds.
    pub fn new(input_stream: &'a [u8], len: usize) -> Self {
        BinaryReader {
            is: input_stream,
            len: len.min(input_stream.len() * 8),
            read_bits: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> usize {
        self.len - self.read_bits
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.read_bits >= self.len {
            return None;
        }
        let bit = self.is[self.read_bits >> 3] & (1 << (self.read_bits & 7)) != 0;
        self.read_bits += 1;
        Some(bit)
    }
}

impl<'a> Iterator for BinaryReader<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

#[cfg(test)]
mod tests;
