use std::collections::{BTreeMap, HashMap};

use crate::{
    bitstreams::{BinaryWriterBuilder, BitSequence, Code},
    error::{CodecError, Result},
    huffman::tree::{HuffNode, HuffmanTree},
};

/// Byte to code mapping used by the encoder.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    /// Assigns every leaf its root-to-leaf path, `0` going left and `1` right.
    ///
    /// A tree made of a single leaf gets the one-bit code `0`, so that every
    /// occurrence still costs a bit in the payload.
    pub fn generate(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self::default();

        let seed = if tree.root.is_leaf() {
            Code::from_raw(0, 1)
        } else {
            Some(Code::new())
        };

        if let Some(seed) = seed {
            table.assign(&tree.root, seed)?;
        }

        log::debug!(
            "Generated {} codes, lengths {}..={}",
            table.len(),
            table.min_code_len(),
            table.max_code_len()
        );

        Ok(table)
    }

    pub fn from_bytes(input: &[u8]) -> Result<Self> {
        match HuffmanTree::from_bytes(input) {
            Some(tree) => Self::generate(&tree),
            None => Ok(Self::default()),
        }
    }

    fn assign(&mut self, node: &HuffNode, path: Code) -> Result<()> {
        match node {
            HuffNode::Leaf { byte, .. } => {
                log::trace!("{:#04x} -> {}", byte, path);
                self.codes.insert(*byte, path);
                Ok(())
            }
            HuffNode::Internal { left, right, .. } => {
                for (child, bit) in [(left, false), (right, true)] {
                    let child_path = path.with_bit(bit).ok_or_else(|| CodecError::UnrepresentableCode {
                        byte: child.first_byte(),
                        bits: path.len() + 1 + child.depth(),
                    })?;
                    self.assign(child, child_path)?;
                }
                Ok(())
            }
        }
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries by increasing byte value.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Code)> + '_ {
        self.codes.iter().map(|(&b, &c)| (b, c))
    }

    pub fn max_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn min_code_len(&self) -> usize {
        self.codes.values().map(|c| c.len()).min().unwrap_or(0)
    }

    /// True when no code is a prefix of another one.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .skip(i + 1)
                .all(|b| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }

    /// Concatenates the code of every byte of `input`, in order.
    pub fn encode_into(&self, input: &[u8], writer: &mut BinaryWriterBuilder) -> Result<()> {
        for &byte in input {
            let code = self.get(byte).ok_or(CodecError::UnknownSymbol { byte })?;
            writer.append_sequence(code);
        }
        Ok(())
    }

    /// Total payload bits `input` would take with this table.
    pub fn encoded_len(&self, input: &[u8]) -> Result<usize> {
        input.iter().try_fold(0usize, |acc, &byte| {
            self.get(byte)
                .map(|c| acc + c.len())
                .ok_or(CodecError::UnknownSymbol { byte })
        })
    }
}

/// Code to byte mapping rebuilt from a container.
#[derive(Clone, Default, Debug)]
pub struct DecodeTable {
    symbols: HashMap<Code, u8>,
    max_code_len: usize,
}

impl DecodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the byte previously bound to `code`, if any.
    pub fn insert(&mut self, code: Code, byte: u8) -> Option<u8> {
        self.max_code_len = self.max_code_len.max(code.len());
        self.symbols.insert(code, byte)
    }

    #[inline(always)]
    pub fn get(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn max_code_len(&self) -> usize {
        self.max_code_len
    }
}

impl From<&CodeTable> for DecodeTable {
    fn from(table: &CodeTable) -> Self {
        table.iter().map(|(b, c)| (c, b)).collect()
    }
}

impl FromIterator<(Code, u8)> for DecodeTable {
    fn from_iter<I: IntoIterator<Item = (Code, u8)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (code, byte) in iter {
            table.insert(code, byte);
        }
        table
    }
}
