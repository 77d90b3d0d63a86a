pub mod frequency;
pub mod tree;
pub mod code_table;
pub mod decoder;

pub use code_table::{CodeTable, DecodeTable};
pub use decoder::SymbolDecoder;
pub use frequency::ByteFrequency;
pub use tree::{HuffNode, HuffmanTree};

/// Size of the byte alphabet.
pub const K_NUM_SYMBOLS: usize = 256;
