//! Static Huffman compression of whole byte buffers.
//!
//! ```
//! let packed = huffpress::encode(b"AAAABBBCCD")?;
//! assert_eq!(huffpress::decode(&packed)?, b"AAAABBBCCD");
//! # Ok::<(), huffpress::CodecError>(())
//! ```

pub mod bitstreams;
pub mod huffman;
pub mod container;
pub mod codec;
pub mod config;
pub mod error;

pub use codec::{decode, encode, encode_with_stats, CompressionStats};
pub use config::{Config, Mode};
pub use error::{CodecError, Result};
