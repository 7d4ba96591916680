//! # huffzip
//!
//! Huffman compression of whole in-memory buffers into a self-describing
//! container that carries its own decoding tree.
//!
//! ## Quick Start
//!
//! ```rust
//! let compressed = huffzip::encode(b"abracadabra")?;
//! let restored = huffzip::decode(&compressed)?;
//! assert_eq!(restored, b"abracadabra");
//! # Ok::<(), huffzip::HuffmanError>(())
//! ```
//!
//! Both calls are pure: no state is kept between invocations, and on error
//! no partial output is returned.

pub mod bit_vec;
pub mod code_table;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod payload;
pub mod transform;

mod min_heap;

pub use code_table::{Code, CodeTable};
pub use container::Container;
pub use error::HuffmanError;
pub use frequency::Frequencies;
pub use huffman_codec::HuffmanCodec;
pub use hufftree::HuffmanTree;
pub use payload::PackedPayload;
pub use transform::{
    compress_file, decompress_file, output_path_for, Direction, TransformError, TransformReport,
};

/// Compress `data` with a tree fitted to it.
pub fn encode(data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    HuffmanCodec::from_bytes(data).encode(data)
}

/// Restore the bytes held in a container produced by [`encode`].
pub fn decode(data: &[u8]) -> Result<Vec<u8>, HuffmanError> {
    HuffmanCodec::decode(data)
}
