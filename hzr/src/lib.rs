//! # HZR
//!
//! Pure Rust implementation of the HZR lossless compression scheme: a
//! canonical Huffman entropy coder paired with a run-length extension for
//! runs of the byte value zero.
//!
//! HZR is built for entropy-reduced payloads (residuals from image/audio
//! predictors, quantized transform coefficients) where many bytes are
//! zero and the non-zero values cluster near small magnitudes. It trades
//! ratio for symmetric, very high throughput.
//!
//! ## Container format
//!
//! An encoded buffer starts with a 4-byte master header (the total decoded
//! size, little-endian) followed by one block per up to 64 KiB of decoded
//! data. Each block carries a 7-byte header (`encoded_size - 1` as u16,
//! CRC-32C of the payload as u32, and a mode byte) and one of three
//! payloads:
//!
//! - `COPY`: the raw block bytes;
//! - `HUFF_RLE`: a preorder Huffman tree description followed by the coded
//!   symbol stream;
//! - `FILL`: a single byte the whole block is filled with.
//!
//! ## Example
//!
//! ```rust
//! use hzr::{decode, encode, max_compressed_size, verify};
//!
//! let data = b"residuals are mostly zero \x00\x00\x00\x00\x00\x00\x00\x00";
//!
//! let mut compressed = vec![0u8; max_compressed_size(data.len())];
//! let size = encode(data, &mut compressed).unwrap();
//! compressed.truncate(size);
//!
//! let decoded_size = verify(&compressed).unwrap();
//! assert_eq!(decoded_size, data.len());
//!
//! let mut decompressed = vec![0u8; decoded_size];
//! decode(&compressed, &mut decompressed).unwrap();
//! assert_eq!(&decompressed, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod decode;
pub mod encode;
mod huffman;
pub mod symbols;

// Re-exports
pub use decode::{decode, decode_to_vec, verify};
pub use encode::{encode, encode_to_vec, max_compressed_size};
pub use hzr_core::error::{HzrError, Result};

/// Size of the master header: the 32-bit decoded size.
pub const MASTER_HEADER_SIZE: usize = 4;

/// Size of a block header: `encoded_size - 1` (u16), payload CRC-32C
/// (u32) and the encoding mode byte.
pub const BLOCK_HEADER_SIZE: usize = 7;

/// Maximum number of decoded bytes covered by a single block.
pub const MAX_BLOCK_SIZE: usize = 65536;

/// Per-block payload encoding, stored in the last block header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncodingMode {
    /// Raw bytes; the payload is the block verbatim.
    Copy = 0,
    /// Huffman tree description followed by the coded symbol stream.
    HuffRle = 1,
    /// One payload byte, repeated for the block's decoded length.
    Fill = 2,
}

impl EncodingMode {
    /// Parse a mode byte; `None` for anything above [`EncodingMode::Fill`].
    pub fn from_u8(mode: u8) -> Option<Self> {
        match mode {
            0 => Some(Self::Copy),
            1 => Some(Self::HuffRle),
            2 => Some(Self::Fill),
            _ => None,
        }
    }
}
