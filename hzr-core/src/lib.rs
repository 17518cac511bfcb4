//! # HZR Core
//!
//! Core components for the HZR compression library.
//!
//! This crate provides the primitives the codec is built from:
//!
//! - [`bitstream`]: LSB-first bit-level I/O over contiguous byte buffers
//! - [`crc`]: CRC-32C (Castagnoli) checksums
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │ L2: Codec (hzr crate)                               │
//! │     Huffman trees, RLE tokens, block container      │
//! ├─────────────────────────────────────────────────────┤
//! │ L1: Primitives (this crate)                         │
//! │     BitReader/BitWriter, CRC-32C, errors            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use hzr_core::bitstream::{BitReader, BitWriter};
//! use hzr_core::crc::Crc32c;
//!
//! let mut buf = [0u8; 4];
//! let mut writer = BitWriter::new(&mut buf);
//! writer.write_bits(0x5A, 7);
//! writer.force_flush();
//!
//! let mut reader = BitReader::new(&buf);
//! assert_eq!(reader.read_bits(7), 0x5A);
//!
//! let crc = Crc32c::compute(b"123456789");
//! assert_eq!(crc, 0xE3069283);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod crc;
pub mod error;

// Re-exports for convenience.
pub use bitstream::{BitReader, BitWriter};
pub use crc::Crc32c;
pub use error::{HzrError, Result};
