//! Error types for HZR operations.
//!
//! This module provides an error type covering all failure conditions in
//! HZR encoding and decoding: argument validation, truncated or corrupted
//! input, checksum mismatches, and exhausted buffers. At the API boundary
//! every failure is just the `Err` arm of [`Result`]; the variants exist so
//! that diagnostics stay meaningful.

use thiserror::Error;

/// The main error type for HZR operations.
#[derive(Debug, Error)]
pub enum HzrError {
    /// Input buffer larger than the container can describe.
    #[error("Input too large: {size} bytes exceeds the 32-bit container limit")]
    InputTooLarge {
        /// Size of the offending input in bytes.
        size: usize,
    },

    /// Buffer too small for the operation.
    #[error("Buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// CRC-32C checksum mismatch.
    #[error("CRC mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        /// Expected CRC value from the block header.
        expected: u32,
        /// Computed CRC value over the payload.
        computed: u32,
    },

    /// Unknown block encoding mode.
    #[error("Invalid encoding mode: {mode}")]
    InvalidEncodingMode {
        /// The offending mode byte.
        mode: u8,
    },

    /// Corrupted data in the compressed stream.
    #[error("Corrupted data at offset {offset}: {message}")]
    CorruptedData {
        /// Byte offset where the corruption was detected.
        offset: usize,
        /// Description of the corruption.
        message: String,
    },
}

/// Result type alias for HZR operations.
pub type Result<T> = std::result::Result<T, HzrError>;

impl HzrError {
    /// Create an input-too-large error.
    pub fn input_too_large(size: usize) -> Self {
        Self::InputTooLarge { size }
    }

    /// Create a buffer-too-small error.
    pub fn buffer_too_small(needed: usize, available: usize) -> Self {
        Self::BufferTooSmall { needed, available }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create a CRC mismatch error.
    pub fn crc_mismatch(expected: u32, computed: u32) -> Self {
        Self::CrcMismatch { expected, computed }
    }

    /// Create an invalid encoding mode error.
    pub fn invalid_mode(mode: u8) -> Self {
        Self::InvalidEncodingMode { mode }
    }

    /// Create a corrupted data error.
    pub fn corrupted(offset: usize, message: impl Into<String>) -> Self {
        Self::CorruptedData {
            offset,
            message: message.into(),
        }
    }
}
