//! HZR compression (encoding).
//!
//! The encoder frames its input as a 4-byte master header followed by one
//! block per up to 64 KiB of input. Each block independently picks the
//! cheapest of three encodings:
//!
//! - **FILL** when the block is a single repeated byte (runs of zeros in
//!   any mix of token classes still count as one byte value);
//! - **HUFF_RLE**, the normal path: a Huffman tree trained on the block's
//!   literal/run-token histogram, transmitted in front of the coded
//!   symbol stream;
//! - **COPY** as the fallback when the coded stream would match or exceed
//!   the raw block size or overflow the output buffer.

use hzr_core::bitstream::BitWriter;
use hzr_core::crc::Crc32c;
use hzr_core::error::{HzrError, Result};

use crate::huffman::{SymbolInfo, build_and_store_tree, histogram};
use crate::symbols::{NUM_SYMBOLS, scan_zero_run, zero_run_token};
use crate::{BLOCK_HEADER_SIZE, EncodingMode, MASTER_HEADER_SIZE, MAX_BLOCK_SIZE};

/// Maximum (worst case) size of an HZR encoded buffer.
///
/// Every block may fall back to a plain copy, so the bound is the master
/// header plus one full block header and payload per started block.
/// `max_compressed_size(0)` is the bare master header.
///
/// # Example
///
/// ```
/// use hzr::max_compressed_size;
///
/// assert_eq!(max_compressed_size(0), 4);
/// assert_eq!(max_compressed_size(1), 4 + 7 + 65536);
/// ```
pub fn max_compressed_size(uncompressed_size: usize) -> usize {
    MASTER_HEADER_SIZE
        + uncompressed_size.div_ceil(MAX_BLOCK_SIZE) * (BLOCK_HEADER_SIZE + MAX_BLOCK_SIZE)
}

/// Compress `input` into `output`, returning the exact encoded size.
///
/// `output` should hold [`max_compressed_size`]`(input.len())` bytes to be
/// safe for any input. Inputs larger than the 32-bit container limit are
/// rejected.
pub fn encode(input: &[u8], output: &mut [u8]) -> Result<usize> {
    if input.len() > u32::MAX as usize {
        return Err(HzrError::input_too_large(input.len()));
    }
    if output.len() < MASTER_HEADER_SIZE {
        return Err(HzrError::buffer_too_small(MASTER_HEADER_SIZE, output.len()));
    }
    output[..MASTER_HEADER_SIZE].copy_from_slice(&(input.len() as u32).to_le_bytes());

    let mut out_pos = MASTER_HEADER_SIZE;
    for block in input.chunks(MAX_BLOCK_SIZE) {
        out_pos += encode_block(block, &mut output[out_pos..])?;
    }

    Ok(out_pos)
}

/// Compress `input` into a freshly allocated buffer.
pub fn encode_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = vec![0u8; max_compressed_size(input.len())];
    let size = encode(input, &mut output)?;
    output.truncate(size);
    Ok(output)
}

/// Encode one block (header plus payload) into the front of `out`,
/// returning the number of bytes written.
fn encode_block(block: &[u8], out: &mut [u8]) -> Result<usize> {
    debug_assert!(!block.is_empty() && block.len() <= MAX_BLOCK_SIZE);

    if out.len() < BLOCK_HEADER_SIZE + 1 {
        return Err(HzrError::buffer_too_small(BLOCK_HEADER_SIZE + 1, out.len()));
    }

    let mut symbols = histogram(block);

    // A block made of one repeated byte value collapses to a fill block:
    // one payload byte regardless of the block length.
    if let Some(fill) = fill_value(&symbols) {
        out[BLOCK_HEADER_SIZE] = fill;
        let crc = Crc32c::compute(&out[BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + 1]);
        write_block_header(out, 1, crc, EncodingMode::Fill);
        return Ok(BLOCK_HEADER_SIZE + 1);
    }

    // Normal path: tree description followed by the coded symbol stream.
    let cap = (out.len() - BLOCK_HEADER_SIZE).min(MAX_BLOCK_SIZE);
    let (overflowed, payload_size) = {
        let mut writer = BitWriter::new(&mut out[BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + cap]);
        build_and_store_tree(&mut symbols, &mut writer);
        emit_symbols(block, &symbols, &mut writer);
        writer.force_flush();
        (writer.write_failed(), writer.bytes_written())
    };

    if !overflowed && payload_size < MAX_BLOCK_SIZE {
        let payload = &out[BLOCK_HEADER_SIZE..BLOCK_HEADER_SIZE + payload_size];
        let crc = Crc32c::compute(payload);
        write_block_header(out, payload_size, crc, EncodingMode::HuffRle);
        return Ok(BLOCK_HEADER_SIZE + payload_size);
    }

    // The coded stream outgrew the block: store it as a plain copy.
    let needed = BLOCK_HEADER_SIZE + block.len();
    if out.len() < needed {
        return Err(HzrError::buffer_too_small(needed, out.len()));
    }
    out[BLOCK_HEADER_SIZE..needed].copy_from_slice(block);
    let crc = Crc32c::compute(&out[BLOCK_HEADER_SIZE..needed]);
    write_block_header(out, block.len(), crc, EncodingMode::Copy);
    Ok(needed)
}

/// Fill byte for a single-valued block, or `None` when more than one byte
/// value is in use. All zero-run tokens count as the zero byte.
fn fill_value(symbols: &[SymbolInfo; NUM_SYMBOLS]) -> Option<u8> {
    let zeros_used = symbols[0].count > 0 || symbols[256..].iter().any(|s| s.count > 0);

    let mut literal = None;
    for sym in 1..256 {
        if symbols[sym].count > 0 {
            if literal.is_some() {
                return None;
            }
            literal = Some(sym as u8);
        }
    }

    match (zeros_used, literal) {
        (true, None) => Some(0),
        (false, Some(byte)) => Some(byte),
        _ => None,
    }
}

/// Emit the coded symbol stream for `block` using the codes recorded in
/// `symbols`. Classification must match [`histogram`] exactly.
fn emit_symbols(block: &[u8], symbols: &[SymbolInfo; NUM_SYMBOLS], writer: &mut BitWriter<'_>) {
    let mut pos = 0;
    while pos < block.len() {
        if block[pos] == 0 {
            let run = scan_zero_run(block, pos);
            let (symbol, extra, extra_bits) = zero_run_token(run);
            let info = &symbols[symbol as usize];
            writer.write_bits(info.code, info.bits);
            if extra_bits > 0 {
                writer.write_bits(extra, extra_bits);
            }
            pos += run;
        } else {
            let info = &symbols[block[pos] as usize];
            writer.write_bits(info.code, info.bits);
            pos += 1;
        }
    }
}

/// Write a 7-byte block header: `encoded_size - 1` (u16), the payload
/// CRC-32C (u32) and the mode byte, all little-endian.
fn write_block_header(out: &mut [u8], encoded_size: usize, crc: u32, mode: EncodingMode) {
    debug_assert!((1..=MAX_BLOCK_SIZE).contains(&encoded_size));
    out[0..2].copy_from_slice(&((encoded_size - 1) as u16).to_le_bytes());
    out[2..6].copy_from_slice(&crc.to_le_bytes());
    out[6] = mode as u8;
}
