//! HZR decompression (verification and decoding).
//!
//! [`verify`] walks every block header and recomputes the payload
//! CRC-32C without producing any output; it is the trusted prelude to
//! [`decode`], which assumes a structurally sound container and spends its
//! time in the fast decode loop instead.
//!
//! The Huffman block decoder runs in two phases. While the input tail
//! holds at least [`FAST_TAIL_MARGIN`] bytes, symbols are decoded with
//! unchecked bit reads: one 8-bit table lookup resolves every code of
//! eight bits or shorter, longer codes continue with a tree walk. The
//! remaining bytes are decoded by a checked tail loop that tests every
//! read against the end of the payload.

use hzr_core::bitstream::BitReader;
use hzr_core::crc::Crc32c;
use hzr_core::error::{HzrError, Result};

use crate::huffman::DecodeTree;
use crate::symbols::{Symbol, zero_run_extra};
use crate::{BLOCK_HEADER_SIZE, EncodingMode, MASTER_HEADER_SIZE, MAX_BLOCK_SIZE};

/// Input-tail margin below which the decoder leaves the fast loop: the
/// longest code plus run-length suffix is 32 + 14 bits (under six bytes),
/// and the bit cache looks ahead four bytes.
const FAST_TAIL_MARGIN: usize = 10;

/// Verify that `input` is a well-formed HZR buffer and return the decoded
/// size it announces.
///
/// Walks every block header, rejects unknown encoding modes and recomputes
/// each payload's CRC-32C. No output is produced. Callers that intend to
/// trust [`decode`] with the buffer must verify it first.
pub fn verify(input: &[u8]) -> Result<usize> {
    let decoded_size = read_master_header(input)?;

    let mut pos = MASTER_HEADER_SIZE;
    let mut remaining = decoded_size;
    while remaining > 0 {
        let (encoded_size, expected_crc, mode) = read_block_header(input, pos)?;
        let payload_start = pos + BLOCK_HEADER_SIZE;
        let payload_end = payload_start + encoded_size;
        if payload_end > input.len() {
            return Err(HzrError::unexpected_eof(payload_end - input.len()));
        }
        if EncodingMode::from_u8(mode).is_none() {
            return Err(HzrError::invalid_mode(mode));
        }

        let computed = Crc32c::compute(&input[payload_start..payload_end]);
        if computed != expected_crc {
            return Err(HzrError::crc_mismatch(expected_crc, computed));
        }

        remaining -= remaining.min(MAX_BLOCK_SIZE);
        pos = payload_end;
    }

    if pos != input.len() {
        return Err(HzrError::corrupted(pos, "trailing bytes after the last block"));
    }
    Ok(decoded_size)
}

/// Decode `input` into `output`.
///
/// `output` must hold at least the announced decoded size; exactly that
/// many bytes are written. The input is expected to be a valid HZR buffer
/// ([`verify`] is the trusted prelude): structural damage is still
/// detected and reported, but checksums are not re-examined here.
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<()> {
    let decoded_size = read_master_header(input)?;
    if output.len() < decoded_size {
        return Err(HzrError::buffer_too_small(decoded_size, output.len()));
    }

    let mut pos = MASTER_HEADER_SIZE;
    let mut out_pos = 0;
    while out_pos < decoded_size {
        let (encoded_size, _expected_crc, mode) = read_block_header(input, pos)?;
        let payload_start = pos + BLOCK_HEADER_SIZE;
        let payload_end = payload_start + encoded_size;
        if payload_end > input.len() {
            return Err(HzrError::unexpected_eof(payload_end - input.len()));
        }

        let block_len = (decoded_size - out_pos).min(MAX_BLOCK_SIZE);
        let payload = &input[payload_start..payload_end];
        let out_block = &mut output[out_pos..out_pos + block_len];

        match EncodingMode::from_u8(mode) {
            Some(EncodingMode::Copy) => {
                if encoded_size != block_len {
                    return Err(HzrError::corrupted(
                        payload_start,
                        "copy payload length does not match the block",
                    ));
                }
                out_block.copy_from_slice(payload);
            }
            Some(EncodingMode::Fill) => {
                if encoded_size != 1 {
                    return Err(HzrError::corrupted(
                        payload_start,
                        "fill payload must be a single byte",
                    ));
                }
                out_block.fill(payload[0]);
            }
            Some(EncodingMode::HuffRle) => decode_huff_block(payload, out_block)?,
            None => return Err(HzrError::invalid_mode(mode)),
        }

        out_pos += block_len;
        pos = payload_end;
    }

    if pos != input.len() {
        return Err(HzrError::corrupted(pos, "trailing bytes after the last block"));
    }
    Ok(())
}

/// Verify `input` and decode it into a freshly allocated buffer.
pub fn decode_to_vec(input: &[u8]) -> Result<Vec<u8>> {
    let decoded_size = verify(input)?;
    let mut output = vec![0u8; decoded_size];
    decode(input, &mut output)?;
    Ok(output)
}

/// Read the 4-byte master header: the total decoded size.
fn read_master_header(input: &[u8]) -> Result<usize> {
    if input.len() < MASTER_HEADER_SIZE {
        return Err(HzrError::unexpected_eof(MASTER_HEADER_SIZE - input.len()));
    }
    let size = u32::from_le_bytes([input[0], input[1], input[2], input[3]]);
    Ok(size as usize)
}

/// Read a 7-byte block header at `pos`: `(encoded_size, crc32c, mode)`.
fn read_block_header(input: &[u8], pos: usize) -> Result<(usize, u32, u8)> {
    let end = pos + BLOCK_HEADER_SIZE;
    if end > input.len() {
        return Err(HzrError::unexpected_eof(end - input.len()));
    }
    let encoded_size = u16::from_le_bytes([input[pos], input[pos + 1]]) as usize + 1;
    let crc = u32::from_le_bytes([
        input[pos + 2],
        input[pos + 3],
        input[pos + 4],
        input[pos + 5],
    ]);
    Ok((encoded_size, crc, input[pos + 6]))
}

/// Decode one Huffman + RLE payload into exactly `out.len()` bytes.
fn decode_huff_block(payload: &[u8], out: &mut [u8]) -> Result<()> {
    let mut reader = BitReader::new(payload);
    let tree = DecodeTree::recover(&mut reader)?;

    let mut out_pos = 0;
    let fast_end = payload.len().saturating_sub(FAST_TAIL_MARGIN);

    // Fast loop: unchecked bit reads, gated on the input-tail margin.
    while reader.byte_pos() < fast_end {
        let entry = tree.lut[reader.peek8() as usize];
        reader.advance(u32::from(entry.bits));

        let symbol = match entry.node {
            // Codes of eight bits or shorter resolve in the table.
            None => entry.symbol,
            // Longer codes: continue bit by bit from the table's node.
            Some(start) => {
                let mut node = &tree.nodes[start as usize];
                while node.symbol < 0 {
                    if reader.byte_pos() >= payload.len() {
                        return Err(HzrError::unexpected_eof(1));
                    }
                    node = if reader.read_bit() != 0 {
                        &tree.nodes[node.child_b as usize]
                    } else {
                        &tree.nodes[node.child_a as usize]
                    };
                }
                node.symbol as Symbol
            }
        };

        if symbol <= 255 {
            if out_pos >= out.len() {
                return Err(HzrError::buffer_too_small(out_pos + 1, out.len()));
            }
            out[out_pos] = symbol as u8;
            out_pos += 1;
        } else {
            let run = match zero_run_extra(symbol) {
                Some((0, base)) => base,
                Some((bits, base)) => base + reader.read_bits(bits) as usize,
                None => {
                    return Err(HzrError::corrupted(
                        reader.byte_pos(),
                        "run token outside the alphabet",
                    ));
                }
            };
            if out_pos + run > out.len() {
                return Err(HzrError::buffer_too_small(out_pos + run, out.len()));
            }
            out[out_pos..out_pos + run].fill(0);
            out_pos += run;
        }
    }

    // Tail loop: checked bit reads down to the last padding bit.
    while out_pos < out.len() {
        let mut node = tree.root();

        // Single-symbol tree: the root is a leaf and every output byte
        // costs one (arbitrary) bit.
        if node.symbol >= 0 {
            reader.advance_checked(1);
            if reader.read_failed() {
                return Err(HzrError::unexpected_eof(1));
            }
        }
        while node.symbol < 0 {
            node = if reader.read_bit_checked() != 0 {
                &tree.nodes[node.child_b as usize]
            } else {
                &tree.nodes[node.child_a as usize]
            };
            if reader.read_failed() {
                return Err(HzrError::unexpected_eof(1));
            }
        }
        let symbol = node.symbol as Symbol;

        if symbol <= 255 {
            out[out_pos] = symbol as u8;
            out_pos += 1;
        } else {
            let run = match zero_run_extra(symbol) {
                Some((0, base)) => base,
                Some((bits, base)) => {
                    let extra = reader.read_bits_checked(bits) as usize;
                    if reader.read_failed() {
                        return Err(HzrError::unexpected_eof(1));
                    }
                    base + extra
                }
                None => {
                    return Err(HzrError::corrupted(
                        reader.byte_pos(),
                        "run token outside the alphabet",
                    ));
                }
            };
            if out_pos + run > out.len() {
                return Err(HzrError::buffer_too_small(out_pos + run, out.len()));
            }
            out[out_pos..out_pos + run].fill(0);
            out_pos += run;
        }
    }

    // Nothing but sub-byte padding may remain.
    if !reader.at_end() {
        return Err(HzrError::corrupted(
            reader.byte_pos(),
            "payload not fully consumed",
        ));
    }
    Ok(())
}
