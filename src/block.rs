//! Block codec adapter.
//!
//! The block compressor itself is external — `lz4_flex`'s raw block API —
//! and is assumed correct, deterministic, and bounded. This module is the
//! only place that talks to it, so the rest of the crate deals in one pair of
//! dictionary-aware operations plus a worst-case output bound.

use crate::error::StreamError;

/// Size of the little-endian length prefix that frames every encoded block.
pub const FRAME_HEADER_SIZE: usize = 4;

/// Worst-case codec output for a `len`-byte input (incompressible data
/// expands slightly).
pub fn encoded_bound(len: usize) -> usize {
    lz4_flex::block::get_maximum_output_size(len)
}

/// Compresses `input` into `output` with `dict` as back-reference history.
///
/// `dict` must be the bytes that logically precede `input` in the stream —
/// here, the live prefix of the dictionary window. Returns the number of
/// bytes written.
pub fn compress_with_dict(
    input: &[u8],
    output: &mut [u8],
    dict: &[u8],
) -> Result<usize, StreamError> {
    let written = if dict.is_empty() {
        lz4_flex::block::compress_into(input, output)?
    } else {
        lz4_flex::block::compress_into_with_dict(input, output, dict)?
    };
    Ok(written)
}

/// Decompresses one encoded block into `output` with `dict` as history.
///
/// `output` must be at least as large as the decoded block; the caller sizes
/// it at `max_message_size`, so a frame that decodes to more than that fails
/// in the codec rather than being silently truncated. Returns the decoded
/// length.
pub fn decompress_with_dict(
    input: &[u8],
    output: &mut [u8],
    dict: &[u8],
) -> Result<usize, StreamError> {
    let written = if dict.is_empty() {
        lz4_flex::block::decompress_into(input, output)?
    } else {
        lz4_flex::block::decompress_into_with_dict(input, output, dict)?
    };
    Ok(written)
}
