//! Stream decoder session.
//!
//! The decoder pulls length-prefixed frames from an input source, expands
//! each block into its dictionary window at the same offsets the encoder
//! used, and serves the decoded bytes to the caller. When the caller's
//! buffer is smaller than one decoded block, the remainder is served from
//! the window on subsequent reads without re-invoking the codec or touching
//! the source — the decoder only advances to the next frame once the current
//! block is exhausted.
//!
//! Frames must be consumed in the exact order they were produced. The wire
//! format carries no sequence numbers: an out-of-order or replayed frame
//! either fails in the codec or decodes to wrong bytes, and in the latter
//! case every subsequent block is corrupt too, because the window no longer
//! matches the encoder's. Order preservation is the transport's job (a pipe
//! or file qualifies; a reordering multiplexer does not).

use std::io::{self, Read};

use crate::block::{self, FRAME_HEADER_SIZE};
use crate::config::{Stats, StreamConfig};
use crate::error::StreamError;
use crate::window::DictWindow;

/// A decoded block parked in the window, partially delivered to the caller.
#[derive(Debug)]
struct PendingBlock {
    offset: usize,
    len: usize,
    consumed: usize,
}

/// Streaming decompression session over a byte source.
///
/// The source read in [`Decoder::read`] is the only point where this crate
/// blocks. Not safe for concurrent mutation.
#[derive(Debug)]
pub struct Decoder<R: Read> {
    src: R,
    config: StreamConfig,
    window: DictWindow,
    frame_buf: Vec<u8>,
    pending: Option<PendingBlock>,
    stats: Stats,
    released: bool,
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder over `src` with the same (clamped) configuration as
    /// the encoder that produced the stream.
    pub fn new(src: R, config: StreamConfig) -> Self {
        Self {
            src,
            config,
            window: DictWindow::new(config.dictionary_size()),
            frame_buf: Vec::new(),
            pending: None,
            stats: Stats::default(),
            released: false,
        }
    }

    /// Delivers decoded bytes into `dst`.
    ///
    /// Returns `Ok(None)` when the source is exhausted exactly at a frame
    /// boundary (clean end of stream) and `Ok(Some(n))` otherwise, where `n`
    /// is the byte count delivered — zero for a legitimately empty message.
    /// Exhaustion mid-frame is [`StreamError::ShortRead`]; a declared length
    /// beyond the worst-case encoded block size is
    /// [`StreamError::InvalidBlockSize`]. Both are fatal to the session.
    pub fn read(&mut self, dst: &mut [u8]) -> Result<Option<usize>, StreamError> {
        if self.released {
            return Err(StreamError::SessionReleased);
        }

        // Serve the rest of an already-decoded block first.
        if self.pending.is_some() {
            return Ok(Some(self.serve(dst)));
        }

        let encoded_len = match self.read_header()? {
            None => return Ok(None),
            Some(len) => len as usize,
        };

        if encoded_len == 0 {
            // Empty message: one frame on the wire, nothing in the window.
            self.stats.record(0, FRAME_HEADER_SIZE);
            return Ok(Some(0));
        }
        if encoded_len > self.config.max_encoded_size() {
            return Err(StreamError::InvalidBlockSize {
                len: encoded_len,
                max: self.config.max_encoded_size(),
            });
        }

        self.frame_buf.resize(encoded_len, 0);
        self.src
            .read_exact(&mut self.frame_buf)
            .map_err(|e| match e.kind() {
                io::ErrorKind::UnexpectedEof => StreamError::ShortRead,
                _ => StreamError::Io(e),
            })?;

        // Mirror the encoder's reservation exactly, then expand the block at
        // the reserved offset with the live prefix as dictionary.
        let max_message = self.config.max_message_size();
        let offset = self.window.reserve(max_message)?;
        let (dict, free) = self.window.split_at_cursor();
        let decoded_len = block::decompress_with_dict(&self.frame_buf, &mut free[..max_message], dict)?;
        self.window.commit(decoded_len);

        self.stats.record(decoded_len, FRAME_HEADER_SIZE + encoded_len);
        self.pending = Some(PendingBlock {
            offset,
            len: decoded_len,
            consumed: 0,
        });
        Ok(Some(self.serve(dst)))
    }

    /// Copies as much of the pending block as fits into `dst`.
    fn serve(&mut self, dst: &mut [u8]) -> usize {
        let Some(pending) = self.pending.as_mut() else {
            return 0;
        };
        let n = dst.len().min(pending.len - pending.consumed);
        dst[..n].copy_from_slice(self.window.bytes(pending.offset + pending.consumed, n));
        pending.consumed += n;
        if pending.consumed == pending.len {
            self.pending = None;
        }
        n
    }

    /// Reads the 4-byte LE length prefix. `Ok(None)` when the source ends
    /// before the first header byte; `ShortRead` when it ends inside it.
    fn read_header(&mut self) -> Result<Option<u32>, StreamError> {
        let mut header = [0u8; FRAME_HEADER_SIZE];
        let mut filled = 0;
        while filled < header.len() {
            match self.src.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(StreamError::ShortRead),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Io(e)),
            }
        }
        Ok(Some(u32::from_le_bytes(header)))
    }

    /// Snapshot of the cumulative counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The session's (clamped) configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Shared reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.src
    }

    /// Consumes the decoder and returns the underlying source.
    pub fn into_inner(self) -> R {
        self.src
    }

    /// Releases the session's buffers. Idempotent; every operation after the
    /// first `release` fails with [`StreamError::SessionReleased`].
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.frame_buf = Vec::new();
        self.pending = None;
        self.window = DictWindow::new(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::Encoder;
    use std::io::Cursor;

    fn config() -> StreamConfig {
        StreamConfig::new(4096, 1024)
    }

    fn encode_messages(messages: &[&[u8]]) -> Vec<u8> {
        let mut enc = Encoder::new(config());
        let mut stream = Vec::new();
        let mut frame = vec![0u8; FRAME_HEADER_SIZE + block::encoded_bound(1024)];
        for msg in messages {
            enc.write(msg).unwrap();
            let n = enc.process(&mut frame).unwrap();
            stream.extend_from_slice(&frame[..n]);
        }
        stream
    }

    #[test]
    fn empty_source_is_clean_end_of_stream() {
        let mut dec = Decoder::new(Cursor::new(Vec::new()), config());
        let mut dst = [0u8; 16];
        assert!(dec.read(&mut dst).unwrap().is_none());
        // Still at end on the next call.
        assert!(dec.read(&mut dst).unwrap().is_none());
    }

    #[test]
    fn partial_delivery_spans_multiple_reads() {
        let stream = encode_messages(&[b"0123456789abcdef"]);
        let mut dec = Decoder::new(Cursor::new(stream), config());

        let mut dst = [0u8; 5];
        assert_eq!(dec.read(&mut dst).unwrap(), Some(5));
        assert_eq!(&dst, b"01234");
        assert_eq!(dec.read(&mut dst).unwrap(), Some(5));
        assert_eq!(&dst, b"56789");
        assert_eq!(dec.read(&mut dst).unwrap(), Some(5));
        assert_eq!(&dst, b"abcde");
        assert_eq!(dec.read(&mut dst).unwrap(), Some(1));
        assert_eq!(dst[0], b'f');
        assert!(dec.read(&mut dst).unwrap().is_none());

        // One block, one codec invocation, sixteen raw bytes.
        assert_eq!(dec.stats().blocks, 1);
        assert_eq!(dec.stats().raw_bytes, 16);
    }

    #[test]
    fn empty_frame_decodes_to_zero_length_message() {
        let stream = encode_messages(&[b"", b"after the empty one"]);
        let mut dec = Decoder::new(Cursor::new(stream), config());

        let mut dst = [0u8; 64];
        assert_eq!(dec.read(&mut dst).unwrap(), Some(0));
        let n = dec.read(&mut dst).unwrap().unwrap();
        assert_eq!(&dst[..n], b"after the empty one");
        assert!(dec.read(&mut dst).unwrap().is_none());
    }

    #[test]
    fn truncated_header_is_short_read() {
        let mut stream = encode_messages(&[b"hello"]);
        stream.truncate(2);
        let mut dec = Decoder::new(Cursor::new(stream), config());
        let mut dst = [0u8; 16];
        assert!(matches!(dec.read(&mut dst), Err(StreamError::ShortRead)));
    }

    #[test]
    fn truncated_payload_is_short_read() {
        let stream = encode_messages(&[b"hello world, hello world"]);
        let truncated = stream[..FRAME_HEADER_SIZE + 2].to_vec();
        let mut dec = Decoder::new(Cursor::new(truncated), config());
        let mut dst = [0u8; 64];
        assert!(matches!(dec.read(&mut dst), Err(StreamError::ShortRead)));
    }

    #[test]
    fn oversized_declared_length_is_invalid_block_size() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&u32::MAX.to_le_bytes());
        stream.extend_from_slice(&[0u8; 32]);
        let mut dec = Decoder::new(Cursor::new(stream), config());
        let mut dst = [0u8; 64];
        assert!(matches!(
            dec.read(&mut dst),
            Err(StreamError::InvalidBlockSize { .. })
        ));
    }

    #[test]
    fn corrupt_payload_propagates_codec_failure() {
        let mut stream = Vec::new();
        stream.extend_from_slice(&32u32.to_le_bytes());
        stream.extend_from_slice(&[0xFFu8; 32]);
        let mut dec = Decoder::new(Cursor::new(stream), config());
        let mut dst = [0u8; 64];
        assert!(matches!(
            dec.read(&mut dst),
            Err(StreamError::Decompress(_))
        ));
    }

    #[test]
    fn release_is_idempotent() {
        let mut dec = Decoder::new(Cursor::new(Vec::new()), config());
        dec.release();
        dec.release();
        let mut dst = [0u8; 8];
        assert!(matches!(
            dec.read(&mut dst),
            Err(StreamError::SessionReleased)
        ));
    }
}
