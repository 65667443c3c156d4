//! Stream encoder session.
//!
//! The encoder buffers caller bytes at *message* granularity — the codec
//! operates on whole blocks, so no output exists until [`Encoder::process`]
//! is called. Each processed message becomes one frame: the payload is
//! appended to the dictionary window, compressed against everything already
//! in the window, and emitted as `[LE32 length][codec bytes]`.
//!
//! The window is never reset between `process` calls — only by wraparound
//! inside the reservation — so later blocks reference earlier ones. That
//! cross-block history is the entire point of streaming compression.

use crate::block::{self, FRAME_HEADER_SIZE};
use crate::config::{Stats, StreamConfig};
use crate::error::StreamError;
use crate::window::DictWindow;

/// Streaming compression session.
///
/// Not safe for concurrent mutation; give each stream its own encoder. See
/// the crate docs for the pairing requirement with [`crate::Decoder`].
#[derive(Debug)]
pub struct Encoder {
    config: StreamConfig,
    window: DictWindow,
    pending: Vec<u8>,
    has_pending: bool,
    stats: Stats,
    released: bool,
}

impl Encoder {
    /// Creates an encoder for one stream. The same (clamped) configuration
    /// must be used by the decoder on the other end.
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            window: DictWindow::new(config.dictionary_size()),
            pending: Vec::with_capacity(config.max_message_size().min(64 * 1024)),
            has_pending: false,
            stats: Stats::default(),
            released: false,
        }
    }

    /// Accumulates `bytes` into the pending message.
    ///
    /// Fails with [`StreamError::MessageTooLarge`] if the accumulated length
    /// would exceed `max_message_size`; the pending message is left
    /// untouched. An empty `write` still arms a zero-length message, which
    /// [`process`](Self::process) emits as a bare `length == 0` frame.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        if self.released {
            return Err(StreamError::SessionReleased);
        }
        let len = self.pending.len() + bytes.len();
        if len > self.config.max_message_size() {
            return Err(StreamError::MessageTooLarge {
                len,
                max: self.config.max_message_size(),
            });
        }
        self.pending.extend_from_slice(bytes);
        self.has_pending = true;
        Ok(())
    }

    /// Number of bytes currently pending.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Worst-case frame size for the currently pending message; `process`
    /// requires an output buffer at least this large.
    pub fn frame_bound(&self) -> usize {
        FRAME_HEADER_SIZE + block::encoded_bound(self.pending.len())
    }

    /// Compresses the pending message into `out` as one length-prefixed
    /// frame and returns the frame's total size.
    ///
    /// Fails with [`StreamError::NoData`] when nothing is pending and with
    /// [`StreamError::OutputTooSmall`] when `out` is below
    /// [`frame_bound`](Self::frame_bound). All checks precede any mutation:
    /// on error nothing has been written to `out`, the window is unchanged,
    /// and the pending message stays intact for retry.
    pub fn process(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        if self.released {
            return Err(StreamError::SessionReleased);
        }
        if !self.has_pending {
            return Err(StreamError::NoData);
        }
        let payload_len = self.pending.len();
        let needed = FRAME_HEADER_SIZE + block::encoded_bound(payload_len);
        if out.len() < needed {
            return Err(StreamError::OutputTooSmall {
                needed,
                available: out.len(),
            });
        }

        let encoded_len = if payload_len == 0 {
            // A zero-length message frames as a bare length-0 prefix; the
            // codec is never invoked and the window does not move.
            0
        } else {
            // Reserve the full message limit so the wrap decision is
            // independent of this payload's length; the decoder mirrors the
            // identical reservation without knowing the length in advance.
            self.window.reserve(self.config.max_message_size())?;
            let (dict, free) = self.window.split_at_cursor();
            free[..payload_len].copy_from_slice(&self.pending);
            let n = block::compress_with_dict(
                &self.pending,
                &mut out[FRAME_HEADER_SIZE..],
                dict,
            )?;
            self.window.commit(payload_len);
            n
        };

        out[..FRAME_HEADER_SIZE].copy_from_slice(&(encoded_len as u32).to_le_bytes());
        self.stats.record(payload_len, FRAME_HEADER_SIZE + encoded_len);
        self.pending.clear();
        self.has_pending = false;
        Ok(FRAME_HEADER_SIZE + encoded_len)
    }

    /// Snapshot of the cumulative counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The session's (clamped) configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Releases the session's buffers. Idempotent; every operation after the
    /// first `release` fails with [`StreamError::SessionReleased`].
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.pending = Vec::new();
        self.has_pending = false;
        self.window = DictWindow::new(0);
    }
}
