//! Dictionary window: the shared view of recently processed bytes.
//!
//! The window is a fixed-capacity byte arena with a single write cursor. One
//! window lives on the encoder side and one on the decoder side of a stream;
//! they never share memory, but as long as both sides perform the same
//! sequence of reservations and commits, their cursors — and therefore the
//! offsets at which every block's bytes land — evolve identically. That
//! lock-step ("window parity") is the protocol's central invariant: the wire
//! format carries no offsets, so the decoder recomputes them.
//!
//! The reservation rule is deliberately independent of payload length:
//! sessions reserve the full `max_message_size` before every non-empty block
//! and wrap iff that reservation does not fit. The decoder cannot know a
//! block's decoded length before decoding it, so any rule that wrapped on the
//! *actual* length would force it to guess. With the fixed rule, the wrap
//! decision depends only on the configuration and on the cursor, which both
//! sides advance by the same per-block lengths.
//!
//! Wraparound is atomic: the cursor snaps back to zero and every byte of
//! prior dictionary content is considered discarded at once. A block written
//! immediately after a wraparound compresses against an empty dictionary and
//! can never reference pre-wrap bytes. Mid-block partial overwrites do not
//! exist in this design.

use crate::error::StreamError;

/// Append-then-wrap byte arena that the block codec reads and writes through.
///
/// Exclusively owned by the session that created it; not safe for concurrent
/// mutation. See [`DictWindow::reserve`] for the wraparound rule.
#[derive(Debug)]
pub struct DictWindow {
    buf: Box<[u8]>,
    cursor: usize,
}

impl DictWindow {
    /// Creates a window of exactly `capacity` bytes with the cursor at zero.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            cursor: 0,
        }
    }

    /// Fixed capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Current write offset. Always `<= capacity`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Reserves room for `len` bytes at the cursor and returns the offset the
    /// next commit will write to, without advancing the cursor.
    ///
    /// Fails with [`StreamError::CapacityExceeded`] when `len` alone exceeds
    /// the capacity. When `cursor + len > capacity`, the cursor first wraps
    /// to zero, atomically discarding all prior dictionary content.
    pub fn reserve(&mut self, len: usize) -> Result<usize, StreamError> {
        if len > self.buf.len() {
            return Err(StreamError::CapacityExceeded {
                len,
                capacity: self.buf.len(),
            });
        }
        if self.cursor + len > self.buf.len() {
            self.cursor = 0;
        }
        Ok(self.cursor)
    }

    /// Advances the cursor over `len` bytes of the most recent reservation.
    pub fn commit(&mut self, len: usize) {
        debug_assert!(self.cursor + len <= self.buf.len());
        self.cursor += len;
    }

    /// Writes `bytes` at the cursor (wrapping first if they do not fit) and
    /// returns the offset they were written to.
    ///
    /// For the same sequence of `append` lengths the sequence of returned
    /// offsets is identical and reproducible — the decoder depends on it.
    pub fn append(&mut self, bytes: &[u8]) -> Result<usize, StreamError> {
        let offset = self.reserve(bytes.len())?;
        self.buf[offset..offset + bytes.len()].copy_from_slice(bytes);
        self.commit(bytes.len());
        Ok(offset)
    }

    /// Resets the cursor to zero. Used when the window content is no longer
    /// needed as a dictionary.
    pub fn clear(&mut self) {
        self.cursor = 0;
    }

    /// The live dictionary: every byte written since the last wraparound.
    pub fn dict(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    /// Splits the arena at the cursor into the live dictionary and the free
    /// tail. The two borrows are disjoint, so the codec can read the
    /// dictionary while writing decoded bytes into the tail.
    pub fn split_at_cursor(&mut self) -> (&[u8], &mut [u8]) {
        let (dict, free) = self.buf.split_at_mut(self.cursor);
        (dict, free)
    }

    /// A committed span of the arena. Panics on out-of-range offsets; callers
    /// only pass spans they previously committed.
    pub fn bytes(&self, offset: usize, len: usize) -> &[u8] {
        &self.buf[offset..offset + len]
    }
}
