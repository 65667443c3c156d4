//! Session configuration and cumulative counters.
//!
//! Construction never fails: both sizes are silently clamped to documented
//! bounds. A window smaller than [`MIN_DICTIONARY_SIZE`] cannot hold a useful
//! back-reference span, and a message limit of zero is meaningless, so
//! out-of-range requests are pulled to the nearest legal value instead of
//! being rejected. Callers that care can read the clamped values back.

use crate::block;

/// Largest input the block codec supports in a single call.
/// Same value as `LZ4_MAX_INPUT_SIZE` (0x7E000000 = 2 113 929 216 bytes).
pub const MAX_INPUT_SIZE: usize = 0x7E00_0000;

/// Smallest usable dictionary window.
pub const MIN_DICTIONARY_SIZE: usize = 4 * 1024;

/// Smallest usable per-message limit.
pub const MIN_MESSAGE_SIZE: usize = 256;

/// Default window and message size: 64 KiB. Below ~64 KiB the codec's match
/// window no longer spans a whole block, so this is the smallest size that
/// does not sacrifice ratio on typical data.
pub const DEFAULT_BLOCK_SIZE: usize = 64 * 1024;

/// Fixed per-session sizing, shared verbatim by the encoder and decoder of
/// one stream. Mismatched configurations desynchronise the dictionary
/// windows and corrupt the decoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    dictionary_size: usize,
    max_message_size: usize,
}

impl StreamConfig {
    /// Builds a configuration, clamping both sizes to their legal ranges.
    ///
    /// `max_message_size` is clamped to `[MIN_MESSAGE_SIZE, MAX_INPUT_SIZE]`.
    /// `dictionary_size` is clamped to at least `MIN_DICTIONARY_SIZE` and at
    /// least the (clamped) `max_message_size`, so the window always fits one
    /// whole message and the wraparound rule is total.
    pub fn new(dictionary_size: usize, max_message_size: usize) -> Self {
        let max_message_size = max_message_size.clamp(MIN_MESSAGE_SIZE, MAX_INPUT_SIZE);
        let dictionary_size = dictionary_size
            .clamp(MIN_DICTIONARY_SIZE, MAX_INPUT_SIZE)
            .max(max_message_size);
        Self {
            dictionary_size,
            max_message_size,
        }
    }

    /// Window capacity in bytes, after clamping.
    pub fn dictionary_size(&self) -> usize {
        self.dictionary_size
    }

    /// Per-message byte limit, after clamping.
    pub fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Worst-case encoded block size for this configuration. Frames that
    /// declare a larger payload are rejected as corrupt.
    pub fn max_encoded_size(&self) -> usize {
        block::encoded_bound(self.max_message_size)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE, DEFAULT_BLOCK_SIZE)
    }
}

/// Cumulative per-session counters. Monotonic; snapshots are returned by
/// value and carry no live reference into the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Blocks processed (frames emitted or consumed), including empty ones.
    pub blocks: u64,
    /// Uncompressed message bytes.
    pub raw_bytes: u64,
    /// Bytes on the wire, including each frame's 4-byte length prefix.
    pub encoded_bytes: u64,
}

impl Stats {
    pub(crate) fn record(&mut self, raw: usize, encoded: usize) {
        self.blocks += 1;
        self.raw_bytes += raw as u64;
        self.encoded_bytes += encoded as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_clamp_to_minimums() {
        let cfg = StreamConfig::new(0, 0);
        assert_eq!(cfg.dictionary_size(), MIN_DICTIONARY_SIZE);
        assert_eq!(cfg.max_message_size(), MIN_MESSAGE_SIZE);
    }

    #[test]
    fn window_grows_to_fit_one_message() {
        // Requested window smaller than the message limit: the window wins.
        let cfg = StreamConfig::new(1024, 1024 * 1024);
        assert_eq!(cfg.max_message_size(), 1024 * 1024);
        assert_eq!(cfg.dictionary_size(), 1024 * 1024);
    }

    #[test]
    fn oversized_requests_clamp_to_codec_maximum() {
        let cfg = StreamConfig::new(usize::MAX, usize::MAX);
        assert_eq!(cfg.dictionary_size(), MAX_INPUT_SIZE);
        assert_eq!(cfg.max_message_size(), MAX_INPUT_SIZE);
    }

    #[test]
    fn in_range_sizes_pass_through() {
        let cfg = StreamConfig::new(64 * 1024, 8 * 1024);
        assert_eq!(cfg.dictionary_size(), 64 * 1024);
        assert_eq!(cfg.max_message_size(), 8 * 1024);
    }

    #[test]
    fn max_encoded_size_exceeds_message_size() {
        // Incompressible data expands; the guard must leave room for that.
        let cfg = StreamConfig::default();
        assert!(cfg.max_encoded_size() > cfg.max_message_size());
    }

    #[test]
    fn stats_accumulate() {
        let mut stats = Stats::default();
        stats.record(12, 20);
        stats.record(0, 4);
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.raw_bytes, 12);
        assert_eq!(stats.encoded_bytes, 24);
    }
}
