//! Error taxonomy for the streaming protocol.
//!
//! Every failure mode is a typed variant; nothing is retried internally.
//! Retrying a window-stateful operation after partial mutation could
//! desynchronise the encoder's and decoder's view of the dictionary window,
//! so any retry policy belongs to the caller — and must restart the whole
//! session whenever window state is suspect.

use std::io;

/// Errors produced by window, encoder, and decoder operations.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Input larger than the dictionary window itself — caller error.
    #[error("input of {len} bytes exceeds window capacity of {capacity} bytes")]
    CapacityExceeded {
        /// Length of the rejected input.
        len: usize,
        /// Fixed capacity of the window.
        capacity: usize,
    },

    /// Pending message would exceed the configured maximum — caller error.
    /// The pending message is left untouched.
    #[error("message of {len} bytes exceeds configured maximum of {max} bytes")]
    MessageTooLarge {
        /// Length the pending message would have reached.
        len: usize,
        /// Configured `max_message_size`.
        max: usize,
    },

    /// Caller-supplied output buffer is smaller than the codec's worst-case
    /// bound. Retryable with a larger buffer; nothing was written.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    OutputTooSmall {
        /// Worst-case frame size for the pending message.
        needed: usize,
        /// Bytes the caller actually supplied.
        available: usize,
    },

    /// `process` called with no pending message.
    #[error("no pending message to process")]
    NoData,

    /// The transport ended in the middle of a frame. The stream is truncated
    /// or corrupt; the session must not be reused.
    #[error("stream ended in the middle of a frame")]
    ShortRead,

    /// A frame declared a length beyond the worst-case encoded block size.
    /// Treated as corruption (or a foreign format), fatal to the session.
    #[error("declared frame length {len} exceeds maximum encoded block size {max}")]
    InvalidBlockSize {
        /// Length field read from the frame header.
        len: usize,
        /// `encoded_bound(max_message_size)` for this session.
        max: usize,
    },

    /// The session was already released.
    #[error("session already released")]
    SessionReleased,

    /// The block codec failed to compress. Propagated verbatim.
    #[error("block compression failed: {0}")]
    Compress(#[from] lz4_flex::block::CompressError),

    /// The block codec failed to decompress — malformed input or an output
    /// span too small for the decoded block. Propagated verbatim.
    #[error("block decompression failed: {0}")]
    Decompress(#[from] lz4_flex::block::DecompressError),

    /// I/O error from the underlying source or sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<StreamError> for io::Error {
    fn from(e: StreamError) -> Self {
        match e {
            StreamError::Io(inner) => inner,
            StreamError::ShortRead => io::Error::new(io::ErrorKind::UnexpectedEof, e.to_string()),
            StreamError::MessageTooLarge { .. } | StreamError::NoData => {
                io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
            }
            other => io::Error::new(io::ErrorKind::InvalidData, other.to_string()),
        }
    }
}
