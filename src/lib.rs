//! Streaming LZ4 block compression with a shared dictionary window.
//!
//! The block codec (`lz4_flex`) only operates on small, bounded blocks and
//! only reaches good ratios when it can reference recently seen bytes beyond
//! the current block. This crate supplies the protocol around it:
//!
//! - [`Encoder`] splits caller bytes into bounded messages, appends each to
//!   a dictionary window, compresses it against the window's contents, and
//!   emits one `[LE32 length][codec bytes]` frame per message.
//! - [`Decoder`] parses frames, expands each block into its own window at
//!   the same offsets the encoder used, and serves the decoded bytes —
//!   spanning multiple reads when the caller's buffer is smaller than one
//!   block. A frame with `length == 0` is a legitimately empty message.
//! - [`FrameWriter`] / [`FrameReader`] wrap the sessions in `std::io`
//!   traits for callers that just want a writer and a reader.
//!
//! # Window parity
//!
//! Correctness rests on one invariant: after processing the same sequence of
//! frames, the encoder's and decoder's windows are identical. The wire
//! format carries no offsets — the decoder recomputes them — so frames must
//! be consumed in exactly the order they were produced, over a transport
//! that preserves byte order (a pipe or file, not a reordering multiplexer).
//! See [`window::DictWindow`] for the reservation rule that makes the
//! recomputation deterministic.
//!
//! # Sessions
//!
//! An encoder or decoder is a single-stream session: it owns its window, is
//! not safe for concurrent mutation, and must be paired with a session built
//! from the same [`StreamConfig`]. Configuration clamps rather than fails;
//! see [`StreamConfig::new`]. `release` frees a session's buffers early and
//! is idempotent; dropping the session works just as well.
//!
//! ```
//! use std::io::Cursor;
//! use lz4stream::{Decoder, Encoder, StreamConfig};
//!
//! let config = StreamConfig::default();
//! let mut encoder = Encoder::new(config);
//!
//! encoder.write(b"Hello World!").unwrap();
//! let mut frame = vec![0u8; encoder.frame_bound()];
//! let n = encoder.process(&mut frame).unwrap();
//!
//! let mut decoder = Decoder::new(Cursor::new(&frame[..n]), config);
//! let mut message = [0u8; 64];
//! let len = decoder.read(&mut message).unwrap().unwrap();
//! assert_eq!(&message[..len], b"Hello World!");
//! ```

pub mod block;
pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod io;
pub mod window;

pub use block::FRAME_HEADER_SIZE;
pub use config::{
    Stats, StreamConfig, DEFAULT_BLOCK_SIZE, MAX_INPUT_SIZE, MIN_DICTIONARY_SIZE, MIN_MESSAGE_SIZE,
};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::StreamError;
pub use io::{FrameReader, FrameWriter};
pub use window::DictWindow;
