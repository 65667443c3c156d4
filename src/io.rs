//! `std::io` adapters over the encoder and decoder sessions.
//!
//! [`FrameWriter`] treats each `write` call as one message, mirroring the
//! contract of the wrapped protocol's original writer: callers that want
//! message boundaries get exactly the boundaries they wrote. [`FrameReader`]
//! is a plain pull-based reader that hides frame boundaries entirely.

use std::io::{self, Read, Write};

use crate::block::{self, FRAME_HEADER_SIZE};
use crate::config::{Stats, StreamConfig};
use crate::decode::Decoder;
use crate::encode::Encoder;

/// Compressing writer: each `write` call becomes one frame on the sink.
///
/// Calls larger than the configured `max_message_size` fail; split them at
/// the message boundaries you want on the wire.
#[derive(Debug)]
pub struct FrameWriter<W: Write> {
    encoder: Encoder,
    sink: W,
    frame_buf: Vec<u8>,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(sink: W, config: StreamConfig) -> Self {
        Self {
            encoder: Encoder::new(config),
            sink,
            frame_buf: Vec::new(),
        }
    }

    /// Snapshot of the encoder's cumulative counters.
    pub fn stats(&self) -> Stats {
        self.encoder.stats()
    }

    /// Flushes the sink and returns it. The encoder's window is discarded;
    /// the stream it produced stays decodable on its own.
    pub fn finish(mut self) -> io::Result<W> {
        self.sink.flush()?;
        self.encoder.release();
        Ok(self.sink)
    }
}

impl<W: Write> Write for FrameWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.encoder.write(buf)?;
        self.frame_buf
            .resize(FRAME_HEADER_SIZE + block::encoded_bound(buf.len()), 0);
        let n = self.encoder.process(&mut self.frame_buf)?;
        self.sink.write_all(&self.frame_buf[..n])?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Decompressing reader over a framed stream.
///
/// Zero-length frames are skipped so that `Ok(0)` keeps its `std::io::Read`
/// meaning of end-of-stream.
#[derive(Debug)]
pub struct FrameReader<R: Read> {
    decoder: Decoder<R>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(src: R, config: StreamConfig) -> Self {
        Self {
            decoder: Decoder::new(src, config),
        }
    }

    /// Snapshot of the decoder's cumulative counters.
    pub fn stats(&self) -> Stats {
        self.decoder.stats()
    }

    /// Consumes the reader and returns the underlying source.
    pub fn into_inner(self) -> R {
        self.decoder.into_inner()
    }
}

impl<R: Read> Read for FrameReader<R> {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        if dst.is_empty() {
            return Ok(0);
        }
        loop {
            match self.decoder.read(dst)? {
                None => return Ok(0),
                Some(0) => continue,
                Some(n) => return Ok(n),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn config() -> StreamConfig {
        StreamConfig::new(8 * 1024, 1024)
    }

    #[test]
    fn writer_then_reader_round_trip() {
        let mut writer = FrameWriter::new(Vec::new(), config());
        writer.write_all(b"first message").unwrap();
        writer.write_all(b"second message").unwrap();
        let stream = writer.finish().unwrap();

        let mut reader = FrameReader::new(Cursor::new(stream), config());
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"first messagesecond message");
    }

    #[test]
    fn writer_rejects_oversized_call() {
        let mut writer = FrameWriter::new(Vec::new(), config());
        let err = writer.write(&vec![0u8; 2048]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn reader_skips_empty_frames() {
        let mut writer = FrameWriter::new(Vec::new(), config());
        writer.write_all(b"payload").unwrap();
        // An empty write produces a zero-length frame on the wire.
        assert_eq!(writer.write(b"").unwrap(), 0);
        writer.write_all(b" more").unwrap();
        let stream = writer.finish().unwrap();

        let mut reader = FrameReader::new(Cursor::new(stream), config());
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, b"payload more");
    }

    #[test]
    fn truncated_stream_surfaces_unexpected_eof() {
        let mut writer = FrameWriter::new(Vec::new(), config());
        writer.write_all(b"a message that will be cut off").unwrap();
        let mut stream = writer.finish().unwrap();
        stream.truncate(stream.len() - 3);

        let mut reader = FrameReader::new(Cursor::new(stream), config());
        let mut decoded = Vec::new();
        let err = reader.read_to_end(&mut decoded).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn writer_stats_count_messages() {
        let mut writer = FrameWriter::new(Vec::new(), config());
        writer.write_all(b"one").unwrap();
        writer.write_all(b"two").unwrap();
        let stats = writer.stats();
        assert_eq!(stats.blocks, 2);
        assert_eq!(stats.raw_bytes, 6);
    }
}
