//! Lazy payload iterator over a byte source.

use std::io::{self, Read};

use tracing::warn;

use super::FRAMING_TARGET;
use super::decoder::FrameDecoder;
use super::error::FramingError;

const READ_CHUNK_BYTES: usize = 8 * 1024;

/// Yields decoded payloads from a [`Read`] source.
///
/// Input is read in chunks only when the decoder needs more bytes, so a
/// payload is yielded as soon as its final byte arrives. Iteration ends
/// when the source reaches end of input; a partial frame left in the buffer
/// at that point is dropped with a warning. After an error the iterator is
/// fused and yields nothing further.
#[derive(Debug)]
pub struct FrameReader<R> {
    source: R,
    decoder: FrameDecoder,
    chunk: Vec<u8>,
    finished: bool,
}

impl<R: Read> FrameReader<R> {
    /// Wraps a byte source.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self {
            source,
            decoder: FrameDecoder::new(),
            chunk: vec![0_u8; READ_CHUNK_BYTES],
            finished: false,
        }
    }

    /// The decoder state, for diagnostics.
    #[must_use]
    pub const fn decoder(&self) -> &FrameDecoder {
        &self.decoder
    }

    fn fill(&mut self) -> io::Result<usize> {
        let bytes_read = read_with_retry(&mut self.source, &mut self.chunk)?;
        if let Some(received) = self.chunk.get(..bytes_read) {
            self.decoder.feed(received);
        }
        Ok(bytes_read)
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<String, FramingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.decoder.next_frame() {
                Ok(Some(payload)) => return Some(Ok(payload)),
                Ok(None) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(error));
                }
            }

            match self.fill() {
                Ok(0) => {
                    self.finished = true;
                    if !self.decoder.is_idle() {
                        warn!(
                            target: FRAMING_TARGET,
                            buffered = self.decoder.buffered(),
                            mode = ?self.decoder.mode(),
                            "input ended inside a frame; discarding partial data"
                        );
                    }
                    return None;
                }
                Ok(_) => {}
                Err(error) => {
                    self.finished = true;
                    return Some(Err(FramingError::Io(error)));
                }
            }
        }
    }
}

fn read_with_retry<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match source.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;
    use crate::framing::encode_frame;

    /// Hands out at most `step` bytes per read, with an interruption first.
    struct TrickleReader {
        data: Vec<u8>,
        position: usize,
        step: usize,
        interrupted: bool,
    }

    impl TrickleReader {
        fn new(data: Vec<u8>, step: usize) -> Self {
            Self {
                data,
                position: 0,
                step,
                interrupted: false,
            }
        }
    }

    impl Read for TrickleReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            let remaining = self.data.get(self.position..).unwrap_or_default();
            let count = remaining.len().min(self.step).min(buf.len());
            buf[..count].copy_from_slice(&remaining[..count]);
            self.position += count;
            Ok(count)
        }
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }
    }

    #[rstest]
    fn yields_each_payload_then_ends() {
        let mut bytes = encode_frame("alpha");
        bytes.extend(encode_frame("beta"));
        let reader = FrameReader::new(Cursor::new(bytes));

        let payloads: Vec<String> = reader
            .collect::<Result<_, _>>()
            .expect("read failed");

        assert_eq!(payloads, vec![String::from("alpha"), String::from("beta")]);
    }

    #[rstest]
    fn reassembles_trickled_input() {
        let mut bytes = encode_frame(r#"{"jsonrpc":"2.0","method":"update"}"#);
        bytes.extend(encode_frame("second"));
        let reader = FrameReader::new(TrickleReader::new(bytes, 3));

        let payloads: Vec<String> = reader
            .collect::<Result<_, _>>()
            .expect("read failed");

        assert_eq!(payloads, vec![
            String::from(r#"{"jsonrpc":"2.0","method":"update"}"#),
            String::from("second"),
        ]);
    }

    #[rstest]
    fn drops_partial_frame_at_end_of_input() {
        let mut bytes = encode_frame("complete");
        bytes.extend_from_slice(b"Content-Length: 10\r\n\r\nshort");
        let mut reader = FrameReader::new(Cursor::new(bytes));

        assert_eq!(
            reader.next().transpose().expect("read failed"),
            Some(String::from("complete"))
        );
        assert!(reader.next().is_none());
        assert_eq!(reader.decoder().buffered(), 5);
    }

    #[rstest]
    fn stops_after_framing_error() {
        let bytes = b"Content-Type: application/json\r\n\r\n{}".to_vec();
        let mut reader = FrameReader::new(Cursor::new(bytes));

        assert!(matches!(
            reader.next(),
            Some(Err(FramingError::MissingContentLength))
        ));
        assert!(reader.next().is_none());
    }

    #[rstest]
    fn surfaces_io_errors() {
        let mut reader = FrameReader::new(FailingReader);

        assert!(matches!(reader.next(), Some(Err(FramingError::Io(_)))));
        assert!(reader.next().is_none());
    }
}
