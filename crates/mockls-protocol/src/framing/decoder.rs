//! Incremental frame decoder.

use tracing::trace;

use super::error::FramingError;
use super::header::FrameHeader;
use super::{FRAMING_TARGET, HEADER_SEPARATOR};

/// What the decoder needs next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Waiting for a complete header block terminated by a blank line.
    #[default]
    AwaitingHeader,
    /// Header parsed; waiting for the announced number of content bytes.
    AwaitingContent,
}

/// Reassembles message payloads from an arbitrarily chunked byte stream.
///
/// The decoder is an explicit state value: a mode, the bytes received but not
/// yet consumed, and the header of the frame in progress. Bytes are appended
/// with [`feed`](Self::feed) and complete payloads are pulled one at a time
/// with [`next_frame`](Self::next_frame), so a payload is never exposed before
/// both its header and its full content have arrived.
///
/// Content is decoded as UTF-8; invalid sequences are replaced with U+FFFD
/// rather than rejected.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    mode: DecodeMode,
    buffer: Vec<u8>,
    header: FrameHeader,
}

impl FrameDecoder {
    /// Creates an idle decoder with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of input to the internal buffer.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Advances the state machine until one payload completes or more input
    /// is required.
    ///
    /// Returns `Ok(None)` when the buffer holds no complete frame.
    ///
    /// # Errors
    ///
    /// Returns [`FramingError::MissingContentLength`] when a header block
    /// carries no usable `Content-Length`, and
    /// [`FramingError::ContentLengthOutOfRange`] when the announced length
    /// overflows. The decoder cannot resynchronise after either.
    pub fn next_frame(&mut self) -> Result<Option<String>, FramingError> {
        loop {
            match self.mode {
                DecodeMode::AwaitingHeader => {
                    let Some(end) = find_separator(&self.buffer) else {
                        return Ok(None);
                    };
                    let (block, _) = self.buffer.split_at(end);
                    self.header = FrameHeader::parse(block)?;
                    self.buffer.drain(..end + HEADER_SEPARATOR.len());
                    self.mode = DecodeMode::AwaitingContent;
                    trace!(
                        target: FRAMING_TARGET,
                        content_length = ?self.header.content_length(),
                        content_type = ?self.header.content_type(),
                        "parsed frame header"
                    );
                }
                DecodeMode::AwaitingContent => {
                    let length = self.header.require_content_length()?;
                    if self.buffer.len() < length {
                        return Ok(None);
                    }
                    let content: Vec<u8> = self.buffer.drain(..length).collect();
                    self.header = FrameHeader::default();
                    self.mode = DecodeMode::AwaitingHeader;
                    return Ok(Some(String::from_utf8_lossy(&content).into_owned()));
                }
            }
        }
    }

    /// Feeds a chunk and collects every payload it completes.
    ///
    /// A single chunk may complete zero, one, or many frames.
    ///
    /// # Errors
    ///
    /// Propagates the first framing error encountered. Payloads completed
    /// before the fault are discarded; use [`next_frame`](Self::next_frame)
    /// to observe them individually.
    pub fn decode(&mut self, chunk: &[u8]) -> Result<Vec<String>, FramingError> {
        self.feed(chunk);
        let mut payloads = Vec::new();
        while let Some(payload) = self.next_frame()? {
            payloads.push(payload);
        }
        Ok(payloads)
    }

    /// Current state of the decoder.
    #[must_use]
    pub const fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Number of bytes received but not yet consumed.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the decoder sits between frames with nothing buffered.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.mode == DecodeMode::AwaitingHeader && self.buffer.is_empty()
    }
}

fn find_separator(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEADER_SEPARATOR.len())
        .position(|window| window == HEADER_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::framing::encode_frame;

    fn collect_split(bytes: &[u8], chunk_size: usize) -> Vec<String> {
        let mut decoder = FrameDecoder::new();
        let mut payloads = Vec::new();
        for chunk in bytes.chunks(chunk_size) {
            payloads.extend(decoder.decode(chunk).expect("decode failed"));
        }
        assert!(decoder.is_idle());
        payloads
    }

    #[rstest]
    fn decodes_single_frame() {
        let mut decoder = FrameDecoder::new();

        let payloads = decoder
            .decode(b"Content-Length: 5\r\n\r\nhello")
            .expect("decode failed");

        assert_eq!(payloads, vec![String::from("hello")]);
        assert!(decoder.is_idle());
    }

    #[rstest]
    fn decodes_frame_with_content_type() {
        let mut decoder = FrameDecoder::new();
        let input = b"Content-Length: 4\r\nContent-Type: application/json\r\n\r\ntest";

        let payloads = decoder.decode(input).expect("decode failed");

        assert_eq!(payloads, vec![String::from("test")]);
    }

    #[rstest]
    fn decodes_empty_content() {
        let mut decoder = FrameDecoder::new();

        let payloads = decoder
            .decode(b"Content-Length: 0\r\n\r\n")
            .expect("decode failed");

        assert_eq!(payloads, vec![String::new()]);
    }

    #[rstest]
    fn waits_for_header_terminator() {
        let mut decoder = FrameDecoder::new();

        let payloads = decoder
            .decode(b"Content-Length: 5\r\n")
            .expect("decode failed");

        assert!(payloads.is_empty());
        assert_eq!(decoder.mode(), DecodeMode::AwaitingHeader);
        assert_eq!(decoder.buffered(), 19);
    }

    #[rstest]
    fn waits_for_full_content() {
        let mut decoder = FrameDecoder::new();

        let first = decoder
            .decode(b"Content-Length: 5\r\n\r\nhel")
            .expect("decode failed");
        assert!(first.is_empty());
        assert_eq!(decoder.mode(), DecodeMode::AwaitingContent);
        assert_eq!(decoder.buffered(), 3);

        let second = decoder.decode(b"lo").expect("decode failed");
        assert_eq!(second, vec![String::from("hello")]);
    }

    #[rstest]
    fn decodes_concatenated_frames_in_order() {
        let mut bytes = encode_frame(r#"{"foo":"bar"}"#);
        bytes.extend(encode_frame(r#"{"baz":[1,2,3]}"#));
        let mut decoder = FrameDecoder::new();

        let payloads = decoder.decode(&bytes).expect("decode failed");

        assert_eq!(
            payloads,
            vec![
                String::from(r#"{"foo":"bar"}"#),
                String::from(r#"{"baz":[1,2,3]}"#)
            ]
        );
    }

    #[rstest]
    fn keeps_trailing_partial_frame_buffered() {
        let mut bytes = encode_frame("one");
        bytes.extend_from_slice(b"Content-Length: 3\r\n\r\ntw");
        let mut decoder = FrameDecoder::new();

        let payloads = decoder.decode(&bytes).expect("decode failed");

        assert_eq!(payloads, vec![String::from("one")]);
        assert_eq!(decoder.buffered(), 2);
        assert_eq!(decoder.decode(b"o").expect("decode failed"), vec![
            String::from("two")
        ]);
    }

    #[rstest]
    fn counts_length_in_bytes_not_characters() {
        let payload = r#"{"text":"héllo wörld ✓"}"#;
        let frame = encode_frame(payload);

        assert_eq!(collect_split(&frame, frame.len()), vec![payload.to_owned()]);
    }

    #[rstest]
    fn every_split_point_yields_the_same_payloads() {
        let mut bytes = encode_frame(r#"{"jsonrpc":"2.0","method":"add","params":[1,2],"id":1}"#);
        bytes.extend(encode_frame("ünïcode"));
        let whole = collect_split(&bytes, bytes.len());

        for split in 1..bytes.len() {
            let (head, tail) = bytes.split_at(split);
            let mut decoder = FrameDecoder::new();
            let mut payloads = decoder.decode(head).expect("decode failed");
            payloads.extend(decoder.decode(tail).expect("decode failed"));
            assert_eq!(payloads, whole, "split at byte {split}");
        }
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(7)]
    fn small_chunks_yield_the_same_payloads(#[case] chunk_size: usize) {
        let mut bytes = encode_frame("first");
        bytes.extend(encode_frame("second"));

        assert_eq!(collect_split(&bytes, chunk_size), vec![
            String::from("first"),
            String::from("second")
        ]);
    }

    #[rstest]
    fn replaces_invalid_utf8() {
        let mut decoder = FrameDecoder::new();

        let payloads = decoder
            .decode(b"Content-Length: 2\r\n\r\n\xff!")
            .expect("decode failed");

        assert_eq!(payloads, vec![String::from("\u{fffd}!")]);
    }

    #[rstest]
    fn fails_without_content_length() {
        let mut decoder = FrameDecoder::new();

        let result = decoder.decode(b"Content-Type: application/json\r\n\r\ntest");

        assert!(matches!(result, Err(FramingError::MissingContentLength)));
    }

    #[rstest]
    fn yields_earlier_frames_before_reporting_fault() {
        let mut bytes = encode_frame("ok");
        bytes.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        let mut decoder = FrameDecoder::new();
        decoder.feed(&bytes);

        assert_eq!(
            decoder.next_frame().expect("first frame"),
            Some(String::from("ok"))
        );
        assert!(matches!(
            decoder.next_frame(),
            Err(FramingError::MissingContentLength)
        ));
    }
}
