//! LSP base-protocol framing.
//!
//! Every message on the wire is preceded by a header block:
//!
//! ```text
//! Content-Length: <length>\r\n
//! Content-Type: <type>\r\n      (optional, ignored)
//! \r\n
//! <payload>
//! ```
//!
//! [`FrameDecoder`] reassembles payloads from arbitrarily split chunks,
//! [`FrameReader`] drives a decoder from any [`std::io::Read`] source, and
//! [`encode_frame`] / [`write_frame`] produce framed output.
//!
//! The decoder never bounds its buffer. A peer that sends a header without a
//! terminator, or announces an enormous `Content-Length`, makes the buffer
//! grow until the input ends.

mod decoder;
mod encoder;
mod error;
mod header;
mod reader;

pub use decoder::{DecodeMode, FrameDecoder};
pub use encoder::{encode_frame, write_frame};
pub use error::FramingError;
pub use header::FrameHeader;
pub use reader::FrameReader;

/// Tracing target for framing diagnostics.
pub(crate) const FRAMING_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::framing");

/// Blank line terminating a header block.
pub(crate) const HEADER_SEPARATOR: &[u8] = b"\r\n\r\n";
