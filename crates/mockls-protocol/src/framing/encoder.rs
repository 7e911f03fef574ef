//! Frame encoding.

use std::io::{self, Write};

/// Frames a payload as `Content-Length: <bytes>\r\n\r\n<payload>`.
///
/// The length counts UTF-8 bytes. No `Content-Type` header is emitted, and
/// each frame is self-contained.
#[must_use]
pub fn encode_frame(payload: &str) -> Vec<u8> {
    let header = format!("Content-Length: {}\r\n\r\n", payload.len());
    let mut frame = Vec::with_capacity(header.len() + payload.len());
    frame.extend_from_slice(header.as_bytes());
    frame.extend_from_slice(payload.as_bytes());
    frame
}

/// Writes one framed payload and flushes the writer.
///
/// The header and content are written as a single buffer so a frame is never
/// interleaved with other output on the same writer.
///
/// # Errors
///
/// Returns any I/O error raised while writing or flushing.
pub fn write_frame<W: Write>(writer: &mut W, payload: &str) -> io::Result<()> {
    writer.write_all(&encode_frame(payload))?;
    writer.flush()
}
