//! Errors raised while decoding framed input.

use std::io;

use thiserror::Error;

/// Framing faults.
///
/// None of these can be answered with a JSON-RPC response because no reply can
/// be framed without knowing where the offending message ends. Callers are
/// expected to stop reading once one is returned.
#[derive(Debug, Error)]
pub enum FramingError {
    /// I/O error while reading the byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The header block ended without a `Content-Length` field.
    #[error("missing Content-Length header")]
    MissingContentLength,

    /// The `Content-Length` value does not fit in memory addressing.
    #[error("Content-Length value {value} is out of range")]
    ContentLengthOutOfRange {
        /// The digits received on the wire.
        value: String,
    },
}
