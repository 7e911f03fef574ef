//! Stdio request/response loop.
//!
//! Frames are read lazily from the input, each payload is handed to the
//! dispatcher, and every reply is framed and flushed before the next input
//! frame is read. Replies therefore leave in the order their requests
//! arrived.

use std::io::{self, Read, Write};

use mockls_protocol::Dispatcher;
use mockls_protocol::framing::{FrameReader, FramingError, write_frame};
use thiserror::Error;
use tracing::{debug, info};

const PIPELINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::pipeline");

/// Counters describing a completed session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Number of frames decoded from the input.
    pub received: usize,
    /// Number of reply frames written to the output.
    pub replied: usize,
}

/// Errors that terminate the stdio loop.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input stream could not be read or contained a malformed frame.
    #[error(transparent)]
    Framing(#[from] FramingError),
    /// A reply frame could not be written to the output.
    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}

/// Serves framed JSON-RPC traffic from `input` until it reaches end of stream.
///
/// # Errors
///
/// Returns [`PipelineError::Framing`] when the input fails or carries a
/// header block without a usable `Content-Length`, and
/// [`PipelineError::Write`] when a reply cannot be written. Replies produced
/// before the failure have already been flushed.
pub fn serve<R, W>(
    input: R,
    output: &mut W,
    dispatcher: &Dispatcher,
) -> Result<PipelineSummary, PipelineError>
where
    R: Read,
    W: Write,
{
    let mut summary = PipelineSummary::default();
    for frame in FrameReader::new(input) {
        let payload = frame?;
        summary.received += 1;
        let Some(reply) = dispatcher.call(&payload) else {
            debug!(target: PIPELINE_TARGET, "no reply for frame");
            continue;
        };
        write_frame(output, &reply).map_err(PipelineError::Write)?;
        summary.replied += 1;
    }
    info!(
        target: PIPELINE_TARGET,
        received = summary.received,
        replied = summary.replied,
        "input closed"
    );
    Ok(summary)
}
