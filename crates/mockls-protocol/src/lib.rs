//! LSP base-protocol framing and JSON-RPC 2.0 dispatch.
//!
//! The crate holds the two halves of the mock language server that do not
//! care where bytes come from. [`framing`] turns an arbitrarily chunked byte
//! stream into complete message payloads and back again, while the
//! [`Dispatcher`] answers decoded payloads using the procedures stored in a
//! [`ProcedureRegistry`]. Neither half touches process I/O, so both can be
//! embedded in any host program or driven directly from tests.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mockls_protocol::framing::{FrameDecoder, encode_frame};
//! use mockls_protocol::{Dispatcher, ProcedureRegistry};
//!
//! let dispatcher = Dispatcher::new(Arc::new(ProcedureRegistry::new()));
//! let mut decoder = FrameDecoder::new();
//! let frame = encode_frame(r#"{"jsonrpc":"2.0","method":"foo","id":1}"#);
//!
//! for payload in decoder.decode(&frame).expect("frame is well formed") {
//!     let reply = dispatcher.call(&payload).expect("requests are answered");
//!     assert!(reply.contains("-32601"));
//! }
//! ```

mod dispatcher;
pub mod framing;
pub mod jsonrpc;
mod registry;

pub use dispatcher::Dispatcher;
pub use registry::{
    Procedure, ProcedureError, ProcedureOutcome, ProcedureRegistry, RegistryError,
};

#[cfg(test)]
mod tests;
