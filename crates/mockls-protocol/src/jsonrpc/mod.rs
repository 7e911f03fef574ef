//! JSON-RPC 2.0 message types.
//!
//! Incoming messages are validated from loosely typed [`serde_json::Value`]s
//! by [`IncomingMessage::validate`], which returns a tagged result instead of
//! failing deserialisation, so the dispatcher can map every structural fault
//! onto the `Invalid Request` error. Outgoing [`Response`]s serialise with a
//! fixed field order (`jsonrpc`, then `result` or `error`, then `id`).

mod message;
mod response;

pub use message::{IncomingMessage, InvalidRequest, Notification, Request, RequestId};
pub use response::{ErrorCode, ErrorObject, ErrorResponse, Response, SuccessResponse};

/// Protocol version carried by every message.
pub const JSONRPC_VERSION: &str = "2.0";
