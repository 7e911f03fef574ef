//! Response messages and the error taxonomy.

use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumIter, IntoStaticStr};

use super::JSONRPC_VERSION;
use super::message::RequestId;

/// Standard JSON-RPC error kinds.
///
/// The display string is the reason used as the error `message` when the
/// fault does not supply its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
pub enum ErrorCode {
    /// The payload is not valid JSON.
    #[strum(serialize = "Parse error")]
    ParseError,
    /// The message fails the request shape.
    #[strum(serialize = "Invalid Request")]
    InvalidRequest,
    /// No procedure is registered for the method.
    #[strum(serialize = "Method not found")]
    MethodNotFound,
    /// The procedure matched none of its parameter patterns.
    #[strum(serialize = "Invalid params")]
    InvalidParams,
    /// The procedure failed while running.
    #[strum(serialize = "Internal error")]
    InternalError,
}

impl ErrorCode {
    /// Numeric code carried on the wire.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::ParseError => -32700,
            Self::InvalidRequest => -32600,
            Self::MethodNotFound => -32601,
            Self::InvalidParams => -32602,
            Self::InternalError => -32603,
        }
    }

    /// Standard reason string for the code.
    #[must_use]
    pub fn reason(self) -> &'static str {
        self.into()
    }
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorObject {
    /// Error code.
    pub code: i64,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorObject {
    /// Builds an error carrying the standard reason for `code`.
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.reason())
    }

    /// Builds an error with a fault-specific message.
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            message: message.into(),
            data: None,
        }
    }

    /// Attaches structured data to the error.
    #[must_use]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Successful reply to a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Value produced by the procedure. May be `null`.
    pub result: Value,
    /// Identifier of the request being answered.
    pub id: RequestId,
}

/// Failed reply to a request, or to an unparseable message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// Error details.
    pub error: ErrorObject,
    /// Identifier of the request, or `null` when it cannot be determined.
    pub id: RequestId,
}

/// A reply carrying exactly one of `result` or `error`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    /// The request succeeded.
    Success(SuccessResponse),
    /// The request failed.
    Error(ErrorResponse),
}

impl Response {
    /// Builds a success response.
    #[must_use]
    pub const fn success(id: RequestId, result: Value) -> Self {
        Self::Success(SuccessResponse {
            jsonrpc: JSONRPC_VERSION,
            result,
            id,
        })
    }

    /// Builds an error response.
    #[must_use]
    pub const fn error(id: RequestId, error: ErrorObject) -> Self {
        Self::Error(ErrorResponse {
            jsonrpc: JSONRPC_VERSION,
            error,
            id,
        })
    }

    /// Identifier echoed by the response.
    #[must_use]
    pub const fn id(&self) -> &RequestId {
        match self {
            Self::Success(response) => &response.id,
            Self::Error(response) => &response.id,
        }
    }

    /// Error details, when the response is a failure.
    #[must_use]
    pub const fn error_object(&self) -> Option<&ErrorObject> {
        match self {
            Self::Success(_) => None,
            Self::Error(response) => Some(&response.error),
        }
    }
}
