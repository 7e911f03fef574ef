//! Request and notification messages.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::JSONRPC_VERSION;

/// Identifier correlating a request with its response.
///
/// Serialises as a bare JSON string, integer, or `null`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer identifier.
    Integer(i64),
    /// Integer identifier above `i64::MAX`.
    Unsigned(u64),
    /// String identifier.
    String(String),
    /// Explicit `null`, also used when the identifier cannot be trusted.
    Null,
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for RequestId {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Reasons a value fails the request/notification shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRequest {
    /// The message is not a JSON object.
    #[error("message is not an object")]
    NotAnObject,
    /// `jsonrpc` is missing or not exactly `"2.0"`.
    #[error("jsonrpc version must be \"2.0\"")]
    UnsupportedVersion,
    /// `method` is missing or not a string.
    #[error("method must be a string")]
    InvalidMethod,
    /// `id` is present but not a string, integer, or `null`.
    #[error("id must be a string, an integer, or null")]
    InvalidId,
    /// The object carries a field outside the request shape.
    #[error("unexpected field '{field}'")]
    UnexpectedField {
        /// Name of the offending field.
        field: String,
    },
}

/// A structurally valid request or notification.
///
/// A message without an `id` field is a notification; an `id` of `null` is
/// still a request.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    method: String,
    params: Option<Value>,
    id: Option<RequestId>,
}

impl IncomingMessage {
    /// Checks a decoded value against the strict request shape.
    ///
    /// The object must carry `jsonrpc: "2.0"` and a string `method`, may carry
    /// `params` of any type and an `id` that is a string, an integer, or
    /// `null`, and must carry nothing else.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidRequest`] reason found.
    pub fn validate(value: Value) -> Result<Self, InvalidRequest> {
        let Value::Object(mut fields) = value else {
            return Err(InvalidRequest::NotAnObject);
        };

        if fields.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Err(InvalidRequest::UnsupportedVersion);
        }
        let method = match fields.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err(InvalidRequest::InvalidMethod),
        };
        let id = fields.remove("id").map(parse_id).transpose()?;
        let params = fields.remove("params");
        reject_extra_fields(&fields)?;

        Ok(Self { method, params, id })
    }

    /// Name of the invoked method.
    #[must_use]
    pub fn method(&self) -> &str {
        self.method.as_str()
    }

    /// Parameters, or `None` when the field is absent.
    #[must_use]
    pub const fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Identifier, or `None` for notifications.
    #[must_use]
    pub const fn id(&self) -> Option<&RequestId> {
        self.id.as_ref()
    }

    /// Whether the message lacks an `id` field.
    #[must_use]
    pub const fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Identifier to echo in an error response: the `id` when present,
    /// otherwise `null`.
    #[must_use]
    pub fn response_id(&self) -> RequestId {
        self.id.clone().unwrap_or(RequestId::Null)
    }
}

fn parse_id(value: Value) -> Result<RequestId, InvalidRequest> {
    match value {
        Value::Null => Ok(RequestId::Null),
        Value::String(text) => Ok(RequestId::String(text)),
        Value::Number(number) => number
            .as_i64()
            .map(RequestId::Integer)
            .or_else(|| number.as_u64().map(RequestId::Unsigned))
            .ok_or(InvalidRequest::InvalidId),
        _ => Err(InvalidRequest::InvalidId),
    }
}

fn reject_extra_fields(remaining: &Map<String, Value>) -> Result<(), InvalidRequest> {
    match remaining.keys().find(|key| key.as_str() != "jsonrpc") {
        Some(field) => Err(InvalidRequest::UnexpectedField {
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

/// Outgoing JSON-RPC request, used by clients and tests.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request identifier.
    pub id: RequestId,
}

impl Request {
    /// Creates a new request.
    #[must_use]
    pub fn new(id: impl Into<RequestId>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

/// Outgoing JSON-RPC notification (no response expected).
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    /// Protocol version, always "2.0".
    pub jsonrpc: &'static str,
    /// The method to invoke.
    pub method: String,
    /// Optional parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Notification {
    /// Creates a new notification.
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
        }
    }
}
