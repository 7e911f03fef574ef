//! JSON-RPC 2.0 dispatch.
//!
//! The dispatcher turns one decoded payload into at most one reply payload.
//! Each message runs through a fixed decision table:
//!
//! | Step | Condition | Reply |
//! |------|-----------|-------|
//! | parse | payload is not JSON | `Parse error`, `id: null` |
//! | validate | message fails the request shape | `Invalid Request`, `id: null` |
//! | lookup | method not registered | `Method not found`, echoed id |
//! | invoke | procedure fails | `Internal error` with the failure text |
//! | respond | message is a notification | nothing |
//! | respond | no pattern matched | `Invalid params` |
//! | respond | pattern matched | `result` |
//!
//! Batches apply the table to each element in order and drop the elements
//! that produced nothing; a batch that produces nothing emits no reply at all.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::jsonrpc::{ErrorCode, ErrorObject, IncomingMessage, RequestId, Response};
use crate::registry::{ProcedureOutcome, ProcedureRegistry};

/// Tracing target for dispatch operations.
pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Answers JSON-RPC payloads from a [`ProcedureRegistry`].
///
/// The registry is shared and read-only during dispatch. It can be swapped
/// wholesale with [`replace_registry`](Self::replace_registry); because the
/// swap needs `&mut self`, no call ever observes a partially updated table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ProcedureRegistry>,
}

impl Dispatcher {
    /// Creates a dispatcher over `registry`.
    #[must_use]
    pub const fn new(registry: Arc<ProcedureRegistry>) -> Self {
        Self { registry }
    }

    /// The registry currently answering calls.
    #[must_use]
    pub fn registry(&self) -> &ProcedureRegistry {
        &self.registry
    }

    /// Swaps in a new registry, returning the previous one.
    pub fn replace_registry(&mut self, registry: Arc<ProcedureRegistry>) -> Arc<ProcedureRegistry> {
        std::mem::replace(&mut self.registry, registry)
    }

    /// Handles one decoded payload.
    ///
    /// Returns the serialised reply, or `None` when nothing should be sent:
    /// a notification, or a batch made up only of notifications.
    #[must_use]
    pub fn call(&self, text: &str) -> Option<String> {
        match serde_json::from_str::<Value>(text) {
            Err(error) => {
                debug!(target: DISPATCH_TARGET, %error, "payload is not valid JSON");
                let response = Response::error(
                    RequestId::Null,
                    ErrorObject::new(ErrorCode::ParseError),
                );
                serialise(&response)
            }
            Ok(Value::Array(values)) => {
                let responses = self.call_batch(values);
                if responses.is_empty() {
                    debug!(target: DISPATCH_TARGET, "batch produced no responses");
                    None
                } else {
                    serialise(&responses)
                }
            }
            Ok(value) => self
                .call_flow(value)
                .and_then(|response| serialise(&response)),
        }
    }

    /// Validates and dispatches a single message.
    ///
    /// Returns `None` for notifications that reached their procedure,
    /// whatever the procedure's outcome.
    #[must_use]
    pub fn call_flow(&self, value: Value) -> Option<Response> {
        let message = match IncomingMessage::validate(value) {
            Ok(message) => message,
            Err(reason) => {
                debug!(target: DISPATCH_TARGET, %reason, "rejecting invalid request");
                return Some(Response::error(
                    RequestId::Null,
                    ErrorObject::new(ErrorCode::InvalidRequest),
                ));
            }
        };

        let Some(procedure) = self.registry.get(message.method()) else {
            debug!(
                target: DISPATCH_TARGET,
                method = message.method(),
                "method not found"
            );
            return Some(Response::error(
                message.response_id(),
                ErrorObject::new(ErrorCode::MethodNotFound),
            ));
        };

        debug!(
            target: DISPATCH_TARGET,
            method = message.method(),
            id = ?message.id(),
            "dispatching message"
        );

        let outcome = match procedure.invoke(message.params()) {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    method = message.method(),
                    %error,
                    "procedure failed"
                );
                if message.is_notification() {
                    return None;
                }
                return Some(Response::error(
                    message.response_id(),
                    ErrorObject::with_message(ErrorCode::InternalError, error.to_string()),
                ));
            }
        };

        let id = message.id()?.clone();
        match outcome {
            ProcedureOutcome::Matched(result) => Some(Response::success(id, result)),
            ProcedureOutcome::NoMatch | ProcedureOutcome::Acknowledged => {
                debug!(
                    target: DISPATCH_TARGET,
                    method = message.method(),
                    "no pattern matched the request parameters"
                );
                Some(Response::error(id, ErrorObject::new(ErrorCode::InvalidParams)))
            }
        }
    }

    /// Dispatches each element of a batch in order.
    ///
    /// Elements are independent: an invalid element yields its own error
    /// without affecting the others. Elements that produce no response are
    /// dropped, so an empty result means no reply should be sent.
    #[must_use]
    pub fn call_batch(&self, values: Vec<Value>) -> Vec<Response> {
        values
            .into_iter()
            .filter_map(|value| self.call_flow(value))
            .collect()
    }
}

fn serialise<T: Serialize + ?Sized>(payload: &T) -> Option<String> {
    match serde_json::to_string(payload) {
        Ok(text) => Some(text),
        Err(error) => {
            warn!(target: DISPATCH_TARGET, %error, "failed to serialise response");
            None
        }
    }
}
