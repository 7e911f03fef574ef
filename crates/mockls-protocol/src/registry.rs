//! Method-name to procedure table consulted by the dispatcher.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Outcome of invoking a procedure.
///
/// Matching is signalled structurally, so a procedure can legitimately answer
/// with a `null` result.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcedureOutcome {
    /// The parameters matched and produced a result.
    Matched(Value),
    /// No configured pattern matched the parameters.
    NoMatch,
    /// The call was accepted without producing a result. Notify-only
    /// procedures always answer this way.
    Acknowledged,
}

/// Failure raised while a procedure runs.
///
/// The display text becomes the `message` of the `Internal error` response.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ProcedureError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ProcedureError {
    /// Builds an error without an underlying source.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Builds an error that wraps an underlying source.
    #[must_use]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Human-friendly description without the optional source.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Behaviour required from a registered method handler.
///
/// Procedures are synchronous and must not block: the dispatcher runs them
/// inline, one message at a time.
pub trait Procedure: Send + Sync {
    /// Answers a call. `params` is `None` when the message has no `params`
    /// field.
    ///
    /// # Errors
    ///
    /// Returns [`ProcedureError`] when the procedure itself fails.
    fn invoke(&self, params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError>;
}

impl<F> Procedure for F
where
    F: Fn(Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> + Send + Sync,
{
    fn invoke(&self, params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
        self(params)
    }
}

impl fmt::Debug for dyn Procedure {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Procedure")
    }
}

/// Errors raised while populating a registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The method already has a registered procedure.
    #[error("method '{method}' already has a registered procedure")]
    DuplicateMethod {
        /// Method that was registered twice.
        method: String,
    },
}

/// Immutable-once-built table of procedures keyed by method name.
///
/// The dispatcher only ever reads from the registry; replacing the behaviour
/// of a running server means building a new registry and handing it over
/// whole.
#[derive(Default)]
pub struct ProcedureRegistry {
    procedures: HashMap<String, Box<dyn Procedure>>,
}

impl ProcedureRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a procedure for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateMethod`] when the method is already
    /// registered; the existing procedure is kept.
    pub fn register(
        &mut self,
        method: impl Into<String>,
        procedure: impl Procedure + 'static,
    ) -> Result<(), RegistryError> {
        self.register_boxed(method, Box::new(procedure))
    }

    /// Registers an already boxed procedure for `method`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateMethod`] when the method is already
    /// registered.
    pub fn register_boxed(
        &mut self,
        method: impl Into<String>,
        procedure: Box<dyn Procedure>,
    ) -> Result<(), RegistryError> {
        let method = method.into();
        if self.procedures.contains_key(&method) {
            return Err(RegistryError::DuplicateMethod { method });
        }
        self.procedures.insert(method, procedure);
        Ok(())
    }

    /// Looks up the procedure registered for `method`.
    #[must_use]
    pub fn get(&self, method: &str) -> Option<&dyn Procedure> {
        self.procedures.get(method).map(Box::as_ref)
    }

    /// Whether `method` has a registered procedure.
    #[must_use]
    pub fn contains(&self, method: &str) -> bool {
        self.procedures.contains_key(method)
    }

    /// Registered method names in sorted order.
    #[must_use]
    pub fn methods(&self) -> Vec<&str> {
        let mut methods: Vec<&str> = self.procedures.keys().map(String::as_str).collect();
        methods.sort_unstable();
        methods
    }

    /// Number of registered methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    /// Whether the registry has no methods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }
}

impl fmt::Debug for ProcedureRegistry {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ProcedureRegistry")
            .field("methods", &self.methods())
            .finish()
    }
}
