//! Compiles definitions into a procedure registry.

use std::collections::{BTreeMap, BTreeSet};

use mockls_protocol::{Procedure, ProcedureError, ProcedureOutcome, ProcedureRegistry};
use serde_json::Value;
use tracing::debug;

use crate::DEFINITION_TARGET;
use crate::definition::{Definition, Pattern};
use crate::equality::json_eq;
use crate::errors::DefinitionError;

/// Answers with the result of the first pattern whose parameters equal the
/// incoming ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternProcedure {
    patterns: Vec<Pattern>,
}

impl PatternProcedure {
    /// Wraps an ordered list of patterns.
    #[must_use]
    pub const fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// Patterns in match order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}

impl Procedure for PatternProcedure {
    fn invoke(&self, params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
        let outcome = self
            .patterns
            .iter()
            .find(|pattern| params_match(pattern.params.as_ref(), params))
            .map_or(ProcedureOutcome::NoMatch, |pattern| {
                ProcedureOutcome::Matched(pattern.result.clone())
            });
        Ok(outcome)
    }
}

/// Accepts any parameters and produces no result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyProcedure;

impl Procedure for NotifyProcedure {
    fn invoke(&self, _params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
        Ok(ProcedureOutcome::Acknowledged)
    }
}

fn params_match(expected: Option<&Value>, actual: Option<&Value>) -> bool {
    match (expected, actual) {
        (None, None) => true,
        (Some(expected), Some(actual)) => json_eq(expected, actual),
        _ => false,
    }
}

/// Merges definitions in order and builds a registry.
///
/// Patterns for the same request method are concatenated in source order, so
/// earlier definitions take precedence when several patterns match.
///
/// # Errors
///
/// Returns [`DefinitionError::DuplicateNotify`] when a notify method appears
/// more than once.
pub fn compile<I>(definitions: I) -> Result<ProcedureRegistry, DefinitionError>
where
    I: IntoIterator<Item = Definition>,
{
    let mut requests: BTreeMap<String, Vec<Pattern>> = BTreeMap::new();
    let mut notifications: BTreeSet<String> = BTreeSet::new();

    for definition in definitions {
        for (method, patterns) in definition.request {
            requests.entry(method).or_default().extend(patterns);
        }
        for method in definition.notify {
            if notifications.contains(&method) {
                return Err(DefinitionError::DuplicateNotify { method });
            }
            notifications.insert(method);
        }
    }

    let mut registry = ProcedureRegistry::new();
    for (method, patterns) in requests {
        debug!(
            target: DEFINITION_TARGET,
            method = method.as_str(),
            patterns = patterns.len(),
            "registering request method"
        );
        registry.register(method, PatternProcedure::new(patterns))?;
    }
    for method in notifications {
        if registry.contains(&method) {
            debug!(
                target: DEFINITION_TARGET,
                method = method.as_str(),
                "notify method keeps its request patterns"
            );
            continue;
        }
        debug!(
            target: DEFINITION_TARGET,
            method = method.as_str(),
            "registering notify method"
        );
        registry.register(method, NotifyProcedure)?;
    }

    Ok(registry)
}
