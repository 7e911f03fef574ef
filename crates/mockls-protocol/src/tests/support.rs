//! Fixtures for dispatcher tests.

use std::sync::Arc;

use rstest::fixture;
use serde_json::{Value, json};

use crate::{Dispatcher, Procedure, ProcedureError, ProcedureOutcome, ProcedureRegistry};

/// Message raised by the `raise` procedure.
pub const RAISE_MESSAGE: &str = "Raise error";

/// Procedure answering from an ordered list of `(params, result)` pairs.
pub struct PatternTable(Vec<(Value, Value)>);

impl Procedure for PatternTable {
    fn invoke(&self, params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
        let found = self
            .0
            .iter()
            .find(|(expected, _)| Some(expected) == params)
            .map(|(_, result)| result.clone());
        Ok(found.map_or(ProcedureOutcome::NoMatch, ProcedureOutcome::Matched))
    }
}

fn acknowledge(_params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
    Ok(ProcedureOutcome::Acknowledged)
}

fn raise(_params: Option<&Value>) -> Result<ProcedureOutcome, ProcedureError> {
    Err(ProcedureError::new(RAISE_MESSAGE))
}

/// Registry mirroring a small arithmetic definition plus a failing method.
#[must_use]
pub fn math_registry() -> ProcedureRegistry {
    let mut registry = ProcedureRegistry::new();
    let entries: [(&str, Box<dyn Procedure>); 6] = [
        (
            "add",
            Box::new(PatternTable(vec![
                (json!([1, 2]), json!(3)),
                (json!([3, 4]), json!(7)),
            ])),
        ),
        (
            "subtract",
            Box::new(PatternTable(vec![
                (json!([4, 1]), json!(3)),
                (json!([6, 4]), json!(2)),
            ])),
        ),
        (
            "lookup",
            Box::new(PatternTable(vec![(json!({"key": "missing"}), Value::Null)])),
        ),
        ("update", Box::new(acknowledge)),
        ("notify_hello", Box::new(acknowledge)),
        ("raise", Box::new(raise)),
    ];
    for (method, procedure) in entries {
        registry
            .register_boxed(method, procedure)
            .expect("fixture methods are unique");
    }
    registry
}

/// Dispatcher over [`math_registry`].
#[fixture]
pub fn dispatcher() -> Dispatcher {
    Dispatcher::new(Arc::new(math_registry()))
}

/// Parses a reply payload for structural comparison.
#[must_use]
pub fn parse_reply(reply: &str) -> Value {
    serde_json::from_str(reply).expect("reply is valid JSON")
}
