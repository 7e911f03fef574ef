//! Definition documents and file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use mockls_protocol::ProcedureRegistry;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::DEFINITION_TARGET;
use crate::compile::compile;
use crate::errors::{DefinitionError, SyntaxError};

/// One canned request/response pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pattern {
    /// Parameters the request must carry. `None` matches only requests
    /// without a `params` field; an explicit `null` matches `"params": null`.
    #[serde(default, deserialize_with = "present")]
    pub params: Option<Value>,
    /// Result returned when the parameters match. May be `null`.
    pub result: Value,
}

/// A parsed definition document.
///
/// Only the `request` and `notify` keys are accepted; anything else is
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Request methods and their ordered patterns.
    #[serde(default)]
    pub request: BTreeMap<String, Vec<Pattern>>,
    /// Notification methods accepted without a reply.
    #[serde(default)]
    pub notify: Vec<String>,
}

impl Definition {
    /// Parses a definition document in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`SyntaxError`] when the text is malformed or not shaped like
    /// a definition.
    pub fn parse(text: &str, format: DefinitionFormat) -> Result<Self, SyntaxError> {
        let definition = match format {
            DefinitionFormat::Json => serde_json::from_str(text)?,
            DefinitionFormat::Toml => toml::from_str(text)?,
            DefinitionFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(definition)
    }
}

/// Serialisation formats accepted for definition files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
}

impl DefinitionFormat {
    /// Picks the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(Self::Json),
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Reads and parses one definition file.
///
/// # Errors
///
/// Returns [`DefinitionError::UnknownExtension`] for unsupported extensions,
/// [`DefinitionError::Read`] when the file cannot be read, and
/// [`DefinitionError::Syntax`] when its contents are invalid.
pub fn load_definition(path: &Path) -> Result<Definition, DefinitionError> {
    let format = DefinitionFormat::from_path(path).ok_or_else(|| {
        DefinitionError::UnknownExtension {
            path: path.to_path_buf(),
        }
    })?;
    let text = fs::read_to_string(path).map_err(|source| DefinitionError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let definition =
        Definition::parse(&text, format).map_err(|source| DefinitionError::Syntax {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        target: DEFINITION_TARGET,
        path = %path.display(),
        ?format,
        requests = definition.request.len(),
        notifications = definition.notify.len(),
        "loaded definition"
    );
    Ok(definition)
}

/// Loads every file in order and compiles them into one registry.
///
/// # Errors
///
/// Returns the first loading or compilation error.
pub fn load_registry<P: AsRef<Path>>(paths: &[P]) -> Result<ProcedureRegistry, DefinitionError> {
    let definitions = paths
        .iter()
        .map(|path| load_definition(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    compile(definitions)
}

/// Deserialises a field that is present, keeping an explicit `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
