//! Errors raised while loading and compiling definitions.

use std::io;
use std::path::PathBuf;

use mockls_protocol::RegistryError;
use thiserror::Error;

/// A definition document could not be deserialised.
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// Invalid JSON, or JSON not shaped like a definition.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Invalid TOML, or TOML not shaped like a definition.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
    /// Invalid YAML, or YAML not shaped like a definition.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors surfaced while building a procedure registry from definitions.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The file extension does not name a supported format.
    #[error("unknown extension of the path: {path}")]
    UnknownExtension {
        /// Offending path.
        path: PathBuf,
    },

    /// Reading the file failed.
    #[error("failed to read definition '{path}': {source}")]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file contents are not a valid definition.
    #[error("invalid definition '{path}': {source}")]
    Syntax {
        /// File being parsed.
        path: PathBuf,
        /// Underlying deserialisation error.
        #[source]
        source: SyntaxError,
    },

    /// A notify method was listed more than once across all sources.
    #[error("notify method '{method}' is defined more than once")]
    DuplicateNotify {
        /// Repeated method name.
        method: String,
    },

    /// Registering a compiled procedure failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
