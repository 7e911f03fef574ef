//! Error types surfaced by the executable.

use mockls_definition::DefinitionError;
use thiserror::Error;

use crate::pipeline::PipelineError;
use crate::telemetry::TelemetryError;

/// Failures that end the process with a non-zero exit code.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to initialise diagnostics: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("failed to load definitions: {0}")]
    Definition(#[from] DefinitionError),
    #[error("stdio session failed: {0}")]
    Pipeline(#[from] PipelineError),
}
