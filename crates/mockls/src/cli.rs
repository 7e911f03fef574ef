//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

use crate::defaults::{DEFAULT_LOG_FILTER, default_log_format};
use crate::logging::LogFormat;

/// Mock language server answering canned JSON-RPC requests over stdio.
#[derive(Parser, Debug)]
#[command(name = "mockls", version)]
pub(crate) struct Cli {
    /// Definition files (`.json`, `.toml`, `.yaml`, `.yml`) merged in order.
    #[arg(value_name = "DEFINITION")]
    pub(crate) definitions: Vec<PathBuf>,
    /// Tracing filter for diagnostics written to stderr.
    #[arg(long, env = "MOCKLS_LOG", default_value = DEFAULT_LOG_FILTER)]
    pub(crate) log_filter: String,
    /// Diagnostic output format.
    #[arg(long, env = "MOCKLS_LOG_FORMAT", default_value_t = default_log_format())]
    pub(crate) log_format: LogFormat,
}
