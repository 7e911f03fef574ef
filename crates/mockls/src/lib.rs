//! Mock language server executable.
//!
//! `mockls` loads one or more definition files into a procedure registry and
//! then answers LSP-framed JSON-RPC 2.0 traffic on stdin/stdout until the
//! input closes. Diagnostics are written to stderr so the protocol channel
//! stays clean.
//!
//! ```text
//! mockls [--log-filter <FILTER>] [--log-format json|compact] [DEFINITION]...
//! ```
//!
//! Exit codes:
//!
//! - `0` when the input reaches end of stream.
//! - `1` on argument, definition, framing, or output failures.

mod cli;
mod defaults;
mod errors;
mod logging;
pub mod pipeline;
pub mod telemetry;

use std::ffi::OsString;
use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mockls_definition::load_registry;
use mockls_protocol::Dispatcher;
use tracing::info;

use crate::cli::Cli;
use crate::errors::AppError;

pub use defaults::{DEFAULT_LOG_FILTER, default_log_format};
pub use logging::LogFormat;
pub use pipeline::{PipelineError, PipelineSummary, serve};

const RUN_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::run");

/// Runs the server with explicit argument and stream handles.
///
/// Help and version requests are printed to `stdout` and succeed. Every
/// other failure is reported as a single line on `stderr`.
#[must_use]
pub fn run<I, T, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: Read,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) if !error.use_stderr() => {
            let _ = write!(stdout, "{error}");
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            let _ = write!(stderr, "{error}");
            return ExitCode::FAILURE;
        }
    };

    match execute(&cli, stdin, stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            let _ = writeln!(stderr, "{error}");
            ExitCode::FAILURE
        }
    }
}

fn execute<R, W>(cli: &Cli, stdin: R, stdout: &mut W) -> Result<PipelineSummary, AppError>
where
    R: Read,
    W: Write,
{
    telemetry::initialise(&cli.log_filter, cli.log_format)?;
    let registry = load_registry(&cli.definitions)?;
    info!(
        target: RUN_TARGET,
        definitions = cli.definitions.len(),
        methods = registry.len(),
        "procedure registry ready"
    );
    let dispatcher = Dispatcher::new(Arc::new(registry));
    Ok(serve(stdin, stdout, &dispatcher)?)
}
