//! Default values for command-line options.

use crate::logging::LogFormat;

/// Default log filter expression.
///
/// Clients drive the server as a test double, so only problems are reported
/// unless a more verbose filter is requested.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default logging format.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
