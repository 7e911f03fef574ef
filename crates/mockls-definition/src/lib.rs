//! Canned procedure definitions for the mock language server.
//!
//! A definition file lists the requests the server should answer and the
//! notifications it should accept:
//!
//! ```yaml
//! request:
//!   add:
//!     - params: [1, 2]
//!       result: 3
//! notify:
//!   - update
//! ```
//!
//! Files are parsed according to their extension (`.json`, `.toml`,
//! `.yaml`/`.yml`), merged in the order given, and compiled into a
//! [`ProcedureRegistry`](mockls_protocol::ProcedureRegistry) for the
//! dispatcher.

mod compile;
mod definition;
mod equality;
mod errors;

pub use compile::{NotifyProcedure, PatternProcedure, compile};
pub use definition::{Definition, DefinitionFormat, Pattern, load_definition, load_registry};
pub use equality::json_eq;
pub use errors::{DefinitionError, SyntaxError};

/// Tracing target for definition loading.
pub(crate) const DEFINITION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::definition");
