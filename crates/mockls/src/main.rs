//! Entry point for the `mockls` mock language server.
//!
//! The binary delegates to [`mockls::run`], which parses arguments, loads the
//! definition files, and answers framed JSON-RPC traffic on stdin/stdout
//! until the input closes.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    mockls::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
