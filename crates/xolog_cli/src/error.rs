//! Process-level errors for the `xolog` binary.
//!
//! Lexical errors are not represented here: they are reported as they are
//! found and only decide the exit status.

use std::io;
use thiserror::Error;

/// Exit status for a bad command line.
pub const EX_USAGE: i32 = 64;
/// Exit status when the script had lexical errors.
pub const EX_DATAERR: i32 = 65;
/// Exit status when the script could not be read.
pub const EX_NOINPUT: i32 = 66;
/// Exit status for internal failures.
pub const EX_SOFTWARE: i32 = 70;
/// Exit status when output could not be written.
pub const EX_IOERR: i32 = 74;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum CliError {
    #[error("could not read script '{path}': {source}")]
    #[diagnostic(code(xolog::read_script))]
    ReadScript {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read from stdin: {0}")]
    #[diagnostic(code(xolog::stdin))]
    Stdin(#[source] io::Error),

    #[error("failed to write output: {0}")]
    #[diagnostic(code(xolog::output))]
    Output(#[source] io::Error),

    #[error("failed to serialize token: {0}")]
    #[diagnostic(code(xolog::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// The process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::ReadScript { .. } => EX_NOINPUT,
            CliError::Stdin(_) => 1,
            CliError::Output(_) => EX_IOERR,
            CliError::Json(_) => EX_SOFTWARE,
        }
    }
}
