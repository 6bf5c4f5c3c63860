use std::fmt;
use std::io;
use std::path::Path;

use crate::BruteError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Describe a failed read of a commit object file.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    let suggestion = match err.kind() {
        io::ErrorKind::NotFound => "Check that the file exists and the path is correct.",
        io::ErrorKind::PermissionDenied => "Check that the file is readable.",
        _ => "Pass a file or `-` for stdin.",
    };
    format!("Error {} '{}': {}. {}", operation, path.display(), err, suggestion)
}

/// Convert an I/O error into a CLI error with context.
pub fn io_cli_error(operation: &str, path: &Path, err: io::Error) -> CliError {
    CliError {
        msg: format_io_error(operation, path, &err),
        source: Some(Box::new(err)),
    }
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn brute_cli_error(context: &str, err: BruteError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &BruteError) -> String {
    use BruteError::*;
    match err {
        InvalidPrefix(_) => format!("{err}. Use 1 to 40 hex digits."),
        Config(msg) => format!("{msg}. Invalid configuration."),
        MissingDate(_) | MalformedDate { .. } => {
            format!("{err}. This does not look like a regular commit.")
        }
        MissingMessage => format!("{err}. The commit object is malformed."),
        Git { .. } => format!("{err}. Is this a git repository with at least one commit?"),
        SearchAborted => format!("{err}. This is a bug."),
        // Library I/O only comes from spawning and feeding `git`.
        Io(io) if io.kind() == io::ErrorKind::NotFound => {
            format!("{err}. Is git installed and on PATH?")
        }
        Io(io) => format!("{io}"),
    }
}
