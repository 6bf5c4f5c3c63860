use thiserror::Error;

#[derive(Error, Debug)]
pub enum BruteError {
    /// Requested prefix is empty, too long, or not hexadecimal.
    #[error("prefix {0:?} isn't hex")]
    InvalidPrefix(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// The commit object has no line for the named date field.
    #[error("no {0} date found in commit object")]
    MissingDate(&'static str),

    /// The date field exists but is not `<seconds> <timezone>`.
    #[error("unexpected {field} date {value:?}")]
    MalformedDate { field: &'static str, value: String },

    /// The commit object has no blank line separating headers from message.
    #[error("no \\n\\n found in commit object")]
    MissingMessage,

    /// A git command exited unsuccessfully.
    #[error("git {command} failed: {stderr}")]
    Git { command: String, stderr: String },

    /// Every worker stopped without reporting a solution.
    #[error("search ended without a solution")]
    SearchAborted,

    /// Propagated I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
