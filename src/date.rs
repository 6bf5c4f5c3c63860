//! Parsing of the `author`/`committer` date fields embedded in a commit
//! object.
//!
//! A git date is stored as `<unix seconds> <timezone>` at the end of the
//! identity line. The timezone is carried through verbatim; only the
//! seconds are ever changed.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

use crate::BruteError;

/// A git date: unix seconds plus the opaque timezone suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    pub tz: String,
}

impl Timestamp {
    pub fn new(seconds: i64, tz: impl Into<String>) -> Self {
        Self {
            seconds,
            tz: tz.into(),
        }
    }

    /// The same date moved `behind` seconds into the past, or `None` if that
    /// would underflow.
    pub fn shifted_back(&self, behind: u32) -> Option<Timestamp> {
        let seconds = self.seconds.checked_sub(i64::from(behind))?;
        Some(Timestamp {
            seconds,
            tz: self.tz.clone(),
        })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.seconds, self.tz)
    }
}

impl FromStr for Timestamp {
    type Err = BruteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_value("date", s)
    }
}

/// Which identity line a date belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Author,
    Committer,
}

impl DateField {
    pub fn name(self) -> &'static str {
        match self {
            DateField::Author => "author",
            DateField::Committer => "committer",
        }
    }

    fn regex(self) -> &'static Regex {
        static AUTHOR: OnceLock<Regex> = OnceLock::new();
        static COMMITTER: OnceLock<Regex> = OnceLock::new();
        // Both patterns are literals and always compile.
        match self {
            DateField::Author => AUTHOR
                .get_or_init(|| Regex::new(r"(?m-u)^author.+> (.+)").expect("author regex")),
            DateField::Committer => COMMITTER.get_or_init(|| {
                Regex::new(r"(?m-u)^committer.+> (.+)").expect("committer regex")
            }),
        }
    }
}

/// Locate the date of `field` in `haystack`.
///
/// `haystack` may be a bare commit object or one already framed with its
/// `commit <len>\0` header. Returns the parsed date and the byte offset at
/// which its seconds begin.
pub fn find_date(haystack: &[u8], field: DateField) -> Result<(Timestamp, usize), BruteError> {
    let caps = field
        .regex()
        .captures(haystack)
        .ok_or(BruteError::MissingDate(field.name()))?;
    let value = caps
        .get(1)
        .ok_or(BruteError::MissingDate(field.name()))?;
    let text = std::str::from_utf8(value.as_bytes()).map_err(|_| BruteError::MalformedDate {
        field: field.name(),
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })?;
    let date = parse_value(field.name(), text)?;
    Ok((date, value.start()))
}

fn parse_value(field: &'static str, value: &str) -> Result<Timestamp, BruteError> {
    let malformed = || BruteError::MalformedDate {
        field,
        value: value.to_string(),
    };
    let (secs, tz) = value.split_once(' ').ok_or_else(malformed)?;
    let seconds = secs.parse::<i64>().map_err(|_| malformed())?;
    // Rewrites render seconds canonically, so anything else (`+5`, `007`)
    // would change the object even at zero shift.
    if seconds.to_string() != secs {
        return Err(malformed());
    }
    Ok(Timestamp::new(seconds, tz))
}
