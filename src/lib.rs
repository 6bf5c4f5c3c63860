//! Brute-force a git commit hash prefix by nudging the commit's dates.
//!
//! Only the seconds of the author and committer dates change, each moved a
//! few seconds into the past. Candidates are explored nearest-first and
//! hashed in parallel; the first worker to hit the prefix wins and the rest
//! are cancelled.

pub mod config;
pub mod date;
pub mod error;
pub mod explore;
pub mod git;
pub mod hex_buf;
pub mod io_utils;
pub mod record;
pub mod search;
pub mod worker;

pub use config::SearchConfig;
pub use date::{find_date, DateField, Timestamp};
pub use error::BruteError;
pub use explore::{candidate_index, nth_candidate, Candidate, Explorer};
pub use hex_buf::HexBuf;
pub use record::{has_prefix, message_body, object_id, object_id_with_dates, RecordBuffer};
pub use search::{CancelToken, SearchOutcome, Searcher};
pub use worker::{Solution, Worker};

