use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::date::Timestamp;
use crate::explore::Candidate;
use crate::hex_buf::HexBuf;
use crate::record::RecordBuffer;
use crate::search::CancelToken;
use crate::BruteError;

/// Dates whose commit hash carries the requested prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub author: Timestamp,
    pub committer: Timestamp,
}

/// One hashing thread's private state.
///
/// Cloning a worker clones its buffer, so every thread mutates its own copy.
#[derive(Clone)]
pub struct Worker {
    record: RecordBuffer,
    want: Vec<u8>,
    hex: HexBuf,
    attempts: u64,
}

impl Worker {
    /// `prefix` must already be hex; it is compared case-insensitively.
    pub fn new(body: &[u8], prefix: &str) -> Result<Self, BruteError> {
        Ok(Self {
            record: RecordBuffer::new(body)?,
            want: prefix.to_ascii_lowercase().into_bytes(),
            hex: HexBuf::new(),
            attempts: 0,
        })
    }

    /// Number of digests computed so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn record(&self) -> &RecordBuffer {
        &self.record
    }

    /// Hash the commit with both dates moved back by `candidate` and report
    /// the dates if the hash matches.
    ///
    /// Shifts that would underflow the seconds are skipped.
    pub fn try_candidate(&mut self, candidate: Candidate) -> Option<Solution> {
        let author = self
            .record
            .author()
            .seconds
            .checked_sub(i64::from(candidate.author_behind))?;
        let committer = self
            .record
            .committer()
            .seconds
            .checked_sub(i64::from(candidate.commit_behind))?;

        self.record.set_dates(author, committer);
        self.attempts += 1;
        let digest = self.record.digest();
        if !self.hex.encode(&digest).starts_with(&self.want) {
            return None;
        }

        Some(Solution {
            author: Timestamp::new(author, self.record.author().tz.clone()),
            committer: Timestamp::new(committer, self.record.committer().tz.clone()),
        })
    }

    /// Pull candidates until one matches, `cancel` fires, or the queue closes.
    ///
    /// A match goes to `winner` only if the slot is still free. Returns the
    /// number of digests computed.
    pub fn run(
        mut self,
        candidates: &Receiver<Candidate>,
        winner: &Sender<Solution>,
        cancel: &CancelToken,
    ) -> u64 {
        loop {
            if cancel.is_cancelled() {
                break;
            }
            let Ok(candidate) = candidates.recv() else {
                break;
            };
            if let Some(solution) = self.try_candidate(candidate) {
                let _ = winner.try_send(solution);
                break;
            }
        }
        self.attempts
    }
}
