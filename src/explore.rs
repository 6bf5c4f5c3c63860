//! Enumeration of (committer, author) shifts in Chebyshev shells.
//!
//! Level `m` holds every pair with `max(commit_behind, author_behind) == m`,
//! `2m + 1` of them, so the full sequence reads:
//!
//! ```text
//! (0, 0)
//! (0, 1) (1, 0) (1, 1)
//! (0, 2) (1, 2) (2, 0) (2, 1) (2, 2)
//! ...
//! ```
//!
//! Within a level the committer shift varies first with the author shift
//! pinned at `m`, then the author shift varies with the committer shift
//! pinned at `m`. Level `m` starts at index `m * m`.

use crossbeam_channel::Sender;

use crate::search::CancelToken;

/// A pair of seconds to move the dates back by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    pub commit_behind: u32,
    pub author_behind: u32,
}

impl Candidate {
    pub fn new(commit_behind: u32, author_behind: u32) -> Self {
        Self {
            commit_behind,
            author_behind,
        }
    }

    /// Chebyshev distance from the unshifted dates.
    pub fn level(&self) -> u32 {
        self.commit_behind.max(self.author_behind)
    }
}

/// Iterator over the shell sequence, starting from `(0, 0)`.
#[derive(Debug, Clone, Default)]
pub struct Explorer {
    level: u32,
    pos: u64,
    done: bool,
}

impl Explorer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Iterator for Explorer {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        if self.done {
            return None;
        }
        let m = self.level;
        let out = shell_pair(m, self.pos);
        if self.pos == 2 * u64::from(m) {
            match m.checked_add(1) {
                Some(next) => {
                    self.level = next;
                    self.pos = 0;
                }
                None => self.done = true,
            }
        } else {
            self.pos += 1;
        }
        Some(out)
    }
}

/// Pair at offset `pos` (`0..=2m`) within level `m`.
fn shell_pair(m: u32, pos: u64) -> Candidate {
    let m64 = u64::from(m);
    if pos < m64 {
        Candidate::new(pos as u32, m)
    } else {
        Candidate::new(m, (pos - m64) as u32)
    }
}

/// The `index`-th candidate of the sequence, without walking it.
pub fn nth_candidate(index: u64) -> Candidate {
    let m = isqrt(index);
    shell_pair(m as u32, index - m * m)
}

/// Position of `candidate` in the sequence; inverse of [`nth_candidate`].
pub fn candidate_index(candidate: Candidate) -> u64 {
    let m = u64::from(candidate.level());
    let offset = if u64::from(candidate.commit_behind) < m {
        u64::from(candidate.commit_behind)
    } else {
        m + u64::from(candidate.author_behind)
    };
    m * m + offset
}

fn isqrt(n: u64) -> u64 {
    let mut r = (n as f64).sqrt() as u128;
    let n = u128::from(n);
    while r * r > n {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= n {
        r += 1;
    }
    r as u64
}

/// Feed candidates into `tx` until cancelled or every receiver is gone.
///
/// A full queue blocks here; that is the throttle on the sequence.
pub fn explore(tx: Sender<Candidate>, cancel: &CancelToken) {
    for candidate in Explorer::new() {
        if cancel.is_cancelled() || tx.send(candidate).is_err() {
            break;
        }
    }
}
