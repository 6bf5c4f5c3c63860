//! Fan-out of candidates to competing workers and collection of the first
//! match.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::bounded;
use log::{debug, info};

use crate::config::SearchConfig;
use crate::explore::explore;
use crate::worker::{Solution, Worker};
use crate::BruteError;

/// Idempotent stop signal shared by the sequencer and every worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Result of a finished search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub solution: Solution,
    /// Digests computed across all workers, including any after the winner.
    pub attempts: u64,
    pub elapsed: Duration,
}

pub struct Searcher {
    config: SearchConfig,
}

impl Searcher {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search for dates giving `body` a hash with the configured prefix.
    ///
    /// Blocks until a worker finds one; there is no internal time limit.
    /// Every spawned thread has exited by the time this returns.
    pub fn search(&self, body: &[u8]) -> Result<SearchOutcome, BruteError> {
        let prototype = Worker::new(body, &self.config.prefix)?;
        let start = Instant::now();
        info!(
            "searching for prefix {} with {} workers",
            self.config.prefix, self.config.workers
        );

        let cancel = CancelToken::new();
        let (cand_tx, cand_rx) = bounded(self.config.queue_capacity);
        let (win_tx, win_rx) = bounded::<Solution>(1);

        let (winner, attempts) = thread::scope(|s| {
            let explorer_cancel = cancel.clone();
            s.spawn(move || explore(cand_tx, &explorer_cancel));

            let handles: Vec<_> = (0..self.config.workers)
                .map(|id| {
                    let worker = prototype.clone();
                    let rx = cand_rx.clone();
                    let tx = win_tx.clone();
                    let cancel = cancel.clone();
                    s.spawn(move || {
                        let n = worker.run(&rx, &tx, &cancel);
                        debug!("worker {id} stopped after {n} attempts");
                        n
                    })
                })
                .collect();
            // Only the workers may keep the queue and the result slot alive.
            drop(cand_rx);
            drop(win_tx);

            let winner = win_rx.recv().ok();
            cancel.cancel();
            let attempts: u64 = handles
                .into_iter()
                .map(|h| h.join().unwrap_or(0))
                .sum();
            (winner, attempts)
        });

        let solution = winner.ok_or(BruteError::SearchAborted)?;
        let elapsed = start.elapsed();
        info!(
            "found author {} committer {} after {} hashes in {:.2?}",
            solution.author, solution.committer, attempts, elapsed
        );
        Ok(SearchOutcome {
            solution,
            attempts,
            elapsed,
        })
    }
}
