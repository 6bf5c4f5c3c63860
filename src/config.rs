use crate::BruteError;

/// Longest meaningful prefix: a full SHA-1 in hex.
pub const MAX_PREFIX_LEN: usize = 40;
/// Default capacity of the candidate queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 512;

/// Runtime parameters for one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Lowercase hex prefix the commit hash must start with.
    pub prefix: String,
    /// Number of hashing threads.
    pub workers: usize,
    /// Bound on candidates buffered between the sequencer and the workers.
    pub queue_capacity: usize,
}

impl SearchConfig {
    /// Validate `prefix` and fill in defaults: one worker per logical CPU.
    pub fn new(prefix: &str) -> Result<Self, BruteError> {
        if prefix.is_empty()
            || prefix.len() > MAX_PREFIX_LEN
            || !prefix.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(BruteError::InvalidPrefix(prefix.to_string()));
        }
        Ok(Self {
            prefix: prefix.to_ascii_lowercase(),
            workers: num_cpus::get().max(1),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Result<Self, BruteError> {
        if workers == 0 {
            return Err(BruteError::Config("worker count must be at least 1".into()));
        }
        self.workers = workers;
        Ok(self)
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Result<Self, BruteError> {
        if capacity == 0 {
            return Err(BruteError::Config("queue capacity must be at least 1".into()));
        }
        self.queue_capacity = capacity;
        Ok(self)
    }
}
