//! Stream configuration, split rule, and worker sharding.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which partition of the corpus a stream serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Split {
    Train,
    Val,
}

impl Split {
    /// Whether the game at `index` belongs to this split.
    ///
    /// `bucket = index % 1000`, `threshold = floor(val_ratio * 1000)`; the
    /// game is "val" iff `bucket < threshold`. A non-positive `val_ratio`
    /// sends everything to train and leaves val permanently empty.
    #[must_use]
    pub fn selects(self, index: usize, val_ratio: f64) -> bool {
        if val_ratio <= 0.0 {
            return self == Split::Train;
        }
        let bucket = index % 1000;
        let threshold = (val_ratio * 1000.0) as usize;
        match self {
            Split::Val => bucket < threshold,
            Split::Train => bucket >= threshold,
        }
    }
}

/// One worker's identity among `worker_count` parallel consumers.
///
/// A game at `index` is owned by the worker iff
/// `index % worker_count == worker_id`. Plain copyable data; two workers
/// never need to coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerShard {
    pub worker_id: usize,
    pub worker_count: usize,
}

impl WorkerShard {
    /// Create a shard identity.
    ///
    /// # Panics
    ///
    /// Panics if `worker_count` is zero or `worker_id` is out of range;
    /// both are programming errors, not data errors.
    #[must_use]
    pub fn new(worker_id: usize, worker_count: usize) -> Self {
        assert!(worker_count > 0, "worker_count must be positive");
        assert!(worker_id < worker_count, "worker_id out of range");
        Self {
            worker_id,
            worker_count,
        }
    }

    /// Whether this worker owns the game at `index`.
    #[must_use]
    pub fn owns(&self, index: usize) -> bool {
        index % self.worker_count == self.worker_id
    }
}

impl Default for WorkerShard {
    /// A single-worker identity that owns everything.
    fn default() -> Self {
        Self {
            worker_id: 0,
            worker_count: 1,
        }
    }
}

/// Configuration for a [`super::SampleStream`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Board side length; every replayed game uses this size.
    pub board_size: usize,

    /// Source files. Sorted lexically by the stream so enumeration order is
    /// stable regardless of how the caller collected them.
    pub files: Vec<PathBuf>,

    /// Fraction of games held out for validation.
    pub val_ratio: f64,

    /// Optional per-worker cap on games *examined* (not yielded), for
    /// debugging/smoke runs. Checked before shard and split filtering.
    pub limit_games: Option<usize>,
}

impl StreamConfig {
    /// Create a config with the default 10% validation hold-out.
    pub fn new(board_size: usize, files: Vec<PathBuf>) -> Self {
        Self {
            board_size,
            files,
            val_ratio: 0.1,
            limit_games: None,
        }
    }

    /// Set the validation hold-out fraction.
    #[must_use]
    pub fn with_val_ratio(mut self, val_ratio: f64) -> Self {
        self.val_ratio = val_ratio;
        self
    }

    /// Cap the number of games examined per worker.
    #[must_use]
    pub fn with_limit_games(mut self, limit: usize) -> Self {
        self.limit_games = Some(limit);
        self
    }
}
