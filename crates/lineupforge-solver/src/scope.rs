//! Batch scope: clock, random source and statistics for one optimization run.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::stats::OptimizerStats;

/// State shared by every phase of one batch.
#[derive(Debug)]
pub struct BatchScope {
    start_time: Instant,
    rng: StdRng,
    stats: OptimizerStats,
}

impl BatchScope {
    /// Starts the batch clock. A missing seed draws one from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut stats = OptimizerStats::default();
        stats.start();
        Self {
            start_time: Instant::now(),
            rng,
            stats,
        }
    }

    /// Time since the batch started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn stats(&self) -> &OptimizerStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut OptimizerStats {
        &mut self.stats
    }

    /// Ends the batch and returns its statistics.
    pub fn finish(mut self) -> OptimizerStats {
        self.stats.finish();
        self.stats
    }
}
