//! Optimizer statistics.
//!
//! Stack-allocated counters for one optimization batch.

use std::time::{Duration, Instant};

/// Batch-level statistics.
///
/// # Example
///
/// ```
/// use lineupforge_solver::OptimizerStats;
///
/// let mut stats = OptimizerStats::default();
/// stats.start();
/// stats.record_attempt();
/// stats.record_step();
/// stats.record_move(true);
/// stats.record_move(false);
///
/// assert_eq!(stats.attempts, 1);
/// assert_eq!(stats.moves_evaluated, 2);
/// assert_eq!(stats.moves_accepted, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptimizerStats {
    start_time: Option<Instant>,
    elapsed: Option<Duration>,
    /// Construction attempts across all lineups.
    pub attempts: u64,
    /// Candidates rejected for sharing too many players with an accepted lineup.
    pub rejected_for_diversity: u64,
    /// Attempts whose construction could not fill every required slot.
    pub construction_failures: u64,
    /// Local-search steps taken.
    pub step_count: u64,
    /// Swap moves evaluated.
    pub moves_evaluated: u64,
    /// Swap moves accepted.
    pub moves_accepted: u64,
}

impl OptimizerStats {
    /// Marks the start of the batch.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
        self.elapsed = None;
    }

    /// Freezes the elapsed time.
    pub fn finish(&mut self) {
        self.elapsed = Some(self.elapsed());
    }

    /// Returns the elapsed time since the batch started.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
            .or_else(|| self.start_time.map(|t| t.elapsed()))
            .unwrap_or_default()
    }

    pub fn record_attempt(&mut self) {
        self.attempts += 1;
    }

    pub fn record_diversity_rejection(&mut self) {
        self.rejected_for_diversity += 1;
    }

    pub fn record_construction_failure(&mut self) {
        self.construction_failures += 1;
    }

    /// Records a step completion.
    pub fn record_step(&mut self) {
        self.step_count += 1;
    }

    /// Records a move evaluation and whether it was accepted.
    pub fn record_move(&mut self, accepted: bool) {
        self.moves_evaluated += 1;
        if accepted {
            self.moves_accepted += 1;
        }
    }

    /// Returns the moves per second rate.
    pub fn moves_per_second(&self) -> u64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            (self.moves_evaluated as f64 / secs) as u64
        } else {
            0
        }
    }
}
