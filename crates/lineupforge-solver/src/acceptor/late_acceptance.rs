//! Late acceptance acceptor.

use lineupforge_core::LineupScore;

use super::Acceptor;

/// Late acceptance acceptor - accepts moves that improve on a historical score.
///
/// Maintains a circular buffer of recent step scores and accepts moves
/// that are at least as good as the score from N steps ago.
///
/// # Example
///
/// ```
/// use lineupforge_solver::acceptor::LateAcceptanceAcceptor;
///
/// let acceptor = LateAcceptanceAcceptor::new(50);
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    /// Size of the late acceptance list.
    late_acceptance_size: usize,
    /// Circular buffer of historical scores.
    score_history: Vec<Option<LineupScore>>,
    /// Current index in the buffer.
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    /// Creates a new late acceptance acceptor keeping `late_acceptance_size`
    /// historical scores (at least one).
    pub fn new(late_acceptance_size: usize) -> Self {
        let late_acceptance_size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size,
            score_history: vec![None; late_acceptance_size],
            current_index: 0,
        }
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(&self, last_step_score: &LineupScore, move_score: &LineupScore) -> bool {
        // Always accept improving moves
        if move_score > last_step_score {
            return true;
        }

        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &LineupScore) {
        for slot in &mut self.score_history {
            *slot = Some(*initial_score);
        }
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &LineupScore) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
