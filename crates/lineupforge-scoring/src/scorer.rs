//! Correlation-adjusted lineup value.

use std::collections::HashSet;

use lineupforge_core::{Contest, Lineup, LineupScore, OptimizeFor, Player, PlayerId};

use crate::stack::Stack;

/// Scores candidate lineups.
///
/// `value = Σ projection(p, optimize_for) + correlation_weight × stack_bonus`
///
/// The stack bonus gives each top-ranked stack partial credit in
/// proportion to the share of its member pairs present in the lineup.
/// Hard constraint violations go to the hard level of the score.
///
/// # Examples
///
/// ```
/// use lineupforge_core::{Contest, OptimizeFor, Platform, Player, Sport};
/// use lineupforge_scoring::LineupScorer;
///
/// let contest = Contest::for_sport(1, Sport::Golf, Platform::DraftKings);
/// let golfers: Vec<Player> = (1..=6)
///     .map(|i| Player::new(i, "G", "G", "PGA", 8_000, 60.0))
///     .collect();
/// let refs: Vec<&Player> = golfers.iter().collect();
///
/// let scorer = LineupScorer::new(&contest, OptimizeFor::Balanced);
/// let score = scorer.score_players(&refs);
/// assert!(score.is_feasible());
/// assert!((score.value() - 360.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct LineupScorer<'a> {
    contest: &'a Contest,
    optimize_for: OptimizeFor,
    correlation_weight: f64,
    stacks: &'a [Stack],
}

impl<'a> LineupScorer<'a> {
    /// Creates a scorer with no stack bonus.
    pub fn new(contest: &'a Contest, optimize_for: OptimizeFor) -> Self {
        Self {
            contest,
            optimize_for,
            correlation_weight: 0.0,
            stacks: &[],
        }
    }

    /// Adds the ranked stacks that feed the bonus term.
    pub fn with_stacks(mut self, stacks: &'a [Stack], correlation_weight: f64) -> Self {
        self.stacks = stacks;
        self.correlation_weight = correlation_weight;
        self
    }

    pub fn optimize_for(&self) -> OptimizeFor {
        self.optimize_for
    }

    pub fn stacks(&self) -> &'a [Stack] {
        self.stacks
    }

    pub fn correlation_weight(&self) -> f64 {
        self.correlation_weight
    }

    /// Sum of projections under the configured objective.
    pub fn projection(&self, players: &[&Player]) -> f64 {
        players.iter().map(|p| p.projection(self.optimize_for)).sum()
    }

    /// Partial-credit bonus over the ranked stacks.
    pub fn stack_bonus(&self, ids: &[PlayerId]) -> f64 {
        if self.correlation_weight == 0.0 {
            return 0.0;
        }
        self.stacks
            .iter()
            .map(|stack| {
                let total = stack.pair_count();
                if total == 0 {
                    return 0.0;
                }
                let present = stack.players.iter().filter(|p| ids.contains(&p.id)).count();
                let pairs = present * present.saturating_sub(1) / 2;
                stack.score * pairs as f64 / total as f64
            })
            .sum()
    }

    /// Correlation-adjusted value without constraint checks.
    pub fn value(&self, players: &[&Player]) -> f64 {
        let ids: Vec<PlayerId> = players.iter().map(|p| p.id).collect();
        self.projection(players) + self.correlation_weight * self.stack_bonus(&ids)
    }

    /// Counts hard violations: salary over the cap and repeated players.
    pub fn hard_violations(&self, players: &[&Player]) -> i64 {
        let mut violations = 0;
        let salary: u32 = players.iter().map(|p| p.salary).sum();
        if salary > self.contest.salary_cap {
            violations += 1;
        }
        let mut seen = HashSet::with_capacity(players.len());
        for p in players {
            if !seen.insert(p.id) {
                violations += 1;
            }
        }
        violations
    }

    /// Scores a set of players.
    pub fn score_players(&self, players: &[&Player]) -> LineupScore {
        LineupScore::of_value(-self.hard_violations(players), self.value(players))
    }

    /// Scores a lineup, also counting ineligible slot assignments as hard violations.
    pub fn score(&self, lineup: &Lineup) -> LineupScore {
        let players: Vec<&Player> = lineup.players().collect();
        let ineligible = lineup
            .assignments
            .iter()
            .filter(|a| !a.slot.accepts(&a.player))
            .count() as i64;
        let missing = self
            .contest
            .required_slot_count()
            .saturating_sub(lineup.len()) as i64;
        LineupScore::of_value(
            -(self.hard_violations(&players) + ineligible + missing),
            self.value(&players),
        )
    }

    /// Tags of the ranked stacks fully contained in the lineup.
    pub fn stack_tags(&self, ids: &[PlayerId]) -> Vec<String> {
        self.stacks
            .iter()
            .filter(|s| s.players.iter().all(|p| ids.contains(&p.id)))
            .map(Stack::tag)
            .collect()
    }
}

#[cfg(test)]
#[path = "scorer_tests.rs"]
mod tests;
