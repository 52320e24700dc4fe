//! LineupScore - two-level score for candidate lineups.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Soft levels are stored in thousandths of a fantasy point.
pub const SOFT_SCALE: f64 = 1_000.0;

/// A score with separate hard and soft levels.
///
/// The hard level counts constraint violations (salary over the cap,
/// ineligible or duplicated players) and must be zero for a lineup to be
/// usable. The soft level is the correlation-adjusted lineup value, stored
/// as fixed-point so that scores have a total order.
///
/// # Examples
///
/// ```
/// use lineupforge_core::LineupScore;
///
/// let over_cap = LineupScore::of(-1, 300_000);
/// let valid = LineupScore::of_value(0, 250.5);
///
/// // Feasible lineups always beat infeasible ones
/// assert!(valid > over_cap);
/// assert!((valid.value() - 250.5).abs() < 1e-9);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupScore {
    hard: i64,
    soft: i64,
}

impl LineupScore {
    /// The zero score.
    pub const ZERO: LineupScore = LineupScore { hard: 0, soft: 0 };

    /// One hard constraint violation.
    pub const ONE_HARD: LineupScore = LineupScore { hard: -1, soft: 0 };

    /// Creates a new score from raw levels.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        LineupScore { hard, soft }
    }

    /// Creates a score from a hard level and a value in fantasy points.
    #[inline]
    pub fn of_value(hard: i64, value: f64) -> Self {
        LineupScore {
            hard,
            soft: (value * SOFT_SCALE).round() as i64,
        }
    }

    /// Returns the hard level.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the raw soft level.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns the soft level in fantasy points.
    #[inline]
    pub fn value(&self) -> f64 {
        self.soft as f64 / SOFT_SCALE
    }

    /// Returns true when no hard constraint is broken.
    #[inline]
    pub fn is_feasible(&self) -> bool {
        self.hard >= 0
    }
}

impl Ord for LineupScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for LineupScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for LineupScore {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        LineupScore::of(self.hard + rhs.hard, self.soft + rhs.soft)
    }
}

impl Sub for LineupScore {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        LineupScore::of(self.hard - rhs.hard, self.soft - rhs.soft)
    }
}

impl Neg for LineupScore {
    type Output = Self;

    fn neg(self) -> Self {
        LineupScore::of(-self.hard, -self.soft)
    }
}

impl fmt::Debug for LineupScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineupScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for LineupScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{:.3}pts", self.hard, self.value())
    }
}

#[cfg(test)]
mod tests;
