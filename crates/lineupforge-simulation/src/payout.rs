//! Contest payout modeling.
//!
//! A lineup is ranked against a simulated field whose lineup score is
//! normal. The finishing percentile `q` (share of the field beaten) is the
//! field CDF at the lineup score, and the contest's payout structure turns
//! `q` into a prize.

use statrs::distribution::{ContinuousCDF, Normal};

use lineupforge_config::{DistributionConfig, FieldConfig};
use lineupforge_core::{Contest, PayoutStructure, Player};

use crate::distribution::build_distribution;

const MIN_FIELD_STD_DEV: f64 = 1e-6;

/// Score distribution of an opposing field lineup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldModel {
    mean: f64,
    std_dev: f64,
    normal: Normal,
}

impl FieldModel {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        let mean = if mean.is_finite() { mean } else { 0.0 };
        let std_dev = if std_dev.is_finite() {
            std_dev.max(MIN_FIELD_STD_DEV)
        } else {
            MIN_FIELD_STD_DEV
        };
        let normal = Normal::new(mean, std_dev).unwrap_or_else(|_| Normal::standard());
        Self {
            mean,
            std_dev,
            normal,
        }
    }

    /// Field built from `roster_size` ownership-weighted draws of the pool.
    ///
    /// The mean is `roster_size` times the weighted projection, scaled by
    /// `strength`. The variance adds each player's own spread to the spread
    /// of projections across the pool. Config overrides win when set, and
    /// an unowned pool weighs every player equally.
    pub fn from_pool(
        players: &[Player],
        roster_size: usize,
        field: &FieldConfig,
        distribution: &DistributionConfig,
    ) -> Self {
        let owned: f64 = players.iter().map(|p| p.ownership_pct.max(0.0)).sum();
        let weight = |p: &Player| {
            if owned > 0.0 {
                p.ownership_pct.max(0.0) / owned
            } else {
                1.0 / players.len().max(1) as f64
            }
        };

        let player_mean: f64 = players.iter().map(|p| weight(p) * p.projected_mean).sum();
        let player_var: f64 = players
            .iter()
            .map(|p| {
                let sd = build_distribution(p, distribution).std_dev();
                weight(p) * (sd * sd + (p.projected_mean - player_mean).powi(2))
            })
            .sum();

        let roster = roster_size as f64;
        let mean = field
            .mean
            .unwrap_or(roster * player_mean * field.strength);
        let std_dev = field.std_dev.unwrap_or((roster * player_var).sqrt());
        Self::new(mean, std_dev)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Share of the field scoring below `score`.
    pub fn finish_percentile(&self, score: f64) -> f64 {
        self.normal.cdf(score)
    }
}

/// Turns simulated lineup scores into prizes for one contest.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutModel {
    structure: PayoutStructure,
    entry_fee: f64,
    field_size: u32,
    field: FieldModel,
}

impl PayoutModel {
    pub fn new(contest: &Contest, field: FieldModel) -> Self {
        Self {
            structure: contest.payout.clone(),
            entry_fee: contest.entry_fee,
            field_size: contest.field_size,
            field,
        }
    }

    pub fn field(&self) -> &FieldModel {
        &self.field
    }

    pub fn entry_fee(&self) -> f64 {
        self.entry_fee
    }

    /// Prize won by a lineup scoring `score`.
    pub fn payout(&self, score: f64) -> f64 {
        self.payout_at_percentile(self.field.finish_percentile(score))
    }

    fn payout_at_percentile(&self, q: f64) -> f64 {
        let q = q.clamp(0.0, 1.0);
        match &self.structure {
            PayoutStructure::Cash {
                paid_fraction,
                payout_multiple,
            } => {
                if q >= 1.0 - paid_fraction {
                    self.entry_fee * payout_multiple
                } else {
                    0.0
                }
            }
            PayoutStructure::Gpp {
                curve,
                paid_fraction,
                min_cash_multiple,
                rake,
            } => {
                // t runs from 0 at first place to 1 at the min-cash line
                let t = (1.0 - q) / paid_fraction;
                if t > 1.0 {
                    return 0.0;
                }
                let k = curve.decay_exponent();
                // Scaled so the paid places return the pool net of rake
                let top_up = ((k + 1.0) * ((1.0 - rake) / paid_fraction - min_cash_multiple)).max(0.0);
                self.entry_fee * (min_cash_multiple + top_up * (1.0 - t).powf(k))
            }
            PayoutStructure::Table { tiers } => {
                let rank = ((1.0 - q) * f64::from(self.field_size)).ceil().max(1.0) as u32;
                tiers
                    .iter()
                    .find(|tier| (tier.min_rank..=tier.max_rank).contains(&rank))
                    .map_or(0.0, |tier| tier.payout)
            }
        }
    }

    /// Mean prize over a score sample.
    pub fn expected_payout(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return 0.0;
        }
        scores.iter().map(|&s| self.payout(s)).sum::<f64>() / scores.len() as f64
    }

    /// Return on the entry fee for a mean prize; zero for free contests.
    pub fn roi(&self, mean_payout: f64) -> f64 {
        if self.entry_fee > 0.0 {
            (mean_payout - self.entry_fee) / self.entry_fee
        } else {
            0.0
        }
    }

    pub fn expected_roi(&self, scores: &[f64]) -> f64 {
        self.roi(self.expected_payout(scores))
    }
}

/// Expected return on the entry fee of a lineup with the given simulated
/// scores, entered in `contest` against `field`.
///
/// # Examples
///
/// ```
/// use lineupforge_core::{Contest, PayoutStructure, Platform, Sport};
/// use lineupforge_simulation::{expected_roi, FieldModel};
///
/// let contest = Contest::for_sport(1, Sport::Nba, Platform::DraftKings)
///     .with_payout(PayoutStructure::cash());
/// let field = FieldModel::new(250.0, 20.0);
///
/// // Always far above the cash line: 1.8x the fee back
/// let roi = expected_roi(&[400.0, 410.0], &contest, field);
/// assert!((roi - 0.8).abs() < 1e-9);
/// ```
pub fn expected_roi(scores: &[f64], contest: &Contest, field: FieldModel) -> f64 {
    PayoutModel::new(contest, field).expected_roi(scores)
}

#[cfg(test)]
#[path = "payout_tests.rs"]
mod tests;
