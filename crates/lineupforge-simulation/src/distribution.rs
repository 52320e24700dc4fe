//! Player score distributions.
//!
//! Each player's `(floor, mean, ceiling)` projection is turned into a
//! sampling distribution:
//!
//! - zero spread: a constant at the mean
//! - ceiling far above the mean: log-normal (boom or bust)
//! - upside compressed against the ceiling: beta scaled to `[floor, ceiling]`
//! - otherwise: normal
//!
//! The standard deviation is always `(ceiling - floor) / spread_divisor`.

use std::collections::HashMap;

use rand::Rng;
use rand_distr::{Beta, Distribution, LogNormal, Normal};

use lineupforge_config::DistributionConfig;
use lineupforge_core::{Player, PlayerId};

/// Standard deviations covered by the histogram range of unbounded shapes.
const TAIL_SIGMAS: f64 = 6.0;

/// Minimum beta concentration, keeps both shape parameters above zero.
const MIN_CONCENTRATION: f64 = 2.0;

/// Shape chosen for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Constant,
    Normal,
    LogNormal,
    Beta,
}

#[derive(Debug, Clone)]
enum Sampler {
    Constant,
    Normal(Normal<f64>),
    LogNormal(LogNormal<f64>),
    Beta { beta: Beta<f64>, floor: f64, range: f64 },
}

/// A sampling distribution with known mean and standard deviation.
#[derive(Debug, Clone)]
pub struct PlayerDistribution {
    mean: f64,
    std_dev: f64,
    sampler: Sampler,
}

impl PlayerDistribution {
    pub fn constant(value: f64) -> Self {
        Self {
            mean: value,
            std_dev: 0.0,
            sampler: Sampler::Constant,
        }
    }

    /// Normal distribution, or a constant when `std_dev` is not positive.
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        match Normal::new(mean, std_dev) {
            Ok(normal) if std_dev > 0.0 => Self {
                mean,
                std_dev,
                sampler: Sampler::Normal(normal),
            },
            _ => Self::constant(mean),
        }
    }

    /// Log-normal matching `mean` and `std_dev`. Falls back to normal
    /// for a non-positive mean.
    pub fn log_normal(mean: f64, std_dev: f64) -> Self {
        if mean <= 0.0 || std_dev <= 0.0 {
            return Self::normal(mean, std_dev);
        }
        let sigma_sq = (1.0 + (std_dev * std_dev) / (mean * mean)).ln();
        let mu = mean.ln() - sigma_sq / 2.0;
        match LogNormal::new(mu, sigma_sq.sqrt()) {
            Ok(log_normal) => Self {
                mean,
                std_dev,
                sampler: Sampler::LogNormal(log_normal),
            },
            Err(_) => Self::normal(mean, std_dev),
        }
    }

    /// Beta on `[floor, ceiling]` with the given mean. The variance is
    /// matched when the concentration allows it.
    pub fn scaled_beta(floor: f64, mean: f64, ceiling: f64, std_dev: f64) -> Self {
        let range = ceiling - floor;
        if range <= 0.0 || std_dev <= 0.0 {
            return Self::constant(mean);
        }
        let m = (mean - floor) / range;
        if m <= 0.0 || m >= 1.0 {
            return Self::normal(mean, std_dev);
        }
        let concentration =
            (m * (1.0 - m) * range * range / (std_dev * std_dev) - 1.0).max(MIN_CONCENTRATION);
        let alpha = m * concentration;
        let beta = (1.0 - m) * concentration;
        match Beta::new(alpha, beta) {
            Ok(beta) => Self {
                mean,
                std_dev: range * (m * (1.0 - m) / (concentration + 1.0)).sqrt(),
                sampler: Sampler::Beta { beta, floor, range },
            },
            Err(_) => Self::normal(mean, std_dev),
        }
    }

    pub fn kind(&self) -> DistributionKind {
        match self.sampler {
            Sampler::Constant => DistributionKind::Constant,
            Sampler::Normal(_) => DistributionKind::Normal,
            Sampler::LogNormal(_) => DistributionKind::LogNormal,
            Sampler::Beta { .. } => DistributionKind::Beta,
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draws one score.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.sampler {
            Sampler::Constant => self.mean,
            Sampler::Normal(normal) => normal.sample(rng),
            Sampler::LogNormal(log_normal) => log_normal.sample(rng),
            Sampler::Beta { beta, floor, range } => floor + range * beta.sample(rng),
        }
    }

    /// Range holding all but a negligible tail of the samples.
    pub fn bounds(&self) -> (f64, f64) {
        let tail = TAIL_SIGMAS * self.std_dev;
        match &self.sampler {
            Sampler::Constant => (self.mean, self.mean),
            Sampler::Normal(_) => (self.mean - tail, self.mean + tail),
            Sampler::LogNormal(_) => (0.0, self.mean + tail),
            Sampler::Beta { floor, range, .. } => (*floor, floor + range),
        }
    }
}

/// Chooses and builds the distribution for one player.
///
/// # Examples
///
/// ```
/// use lineupforge_config::DistributionConfig;
/// use lineupforge_core::Player;
/// use lineupforge_simulation::{build_distribution, DistributionKind};
///
/// let config = DistributionConfig::default();
/// let steady = Player::new(1, "Steady", "PG", "BOS", 7_000, 40.0)
///     .with_range(30.0, 50.0);
/// let boom = Player::new(2, "Boom", "PG", "BOS", 4_000, 10.0)
///     .with_range(2.0, 30.0);
///
/// assert_eq!(build_distribution(&steady, &config).kind(), DistributionKind::Normal);
/// assert_eq!(build_distribution(&boom, &config).kind(), DistributionKind::LogNormal);
/// ```
pub fn build_distribution(player: &Player, config: &DistributionConfig) -> PlayerDistribution {
    let mean = player.projected_mean;
    let spread = (player.ceiling - player.floor).max(0.0);
    let divisor = if config.spread_divisor > 0.0 {
        config.spread_divisor
    } else {
        DistributionConfig::default().spread_divisor
    };
    let std_dev = spread / divisor;

    if !(std_dev > 0.0 && std_dev.is_finite()) {
        return PlayerDistribution::constant(mean);
    }
    if mean > 0.0 && player.ceiling > config.log_normal_ratio * mean {
        return PlayerDistribution::log_normal(mean, std_dev);
    }
    if player.ceiling - mean < config.beta_skew_ratio * (mean - player.floor) {
        return PlayerDistribution::scaled_beta(player.floor, mean, player.ceiling, std_dev);
    }
    PlayerDistribution::normal(mean, std_dev)
}

/// Distributions for a slate, keyed by player.
#[derive(Debug, Clone, Default)]
pub struct Distributions {
    by_player: HashMap<PlayerId, PlayerDistribution>,
}

impl Distributions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(players: &[Player], config: &DistributionConfig) -> Self {
        Self {
            by_player: players
                .iter()
                .map(|p| (p.id, build_distribution(p, config)))
                .collect(),
        }
    }

    /// Replaces the distribution of one player.
    pub fn insert(&mut self, id: PlayerId, distribution: PlayerDistribution) {
        self.by_player.insert(id, distribution);
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerDistribution> {
        self.by_player.get(&id)
    }

    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }
}

#[cfg(test)]
#[path = "distribution_tests.rs"]
mod tests;
