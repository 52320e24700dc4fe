//! Pairwise player correlation.
//!
//! The matrix is built once per request from team, game, country, sponsor
//! and salary-tier signals. It is sparse and symmetric: unrelated pairs are
//! not stored and read back as zero. Once built it is read-only and can be
//! shared across simulation workers.

use std::collections::{BTreeMap, HashMap};

use lineupforge_config::CorrelationConfig;
use lineupforge_core::{Player, PlayerId, Sport};
use tracing::debug;

/// Symmetric sparse mapping from unordered player pairs to coefficients in `[-1, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    coefficients: HashMap<(PlayerId, PlayerId), f64>,
}

#[inline]
fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl CorrelationMatrix {
    /// Creates an empty matrix in which every distinct pair is uncorrelated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the matrix for a pool using the default weights.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineupforge_core::{Player, Sport};
    /// use lineupforge_scoring::CorrelationMatrix;
    ///
    /// let a = Player::new(1, "A", "PG", "BOS", 8000, 40.0).with_opponent("NYK");
    /// let b = Player::new(2, "B", "C", "BOS", 7000, 35.0).with_opponent("NYK");
    /// let c = Player::new(3, "C", "SF", "LAL", 7500, 36.0).with_opponent("DEN");
    ///
    /// let matrix = CorrelationMatrix::build(&[a.clone(), b.clone(), c.clone()], Sport::Nba);
    /// assert!(matrix.get(a.id, b.id) > matrix.get(a.id, c.id));
    /// assert_eq!(matrix.get(a.id, c.id), 0.0);
    /// ```
    pub fn build(players: &[Player], sport: Sport) -> Self {
        Self::build_with(players, sport, &CorrelationConfig::default())
    }

    /// Builds the matrix for a pool using explicit weights.
    pub fn build_with(players: &[Player], sport: Sport, config: &CorrelationConfig) -> Self {
        let mut matrix = Self::new();
        for (i, a) in players.iter().enumerate() {
            for b in &players[i + 1..] {
                if a.id == b.id {
                    continue;
                }
                let rho = pair_coefficient(a, b, sport, config);
                matrix.set(a.id, b.id, rho);
            }
        }
        debug!(
            event = "correlation_built",
            sport = %sport,
            players = players.len(),
            pairs = matrix.len(),
        );
        matrix
    }

    /// Returns the coefficient for a pair; 1.0 on the diagonal, 0.0 if unrelated.
    pub fn get(&self, a: PlayerId, b: PlayerId) -> f64 {
        if a == b {
            return 1.0;
        }
        self.coefficients.get(&key(a, b)).copied().unwrap_or(0.0)
    }

    /// Sets the coefficient for a pair, clamped to `[-1, 1]`.
    ///
    /// Zero and non-finite values remove the pair. Diagonal entries are ignored.
    pub fn set(&mut self, a: PlayerId, b: PlayerId, rho: f64) {
        if a == b {
            return;
        }
        if rho == 0.0 || !rho.is_finite() {
            self.coefficients.remove(&key(a, b));
        } else {
            self.coefficients.insert(key(a, b), rho.clamp(-1.0, 1.0));
        }
    }

    /// Number of correlated (non-zero) pairs.
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// Non-zero pairs in unspecified order.
    pub fn pairs(&self) -> impl Iterator<Item = (PlayerId, PlayerId, f64)> + '_ {
        self.coefficients.iter().map(|(&(a, b), &rho)| (a, b, rho))
    }

    /// Sum of coefficients over every unordered pair of `ids`.
    pub fn pair_sum(&self, ids: &[PlayerId]) -> f64 {
        let mut sum = 0.0;
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                sum += self.get(a, b);
            }
        }
        sum
    }

    /// Mean correlation of `player` to the other members of `group`.
    ///
    /// Zero when the group has no other members.
    pub fn average_to(&self, player: PlayerId, group: &[PlayerId]) -> f64 {
        let others: Vec<f64> = group
            .iter()
            .filter(|&&other| other != player)
            .map(|&other| self.get(player, other))
            .collect();
        if others.is_empty() {
            0.0
        } else {
            others.iter().sum::<f64>() / others.len() as f64
        }
    }
}

/// Coefficient for one unordered pair.
pub fn pair_coefficient(a: &Player, b: &Player, sport: Sport, config: &CorrelationConfig) -> f64 {
    let cap = config.max_coefficient;
    match config.team_weights(sport) {
        Some(weights) => {
            if a.team == b.team {
                let factor = teammate_factor(sport, &a.position, &b.position);
                (weights.same_team * factor).min(cap)
            } else if a.is_opponent_of(b) {
                if opposes_defense(sport, &a.position, &b.position) {
                    -weights.game_stack
                } else {
                    weights.game_stack.min(cap)
                }
            } else {
                0.0
            }
        }
        None => golf_coefficient(a, b, config).min(cap),
    }
}

fn golf_coefficient(a: &Player, b: &Player, config: &CorrelationConfig) -> f64 {
    let weights = &config.golf;
    let mut rho = 0.0;
    if a.country.is_some() && a.country == b.country {
        rho += weights.same_country;
    }
    if a.sponsor.is_some() && a.sponsor == b.sponsor {
        rho += weights.same_sponsor;
    }
    let gap = a.salary.abs_diff(b.salary);
    if weights.tier_width > 0 && gap < weights.tier_width {
        rho += weights.salary_tier * (1.0 - gap as f64 / weights.tier_width as f64);
    }
    rho
}

/// Multiplier on the same-team base weight for a position pair.
fn teammate_factor(sport: Sport, a: &str, b: &str) -> f64 {
    let pair = if a <= b { (a, b) } else { (b, a) };
    match sport {
        Sport::Nfl => match pair {
            ("QB", "WR") => 1.5,
            ("QB", "TE") => 1.15,
            ("QB", "RB") => 0.45,
            ("RB", "WR") | ("TE", "WR") | ("RB", "TE") => 0.3,
            ("WR", "WR") => 0.25,
            ("DST", _) | (_, "DST") | ("DEF", _) | (_, "DEF") => 0.2,
            _ => 0.25,
        },
        Sport::Nba => match pair {
            ("C", "PG") | ("PF", "PG") => 1.25,
            _ => 1.0,
        },
        Sport::Mlb => match pair {
            ("P", "P") => 0.0,
            ("P", _) | (_, "P") => 0.3,
            _ => 1.0,
        },
        Sport::Golf => 0.0,
    }
}

/// True when one side is a defense or pitcher facing the other side's offense.
fn opposes_defense(sport: Sport, a: &str, b: &str) -> bool {
    let is_defense = |p: &str| match sport {
        Sport::Nfl => p == "DST" || p == "DEF",
        Sport::Mlb => p == "P",
        _ => false,
    };
    is_defense(a) != is_defense(b)
}

/// A correlated group sharing one environment draw per simulation iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Grouping key, e.g. "team:BOS" or "country:USA".
    pub key: String,
    pub members: Vec<ClusterMember>,
}

/// A cluster member with its mean correlation to the rest of the cluster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMember {
    pub player: PlayerId,
    /// Mean correlation to the other members, clamped to `[0, 1)`.
    pub rho_bar: f64,
}

fn primary_cluster_key(player: &Player, sport: Sport) -> Option<String> {
    if sport.is_individual() {
        player
            .country
            .as_ref()
            .map(|c| format!("country:{c}"))
            .or_else(|| player.sponsor.as_ref().map(|s| format!("sponsor:{s}")))
    } else if player.team.is_empty() {
        player.game_key().map(|g| format!("game:{g}"))
    } else {
        Some(format!("team:{}", player.team))
    }
}

/// Groups the pool into environment clusters.
///
/// Each player joins at most one cluster: the team for team sports, the
/// country (else sponsor) for golf. Singletons and players with no
/// positive correlation to their cluster are left out and simulate as
/// independent. Clusters are ordered by key, members by id.
pub fn build_clusters(players: &[Player], sport: Sport, matrix: &CorrelationMatrix) -> Vec<Cluster> {
    let mut groups: BTreeMap<String, Vec<PlayerId>> = BTreeMap::new();
    for player in players {
        if let Some(key) = primary_cluster_key(player, sport) {
            groups.entry(key).or_default().push(player.id);
        }
    }

    groups
        .into_iter()
        .filter_map(|(key, mut ids)| {
            ids.sort();
            ids.dedup();
            if ids.len() < 2 {
                return None;
            }
            let members: Vec<ClusterMember> = ids
                .iter()
                .map(|&id| ClusterMember {
                    player: id,
                    rho_bar: matrix.average_to(id, &ids).clamp(0.0, 0.99),
                })
                .filter(|m| m.rho_bar > 0.0)
                .collect();
            if members.is_empty() {
                None
            } else {
                Some(Cluster { key, members })
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "correlation_tests.rs"]
mod tests;
