//! Exposure bookkeeping across a batch.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use lineupforge_core::{Lineup, PlayerId};

use crate::config::OptimizeConfig;

/// Running appearance counts for the lineups accepted so far.
///
/// A player with a cap of `pct` may appear in at most
/// `floor(pct / 100 × batch_size)` lineups. Locked players are exempt.
#[derive(Debug, Clone)]
pub struct ExposureTracker {
    batch_size: usize,
    default_pct: Option<f64>,
    overrides: BTreeMap<PlayerId, f64>,
    exempt: HashSet<PlayerId>,
    counts: HashMap<PlayerId, usize>,
    lineups: usize,
}

impl ExposureTracker {
    pub fn new(config: &OptimizeConfig) -> Self {
        Self {
            batch_size: config.num_lineups,
            default_pct: config.max_exposure_pct,
            overrides: config.exposure_overrides.clone(),
            exempt: config.locked.iter().copied().collect(),
            counts: HashMap::new(),
            lineups: 0,
        }
    }

    fn limit_pct(&self, player: PlayerId) -> Option<f64> {
        if self.exempt.contains(&player) {
            return None;
        }
        self.overrides.get(&player).copied().or(self.default_pct)
    }

    /// Maximum number of lineups the player may appear in.
    pub fn max_count(&self, player: PlayerId) -> Option<usize> {
        self.max_count_in(player, self.batch_size)
    }

    /// Cap for the player in a batch of `lineups` lineups.
    pub fn max_count_in(&self, player: PlayerId, lineups: usize) -> Option<usize> {
        self.limit_pct(player).map(|pct| {
            let allowed = pct.clamp(0.0, 100.0) / 100.0 * lineups as f64;
            (allowed + 1e-9).floor() as usize
        })
    }

    pub fn count(&self, player: PlayerId) -> usize {
        self.counts.get(&player).copied().unwrap_or(0)
    }

    /// Lineups recorded so far.
    pub fn lineups(&self) -> usize {
        self.lineups
    }

    /// True once the player has used up its cap.
    pub fn is_exhausted(&self, player: PlayerId) -> bool {
        self.max_count(player)
            .is_some_and(|max| self.count(player) >= max)
    }

    /// True when the player's share of the lineups so far exceeds its cap.
    pub fn is_over_pro_rata(&self, player: PlayerId) -> bool {
        if self.lineups == 0 {
            return false;
        }
        self.limit_pct(player).is_some_and(|pct| {
            self.count(player) as f64 / self.lineups as f64 > pct / 100.0
        })
    }

    /// Multiplier applied to the player's value for the next lineup.
    pub fn value_factor(&self, player: PlayerId, penalty: f64) -> f64 {
        if self.is_over_pro_rata(player) {
            (1.0 - penalty).max(0.0)
        } else {
            1.0
        }
    }

    pub fn record(&mut self, ids: &[PlayerId]) {
        for &id in ids {
            *self.counts.entry(id).or_insert(0) += 1;
        }
        self.lineups += 1;
    }
}

/// Appearances of one player across a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerExposure {
    pub player: PlayerId,
    pub name: String,
    pub count: usize,
    /// `count / lineups`, in `[0, 1]`.
    pub fraction: f64,
}

/// Per-player exposure over a batch, most used first.
///
/// # Examples
///
/// ```
/// use lineupforge_core::{Lineup, Player, Slot, SlotAssignment};
/// use lineupforge_solver::ExposureReport;
///
/// let g = Slot::concrete("G");
/// let a = Player::new(1, "A", "G", "X", 5000, 40.0);
/// let b = Player::new(2, "B", "G", "X", 5000, 40.0);
/// let lineups = vec![
///     Lineup::new(vec![SlotAssignment { slot: g.clone(), player: a.clone() }]),
///     Lineup::new(vec![SlotAssignment { slot: g.clone(), player: a.clone() }]),
///     Lineup::new(vec![SlotAssignment { slot: g, player: b }]),
/// ];
///
/// let report = ExposureReport::from_lineups(&lineups);
/// assert_eq!(report.entries[0].player, a.id);
/// assert_eq!(report.entries[0].count, 2);
/// assert!((report.max_fraction() - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExposureReport {
    pub lineups: usize,
    pub entries: Vec<PlayerExposure>,
}

impl ExposureReport {
    pub fn from_lineups(lineups: &[Lineup]) -> Self {
        let mut by_player: BTreeMap<PlayerId, (String, usize)> = BTreeMap::new();
        for lineup in lineups {
            for player in lineup.players() {
                by_player
                    .entry(player.id)
                    .or_insert_with(|| (player.name.clone(), 0))
                    .1 += 1;
            }
        }

        let total = lineups.len();
        let mut entries: Vec<PlayerExposure> = by_player
            .into_iter()
            .map(|(player, (name, count))| PlayerExposure {
                player,
                name,
                count,
                fraction: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            })
            .collect();
        entries.sort_by(|a, b| match b.count.cmp(&a.count) {
            Ordering::Equal => a.player.cmp(&b.player),
            other => other,
        });

        Self {
            lineups: total,
            entries,
        }
    }

    pub fn get(&self, player: PlayerId) -> Option<&PlayerExposure> {
        self.entries.iter().find(|e| e.player == player)
    }

    /// Highest fraction of the batch held by any single player.
    pub fn max_fraction(&self) -> f64 {
        self.entries.first().map(|e| e.fraction).unwrap_or(0.0)
    }
}
