//! Stack generation.
//!
//! Candidate stacks are enumerated by grouping the pool by team, game and
//! country, scored by their internal correlation and an ownership-leverage
//! term, and ranked best first. Stacks are objective bonuses only; the
//! optimizer is free to ignore one that does not fit under the cap.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use lineupforge_core::{ContestType, Player, PlayerId, Sport};
use tracing::debug;

use crate::correlation::CorrelationMatrix;

/// Kind of correlated grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StackType {
    /// Three or four teammates.
    TeamStack,
    /// Players from both sides of one game.
    GameStack,
    /// Two teammates.
    MiniStack,
    /// A quarterback with the team's top pass catchers.
    QbStack,
    /// Golfers from the same country.
    CountryStack,
}

impl StackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackType::TeamStack => "team_stack",
            StackType::GameStack => "game_stack",
            StackType::MiniStack => "mini_stack",
            StackType::QbStack => "qb_stack",
            StackType::CountryStack => "country_stack",
        }
    }
}

impl fmt::Display for StackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scored group of players.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    pub stack_type: StackType,
    /// Team, game or country the stack was drawn from.
    pub key: String,
    /// Members, ordered by id.
    pub players: Vec<Player>,
    pub score: f64,
}

impl Stack {
    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.players.iter().map(|p| p.id).collect()
    }

    /// Number of unordered member pairs.
    pub fn pair_count(&self) -> usize {
        let n = self.players.len();
        n * n.saturating_sub(1) / 2
    }

    pub fn total_salary(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.salary)).sum()
    }

    /// Lineup tag, e.g. "team_stack:BOS".
    pub fn tag(&self) -> String {
        format!("{}:{}", self.stack_type, self.key)
    }
}

/// Ranks candidate stacks for a pool.
///
/// # Examples
///
/// ```
/// use lineupforge_core::{ContestType, Player, Sport};
/// use lineupforge_scoring::{CorrelationMatrix, StackGenerator, StackType};
///
/// let pool = vec![
///     Player::new(1, "A", "PG", "BOS", 8000, 40.0),
///     Player::new(2, "B", "C", "BOS", 7000, 35.0),
///     Player::new(3, "C", "SF", "LAL", 7500, 36.0),
/// ];
/// let matrix = CorrelationMatrix::build(&pool, Sport::Nba);
/// let stacks = StackGenerator::new(&matrix, ContestType::Gpp).generate(&pool, Sport::Nba);
///
/// assert_eq!(stacks[0].stack_type, StackType::MiniStack);
/// assert_eq!(stacks[0].key, "BOS");
/// ```
#[derive(Debug, Clone)]
pub struct StackGenerator<'a> {
    matrix: &'a CorrelationMatrix,
    contest_type: ContestType,
    leverage_weight: f64,
}

impl<'a> StackGenerator<'a> {
    pub fn new(matrix: &'a CorrelationMatrix, contest_type: ContestType) -> Self {
        Self {
            matrix,
            contest_type,
            leverage_weight: 1.0,
        }
    }

    pub fn with_leverage_weight(mut self, weight: f64) -> Self {
        self.leverage_weight = weight;
        self
    }

    /// Enumerates, scores and sorts stacks, best first.
    pub fn generate(&self, players: &[Player], sport: Sport) -> Vec<Stack> {
        let pool_mean = mean(players.iter().map(|p| p.projected_mean));
        let mut stacks: Vec<Stack> = enumerate(players, sport)
            .into_iter()
            .map(|(stack_type, key, members)| {
                let score = self.score(&members, pool_mean);
                Stack {
                    stack_type,
                    key,
                    players: members,
                    score,
                }
            })
            .filter(|s| s.score > 0.0)
            .collect();

        stacks.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.stack_type.cmp(&b.stack_type))
                .then_with(|| a.key.cmp(&b.key))
        });

        debug!(
            event = "stacks_generated",
            sport = %sport,
            count = stacks.len(),
            best = stacks.first().map(|s| s.score).unwrap_or(0.0),
        );
        stacks
    }

    /// Correlation sum adjusted by ownership leverage.
    ///
    /// Leverage rewards high-projection, low-owned groups in tournaments and
    /// penalizes them in cash games.
    pub fn score(&self, members: &[Player], pool_mean: f64) -> f64 {
        let ids: Vec<PlayerId> = members.iter().map(|p| p.id).collect();
        let correlation = self.matrix.pair_sum(&ids);
        if correlation <= 0.0 {
            return correlation;
        }

        let projection = mean(members.iter().map(|p| p.projected_mean));
        let ownership = mean(members.iter().map(|p| p.ownership_pct));
        let relative = if pool_mean > 0.0 {
            projection / pool_mean
        } else {
            1.0
        };
        let leverage = relative * (1.0 - ownership / 100.0);

        match self.contest_type {
            ContestType::Gpp => correlation * (1.0 + self.leverage_weight * leverage),
            ContestType::Cash => {
                correlation * (1.0 - 0.5 * self.leverage_weight * leverage).max(0.0)
            }
        }
    }
}

/// Ranks stacks for a pool with default leverage.
pub fn get_optimal_stacks(
    players: &[Player],
    sport: Sport,
    contest_type: ContestType,
    matrix: &CorrelationMatrix,
) -> Vec<Stack> {
    StackGenerator::new(matrix, contest_type).generate(players, sport)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

fn by_projection(players: &mut [Player]) {
    players.sort_by(|a, b| {
        b.projected_mean
            .partial_cmp(&a.projected_mean)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn by_id(mut players: Vec<Player>) -> Vec<Player> {
    players.sort_by_key(|p| p.id);
    players
}

fn team_stack_size(sport: Sport) -> usize {
    match sport {
        Sport::Nba => 3,
        Sport::Nfl | Sport::Mlb => 4,
        Sport::Golf => 0,
    }
}

fn is_defense(sport: Sport, position: &str) -> bool {
    match sport {
        Sport::Nfl => position == "DST" || position == "DEF",
        Sport::Mlb => position == "P",
        _ => false,
    }
}

type Candidate = (StackType, String, Vec<Player>);

fn enumerate(players: &[Player], sport: Sport) -> Vec<Candidate> {
    if sport.is_individual() {
        return enumerate_countries(players);
    }

    let mut teams: BTreeMap<&str, Vec<Player>> = BTreeMap::new();
    for p in players.iter().filter(|p| !is_defense(sport, &p.position)) {
        teams.entry(p.team.as_str()).or_default().push(p.clone());
    }
    for members in teams.values_mut() {
        by_projection(members);
    }

    let mut candidates = Vec::new();
    for (&team, members) in &teams {
        if members.len() >= 2 {
            candidates.push((
                StackType::MiniStack,
                team.to_string(),
                by_id(members[..2].to_vec()),
            ));
        }
        let size = team_stack_size(sport).min(members.len());
        if size >= 3 {
            candidates.push((
                StackType::TeamStack,
                team.to_string(),
                by_id(members[..size].to_vec()),
            ));
        }
        if sport == Sport::Nfl {
            if let Some(qb) = members.iter().find(|p| p.position == "QB") {
                let catchers: Vec<Player> = members
                    .iter()
                    .filter(|p| p.position == "WR" || p.position == "TE")
                    .take(2)
                    .cloned()
                    .collect();
                if !catchers.is_empty() {
                    let mut group = vec![qb.clone()];
                    group.extend(catchers);
                    candidates.push((StackType::QbStack, team.to_string(), by_id(group)));
                }
            }
        }
    }

    let mut games: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for p in players {
        if let Some(game) = p.game_key() {
            let sides = games.entry(game).or_default();
            if !sides.contains(&p.team.as_str()) {
                sides.push(p.team.as_str());
            }
        }
    }
    for (game, sides) in games {
        if sides.len() != 2 {
            continue;
        }
        let mut group = Vec::new();
        for side in &sides {
            if let Some(members) = teams.get(side) {
                group.extend(members.iter().take(2).cloned());
            }
        }
        if group.len() >= 3 {
            candidates.push((StackType::GameStack, game, by_id(group)));
        }
    }
    candidates
}

fn enumerate_countries(players: &[Player]) -> Vec<Candidate> {
    let mut countries: BTreeMap<&str, Vec<Player>> = BTreeMap::new();
    for p in players {
        if let Some(country) = &p.country {
            countries.entry(country.as_str()).or_default().push(p.clone());
        }
    }
    countries
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(country, mut members)| {
            by_projection(&mut members);
            members.truncate(3);
            (StackType::CountryStack, country.to_string(), by_id(members))
        })
        .collect()
}

#[cfg(test)]
#[path = "stack_tests.rs"]
mod tests;
