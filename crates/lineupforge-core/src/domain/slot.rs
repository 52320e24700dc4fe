//! Roster slots.

use super::Player;

/// Priority of concrete single-position slots.
pub const PRIORITY_CONCRETE: u8 = 1;
/// Priority of multi-position flex slots such as "G" or "F".
pub const PRIORITY_FLEX: u8 = 2;
/// Priority of the most permissive slot, e.g. "UTIL".
pub const PRIORITY_UTILITY: u8 = 3;

/// A roster position to fill in a lineup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub name: String,
    /// Primary positions eligible to fill this slot.
    pub allowed_positions: Vec<String>,
    /// Lower values are filled first.
    pub priority: u8,
    pub required: bool,
}

impl Slot {
    pub fn new(name: impl Into<String>, allowed_positions: &[&str], priority: u8) -> Self {
        Self {
            name: name.into(),
            allowed_positions: allowed_positions.iter().map(|p| p.to_string()).collect(),
            priority,
            required: true,
        }
    }

    /// A slot accepting exactly its own position.
    pub fn concrete(position: &str) -> Self {
        Self::new(position, &[position], PRIORITY_CONCRETE)
    }

    pub fn flex(name: &str, allowed_positions: &[&str]) -> Self {
        Self::new(name, allowed_positions, PRIORITY_FLEX)
    }

    pub fn utility(name: &str, allowed_positions: &[&str]) -> Self {
        Self::new(name, allowed_positions, PRIORITY_UTILITY)
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// True iff the player's primary position is allowed in this slot.
    pub fn accepts(&self, player: &Player) -> bool {
        self.allowed_positions.iter().any(|p| *p == player.position)
    }

    pub fn is_flex(&self) -> bool {
        self.allowed_positions.len() > 1
    }

    /// True when every position this slot accepts is also accepted by `other`.
    pub fn is_subset_of(&self, other: &Slot) -> bool {
        self.allowed_positions
            .iter()
            .all(|p| other.allowed_positions.contains(p))
    }
}
