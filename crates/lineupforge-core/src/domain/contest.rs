//! Contest constraints.

use super::{ContestType, PayoutStructure, Platform, Slot, Sport};
use crate::error::{LineupForgeError, Result};
use crate::slots::get_slots;

/// A contest a batch of lineups is built for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contest {
    pub id: u64,
    pub sport: Sport,
    pub platform: Platform,
    pub salary_cap: u32,
    /// Ordered slot layout derived from sport and platform.
    pub slots: Vec<Slot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub payout: PayoutStructure,
    pub max_entries: u32,
    pub entry_fee: f64,
    pub field_size: u32,
}

impl Contest {
    /// Creates a classic contest using the platform's standard layout and cap.
    ///
    /// # Examples
    ///
    /// ```
    /// use lineupforge_core::domain::{Contest, Platform, Sport};
    ///
    /// let contest = Contest::for_sport(1, Sport::Nba, Platform::DraftKings);
    /// assert_eq!(contest.salary_cap, 50_000);
    /// assert_eq!(contest.slots.len(), 8);
    /// ```
    pub fn for_sport(id: u64, sport: Sport, platform: Platform) -> Self {
        Self {
            id,
            sport,
            platform,
            salary_cap: platform.salary_cap(),
            slots: get_slots(sport, platform),
            payout: PayoutStructure::default(),
            max_entries: 150,
            entry_fee: 20.0,
            field_size: 10_000,
        }
    }

    pub fn with_salary_cap(mut self, salary_cap: u32) -> Self {
        self.salary_cap = salary_cap;
        self
    }

    pub fn with_slots(mut self, slots: Vec<Slot>) -> Self {
        self.slots = slots;
        self
    }

    pub fn with_payout(mut self, payout: PayoutStructure) -> Self {
        self.payout = payout;
        self
    }

    pub fn with_entry_fee(mut self, entry_fee: f64) -> Self {
        self.entry_fee = entry_fee;
        self
    }

    pub fn with_field_size(mut self, field_size: u32) -> Self {
        self.field_size = field_size;
        self
    }

    pub fn contest_type(&self) -> ContestType {
        self.payout.contest_type()
    }

    /// Number of slots that must be filled.
    pub fn required_slot_count(&self) -> usize {
        self.slots.iter().filter(|s| s.required).count()
    }

    /// Validates the contest at the input boundary.
    pub fn validate(&self) -> Result<()> {
        if self.slots.is_empty() {
            return Err(LineupForgeError::InvalidContest(
                "contest has no slots".to_string(),
            ));
        }
        if self.salary_cap == 0 {
            return Err(LineupForgeError::InvalidContest(
                "salary cap must be positive".to_string(),
            ));
        }
        if !(self.entry_fee.is_finite() && self.entry_fee >= 0.0) {
            return Err(LineupForgeError::InvalidContest(format!(
                "entry fee {} is not a non-negative amount",
                self.entry_fee
            )));
        }
        if self.field_size == 0 {
            return Err(LineupForgeError::InvalidContest(
                "field size must be at least 1".to_string(),
            ));
        }
        if let Some(slot) = self.slots.iter().find(|s| s.allowed_positions.is_empty()) {
            return Err(LineupForgeError::InvalidContest(format!(
                "slot {} accepts no positions",
                slot.name
            )));
        }
        self.payout.validate()
    }
}
