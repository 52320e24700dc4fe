//! Domain model: players, slots, contests and lineups.

mod contest;
mod lineup;
mod payout;
mod player;
mod slot;
mod sport;

pub use contest::Contest;
pub use lineup::{Lineup, SlotAssignment};
pub use payout::{ContestType, PayoutCurve, PayoutStructure, PayoutTier};
pub use player::{OptimizeFor, Player, PlayerId};
pub use slot::{Slot, PRIORITY_CONCRETE, PRIORITY_FLEX, PRIORITY_UTILITY};
pub use sport::{Platform, Sport};
