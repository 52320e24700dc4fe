//! Contest prize structures.

use crate::error::{LineupForgeError, Result};

/// Broad contest category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ContestType {
    /// Guaranteed prize pool tournament, top-heavy payouts.
    Gpp,
    /// Flat payout to roughly the top half of the field.
    Cash,
}

/// Shape of a GPP payout curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PayoutCurve {
    #[default]
    TopHeavy,
    Flat,
}

impl PayoutCurve {
    /// Exponent of the `(1 - t)^k` decay across the paid places.
    pub fn decay_exponent(&self) -> f64 {
        match self {
            PayoutCurve::TopHeavy => 8.0,
            PayoutCurve::Flat => 1.0,
        }
    }
}

/// One row of an explicit rank-to-payout table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PayoutTier {
    /// First finishing rank covered, 1-based.
    pub min_rank: u32,
    /// Last finishing rank covered, inclusive.
    pub max_rank: u32,
    /// Prize per entry in platform currency.
    pub payout: f64,
}

/// How a contest pays out.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
pub enum PayoutStructure {
    /// Every entry above the cash line wins `payout_multiple` times the fee.
    Cash {
        paid_fraction: f64,
        payout_multiple: f64,
    },
    /// Parametric tournament curve paying the top `paid_fraction`.
    Gpp {
        curve: PayoutCurve,
        paid_fraction: f64,
        min_cash_multiple: f64,
        rake: f64,
    },
    /// Explicit prize table over the contest's field size.
    Table { tiers: Vec<PayoutTier> },
}

impl PayoutStructure {
    /// Double-up style cash game.
    pub fn cash() -> Self {
        PayoutStructure::Cash {
            paid_fraction: 0.45,
            payout_multiple: 1.8,
        }
    }

    pub fn gpp(curve: PayoutCurve) -> Self {
        let paid_fraction = match curve {
            PayoutCurve::TopHeavy => 0.2,
            PayoutCurve::Flat => 0.25,
        };
        PayoutStructure::Gpp {
            curve,
            paid_fraction,
            min_cash_multiple: 1.5,
            rake: 0.15,
        }
    }

    pub fn contest_type(&self) -> ContestType {
        match self {
            PayoutStructure::Cash { .. } => ContestType::Cash,
            PayoutStructure::Gpp { .. } | PayoutStructure::Table { .. } => ContestType::Gpp,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(LineupForgeError::InvalidContest(msg));
        match self {
            PayoutStructure::Cash {
                paid_fraction,
                payout_multiple,
            } => {
                if !(*paid_fraction > 0.0 && *paid_fraction <= 1.0) {
                    return invalid(format!("cash paid_fraction {paid_fraction} outside (0, 1]"));
                }
                if *payout_multiple <= 0.0 {
                    return invalid("cash payout_multiple must be positive".to_string());
                }
            }
            PayoutStructure::Gpp {
                paid_fraction,
                min_cash_multiple,
                rake,
                ..
            } => {
                if !(*paid_fraction > 0.0 && *paid_fraction <= 1.0) {
                    return invalid(format!("gpp paid_fraction {paid_fraction} outside (0, 1]"));
                }
                if !(0.0..1.0).contains(rake) {
                    return invalid(format!("gpp rake {rake} outside [0, 1)"));
                }
                if *min_cash_multiple < 0.0 {
                    return invalid("gpp min_cash_multiple must be non-negative".to_string());
                }
            }
            PayoutStructure::Table { tiers } => {
                if tiers.is_empty() {
                    return invalid("payout table has no tiers".to_string());
                }
                for tier in tiers {
                    if tier.min_rank == 0 || tier.min_rank > tier.max_rank {
                        return invalid(format!(
                            "payout tier {}..={} is not a valid rank range",
                            tier.min_rank, tier.max_rank
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

impl Default for PayoutStructure {
    fn default() -> Self {
        PayoutStructure::gpp(PayoutCurve::TopHeavy)
    }
}
