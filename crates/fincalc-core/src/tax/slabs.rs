//! Income-tax slab tables.
//!
//! Slab boundaries and rates are data, not code: a [`TaxSlabTable`] is an
//! ordered list of brackets injected into the income-tax engine, so a new
//! assessment year is a new constructor rather than a change to the
//! computation logic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinCalcError;
use crate::types::{Money, Percent};
use crate::FinCalcResult;

/// Tax regime selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    #[default]
    New,
}

/// One progressive bracket. `upper_bound: None` marks the open-ended top slab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlab {
    pub lower_bound: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Money>,
    /// Marginal rate in percentage points (5 = 5%).
    pub rate: Percent,
}

impl TaxSlab {
    fn new(lower_bound: Money, upper_bound: Option<Money>, rate: Percent) -> Self {
        TaxSlab {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Human-readable bracket label, e.g. `400000 - 800000` or `2400000+`.
    pub fn label(&self) -> String {
        match self.upper_bound {
            Some(upper) => format!("{} - {}", self.lower_bound, upper),
            None => format!("{}+", self.lower_bound),
        }
    }
}

/// Ordered slab table for one assessment year and regime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSlabTable {
    pub assessment_year: String,
    pub regime: Regime,
    pub slabs: Vec<TaxSlab>,
}

impl TaxSlabTable {
    /// Bundled table for the given regime (FY 2025-26, India).
    pub fn for_regime(regime: Regime) -> Self {
        match regime {
            Regime::Old => Self::fy2025_old_regime(),
            Regime::New => Self::fy2025_new_regime(),
        }
    }

    /// FY 2025-26 old regime, individuals below 60.
    pub fn fy2025_old_regime() -> Self {
        TaxSlabTable {
            assessment_year: "2025-26".to_string(),
            regime: Regime::Old,
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(250000)), dec!(0)),
                TaxSlab::new(dec!(250000), Some(dec!(500000)), dec!(5)),
                TaxSlab::new(dec!(500000), Some(dec!(1000000)), dec!(20)),
                TaxSlab::new(dec!(1000000), None, dec!(30)),
            ],
        }
    }

    /// FY 2025-26 new regime.
    pub fn fy2025_new_regime() -> Self {
        TaxSlabTable {
            assessment_year: "2025-26".to_string(),
            regime: Regime::New,
            slabs: vec![
                TaxSlab::new(dec!(0), Some(dec!(400000)), dec!(0)),
                TaxSlab::new(dec!(400000), Some(dec!(800000)), dec!(5)),
                TaxSlab::new(dec!(800000), Some(dec!(1200000)), dec!(10)),
                TaxSlab::new(dec!(1200000), Some(dec!(1600000)), dec!(15)),
                TaxSlab::new(dec!(1600000), Some(dec!(2000000)), dec!(20)),
                TaxSlab::new(dec!(2000000), Some(dec!(2400000)), dec!(25)),
                TaxSlab::new(dec!(2400000), None, dec!(30)),
            ],
        }
    }

    /// A usable table has at least one slab, starts at zero, is ordered and
    /// contiguous, carries non-negative rates, and is unbounded only at the top.
    pub fn validate(&self) -> FinCalcResult<()> {
        let invalid = |reason: &str| {
            Err(FinCalcError::InvalidInput {
                field: "slabs".into(),
                reason: reason.into(),
            })
        };

        let first = match self.slabs.first() {
            Some(first) => first,
            None => return invalid("Slab table must not be empty"),
        };
        if !first.lower_bound.is_zero() {
            return invalid("First slab must start at zero");
        }

        let mut previous_upper: Option<Decimal> = Some(first.lower_bound);
        for slab in &self.slabs {
            if slab.rate < Decimal::ZERO {
                return invalid("Slab rates cannot be negative");
            }
            match previous_upper {
                Some(expected_lower) if slab.lower_bound == expected_lower => {}
                Some(_) => return invalid("Slabs must be contiguous and ordered"),
                None => return invalid("Only the last slab may be unbounded"),
            }
            if let Some(upper) = slab.upper_bound {
                if upper <= slab.lower_bound {
                    return invalid("Slab upper bound must exceed its lower bound");
                }
            }
            previous_upper = slab.upper_bound;
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
