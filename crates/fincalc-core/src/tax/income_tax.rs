//! Progressive income-tax computation.
//!
//! Walks an ordered slab table and taxes the portion of income falling in
//! each bracket at that bracket's marginal rate. The per-slab figures are
//! rounded individually and the total is their exact sum, so the reported
//! breakdown always reconciles.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::tax::slabs::{Regime, TaxSlabTable};
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Income-tax parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxInput {
    /// Taxable annual income.
    pub annual_income: Money,
    /// Regime selecting the bundled slab table. Defaults to the new regime.
    #[serde(default)]
    pub regime: Regime,
}

/// Tax charged by one slab.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlabTax {
    /// Bracket label, e.g. `400000 - 800000`.
    pub slab_label: String,
    /// Portion of income falling inside this bracket.
    pub taxable_income_in_slab: Money,
    /// Marginal rate in percentage points.
    pub rate: Percent,
    /// Tax charged on this bracket.
    pub tax_for_slab: Money,
}

/// Income-tax computation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxOutput {
    /// Total tax: exact sum of the per-slab figures.
    pub tax: Money,
    /// Income remaining after tax.
    pub net_income: Money,
    /// Ascending per-slab breakdown; brackets the income never reaches
    /// are omitted.
    pub slabs: Vec<SlabTax>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate income tax under the bundled slab table for the input's regime.
pub fn calculate_income_tax(input: &TaxInput) -> FinCalcResult<ComputationOutput<TaxOutput>> {
    calculate_income_tax_with_table(input, &TaxSlabTable::for_regime(input.regime))
}

/// Calculate income tax against an injected slab table.
pub fn calculate_income_tax_with_table(
    input: &TaxInput,
    table: &TaxSlabTable,
) -> FinCalcResult<ComputationOutput<TaxOutput>> {
    let start = Instant::now();

    if input.annual_income < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annualIncome".into(),
            reason: "Income cannot be negative".into(),
        });
    }
    table.validate()?;

    let income = round_money(input.annual_income);
    let output = apply_slabs(income, table);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Progressive Slab Income Tax",
        &serde_json::json!({
            "assessment_year": table.assessment_year,
            "regime": table.regime,
            "slab_count": table.slabs.len(),
        }),
        Vec::new(),
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Slab walk
// ---------------------------------------------------------------------------

fn apply_slabs(income: Money, table: &TaxSlabTable) -> TaxOutput {
    let mut slabs: Vec<SlabTax> = Vec::new();
    let mut total_tax = Decimal::ZERO;

    for slab in &table.slabs {
        let reached = match slab.upper_bound {
            Some(upper) => income.min(upper),
            None => income,
        };
        let taxable = reached - slab.lower_bound;
        if taxable <= Decimal::ZERO {
            continue;
        }

        let tax_for_slab = round_money(taxable * slab.rate / dec!(100));
        total_tax += tax_for_slab;
        slabs.push(SlabTax {
            slab_label: slab.label(),
            taxable_income_in_slab: taxable,
            rate: slab.rate,
            tax_for_slab,
        });
    }

    // Income of zero reaches no bracket; report the first slab at zero so
    // callers always receive at least one row.
    if slabs.is_empty() {
        if let Some(first) = table.slabs.first() {
            slabs.push(SlabTax {
                slab_label: first.label(),
                taxable_income_in_slab: Decimal::ZERO,
                rate: first.rate,
                tax_for_slab: Decimal::ZERO,
            });
        }
    }

    TaxOutput {
        tax: total_tax,
        net_income: income - total_tax,
        slabs,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
