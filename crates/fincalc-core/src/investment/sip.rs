//! Systematic investment plan future value.
//!
//! Monthly contributions at the start of each month (annuity-due), grown at
//! a fixed nominal annual rate compounded monthly.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

/// Return assumption above which a warning is attached.
const HIGH_RETURN_THRESHOLD: Decimal = dec!(30);

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// SIP parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInput {
    /// Contribution at the start of every month.
    pub monthly_investment: Money,
    /// Assumed annual return in percentage points (12 = 12%).
    pub annual_interest_rate: Percent,
    /// Investment horizon in whole years.
    pub years: u32,
}

/// SIP computation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipOutput {
    /// Total amount contributed.
    pub investment: Money,
    /// Growth earned: corpus minus contributions.
    pub returns: Money,
    /// Final value of the plan.
    pub corpus: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the future value of a monthly SIP.
pub fn calculate_sip(input: &SipInput) -> FinCalcResult<ComputationOutput<SipOutput>> {
    let start = Instant::now();
    validate_sip(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if input.annual_interest_rate > HIGH_RETURN_THRESHOLD {
        warnings.push(format!(
            "Assumed return of {}% per year is unusually optimistic",
            input.annual_interest_rate
        ));
    }

    let monthly_rate = input.annual_interest_rate / dec!(1200);
    let months = input.years * 12;
    let monthly = round_money(input.monthly_investment);

    // Contribution first, then one month of growth (annuity-due).
    let mut corpus = Decimal::ZERO;
    for _ in 0..months {
        corpus = (corpus + monthly) * (Decimal::ONE + monthly_rate);
    }

    let investment = monthly * Decimal::from(months);
    let corpus = round_money(corpus);
    let returns = corpus - investment;

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "SIP Future Value (annuity-due, monthly compounding)",
        &serde_json::json!({
            "monthly_rate": monthly_rate.to_string(),
            "months": months,
        }),
        warnings,
        elapsed,
        SipOutput {
            investment,
            returns,
            corpus,
        },
    ))
}

fn validate_sip(input: &SipInput) -> FinCalcResult<()> {
    if input.monthly_investment <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "monthlyInvestment".into(),
            reason: "Monthly investment must be positive".into(),
        });
    }
    if input.annual_interest_rate < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annualInterestRate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.years == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "years".into(),
            reason: "Horizon must be at least one year".into(),
        });
    }
    if input.years > 100 {
        return Err(FinCalcError::InvalidInput {
            field: "years".into(),
            reason: "Horizon above 100 years is not supported".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
