//! Life-cycle cash-flow projection.
//!
//! Projects cumulative savings across a span of ages: each year's net
//! cashflow (income minus expenses) joins the running savings pot, and the
//! combined balance compounds at the investment return rate. Negative net
//! years draw the pot down and may push it below zero; the projection does
//! not floor at depletion.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Returns above this rate trigger a warning.
const HIGH_RETURN_THRESHOLD: Decimal = dec!(20);

/// Projections past this age are rejected as input errors.
const MAX_AGE: u32 = 150;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Multi-year projection parameters. The income and expense sequences carry
/// one entry per year of age, ageStart through ageEnd inclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeCycleInput {
    pub age_start: u32,
    pub age_end: u32,
    pub annual_income: Vec<Money>,
    pub annual_expenses: Vec<Money>,
    /// Investment return in percentage points (5 = 5% per year).
    pub annual_investment_return: Percent,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One projected year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCashflow {
    /// Age reached in this projection year.
    pub year: u32,
    pub income: Money,
    pub expenses: Money,
    /// Income minus expenses for the year.
    pub net_cashflow: Money,
    /// Cumulative savings after this year's cashflow and compounding.
    pub savings: Money,
}

/// Projection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeCycleOutput {
    pub yearly_net_cashflow: Vec<YearCashflow>,
    /// Savings at the final age; equals the last entry's savings.
    pub total_savings: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project cumulative savings from ageStart to ageEnd.
///
/// Recurrence: savings[i] = (savings[i-1] + netCashflow[i]) * (1 + rate),
/// seeded with savings[-1] = 0, each year's value rounded before it carries
/// forward so the published series satisfies the recurrence exactly.
pub fn project_cashflow(
    input: &LifeCycleInput,
) -> FinCalcResult<ComputationOutput<LifeCycleOutput>> {
    let start = Instant::now();
    validate_lifecycle(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if input.annual_investment_return > HIGH_RETURN_THRESHOLD {
        warnings.push(format!(
            "Annual investment return of {}% may be unrealistic",
            input.annual_investment_return
        ));
    }
    if input.annual_investment_return < Decimal::ZERO {
        warnings.push("Negative investment return assumed; savings shrink each year".to_string());
    }

    let growth = Decimal::ONE + input.annual_investment_return / dec!(100);

    let mut savings = Decimal::ZERO;
    let mut yearly_net_cashflow = Vec::with_capacity(input.annual_income.len());
    for (offset, (income, expenses)) in input
        .annual_income
        .iter()
        .zip(&input.annual_expenses)
        .enumerate()
    {
        let income = round_money(*income);
        let expenses = round_money(*expenses);
        let net_cashflow = income - expenses;
        savings = round_money((savings + net_cashflow) * growth);
        yearly_net_cashflow.push(YearCashflow {
            year: input.age_start + offset as u32,
            income,
            expenses,
            net_cashflow,
            savings,
        });
    }
    let total_savings = savings;

    if total_savings < Decimal::ZERO {
        warnings.push(format!(
            "Projected savings are negative by age {}",
            input.age_end
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Compounded Cash-Flow Projection",
        &serde_json::json!({
            "age_span_years": input.annual_income.len(),
            "annual_investment_return_percent": input.annual_investment_return.to_string(),
        }),
        warnings,
        elapsed,
        LifeCycleOutput {
            yearly_net_cashflow,
            total_savings,
        },
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_lifecycle(input: &LifeCycleInput) -> FinCalcResult<()> {
    if input.age_end <= input.age_start {
        return Err(FinCalcError::InvalidInput {
            field: "ageEnd".into(),
            reason: "Ending age must be greater than starting age".into(),
        });
    }
    if input.age_end > MAX_AGE {
        return Err(FinCalcError::InvalidInput {
            field: "ageEnd".into(),
            reason: "Ending age above 150 is not supported".into(),
        });
    }
    let span = (input.age_end - input.age_start + 1) as usize;
    if input.annual_income.len() != span {
        return Err(FinCalcError::InvalidInput {
            field: "annualIncome".into(),
            reason: format!(
                "Expected {} yearly entries, got {}",
                span,
                input.annual_income.len()
            ),
        });
    }
    if input.annual_expenses.len() != span {
        return Err(FinCalcError::InvalidInput {
            field: "annualExpenses".into(),
            reason: format!(
                "Expected {} yearly entries, got {}",
                span,
                input.annual_expenses.len()
            ),
        });
    }
    if input.annual_income.iter().any(|v| *v < Decimal::ZERO) {
        return Err(FinCalcError::InvalidInput {
            field: "annualIncome".into(),
            reason: "Income entries cannot be negative".into(),
        });
    }
    if input.annual_expenses.iter().any(|v| *v < Decimal::ZERO) {
        return Err(FinCalcError::InvalidInput {
            field: "annualExpenses".into(),
            reason: "Expense entries cannot be negative".into(),
        });
    }
    if input.annual_investment_return < dec!(-100) {
        return Err(FinCalcError::InvalidInput {
            field: "annualInvestmentReturn".into(),
            reason: "Investment return below -100% is not supported".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
