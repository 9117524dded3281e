//! Loan EMI and amortisation schedules.
//!
//! Supports reducing-balance (level-pay annuity) and flat-rate loans with an
//! optional one-off prepayment. Produces the full month-by-month schedule.
//! All math in `rust_decimal::Decimal`.

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

/// Annual rate above which a warning is attached (40% = distressed lending).
const HIGH_RATE_THRESHOLD: Decimal = dec!(40);

/// Tenure above which a warning is attached (40 years).
const LONG_TENURE_MONTHS: u32 = 480;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Interest convention for the loan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    /// Interest accrues on the outstanding balance (standard annuity EMI).
    #[default]
    Reducing,
    /// Interest is charged on the original principal for the whole tenure.
    Flat,
}

/// A one-off lump-sum prepayment, applied after the scheduled installment
/// of the given month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prepayment {
    /// 1-based month in which the prepayment is made.
    pub month: u32,
    /// Prepayment amount; capped at the outstanding balance.
    pub amount: Money,
}

/// Loan parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanInput {
    /// Principal borrowed.
    pub loan_amount: Money,
    /// Annual interest rate in percentage points (8.5 = 8.5%).
    pub interest_rate: Percent,
    /// Loan tenure in months.
    pub tenure_months: u32,
    /// Interest convention. Defaults to reducing balance.
    #[serde(default)]
    pub loan_type: LoanType,
    /// Optional one-off prepayment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepayment: Option<Prepayment>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of the amortisation schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// 1-based month number.
    pub month: u32,
    /// Principal repaid this month, including any prepayment.
    pub principal_paid: Money,
    /// Interest charged this month.
    pub interest_paid: Money,
    /// Outstanding balance after this month's payments.
    pub remaining_balance: Money,
}

/// EMI computation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOutput {
    /// Equated monthly installment.
    pub emi: Money,
    /// Total interest paid over the life of the loan (schedule sum).
    pub total_interest: Money,
    /// Total amount paid: principal plus interest.
    pub total_amount: Money,
    /// Month-by-month schedule; truncated early if a prepayment clears
    /// the loan before the end of the tenure.
    pub schedule: Vec<ScheduleEntry>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the EMI and the full amortisation schedule for a loan.
pub fn calculate_emi(input: &LoanInput) -> FinCalcResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();
    validate_loan(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if input.interest_rate > HIGH_RATE_THRESHOLD {
        warnings.push(format!(
            "Interest rate {}% is unusually high; verify the quote is annual",
            input.interest_rate
        ));
    }
    if input.tenure_months > LONG_TENURE_MONTHS {
        warnings.push(format!(
            "Tenure of {} months exceeds 40 years",
            input.tenure_months
        ));
    }

    let (output, methodology) = match input.loan_type {
        LoanType::Reducing => (
            compute_reducing(input, &mut warnings),
            "Reducing-Balance Amortisation",
        ),
        LoanType::Flat => (compute_flat(input, &mut warnings), "Flat-Rate Amortisation"),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, input, warnings, elapsed, output))
}

// ---------------------------------------------------------------------------
// Reducing balance
// ---------------------------------------------------------------------------

fn compute_reducing(input: &LoanInput, warnings: &mut Vec<String>) -> LoanOutput {
    let n = input.tenure_months;
    let monthly_rate = input.interest_rate / dec!(1200);
    let principal_total = round_money(input.loan_amount);

    // Level payment: P * r * (1+r)^n / ((1+r)^n - 1); P/n when r = 0.
    let emi_exact = if monthly_rate.is_zero() {
        principal_total / Decimal::from(n)
    } else {
        let factor = compound(monthly_rate, n);
        principal_total * monthly_rate * factor / (factor - Decimal::ONE)
    };
    let emi = round_money(emi_exact);

    let schedule = build_schedule(
        principal_total,
        emi,
        n,
        |balance| round_money(balance * monthly_rate),
        input.prepayment.as_ref(),
        warnings,
    );

    summarize(emi, schedule)
}

// ---------------------------------------------------------------------------
// Flat rate
// ---------------------------------------------------------------------------

fn compute_flat(input: &LoanInput, warnings: &mut Vec<String>) -> LoanOutput {
    let n = input.tenure_months;
    let principal_total = round_money(input.loan_amount);
    let years = Decimal::from(n) / dec!(12);

    // Interest on the original principal for the whole tenure, spread evenly.
    let flat_interest = round_money(principal_total * input.interest_rate / dec!(100) * years);
    let emi = round_money((principal_total + flat_interest) / Decimal::from(n));
    let monthly_interest = round_money(flat_interest / Decimal::from(n));

    let schedule = build_schedule(
        principal_total,
        emi,
        n,
        |_| monthly_interest,
        input.prepayment.as_ref(),
        warnings,
    );

    summarize(emi, schedule)
}

// ---------------------------------------------------------------------------
// Schedule construction
// ---------------------------------------------------------------------------

/// Build the month-by-month schedule. `interest_for` yields the interest
/// charge for the current balance; the principal portion is the EMI
/// remainder, clamped so the balance never goes negative and the final
/// month always clears it. A prepayment is applied after the scheduled
/// installment of its month and the schedule stops once the balance is zero.
fn build_schedule(
    principal_total: Money,
    emi: Money,
    tenure_months: u32,
    interest_for: impl Fn(Money) -> Money,
    prepayment: Option<&Prepayment>,
    warnings: &mut Vec<String>,
) -> Vec<ScheduleEntry> {
    let mut schedule = Vec::with_capacity(tenure_months as usize);
    let mut balance = principal_total;

    for month in 1..=tenure_months {
        let interest = interest_for(balance);
        let mut principal = emi - interest;
        if principal < Decimal::ZERO {
            principal = Decimal::ZERO;
        }
        if month == tenure_months || principal > balance {
            principal = balance;
        }
        balance -= principal;
        let mut principal_paid = principal;

        if let Some(p) = prepayment {
            if p.month == month && balance > Decimal::ZERO {
                let applied = p.amount.min(balance);
                balance -= applied;
                principal_paid += applied;
                if balance.is_zero() && month < tenure_months {
                    warnings.push(format!(
                        "Prepayment in month {} repays the loan in full; schedule truncated",
                        month
                    ));
                }
            }
        }

        schedule.push(ScheduleEntry {
            month,
            principal_paid,
            interest_paid: interest,
            remaining_balance: balance,
        });

        if balance.is_zero() {
            break;
        }
    }

    schedule
}

fn summarize(emi: Money, schedule: Vec<ScheduleEntry>) -> LoanOutput {
    let total_interest: Decimal = schedule.iter().map(|e| e.interest_paid).sum();
    let total_principal: Decimal = schedule.iter().map(|e| e.principal_paid).sum();

    LoanOutput {
        emi,
        total_interest,
        total_amount: total_principal + total_interest,
        schedule,
    }
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_loan(input: &LoanInput) -> FinCalcResult<()> {
    if input.loan_amount <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "loanAmount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if input.tenure_months == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "tenureMonths".into(),
            reason: "Tenure must be at least one month".into(),
        });
    }
    if input.tenure_months > 1200 {
        return Err(FinCalcError::InvalidInput {
            field: "tenureMonths".into(),
            reason: "Tenure above 100 years is not supported".into(),
        });
    }
    if input.interest_rate < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "interestRate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if let Some(p) = &input.prepayment {
        if p.month == 0 || p.month > input.tenure_months {
            return Err(FinCalcError::InvalidInput {
                field: "prepayment.month".into(),
                reason: "Prepayment month must fall within the loan tenure".into(),
            });
        }
        if p.amount <= Decimal::ZERO {
            return Err(FinCalcError::InvalidInput {
                field: "prepayment.amount".into(),
                reason: "Prepayment amount must be positive".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
