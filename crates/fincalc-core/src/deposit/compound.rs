//! Fixed-deposit compound interest.
//!
//! Computes maturity value for a lump-sum deposit compounded at a fixed
//! frequency, the month-by-month growth series used for charting, the
//! effective annual yield, and the largest single-period interest credit.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Tenor above which a warning is attached.
const LONG_TENOR_YEARS: Decimal = dec!(50);

/// Compounding frequency above daily is almost certainly a unit mistake.
const MAX_COMPOUNDING_PER_YEAR: u32 = 366;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Fixed-deposit parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositInput {
    /// Amount deposited up front.
    pub principal: Money,
    /// Nominal annual interest rate in percentage points (6.5 = 6.5%).
    pub annual_interest_rate: Percent,
    /// Tenor in years; fractional values are allowed (1.5 = 18 months).
    pub years: Decimal,
    /// Compounding periods per year (1 = annual, 4 = quarterly, 12 = monthly).
    pub compounding_per_year: u32,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One month of deposit growth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthDetail {
    /// 1-based month number.
    pub month: u32,
    /// Principal held (constant for a lump-sum deposit).
    pub principal_accumulated: Money,
    /// Interest accrued from inception to the end of this month.
    pub interest_accumulated: Money,
}

/// Fixed-deposit computation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositOutput {
    /// Value at maturity.
    pub maturity_amount: Money,
    /// Total interest earned: maturity minus principal.
    pub total_interest: Money,
    /// Largest interest credit in any single compounding period,
    /// including a trailing partial period.
    pub max_interest_per_period: Money,
    /// Effective annual yield in percentage points, after compounding.
    pub effective_annual_yield: Percent,
    /// Month-by-month growth series for charting.
    pub growth_details: Vec<GrowthDetail>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Calculate the maturity value and growth profile of a fixed deposit.
pub fn calculate_maturity(
    input: &DepositInput,
) -> FinCalcResult<ComputationOutput<DepositOutput>> {
    let start = Instant::now();
    validate_deposit(input)?;

    let mut warnings: Vec<String> = Vec::new();
    if input.years > LONG_TENOR_YEARS {
        warnings.push(format!("Tenor of {} years is unusually long", input.years));
    }

    let principal = round_money(input.principal);
    let freq = Decimal::from(input.compounding_per_year);
    let periodic_rate = input.annual_interest_rate / (dec!(100) * freq);
    let total_periods = freq * input.years;

    let maturity_amount = round_money(principal * growth_factor(periodic_rate, total_periods));
    let total_interest = maturity_amount - principal;

    // Effective annual yield: one year of compounding at the periodic rate.
    let effective_annual_yield = round_money(
        (compound(periodic_rate, input.compounding_per_year) - Decimal::ONE) * dec!(100),
    );

    let growth_details = build_growth_series(principal, periodic_rate, freq, input.years);
    let max_interest_per_period =
        round_money(max_period_interest(principal, periodic_rate, total_periods));

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Discrete Compound Interest",
        &serde_json::json!({
            "periodic_rate": periodic_rate.to_string(),
            "compounding_per_year": input.compounding_per_year,
            "total_periods": total_periods.to_string(),
        }),
        warnings,
        elapsed,
        DepositOutput {
            maturity_amount,
            total_interest,
            max_interest_per_period,
            effective_annual_yield,
            growth_details,
        },
    ))
}

// ---------------------------------------------------------------------------
// Growth series
// ---------------------------------------------------------------------------

/// One entry per month of the tenor. Growth within a compounding period is
/// interpolated at the same periodic rate, so chart points between credits
/// sit on the smooth curve P * (1+i)^(freq * m / 12).
fn build_growth_series(
    principal: Money,
    periodic_rate: Rate,
    freq: Decimal,
    years: Decimal,
) -> Vec<GrowthDetail> {
    let months = decimal_to_u32(years * dec!(12));
    let mut series = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let periods_elapsed = freq * Decimal::from(month) / dec!(12);
        let value = principal * growth_factor(periodic_rate, periods_elapsed);
        series.push(GrowthDetail {
            month,
            principal_accumulated: principal,
            interest_accumulated: round_money(value - principal),
        });
    }

    series
}

/// Largest interest credit over the compounding periods, walking each full
/// period and then the trailing partial period if the tenor is fractional.
fn max_period_interest(principal: Money, periodic_rate: Rate, total_periods: Decimal) -> Money {
    let full_periods = decimal_to_u32(total_periods.floor());
    let mut max_gain = Decimal::ZERO;
    let mut prev = principal;
    let mut value = principal;

    for _ in 0..full_periods {
        value *= Decimal::ONE + periodic_rate;
        let gain = value - prev;
        if gain > max_gain {
            max_gain = gain;
        }
        prev = value;
    }

    if total_periods.fract() > Decimal::ZERO {
        let final_value = principal * growth_factor(periodic_rate, total_periods);
        let gain = final_value - prev;
        if gain > max_gain {
            max_gain = gain;
        }
    }

    max_gain
}

// ---------------------------------------------------------------------------
// Math helpers
// ---------------------------------------------------------------------------

/// (1 + i)^periods: iterative multiplication for whole periods (avoids
/// Decimal::powd drift), powd for fractional exponents.
fn growth_factor(periodic_rate: Rate, periods: Decimal) -> Decimal {
    if periods.fract().is_zero() {
        compound(periodic_rate, decimal_to_u32(periods))
    } else {
        (Decimal::ONE + periodic_rate).powd(periods)
    }
}

/// Compute (1 + r)^n via iterative multiplication.
fn compound(rate: Rate, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Convert a Decimal to u32 by rounding.
fn decimal_to_u32(d: Decimal) -> u32 {
    let rounded = d.round();
    if rounded < Decimal::ZERO {
        0
    } else {
        rounded.to_string().parse::<u32>().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_deposit(input: &DepositInput) -> FinCalcResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if input.annual_interest_rate < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "annualInterestRate".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.years <= Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "years".into(),
            reason: "Tenor must be positive".into(),
        });
    }
    if input.years > dec!(100) {
        return Err(FinCalcError::InvalidInput {
            field: "years".into(),
            reason: "Tenor above 100 years is not supported".into(),
        });
    }
    if input.compounding_per_year == 0 {
        return Err(FinCalcError::InvalidInput {
            field: "compoundingPerYear".into(),
            reason: "Compounding frequency must be at least once per year".into(),
        });
    }
    if input.compounding_per_year > MAX_COMPOUNDING_PER_YEAR {
        return Err(FinCalcError::InvalidInput {
            field: "compoundingPerYear".into(),
            reason: "Compounding frequency above daily is not supported".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.02);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    fn standard_deposit_input() -> DepositInput {
        DepositInput {
            principal: dec!(100000),
            annual_interest_rate: dec!(6.5),
            years: dec!(1),
            compounding_per_year: 4,
        }
    }

    fn run(input: &DepositInput) -> DepositOutput {
        calculate_maturity(input).unwrap().result
    }

    // -----------------------------------------------------------------------
    // 1. Quarterly compounding reference value
    // -----------------------------------------------------------------------
    #[test]
    fn test_quarterly_maturity() {
        let out = run(&standard_deposit_input());
        // 100000 * (1 + 0.065/4)^4
        assert_eq!(out.maturity_amount, dec!(106660.16));
        assert_eq!(out.total_interest, dec!(6660.16));
    }

    // -----------------------------------------------------------------------
    // 2. Effective annual yield exceeds the nominal rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_effective_annual_yield() {
        let out = run(&standard_deposit_input());
        assert_eq!(out.effective_annual_yield, dec!(6.66));
        assert!(out.effective_annual_yield > dec!(6.5));
    }

    // -----------------------------------------------------------------------
    // 3. Growth series: one entry per month, ending at maturity
    // -----------------------------------------------------------------------
    #[test]
    fn test_growth_series_shape() {
        let out = run(&standard_deposit_input());
        assert_eq!(out.growth_details.len(), 12);
        let last = out.growth_details.last().unwrap();
        assert_eq!(last.month, 12);
        assert_eq!(last.principal_accumulated, dec!(100000.00));
        assert_close(
            last.interest_accumulated,
            out.total_interest,
            TOL,
            "final month interest",
        );
    }

    // -----------------------------------------------------------------------
    // 4. Growth series values sit on the compound curve
    // -----------------------------------------------------------------------
    #[test]
    fn test_growth_series_values() {
        let out = run(&standard_deposit_input());
        assert_close(
            out.growth_details[0].interest_accumulated,
            dec!(538.76),
            TOL,
            "month 1",
        );
        // Month 3 is a full quarter: exactly one periodic credit.
        assert_eq!(out.growth_details[2].interest_accumulated, dec!(1625.00));
        assert_close(
            out.growth_details[5].interest_accumulated,
            dec!(3276.41),
            TOL,
            "month 6",
        );
    }

    // -----------------------------------------------------------------------
    // 5. Interest accumulation is monotone
    // -----------------------------------------------------------------------
    #[test]
    fn test_growth_series_monotone() {
        let out = run(&standard_deposit_input());
        let mut prev = Decimal::ZERO;
        for detail in &out.growth_details {
            assert!(
                detail.interest_accumulated >= prev,
                "interest fell at month {}",
                detail.month
            );
            prev = detail.interest_accumulated;
        }
    }

    // -----------------------------------------------------------------------
    // 6. Max interest per period is the final full period when rate > 0
    // -----------------------------------------------------------------------
    #[test]
    fn test_max_interest_per_period() {
        let out = run(&standard_deposit_input());
        // Q4 credit on the largest running balance
        assert_eq!(out.max_interest_per_period, dec!(1705.51));
    }

    // -----------------------------------------------------------------------
    // 7. Fractional tenor: 2.5 years, semi-annual
    // -----------------------------------------------------------------------
    #[test]
    fn test_fractional_years() {
        let input = DepositInput {
            principal: dec!(100000),
            annual_interest_rate: dec!(8),
            years: dec!(2.5),
            compounding_per_year: 2,
        };
        let out = run(&input);
        // 5 whole half-year periods at 4%
        assert_eq!(out.maturity_amount, dec!(121665.29));
        assert_eq!(out.growth_details.len(), 30);
    }

    // -----------------------------------------------------------------------
    // 8. Trailing partial period earns less than a full one
    // -----------------------------------------------------------------------
    #[test]
    fn test_partial_final_period() {
        let input = DepositInput {
            principal: dec!(100000),
            annual_interest_rate: dec!(8),
            years: dec!(1.375),
            compounding_per_year: 1,
        };
        let out = run(&input);
        assert_close(out.maturity_amount, dec!(111162.34), dec!(0.05), "maturity");
        // Year 1 credit (8000) beats the 0.375-year tail
        assert_close(
            out.max_interest_per_period,
            dec!(8000.00),
            TOL,
            "max period interest",
        );
    }

    // -----------------------------------------------------------------------
    // 9. Zero rate: maturity equals principal
    // -----------------------------------------------------------------------
    #[test]
    fn test_zero_rate() {
        let input = DepositInput {
            annual_interest_rate: Decimal::ZERO,
            ..standard_deposit_input()
        };
        let out = run(&input);
        assert_eq!(out.maturity_amount, dec!(100000.00));
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.effective_annual_yield, Decimal::ZERO);
        assert_eq!(out.max_interest_per_period, Decimal::ZERO);
    }

    // -----------------------------------------------------------------------
    // 10. Maturity grows with tenor and with rate
    // -----------------------------------------------------------------------
    #[test]
    fn test_maturity_monotone_in_years_and_rate() {
        let base = run(&standard_deposit_input());
        let longer = run(&DepositInput {
            years: dec!(2),
            ..standard_deposit_input()
        });
        let richer = run(&DepositInput {
            annual_interest_rate: dec!(7.5),
            ..standard_deposit_input()
        });
        assert!(longer.maturity_amount > base.maturity_amount);
        assert!(richer.maturity_amount > base.maturity_amount);
    }

    // -----------------------------------------------------------------------
    // 11. Validation failures
    // -----------------------------------------------------------------------
    #[test]
    fn test_rejects_non_positive_principal() {
        let input = DepositInput {
            principal: Decimal::ZERO,
            ..standard_deposit_input()
        };
        let err = calculate_maturity(&input).unwrap_err();
        assert!(matches!(
            err,
            FinCalcError::InvalidInput { ref field, .. } if field == "principal"
        ));
    }

    #[test]
    fn test_rejects_zero_compounding() {
        let input = DepositInput {
            compounding_per_year: 0,
            ..standard_deposit_input()
        };
        assert!(calculate_maturity(&input).is_err());
    }

    #[test]
    fn test_rejects_non_positive_years() {
        let input = DepositInput {
            years: Decimal::ZERO,
            ..standard_deposit_input()
        };
        assert!(calculate_maturity(&input).is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let input = DepositInput {
            annual_interest_rate: dec!(-0.5),
            ..standard_deposit_input()
        };
        assert!(calculate_maturity(&input).is_err());
    }

    // -----------------------------------------------------------------------
    // 12. Input JSON contract
    // -----------------------------------------------------------------------
    #[test]
    fn test_input_json_contract() {
        let json = r#"{
            "principal": 100000,
            "annualInterestRate": 6.5,
            "years": 1,
            "compoundingPerYear": 4
        }"#;
        let input: DepositInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.compounding_per_year, 4);
        assert_eq!(input.years, dec!(1));
    }
}
