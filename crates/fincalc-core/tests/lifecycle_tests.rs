use fincalc_core::lifecycle::cashflow::{self, LifeCycleInput};
use fincalc_core::round_money;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Projection tests
// ===========================================================================

fn working_life_input() -> LifeCycleInput {
    // 25 to 65, constant 5L income and 3L expenses, 5% return
    let span = 41;
    LifeCycleInput {
        age_start: 25,
        age_end: 65,
        annual_income: vec![dec!(500000); span],
        annual_expenses: vec![dec!(300000); span],
        annual_investment_return: dec!(5),
    }
}

#[test]
fn test_two_year_seed_and_compounding() {
    let input = LifeCycleInput {
        age_start: 25,
        age_end: 26,
        annual_income: vec![dec!(500000), dec!(500000)],
        annual_expenses: vec![dec!(300000), dec!(300000)],
        annual_investment_return: dec!(5),
    };
    let out = cashflow::project_cashflow(&input).unwrap().result;

    // Seed: 200000 * 1.05; then (210000 + 200000) * 1.05
    assert_eq!(out.yearly_net_cashflow[0].savings, dec!(210000.00));
    assert_eq!(out.yearly_net_cashflow[1].savings, dec!(430500.00));
    assert_eq!(out.total_savings, dec!(430500.00));
}

#[test]
fn test_working_life_projection_shape() {
    let out = cashflow::project_cashflow(&working_life_input())
        .unwrap()
        .result;

    assert_eq!(out.yearly_net_cashflow.len(), 41);
    assert_eq!(out.yearly_net_cashflow[0].year, 25);
    assert_eq!(out.yearly_net_cashflow.last().unwrap().year, 65);
    assert_eq!(
        out.total_savings,
        out.yearly_net_cashflow.last().unwrap().savings
    );
    // Constant positive net cashflow compounds monotonically
    let mut previous = Decimal::ZERO;
    for year in &out.yearly_net_cashflow {
        assert_eq!(year.net_cashflow, dec!(200000.00));
        assert!(year.savings > previous);
        previous = year.savings;
    }
}

#[test]
fn test_recurrence_holds_across_span() {
    let out = cashflow::project_cashflow(&working_life_input())
        .unwrap()
        .result;
    let growth = dec!(1.05);
    let mut previous = Decimal::ZERO;
    for year in &out.yearly_net_cashflow {
        let expected = round_money((previous + year.net_cashflow) * growth);
        assert_eq!(year.savings, expected, "recurrence broken at age {}", year.year);
        previous = year.savings;
    }
}

#[test]
fn test_drawdown_years_can_go_negative() {
    let input = LifeCycleInput {
        age_start: 60,
        age_end: 62,
        annual_income: vec![dec!(100000), Decimal::ZERO, Decimal::ZERO],
        annual_expenses: vec![dec!(300000), dec!(300000), dec!(300000)],
        annual_investment_return: dec!(4),
    };
    let result = cashflow::project_cashflow(&input).unwrap();
    let out = &result.result;

    assert!(out.total_savings < Decimal::ZERO);
    assert!(result.warnings.iter().any(|w| w.contains("negative")));
    // Still satisfies the recurrence
    assert_eq!(out.yearly_net_cashflow[0].savings, dec!(-208000.00));
}

// ===========================================================================
// Validation tests
// ===========================================================================

#[test]
fn test_age_window_must_be_forward() {
    let mut input = working_life_input();
    input.age_end = 25;
    input.annual_income = vec![dec!(500000)];
    input.annual_expenses = vec![dec!(300000)];
    assert!(cashflow::project_cashflow(&input).is_err());
}

#[test]
fn test_series_lengths_must_match_span() {
    let mut input = working_life_input();
    input.annual_income.pop();
    assert!(cashflow::project_cashflow(&input).is_err());

    let mut input = working_life_input();
    input.annual_expenses.push(dec!(300000));
    assert!(cashflow::project_cashflow(&input).is_err());
}

#[test]
fn test_negative_entries_rejected() {
    let mut input = working_life_input();
    input.annual_expenses[3] = dec!(-5);
    assert!(cashflow::project_cashflow(&input).is_err());
}

// ===========================================================================
// JSON contract tests
// ===========================================================================

#[test]
fn test_request_and_response_shapes() {
    let request = r#"{
        "ageStart": 25,
        "ageEnd": 27,
        "annualIncome": [500000, 520000, 540000],
        "annualExpenses": [300000, 310000, 320000],
        "annualInvestmentReturn": 5
    }"#;
    let input: LifeCycleInput = serde_json::from_str(request).unwrap();
    let result = cashflow::project_cashflow(&input).unwrap();
    let body = serde_json::to_value(&result.result).unwrap();

    assert!(body.get("totalSavings").is_some());
    let rows = body["yearlyNetCashflow"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    for key in ["year", "income", "expenses", "netCashflow", "savings"] {
        assert!(rows[0].get(key).is_some(), "missing key {key}");
    }
}
