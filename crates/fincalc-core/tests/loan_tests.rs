use fincalc_core::loan::amortization::{self, LoanInput, LoanType, Prepayment};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Reducing-balance EMI tests
// ===========================================================================

fn sample_loan_input() -> LoanInput {
    LoanInput {
        loan_amount: dec!(500000),
        interest_rate: dec!(8.5),
        tenure_months: 240,
        loan_type: LoanType::Reducing,
        prepayment: None,
    }
}

#[test]
fn test_home_loan_annuity_reference() {
    // Textbook annuity: 5L at 8.5% over 20 years
    // r = 8.5/1200, EMI = P*r*(1+r)^240 / ((1+r)^240 - 1) ~ 4339
    let result = amortization::calculate_emi(&sample_loan_input()).unwrap();
    let out = &result.result;

    assert!(
        (out.emi - dec!(4339.12)).abs() < dec!(0.01),
        "Expected EMI ~4339.12, got {}",
        out.emi
    );
    assert!(
        (out.total_interest - dec!(541386.34)).abs() < dec!(0.01),
        "Expected total interest ~541386.34, got {}",
        out.total_interest
    );
    assert_eq!(out.total_amount, out.total_interest + dec!(500000.00));
    assert_eq!(out.schedule.len(), 240);
}

#[test]
fn test_schedule_principal_sums_to_loan_amount() {
    let result = amortization::calculate_emi(&sample_loan_input()).unwrap();
    let principal_sum: Decimal = result
        .result
        .schedule
        .iter()
        .map(|e| e.principal_paid)
        .sum();
    assert_eq!(principal_sum, dec!(500000.00));
}

#[test]
fn test_schedule_payments_sum_to_total_amount() {
    let result = amortization::calculate_emi(&sample_loan_input()).unwrap();
    let out = &result.result;
    let paid: Decimal = out
        .schedule
        .iter()
        .map(|e| e.principal_paid + e.interest_paid)
        .sum();
    assert!(
        (paid - out.total_amount).abs() < dec!(0.01),
        "Schedule sum {} diverges from totalAmount {}",
        paid,
        out.total_amount
    );
}

#[test]
fn test_balance_monotone_and_terminal_zero() {
    let result = amortization::calculate_emi(&sample_loan_input()).unwrap();
    let schedule = &result.result.schedule;

    let mut previous = dec!(500000);
    for entry in schedule {
        assert!(
            entry.remaining_balance <= previous,
            "Balance rose in month {}",
            entry.month
        );
        previous = entry.remaining_balance;
    }
    assert_eq!(schedule.last().unwrap().remaining_balance, Decimal::ZERO);
}

#[test]
fn test_first_month_interest_dominates() {
    let result = amortization::calculate_emi(&sample_loan_input()).unwrap();
    let first = &result.result.schedule[0];
    // Month 1: interest = 500000 * 8.5/1200
    assert_eq!(first.interest_paid, dec!(3541.67));
    assert_eq!(first.principal_paid, dec!(797.45));
    assert!(first.interest_paid > first.principal_paid);
}

#[test]
fn test_zero_rate_equal_principal_installments() {
    let input = LoanInput {
        loan_amount: dec!(12000),
        interest_rate: Decimal::ZERO,
        tenure_months: 12,
        loan_type: LoanType::Reducing,
        prepayment: None,
    };
    let result = amortization::calculate_emi(&input).unwrap();
    let out = &result.result;
    assert_eq!(out.emi, dec!(1000.00));
    assert_eq!(out.total_interest, Decimal::ZERO);
    assert!(out.schedule.iter().all(|e| e.interest_paid.is_zero()));
}

// ===========================================================================
// Prepayment tests
// ===========================================================================

#[test]
fn test_prepayment_shortens_payoff() {
    let input = LoanInput {
        prepayment: Some(Prepayment {
            month: 60,
            amount: dec!(100000),
        }),
        ..sample_loan_input()
    };
    let result = amortization::calculate_emi(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.schedule.len(), 176);
    assert!(
        (out.total_interest - dec!(359572.09)).abs() < dec!(0.01),
        "Expected total interest ~359572.09, got {}",
        out.total_interest
    );

    // The lump sum lands in month 60 and the principal still fully amortises
    let month60 = &out.schedule[59];
    assert!(month60.principal_paid > dec!(100000));
    let principal_sum: Decimal = out.schedule.iter().map(|e| e.principal_paid).sum();
    assert_eq!(principal_sum, dec!(500000.00));
}

#[test]
fn test_prepayment_covering_balance_truncates() {
    let input = LoanInput {
        loan_amount: dec!(100000),
        interest_rate: dec!(10),
        tenure_months: 24,
        loan_type: LoanType::Reducing,
        prepayment: Some(Prepayment {
            month: 3,
            amount: dec!(500000),
        }),
    };
    let result = amortization::calculate_emi(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.schedule.len(), 3);
    assert_eq!(out.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
    assert!(result.warnings.iter().any(|w| w.contains("month 3")));
}

// ===========================================================================
// Flat-rate tests
// ===========================================================================

#[test]
fn test_flat_rate_constant_interest() {
    let input = LoanInput {
        loan_amount: dec!(100000),
        interest_rate: dec!(10),
        tenure_months: 12,
        loan_type: LoanType::Flat,
        prepayment: None,
    };
    let result = amortization::calculate_emi(&input).unwrap();
    let out = &result.result;

    // Total interest = 100000 * 10% * 1 year = 10000; EMI = 110000/12
    assert_eq!(out.emi, dec!(9166.67));
    assert!(out
        .schedule
        .iter()
        .all(|e| e.interest_paid == dec!(833.33)));
    let principal_sum: Decimal = out.schedule.iter().map(|e| e.principal_paid).sum();
    assert_eq!(principal_sum, dec!(100000.00));
}

#[test]
fn test_flat_rate_with_prepayment() {
    let input = LoanInput {
        loan_amount: dec!(120000),
        interest_rate: dec!(12),
        tenure_months: 24,
        loan_type: LoanType::Flat,
        prepayment: Some(Prepayment {
            month: 6,
            amount: dec!(60000),
        }),
    };
    let result = amortization::calculate_emi(&input).unwrap();
    let out = &result.result;

    assert_eq!(out.emi, dec!(6200.00));
    assert_eq!(out.schedule.len(), 12);
    let principal_sum: Decimal = out.schedule.iter().map(|e| e.principal_paid).sum();
    assert_eq!(principal_sum, dec!(120000.00));
}

// ===========================================================================
// Validation tests
// ===========================================================================

#[test]
fn test_non_positive_principal_rejected() {
    let mut input = sample_loan_input();
    input.loan_amount = Decimal::ZERO;
    assert!(amortization::calculate_emi(&input).is_err());
}

#[test]
fn test_zero_tenure_rejected() {
    let mut input = sample_loan_input();
    input.tenure_months = 0;
    assert!(amortization::calculate_emi(&input).is_err());
}

#[test]
fn test_prepayment_month_beyond_tenure_rejected() {
    let mut input = sample_loan_input();
    input.prepayment = Some(Prepayment {
        month: 241,
        amount: dec!(1000),
    });
    assert!(amortization::calculate_emi(&input).is_err());
}

// ===========================================================================
// JSON contract tests
// ===========================================================================

#[test]
fn test_request_and_response_shapes() {
    let request = r#"{
        "loanAmount": 500000,
        "interestRate": 8.5,
        "tenureMonths": 240,
        "loanType": "reducing",
        "prepayment": {"month": 60, "amount": 100000}
    }"#;
    let input: LoanInput = serde_json::from_str(request).unwrap();
    assert_eq!(input.loan_amount, dec!(500000));

    let result = amortization::calculate_emi(&input).unwrap();
    let body = serde_json::to_value(&result.result).unwrap();
    for key in ["emi", "totalInterest", "totalAmount", "schedule"] {
        assert!(body.get(key).is_some(), "missing key {key}");
    }
    let row = &body["schedule"][0];
    for key in ["month", "principalPaid", "interestPaid", "remainingBalance"] {
        assert!(row.get(key).is_some(), "missing schedule key {key}");
    }
}
