//! CTC salary decomposition.
//!
//! Splits an annual cost-to-company figure into take-home pay and statutory
//! deductions: employee provident fund, professional tax, and income tax on
//! the taxable remainder after the HRA exemption and standard deduction.
//! Statutory parameters live in [`SalaryConfig`] so a new fiscal year is a
//! config change, not a code change.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FinCalcError;
use crate::tax::income_tax::{calculate_income_tax_with_table, TaxInput};
use crate::tax::slabs::TaxSlabTable;
use crate::types::{round_money, with_metadata, ComputationOutput, Money, Rate};
use crate::FinCalcResult;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Professional-tax bracket: monthly gross up to `monthly_gross_up_to`
/// (None = no ceiling) owes `annual_amount` for the year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalTaxSlab {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_gross_up_to: Option<Money>,
    pub annual_amount: Money,
}

/// Statutory salary parameters for one fiscal year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryConfig {
    /// Employee provident fund contribution as a fraction of basic (0.12 = 12%).
    pub pf_rate: Rate,
    /// Annual basic-pay ceiling for the PF contribution; None = uncapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf_wage_ceiling: Option<Money>,
    /// Professional-tax brackets, ascending by monthly gross.
    pub professional_tax: Vec<ProfessionalTaxSlab>,
    /// HRA exemption cap as a fraction of basic (0.5 = half of basic).
    pub hra_exemption_cap: Rate,
    /// Standard deduction applied before income tax.
    pub standard_deduction: Money,
    /// Slab table used for the income-tax component.
    pub tax_table: TaxSlabTable,
}

impl SalaryConfig {
    /// FY 2025-26 defaults: 12% PF (uncapped), Karnataka professional tax,
    /// 50% HRA exemption cap, 75000 standard deduction, new-regime slabs.
    pub fn fy2025() -> Self {
        SalaryConfig {
            pf_rate: dec!(0.12),
            pf_wage_ceiling: None,
            professional_tax: vec![
                ProfessionalTaxSlab {
                    monthly_gross_up_to: Some(dec!(7500)),
                    annual_amount: dec!(0),
                },
                ProfessionalTaxSlab {
                    monthly_gross_up_to: Some(dec!(10000)),
                    annual_amount: dec!(2100),
                },
                ProfessionalTaxSlab {
                    monthly_gross_up_to: None,
                    annual_amount: dec!(2500),
                },
            ],
            hra_exemption_cap: dec!(0.5),
            standard_deduction: dec!(75000),
            tax_table: TaxSlabTable::fy2025_new_regime(),
        }
    }
}

impl Default for SalaryConfig {
    fn default() -> Self {
        Self::fy2025()
    }
}

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// Annual salary components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInput {
    pub basic_salary: Money,
    pub hra: Money,
    pub other_allowances: Money,
    /// Optional CTC echo; when present it must equal the component sum.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctc: Option<Money>,
}

/// One named component of the CTC split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownComponent {
    pub name: String,
    pub value: Money,
}

/// Salary computation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryOutput {
    /// Annual take-home pay: ctc minus deductions.
    pub net_salary: Money,
    /// Total statutory deductions: PF + professional tax + income tax.
    pub deductions: Money,
    /// Cost to company: sum of the input components.
    pub ctc: Money,
    pub basic: Money,
    pub hra: Money,
    pub other_allowances: Money,
    /// Employee provident fund contribution.
    pub pf: Money,
    pub professional_tax: Money,
    /// Income subject to slab tax after exemptions and deductions.
    pub taxable_income: Money,
    /// Income tax on the taxable income.
    pub tax: Money,
    /// Components partitioning the CTC exactly.
    pub breakdown: Vec<BreakdownComponent>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Decompose a salary under the bundled FY 2025-26 statutory parameters.
pub fn calculate_salary(input: &SalaryInput) -> FinCalcResult<ComputationOutput<SalaryOutput>> {
    calculate_salary_with_config(input, &SalaryConfig::fy2025())
}

/// Decompose a salary under an injected statutory configuration.
pub fn calculate_salary_with_config(
    input: &SalaryInput,
    config: &SalaryConfig,
) -> FinCalcResult<ComputationOutput<SalaryOutput>> {
    let start = Instant::now();
    validate_salary(input)?;

    let mut warnings: Vec<String> = Vec::new();

    let basic = round_money(input.basic_salary);
    let hra = round_money(input.hra);
    let other_allowances = round_money(input.other_allowances);
    let ctc = basic + hra + other_allowances;

    if ctc > Decimal::ZERO && basic / ctc < dec!(0.3) {
        warnings.push("Basic salary below 30% of CTC is unusual".to_string());
    }

    let pf_base = match config.pf_wage_ceiling {
        Some(ceiling) => basic.min(ceiling),
        None => basic,
    };
    let pf = round_money(pf_base * config.pf_rate);

    let professional_tax = professional_tax_for(ctc / dec!(12), config);

    let hra_exemption = hra.min(round_money(basic * config.hra_exemption_cap));
    let mut taxable_income = ctc - pf - hra_exemption - config.standard_deduction;
    if taxable_income < Decimal::ZERO {
        taxable_income = Decimal::ZERO;
    }

    let tax_result = calculate_income_tax_with_table(
        &TaxInput {
            annual_income: taxable_income,
            regime: config.tax_table.regime,
        },
        &config.tax_table,
    )?;
    let tax = tax_result.result.tax;

    let deductions = pf + professional_tax + tax;
    let net_salary = ctc - deductions;

    let breakdown = vec![
        BreakdownComponent {
            name: "Net Salary".to_string(),
            value: net_salary,
        },
        BreakdownComponent {
            name: "Provident Fund".to_string(),
            value: pf,
        },
        BreakdownComponent {
            name: "Professional Tax".to_string(),
            value: professional_tax,
        },
        BreakdownComponent {
            name: "Income Tax".to_string(),
            value: tax,
        },
    ];

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "CTC Decomposition (PF, professional tax, slab income tax)",
        &serde_json::json!({
            "pf_rate": config.pf_rate.to_string(),
            "hra_exemption_cap": config.hra_exemption_cap.to_string(),
            "standard_deduction": config.standard_deduction.to_string(),
            "assessment_year": config.tax_table.assessment_year,
            "regime": config.tax_table.regime,
        }),
        warnings,
        elapsed,
        SalaryOutput {
            net_salary,
            deductions,
            ctc,
            basic,
            hra,
            other_allowances,
            pf,
            professional_tax,
            taxable_income,
            tax,
            breakdown,
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Annual professional tax owed for a monthly gross, from the first bracket
/// the gross fits under.
fn professional_tax_for(monthly_gross: Money, config: &SalaryConfig) -> Money {
    for slab in &config.professional_tax {
        match slab.monthly_gross_up_to {
            Some(ceiling) if monthly_gross <= ceiling => return slab.annual_amount,
            Some(_) => continue,
            None => return slab.annual_amount,
        }
    }
    Decimal::ZERO
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_salary(input: &SalaryInput) -> FinCalcResult<()> {
    if input.basic_salary < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "basicSalary".into(),
            reason: "Basic salary cannot be negative".into(),
        });
    }
    if input.hra < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "hra".into(),
            reason: "HRA cannot be negative".into(),
        });
    }
    if input.other_allowances < Decimal::ZERO {
        return Err(FinCalcError::InvalidInput {
            field: "otherAllowances".into(),
            reason: "Other allowances cannot be negative".into(),
        });
    }
    if let Some(ctc) = input.ctc {
        let sum = input.basic_salary + input.hra + input.other_allowances;
        if round_money(ctc) != round_money(sum) {
            return Err(FinCalcError::InvalidInput {
                field: "ctc".into(),
                reason: "CTC must equal basicSalary + hra + otherAllowances".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
