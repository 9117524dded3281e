use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::loan::amortization::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::loan::amortization::calculate_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deposit
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_fd(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::deposit::compound::DepositInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::deposit::compound::calculate_maturity(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::investment::sip::SipInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::investment::sip::calculate_sip(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

/// Tax request with an optional caller-supplied slab table.
#[derive(serde::Deserialize)]
struct TaxBindingInput {
    #[serde(flatten)]
    input: fincalc_core::tax::income_tax::TaxInput,
    table: Option<fincalc_core::tax::slabs::TaxSlabTable>,
}

#[napi]
pub fn calculate_tax(input_json: String) -> NapiResult<String> {
    let binding_input: TaxBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = match binding_input.table {
        Some(ref table) => fincalc_core::tax::income_tax::calculate_income_tax_with_table(
            &binding_input.input,
            table,
        )
        .map_err(to_napi_error)?,
        None => fincalc_core::tax::income_tax::calculate_income_tax(&binding_input.input)
            .map_err(to_napi_error)?,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Salary
// ---------------------------------------------------------------------------

/// Salary request with optional statutory configuration overrides.
#[derive(serde::Deserialize)]
struct SalaryBindingInput {
    #[serde(flatten)]
    input: fincalc_core::salary::breakdown::SalaryInput,
    config: Option<fincalc_core::salary::breakdown::SalaryConfig>,
}

#[napi]
pub fn calculate_salary(input_json: String) -> NapiResult<String> {
    let binding_input: SalaryBindingInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = match binding_input.config {
        Some(ref config) => fincalc_core::salary::breakdown::calculate_salary_with_config(
            &binding_input.input,
            config,
        )
        .map_err(to_napi_error)?,
        None => fincalc_core::salary::breakdown::calculate_salary(&binding_input.input)
            .map_err(to_napi_error)?,
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Life cycle
// ---------------------------------------------------------------------------

#[napi]
pub fn project_lifecycle(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::lifecycle::cashflow::LifeCycleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::lifecycle::cashflow::project_cashflow(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
