use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::lifecycle::cashflow::{self, LifeCycleInput};

use crate::input;

/// Arguments for life-cycle savings projection.
///
/// Flags take one income and one expense figure applied to every year of
/// the span; year-by-year sequences need an --input file.
#[derive(Args)]
pub struct LifecycleArgs {
    /// Starting age
    #[arg(long)]
    pub age_start: Option<u32>,

    /// Ending age (inclusive)
    #[arg(long)]
    pub age_end: Option<u32>,

    /// Annual income applied to every year of the span
    #[arg(long, alias = "income")]
    pub annual_income: Option<Decimal>,

    /// Annual expenses applied to every year of the span
    #[arg(long, alias = "expenses")]
    pub annual_expenses: Option<Decimal>,

    /// Annual investment return in percent
    #[arg(long, alias = "return")]
    pub annual_investment_return: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_lifecycle(args: LifecycleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lifecycle_input: LifeCycleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let age_start = args
            .age_start
            .ok_or("--age-start is required (or provide --input)")?;
        let age_end = args
            .age_end
            .ok_or("--age-end is required (or provide --input)")?;
        if age_end <= age_start {
            return Err("--age-end must be greater than --age-start".into());
        }
        let span = (age_end - age_start + 1) as usize;
        let income = args
            .annual_income
            .ok_or("--annual-income is required (or provide --input)")?;
        let expenses = args
            .annual_expenses
            .ok_or("--annual-expenses is required (or provide --input)")?;
        LifeCycleInput {
            age_start,
            age_end,
            annual_income: vec![income; span],
            annual_expenses: vec![expenses; span],
            annual_investment_return: args.annual_investment_return.unwrap_or(dec!(5)),
        }
    };

    let result = cashflow::project_cashflow(&lifecycle_input)?;
    Ok(serde_json::to_value(result)?)
}
