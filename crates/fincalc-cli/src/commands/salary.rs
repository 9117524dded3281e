use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::salary::breakdown::{self, SalaryInput};

use crate::input;

/// Arguments for CTC salary breakdown
#[derive(Args)]
pub struct SalaryArgs {
    /// Annual basic salary
    #[arg(long, alias = "basic")]
    pub basic_salary: Option<Decimal>,

    /// Annual house rent allowance
    #[arg(long, default_value = "0")]
    pub hra: Decimal,

    /// Annual other allowances
    #[arg(long, alias = "other", default_value = "0")]
    pub other_allowances: Decimal,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_salary(args: SalaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let salary_input: SalaryInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SalaryInput {
            basic_salary: args
                .basic_salary
                .ok_or("--basic-salary is required (or provide --input)")?,
            hra: args.hra,
            other_allowances: args.other_allowances,
            ctc: None,
        }
    };

    let result = breakdown::calculate_salary(&salary_input)?;
    Ok(serde_json::to_value(result)?)
}
