use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::deposit::compound::{self, DepositInput};

use crate::input;

/// Arguments for fixed-deposit maturity calculation
#[derive(Args)]
pub struct FdArgs {
    /// Amount deposited up front
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (e.g. 6.5)
    #[arg(long, alias = "rate")]
    pub annual_interest_rate: Option<Decimal>,

    /// Tenor in years; fractional values allowed (e.g. 1.5)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding periods per year (1 = annual, 4 = quarterly, 12 = monthly)
    #[arg(long, alias = "compounding", default_value = "4")]
    pub compounding_per_year: u32,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let deposit_input: DepositInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DepositInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            compounding_per_year: args.compounding_per_year,
        }
    };

    let result = compound::calculate_maturity(&deposit_input)?;
    Ok(serde_json::to_value(result)?)
}
