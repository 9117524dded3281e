use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::tax::income_tax::{self, TaxInput};
use fincalc_core::tax::slabs::Regime;

use crate::input;

/// Arguments for slab income-tax calculation
#[derive(Args)]
pub struct TaxArgs {
    /// Taxable annual income
    #[arg(long, alias = "income")]
    pub annual_income: Option<Decimal>,

    /// Tax regime: old or new
    #[arg(long, default_value = "new")]
    pub regime: String,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_tax(args: TaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: TaxInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let regime = match args.regime.as_str() {
            "old" => Regime::Old,
            "new" => Regime::New,
            other => return Err(format!("Unknown regime '{}' (expected old or new)", other).into()),
        };
        TaxInput {
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            regime,
        }
    };

    let result = income_tax::calculate_income_tax(&tax_input)?;
    Ok(serde_json::to_value(result)?)
}
