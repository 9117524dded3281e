use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::loan::amortization::{self, LoanInput, LoanType, Prepayment};

use crate::input;

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long, alias = "principal")]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 8.5)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan tenure in months
    #[arg(long, alias = "tenure")]
    pub tenure_months: Option<u32>,

    /// Interest convention: reducing or flat
    #[arg(long, default_value = "reducing")]
    pub loan_type: String,

    /// Month of a one-off prepayment (requires --prepayment-amount)
    #[arg(long)]
    pub prepayment_month: Option<u32>,

    /// Amount of the one-off prepayment
    #[arg(long)]
    pub prepayment_amount: Option<Decimal>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: LoanInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let loan_type = match args.loan_type.as_str() {
            "reducing" => LoanType::Reducing,
            "flat" => LoanType::Flat,
            other => {
                return Err(format!("Unknown loan type '{}' (expected reducing or flat)", other).into())
            }
        };
        let prepayment = match (args.prepayment_month, args.prepayment_amount) {
            (Some(month), Some(amount)) => Some(Prepayment { month, amount }),
            (None, None) => None,
            _ => {
                return Err(
                    "--prepayment-month and --prepayment-amount must be given together".into(),
                )
            }
        };
        LoanInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            interest_rate: args
                .interest_rate
                .ok_or("--interest-rate is required (or provide --input)")?,
            tenure_months: args
                .tenure_months
                .ok_or("--tenure-months is required (or provide --input)")?,
            loan_type,
            prepayment,
        }
    };

    let result = amortization::calculate_emi(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
