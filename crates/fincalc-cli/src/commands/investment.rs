use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::investment::sip::{self, SipInput};

use crate::input;

/// Arguments for SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Contribution at the start of every month
    #[arg(long, alias = "monthly")]
    pub monthly_investment: Option<Decimal>,

    /// Assumed annual return in percent (e.g. 12)
    #[arg(long, alias = "rate")]
    pub annual_interest_rate: Option<Decimal>,

    /// Investment horizon in whole years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to a JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SipInput {
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_interest_rate: args
                .annual_interest_rate
                .ok_or("--annual-interest-rate is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        }
    };

    let result = sip::calculate_sip(&sip_input)?;
    Ok(serde_json::to_value(result)?)
}
