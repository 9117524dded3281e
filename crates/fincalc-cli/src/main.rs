mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::deposit::FdArgs;
use commands::investment::SipArgs;
use commands::lifecycle::LifecycleArgs;
use commands::loan::EmiArgs;
use commands::salary::SalaryArgs;
use commands::tax::TaxArgs;

/// Personal finance calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal finance calculations with decimal precision",
    long_about = "A CLI for personal finance calculations with decimal precision. \
                  Supports loan EMIs with amortisation schedules, fixed-deposit \
                  maturity, SIP projections, slab income tax, CTC salary breakdowns, \
                  and life-cycle savings projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate loan EMI and amortisation schedule
    Emi(EmiArgs),
    /// Calculate fixed-deposit maturity under periodic compounding
    Fd(FdArgs),
    /// Project the future value of a monthly SIP
    Sip(SipArgs),
    /// Compute progressive slab income tax
    Tax(TaxArgs),
    /// Break a CTC down into net pay and statutory deductions
    Salary(SalaryArgs),
    /// Project multi-year savings across a span of ages
    Lifecycle(LifecycleArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Fd(args) => commands::deposit::run_fd(args),
        Commands::Sip(args) => commands::investment::run_sip(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Salary(args) => commands::salary::run_salary(args),
        Commands::Lifecycle(args) => commands::lifecycle::run_lifecycle(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
