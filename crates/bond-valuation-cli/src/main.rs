mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::bond::BondArgs;

/// Fixed-coupon bond valuation and yield analysis
#[derive(Parser)]
#[command(
    name = "bondval",
    version,
    about = "Fixed-coupon bond valuation and yield analysis",
    long_about = "Values a fixed-coupon bond from its principal, coupon rate, issue and \
                  maturity dates, market discount rate and payment frequency. Prints the \
                  remaining cash-flow schedule with present values, the bond's total value, \
                  and current yield / approximate yield to maturity at a market price."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cash-flow schedule, present values and total bond value
    Value(BondArgs),
    /// Current yield and approximate yield to maturity at a market price
    Yields(BondArgs),
    /// Valuation plus yields (when a price is given)
    Analyse(BondArgs),
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

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("bond_valuation_core=debug,bondval=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Value(args) => commands::bond::run_value(args),
        Commands::Yields(args) => commands::bond::run_yields(args),
        Commands::Analyse(args) => commands::bond::run_analyse(args),
        Commands::Version => {
            println!("bondval {}", env!("CARGO_PKG_VERSION"));
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
