use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use folio::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for folio::AppCommand {
    fn from(cmd: Commands) -> folio::AppCommand {
        match cmd {
            Commands::Add {
                ticker,
                quantity,
                buy_price,
                buy_date,
            } => folio::AppCommand::Add {
                ticker,
                quantity,
                buy_price,
                buy_date,
            },
            Commands::Remove { ticker } => folio::AppCommand::Remove { ticker },
            Commands::View => folio::AppCommand::View,
            Commands::Cagr { tickers } => folio::AppCommand::Cagr { tickers },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Add a holding, replacing any existing one for the ticker
    Add {
        /// Ticker symbol, e.g. AAPL
        ticker: String,
        /// Number of shares
        quantity: u32,
        /// Price paid per share
        buy_price: f64,
        /// Purchase date (YYYY-MM-DD)
        buy_date: String,
    },
    /// Remove a holding
    Remove {
        /// Ticker symbol to remove
        ticker: String,
    },
    /// Display current holdings
    View,
    /// Display CAGR from live prices
    Cagr {
        /// Tickers to calculate; all holdings when omitted
        tickers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => folio::cli::setup::setup(),
        Some(cmd) => folio::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
