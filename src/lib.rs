pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::holding::{Holding, normalize_ticker};
use anyhow::Result;
use tracing::{debug, info};

/// Operations on the portfolio file, as requested from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Add {
        ticker: String,
        quantity: u32,
        buy_price: f64,
        buy_date: String,
    },
    Remove {
        ticker: String,
    },
    View,
    /// CAGR for the given tickers, or for every holding when empty.
    Cagr {
        tickers: Vec<String>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("folio starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let portfolio_path = config.portfolio_path()?;
    let mut portfolio = store::disk::load_portfolio(&portfolio_path)?;

    match command {
        AppCommand::Add {
            ticker,
            quantity,
            buy_price,
            buy_date,
        } => {
            let holding = Holding::new(&ticker, quantity, buy_price, &buy_date)?;
            let message = cli::holdings::add(&mut portfolio, holding);
            store::disk::save_portfolio(&portfolio, &portfolio_path)?;
            println!("{message}");
        }
        AppCommand::Remove { ticker } => {
            let (message, changed) = cli::holdings::remove(&mut portfolio, &ticker);
            if changed {
                store::disk::save_portfolio(&portfolio, &portfolio_path)?;
            }
            println!("{message}");
        }
        AppCommand::View => {
            println!("{}", cli::holdings::display_as_table(&portfolio));
        }
        AppCommand::Cagr { tickers } => {
            let tickers: Vec<String> = if tickers.is_empty() {
                portfolio.tickers()
            } else {
                tickers.iter().map(|t| normalize_ticker(t)).collect()
            };
            if tickers.is_empty() {
                println!("No holdings found to calculate CAGR for.");
                return Ok(());
            }

            let chain = providers::build_chain(&config)?;
            let results = cli::returns::calculate_returns(&portfolio, &chain, &tickers).await;
            println!("{}", cli::returns::display_as_table(&results));
        }
    }

    Ok(())
}
