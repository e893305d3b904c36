use crate::core::duration::parse_buy_date;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// A recorded purchase of a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    #[serde(skip)]
    pub ticker: String,
    pub quantity: u32,
    pub buy_price: f64,
    pub buy_date: String,
}

impl Holding {
    /// Builds a holding from user input, rejecting values that cannot yield a
    /// meaningful return.
    pub fn new(ticker: &str, quantity: u32, buy_price: f64, buy_date: &str) -> Result<Self> {
        let ticker = normalize_ticker(ticker);
        if ticker.is_empty() {
            bail!("Ticker symbol must not be empty");
        }
        if quantity == 0 {
            bail!("Quantity must be greater than zero");
        }
        if !(buy_price.is_finite() && buy_price > 0.0) {
            bail!("Buy price must be a positive number, got {buy_price}");
        }
        parse_buy_date(buy_date)?;

        Ok(Holding {
            ticker,
            quantity,
            buy_price,
            buy_date: buy_date.trim().to_string(),
        })
    }
}

/// Read access to recorded holdings.
pub trait HoldingStore {
    fn lookup(&self, ticker: &str) -> Option<&Holding>;
}

/// Tickers are keyed by their trimmed, uppercase symbol.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}
