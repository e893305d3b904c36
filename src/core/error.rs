//! Error types surfaced by price resolution and return estimation.

use thiserror::Error;

/// Reasons a CAGR estimate for a single holding could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("Unable to fetch a price for {ticker}. Try again later.")]
    NoPriceAvailable { ticker: String },

    #[error("Invalid buy date '{date}', expected YYYY-MM-DD")]
    InvalidDate { date: String },

    #[error("Buy date {date} is too recent or in the future")]
    NonPositiveDuration { date: String },

    #[error("Ticker {ticker} not found in portfolio")]
    TickerNotFound { ticker: String },

    #[error("Holding {ticker} has no positive buy price")]
    InvalidBuyPrice { ticker: String },
}

/// Outcome of a single failed provider attempt.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("unparseable response body: {0}")]
    UnparseableBody(String),

    #[error("response has no price")]
    MissingPrice,

    #[error("invalid price {0}")]
    InvalidPrice(String),
}

impl From<reqwest::Error> for QuoteError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL, which may include an API key.
        let msg = e.without_url().to_string();
        QuoteError::Transport(msg)
    }
}
