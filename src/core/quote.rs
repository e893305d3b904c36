//! Quote abstractions and core types

use crate::core::error::QuoteError;
use async_trait::async_trait;

/// A live price resolved for a ticker, tagged with the provider that supplied it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteResult {
    pub price: f64,
    pub source: String,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Identifier used for tracing and to tag resolved quotes.
    fn name(&self) -> &str;

    async fn fetch_price(&self, ticker: &str) -> Result<f64, QuoteError>;
}

/// Rejects prices that cannot stand in for a market price.
pub fn validate_price(price: f64) -> Result<f64, QuoteError> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(QuoteError::InvalidPrice(price.to_string()))
    }
}
