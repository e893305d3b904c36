pub mod disk;

use crate::core::holding::{Holding, HoldingStore, normalize_ticker};
use std::collections::BTreeMap;
use tracing::debug;

/// In-memory holdings keyed by ticker, kept in ticker order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Portfolio {
    holdings: BTreeMap<String, Holding>,
}

impl Portfolio {
    /// Adds a holding, replacing any existing holding for the same ticker.
    pub fn insert(&mut self, mut holding: Holding) -> Option<Holding> {
        holding.ticker = normalize_ticker(&holding.ticker);
        debug!("Portfolio PUT for ticker: {}", holding.ticker);
        self.holdings.insert(holding.ticker.clone(), holding)
    }

    pub fn remove(&mut self, ticker: &str) -> Option<Holding> {
        let removed = self.holdings.remove(&normalize_ticker(ticker));
        debug!("Portfolio REMOVE for ticker: {ticker}, found: {}", removed.is_some());
        removed
    }

    pub fn holdings(&self) -> impl Iterator<Item = &Holding> {
        self.holdings.values()
    }

    pub fn tickers(&self) -> Vec<String> {
        self.holdings.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl HoldingStore for Portfolio {
    fn lookup(&self, ticker: &str) -> Option<&Holding> {
        let holding = self.holdings.get(&normalize_ticker(ticker));
        if holding.is_some() {
            debug!("Portfolio HIT for ticker: {ticker}");
        } else {
            debug!("Portfolio MISS for ticker: {ticker}");
        }
        holding
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(ticker: &str, quantity: u32) -> Holding {
        Holding::new(ticker, quantity, 100.0, "2021-03-04").unwrap()
    }

    #[test]
    fn test_portfolio_insert_lookup() {
        let mut portfolio = Portfolio::default();

        // Initially, portfolio is empty
        assert!(portfolio.lookup("AAPL").is_none());

        portfolio.insert(holding("AAPL", 10));

        assert_eq!(portfolio.lookup("AAPL").unwrap().quantity, 10);
        assert_eq!(portfolio.lookup("aapl").unwrap().ticker, "AAPL");
        assert!(portfolio.lookup("MSFT").is_none());
    }

    #[test]
    fn test_portfolio_insert_replaces() {
        let mut portfolio = Portfolio::default();

        assert!(portfolio.insert(holding("AAPL", 10)).is_none());
        let previous = portfolio.insert(holding("aapl", 25)).unwrap();

        assert_eq!(previous.quantity, 10);
        assert_eq!(portfolio.len(), 1);
        assert_eq!(portfolio.lookup("AAPL").unwrap().quantity, 25);
    }

    #[test]
    fn test_portfolio_remove() {
        let mut portfolio = Portfolio::default();
        portfolio.insert(holding("AAPL", 10));

        assert!(portfolio.remove("msft").is_none());
        assert!(portfolio.remove("aapl").is_some());
        assert!(portfolio.is_empty());
    }

    #[test]
    fn test_portfolio_is_ordered_by_ticker() {
        let mut portfolio = Portfolio::default();
        portfolio.insert(holding("MSFT", 1));
        portfolio.insert(holding("AAPL", 1));
        portfolio.insert(holding("GOOG", 1));

        assert_eq!(portfolio.tickers(), vec!["AAPL", "GOOG", "MSFT"]);
        let tickers: Vec<&str> = portfolio.holdings().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "GOOG", "MSFT"]);
    }
}
