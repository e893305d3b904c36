//! Compound annual growth rate of a single holding.

use crate::core::chain::QuoteProviderChain;
use crate::core::duration::years_between;
use crate::core::error::ReturnError;
use crate::core::holding::{HoldingStore, normalize_ticker};
use crate::core::quote::QuoteResult;
use chrono::{DateTime, Local};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnEstimate {
    pub ticker: String,
    pub quote: QuoteResult,
    pub years: f64,
    /// Signed fraction, e.g. 0.1 for 10% a year.
    pub cagr: f64,
}

/// `(current_price / buy_price)^(1 / years) - 1`
///
/// Callers must only pass a positive `years`; [`years_between`] guarantees it.
pub fn cagr(buy_price: f64, current_price: f64, years: f64) -> f64 {
    (current_price / buy_price).powf(1.0 / years) - 1.0
}

/// Resolves a live price for `ticker` and computes its CAGR since purchase.
pub async fn estimate_return(
    store: &impl HoldingStore,
    chain: &QuoteProviderChain,
    ticker: &str,
) -> Result<ReturnEstimate, ReturnError> {
    estimate_return_at(store, chain, ticker, Local::now()).await
}

pub async fn estimate_return_at(
    store: &impl HoldingStore,
    chain: &QuoteProviderChain,
    ticker: &str,
    now: DateTime<Local>,
) -> Result<ReturnEstimate, ReturnError> {
    let holding = store
        .lookup(ticker)
        .ok_or_else(|| ReturnError::TickerNotFound {
            ticker: normalize_ticker(ticker),
        })?;
    // Hand-edited files may carry a zero or negative cost basis.
    if !(holding.buy_price.is_finite() && holding.buy_price > 0.0) {
        return Err(ReturnError::InvalidBuyPrice {
            ticker: holding.ticker.clone(),
        });
    }

    let quote = chain.resolve(&holding.ticker).await?;
    let years = years_between(&holding.buy_date, now)?;
    let cagr = cagr(holding.buy_price, quote.price, years);
    debug!(
        "cagr: {} -> {} over {years}yrs = {cagr}",
        holding.buy_price, quote.price
    );

    Ok(ReturnEstimate {
        ticker: holding.ticker.clone(),
        quote,
        years,
        cagr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chain::tests::{FakeProvider, Outcome};
    use crate::core::holding::Holding;
    use crate::store::Portfolio;
    use chrono::{NaiveDate, TimeZone};
    use std::sync::atomic::Ordering;

    fn reference_cagr(buy: f64, current: f64, years: f64) -> f64 {
        ((current / buy).ln() / years).exp() - 1.0
    }

    fn local_midnight(y: i32, m: u32, d: u32) -> DateTime<Local> {
        let naive = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    fn portfolio_with(holding: Holding) -> Portfolio {
        let mut portfolio = Portfolio::default();
        portfolio.insert(holding);
        portfolio
    }

    #[test]
    fn ten_percent_over_two_years() {
        assert!((cagr(100.0, 121.0, 2.0) - 0.10).abs() < 1e-9);
    }

    #[test]
    fn matches_reference_computation() {
        let cases = [
            (100.0, 121.0, 2.0),
            (50.0, 40.0, 1.5),
            (10.0, 300.0, 12.25),
            (250.0, 250.0, 3.0),
            (1.5, 1.6, 0.25),
        ];
        for (buy, current, years) in cases {
            let expected = reference_cagr(buy, current, years);
            assert!(
                (cagr(buy, current, years) - expected).abs() < 1e-9,
                "{buy} -> {current} over {years}"
            );
        }
    }

    #[test]
    fn loss_is_negative() {
        let rate = cagr(100.0, 81.0, 2.0);
        assert!((rate + 0.10).abs() < 1e-9);
    }

    #[tokio::test]
    async fn estimates_from_store_and_chain() {
        let portfolio = portfolio_with(Holding::new("MSFT", 5, 100.0, "2020-01-01").unwrap());
        let (provider, _) = FakeProvider::new("primary", Outcome::Price(121.0));
        let chain = QuoteProviderChain::new(vec![Box::new(provider)]);
        let now = local_midnight(2022, 1, 1);

        let estimate = estimate_return_at(&portfolio, &chain, "msft", now)
            .await
            .unwrap();

        assert_eq!(estimate.ticker, "MSFT");
        assert_eq!(estimate.quote.source, "primary");
        assert!((estimate.years - 731.0 / 365.0).abs() < 1e-3);
        assert!((estimate.cagr - cagr(100.0, 121.0, estimate.years)).abs() < 1e-12);
    }

    #[tokio::test]
    async fn missing_ticker_skips_price_lookup() {
        let portfolio = Portfolio::default();
        let (provider, calls) = FakeProvider::new("primary", Outcome::Price(121.0));
        let chain = QuoteProviderChain::new(vec![Box::new(provider)]);

        let err = estimate_return(&portfolio, &chain, "aapl").await.unwrap_err();
        assert_eq!(
            err,
            ReturnError::TickerNotFound {
                ticker: "AAPL".to_string()
            }
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn price_failure_is_surfaced() {
        let portfolio = portfolio_with(Holding::new("AAPL", 1, 100.0, "2020-01-01").unwrap());
        let (provider, _) = FakeProvider::new("primary", Outcome::Status(503));
        let chain = QuoteProviderChain::new(vec![Box::new(provider)]);

        let err = estimate_return(&portfolio, &chain, "AAPL").await.unwrap_err();
        assert_eq!(
            err,
            ReturnError::NoPriceAvailable {
                ticker: "AAPL".to_string()
            }
        );
    }

    #[tokio::test]
    async fn non_positive_buy_price_skips_price_lookup() {
        let mut portfolio = Portfolio::default();
        portfolio.insert(Holding {
            ticker: "AAPL".to_string(),
            quantity: 1,
            buy_price: 0.0,
            buy_date: "2020-01-01".to_string(),
        });
        let (provider, calls) = FakeProvider::new("primary", Outcome::Price(121.0));
        let chain = QuoteProviderChain::new(vec![Box::new(provider)]);

        assert_eq!(
            estimate_return(&portfolio, &chain, "AAPL").await,
            Err(ReturnError::InvalidBuyPrice {
                ticker: "AAPL".to_string()
            })
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn duration_failures_are_surfaced() {
        let mut portfolio = Portfolio::default();
        // Loaded from disk without validation.
        portfolio.insert(Holding {
            ticker: "AAPL".to_string(),
            quantity: 1,
            buy_price: 100.0,
            buy_date: "2024/01/01".to_string(),
        });
        portfolio.insert(Holding::new("GOOG", 1, 100.0, "2030-06-01").unwrap());
        let (provider, _) = FakeProvider::new("primary", Outcome::Price(121.0));
        let chain = QuoteProviderChain::new(vec![Box::new(provider)]);
        let now = local_midnight(2025, 1, 1);

        assert_eq!(
            estimate_return_at(&portfolio, &chain, "AAPL", now).await,
            Err(ReturnError::InvalidDate {
                date: "2024/01/01".to_string()
            })
        );
        assert_eq!(
            estimate_return_at(&portfolio, &chain, "GOOG", now).await,
            Err(ReturnError::NonPositiveDuration {
                date: "2030-06-01".to_string()
            })
        );
    }
}
