//! JSON persistence for the portfolio file.
//!
//! The file is an object keyed by ticker:
//! `{ "AAPL": { "quantity": 10, "buy_price": 150.0, "buy_date": "2020-01-15" } }`

use super::Portfolio;
use crate::core::holding::{Holding, normalize_ticker};
use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Loads holdings from `path`. A missing file is an empty portfolio.
///
/// Buy dates are kept as written so that a malformed date is reported when a
/// return is computed for that holding.
pub fn load_portfolio<P: AsRef<Path>>(path: P) -> Result<Portfolio> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No portfolio file at {}, starting empty", path.display());
        return Ok(Portfolio::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read portfolio file: {}", path.display()))?;
    let records: BTreeMap<String, Holding> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse portfolio file: {}", path.display()))?;

    let mut portfolio = Portfolio::default();
    for (ticker, mut holding) in records {
        // Kept so that `remove` can still repair the file.
        if holding.quantity == 0 {
            warn!("Holding {ticker} in {} has zero quantity", path.display());
        }
        if !(holding.buy_price.is_finite() && holding.buy_price > 0.0) {
            warn!(
                "Holding {ticker} in {} has non-positive buy price {}",
                path.display(),
                holding.buy_price
            );
        }
        holding.ticker = ticker.clone();
        if portfolio.insert(holding).is_some() {
            bail!(
                "Portfolio file {} lists {} more than once (tickers are case-insensitive)",
                path.display(),
                normalize_ticker(&ticker)
            );
        }
    }

    debug!("Loaded {} holdings from {}", portfolio.len(), path.display());
    Ok(portfolio)
}

/// Writes holdings to `path` with four-space indentation.
pub fn save_portfolio<P: AsRef<Path>>(portfolio: &Portfolio, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    let records: BTreeMap<&str, &Holding> = portfolio
        .holdings()
        .map(|h| (h.ticker.as_str(), h))
        .collect();

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records
        .serialize(&mut serializer)
        .context("Failed to serialize portfolio")?;
    buf.push(b'\n');

    fs::write(path, buf)
        .with_context(|| format!("Failed to write portfolio file: {}", path.display()))?;
    debug!("Saved {} holdings to {}", portfolio.len(), path.display());
    Ok(())
}
