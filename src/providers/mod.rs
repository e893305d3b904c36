pub mod twelve_data;
pub mod yahoo_finance;

use crate::core::chain::QuoteProviderChain;
use crate::core::config::{AppConfig, ProviderConfig};
use crate::core::quote::QuoteProvider;
use anyhow::Result;
use tracing::{debug, warn};
use twelve_data::TwelveDataProvider;
use yahoo_finance::YahooFinanceProvider;

/// Builds the quote chain in the order the providers are configured.
///
/// Twelve Data entries without an API key are skipped.
pub fn build_chain(config: &AppConfig) -> Result<QuoteProviderChain> {
    let timeout = config.request_timeout();
    let mut providers: Vec<Box<dyn QuoteProvider>> = Vec::new();

    for provider in &config.providers {
        match provider {
            ProviderConfig::Yahoo { base_url } => {
                providers.push(Box::new(YahooFinanceProvider::new(base_url, timeout)?));
            }
            ProviderConfig::TwelveData { base_url, api_key } => {
                match api_key.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
                    Some(key) => {
                        providers.push(Box::new(TwelveDataProvider::new(base_url, key, timeout)?));
                    }
                    None => warn!("Skipping Twelve Data provider: no api_key configured"),
                }
            }
        }
    }

    let chain = QuoteProviderChain::new(providers);
    debug!("Quote providers: {:?}", chain.provider_names());
    Ok(chain)
}
