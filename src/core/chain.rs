//! Ordered quote lookup with fallback.

use crate::core::error::ReturnError;
use crate::core::quote::{QuoteProvider, QuoteResult, validate_price};
use tracing::{debug, instrument};

/// Queries providers in priority order and returns the first valid price.
///
/// Providers are awaited one after another; a provider is only asked once the
/// previous one has fully completed, and a success skips every provider after
/// it. The chain keeps no per-call state, so concurrent lookups for different
/// tickers are independent.
pub struct QuoteProviderChain {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderChain {
    pub fn new(providers: Vec<Box<dyn QuoteProvider>>) -> Self {
        QuoteProviderChain { providers }
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    #[instrument(name = "ResolvePrice", skip(self), fields(ticker = %ticker))]
    pub async fn resolve(&self, ticker: &str) -> Result<QuoteResult, ReturnError> {
        let no_price = || ReturnError::NoPriceAvailable {
            ticker: ticker.to_string(),
        };

        if ticker.trim().is_empty() {
            debug!("Empty ticker, skipping providers");
            return Err(no_price());
        }

        for provider in &self.providers {
            let outcome = provider
                .fetch_price(ticker)
                .await
                .and_then(validate_price);

            match outcome {
                Ok(price) => {
                    debug!(provider = provider.name(), price, "Resolved price");
                    return Ok(QuoteResult {
                        price,
                        source: provider.name().to_string(),
                    });
                }
                Err(e) => {
                    debug!(provider = provider.name(), error = %e, "Provider failed");
                }
            }
        }

        debug!("All providers failed");
        Err(no_price())
    }
}
