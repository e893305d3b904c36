use crate::core::error::QuoteError;
use crate::core::quote::QuoteProvider;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo Finance quote endpoint. Needs no API key.
pub struct YahooFinanceProvider {
    base_url: String,
    client: reqwest::Client,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("folio/1.0");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(YahooFinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }
}

#[derive(Deserialize, Debug)]
struct YahooQuoteResponse {
    #[serde(rename = "quoteResponse")]
    quote_response: Option<QuoteResponse>,
}

#[derive(Deserialize, Debug)]
struct QuoteResponse {
    result: Option<Vec<QuoteItem>>,
}

#[derive(Deserialize, Debug)]
struct QuoteItem {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

fn parse_quote(body: &str) -> Result<f64, QuoteError> {
    let data: YahooQuoteResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::UnparseableBody(e.to_string()))?;

    data.quote_response
        .and_then(|r| r.result)
        .and_then(|items| items.into_iter().next())
        .and_then(|item| item.regular_market_price)
        .ok_or(QuoteError::MissingPrice)
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    #[instrument(name = "YahooQuoteFetch", skip(self), fields(ticker = %ticker))]
    async fn fetch_price(&self, ticker: &str) -> Result<f64, QuoteError> {
        let url = Url::parse_with_params(
            &format!("{}/v7/finance/quote", self.base_url),
            &[("symbols", ticker)],
        )
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
        debug!("Requesting quote from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, "Received Yahoo response");
        if status != StatusCode::OK {
            return Err(QuoteError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let price = parse_quote(&body)?;
        debug!("Yahoo price of {ticker}: {price}");
        Ok(price)
    }
}
