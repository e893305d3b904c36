use crate::core::error::QuoteError;
use crate::core::quote::QuoteProvider;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";

/// Twelve Data price endpoint, authenticated with an `apikey` query parameter.
pub struct TwelveDataProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl TwelveDataProvider {
    pub fn new(base_url: &str, api_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent("folio/1.0");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(TwelveDataProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: builder.build()?,
        })
    }
}

// Errors come back as {"code": 401, "message": "...", "status": "error"}.
#[derive(Deserialize, Debug)]
struct PriceResponse {
    price: Option<String>,
    message: Option<String>,
}

fn parse_price(body: &str) -> Result<f64, QuoteError> {
    let data: PriceResponse =
        serde_json::from_str(body).map_err(|e| QuoteError::UnparseableBody(e.to_string()))?;

    let Some(raw) = data.price else {
        if let Some(message) = data.message {
            debug!("Twelve Data response: {message}");
        }
        return Err(QuoteError::MissingPrice);
    };

    Decimal::from_str(raw.trim())
        .ok()
        .and_then(|d| d.to_f64())
        .ok_or(QuoteError::InvalidPrice(raw))
}

#[async_trait]
impl QuoteProvider for TwelveDataProvider {
    fn name(&self) -> &str {
        "Twelve Data"
    }

    #[instrument(name = "TwelveDataPriceFetch", skip(self), fields(ticker = %ticker))]
    async fn fetch_price(&self, ticker: &str) -> Result<f64, QuoteError> {
        let endpoint = format!("{}/price", self.base_url);
        let url = Url::parse_with_params(
            &endpoint,
            &[("symbol", ticker), ("apikey", self.api_key.as_str())],
        )
        .map_err(|e| QuoteError::Transport(e.to_string()))?;
        // The full URL carries the API key.
        debug!("Requesting price from {endpoint}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(%status, "Received Twelve Data response");

        // Success depends on the price field alone; the status only names
        // the failure when the body has none.
        let body = response.text().await?;
        let price = parse_price(&body).map_err(|e| match e {
            QuoteError::UnparseableBody(_) | QuoteError::MissingPrice
                if status != StatusCode::OK =>
            {
                QuoteError::Status(status.as_u16())
            }
            e => e,
        })?;
        debug!("Twelve Data price of {ticker}: {price}");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(ticker: &str, response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/price"))
            .and(query_param("symbol", ticker))
            .and(query_param("apikey", "test-key"))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider(server: &MockServer) -> TwelveDataProvider {
        TwelveDataProvider::new(&server.uri(), "test-key", None).unwrap()
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_server = create_mock_server(
            "AAPL",
            ResponseTemplate::new(200).set_body_string(r#"{"price":"189.42000"}"#),
        )
        .await;

        let price = provider(&mock_server).fetch_price("AAPL").await.unwrap();
        assert!((price - 189.42).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_api_error_body() {
        let mock_response = r#"{
            "code": 401,
            "message": "**apikey** parameter is incorrect or not specified.",
            "status": "error"
        }"#;
        let mock_server = create_mock_server(
            "AAPL",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let result = provider(&mock_server).fetch_price("AAPL").await;
        assert!(matches!(result, Err(QuoteError::MissingPrice)));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let mock_server = create_mock_server("AAPL", ResponseTemplate::new(500)).await;

        let result = provider(&mock_server).fetch_price("AAPL").await;
        assert!(matches!(result, Err(QuoteError::Status(500))));
    }

    #[tokio::test]
    async fn test_price_body_wins_over_status() {
        let mock_server = create_mock_server(
            "AAPL",
            ResponseTemplate::new(429).set_body_string(r#"{"price":"101.25"}"#),
        )
        .await;

        let price = provider(&mock_server).fetch_price("AAPL").await.unwrap();
        assert!((price - 101.25).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_error_status_with_error_body() {
        let mock_server = create_mock_server(
            "AAPL",
            ResponseTemplate::new(401)
                .set_body_string(r#"{"code": 401, "message": "bad key", "status": "error"}"#),
        )
        .await;

        let result = provider(&mock_server).fetch_price("AAPL").await;
        assert!(matches!(result, Err(QuoteError::Status(401))));
    }

    #[test]
    fn test_parse_price_shapes() {
        assert!(matches!(
            parse_price("not json"),
            Err(QuoteError::UnparseableBody(_))
        ));
        assert!(matches!(
            parse_price(r#"{"price": "abc"}"#),
            Err(QuoteError::InvalidPrice(p)) if p == "abc"
        ));
        // A numeric price is not the documented shape.
        assert!(matches!(
            parse_price(r#"{"price": 12.5}"#),
            Err(QuoteError::UnparseableBody(_))
        ));
        assert_eq!(parse_price(r#"{"price": "0.5"}"#).unwrap(), 0.5);
    }
}
