//! HTTP real-time price client
//!
//! Fetches the latest price for a symbol from a REST endpoint of the form
//! `GET {base_url}/prices/{symbol}` with bearer authentication. The response
//! body is expected to carry a `price` field, either as a JSON number or as
//! a numeric string.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{EngineError, EngineResult, SpotQuote};

use super::PriceSource;

/// Environment variable consulted when no API key is configured
pub const API_KEY_ENV: &str = "PRICE_API_KEY";

/// Price feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Endpoint root, without trailing slash
    pub base_url: String,
    /// Bearer token; falls back to `PRICE_API_KEY`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com/v1".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl FeedConfig {
    /// Configured key, or the environment fallback
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|k| !k.is_empty())
    }
}

/// REST price client
pub struct HttpPriceClient {
    client: reqwest::blocking::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpPriceClient {
    pub fn new(config: &FeedConfig) -> EngineResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.resolve_api_key(),
        })
    }

    fn price_url(&self, symbol: &str) -> String {
        format!("{}/prices/{}", self.base_url, symbol)
    }

    /// Get current quote for a symbol
    pub fn get_quote(&self, symbol: &str) -> EngineResult<SpotQuote> {
        let mut request = self.client.get(self.price_url(symbol));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: PriceResponse = request
            .send()
            .map_err(|e| EngineError::network(e.to_string()))?
            .error_for_status()
            .map_err(|e| EngineError::network(e.to_string()))?
            .json()
            .map_err(|e| EngineError::data(format!("Failed to parse price: {}", e)))?;

        let price = response.price.value()?;
        tracing::info!("Retrieved real-time price for {}: {}", symbol, price);

        Ok(SpotQuote::new(symbol, price))
    }
}

impl PriceSource for HttpPriceClient {
    fn current_price(&self, symbol: &str) -> EngineResult<f64> {
        self.get_quote(symbol).map(|q| q.price)
    }
}

#[derive(Debug, Deserialize)]
struct PriceResponse {
    price: PriceField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(f64),
    Text(String),
}

impl PriceField {
    fn value(&self) -> EngineResult<f64> {
        let price = match self {
            PriceField::Number(p) => *p,
            PriceField::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| EngineError::data(format!("Invalid price '{}': {}", s, e)))?,
        };
        if !price.is_finite() || price <= 0.0 {
            return Err(EngineError::data(format!("Non-positive price {}", price)));
        }
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_field_parsing() {
        let r: PriceResponse = serde_json::from_str(r#"{"price": 101.25}"#).unwrap();
        assert_eq!(r.price.value().unwrap(), 101.25);

        let r: PriceResponse = serde_json::from_str(r#"{"price": " 99.5 "}"#).unwrap();
        assert_eq!(r.price.value().unwrap(), 99.5);

        let r: PriceResponse = serde_json::from_str(r#"{"price": "n/a"}"#).unwrap();
        assert!(matches!(r.price.value(), Err(EngineError::Data(_))));

        let r: PriceResponse = serde_json::from_str(r#"{"price": 0}"#).unwrap();
        assert!(r.price.value().is_err());

        assert!(serde_json::from_str::<PriceResponse>(r#"{"last": 1.0}"#).is_err());
    }

    #[test]
    fn test_url_building() {
        let config = FeedConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            api_key: Some("secret".to_string()),
            timeout_secs: 1,
        };
        let client = HttpPriceClient::new(&config).unwrap();
        assert_eq!(client.price_url("AAPL"), "http://localhost:8080/v1/prices/AAPL");
        assert_eq!(client.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        let config = FeedConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: Some("k".to_string()),
            timeout_secs: 1,
        };
        let client = HttpPriceClient::new(&config).unwrap();
        assert!(matches!(client.current_price("BTC"), Err(EngineError::Network(_))));
    }
}
