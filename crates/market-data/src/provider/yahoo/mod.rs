//! Yahoo Finance market data provider.
//!
//! Reads the chart endpoint for equities (`AAPL`, `005930.KS`) and FX pairs
//! (`KRW=X`). Retries, caching and proxying are left to callers.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use num_traits::FromPrimitive;
use reqwest::{header, StatusCode};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::MarketDataProvider;

use models::{YahooChartMeta, YahooChartResponse};

const PROVIDER_ID: &str = "YAHOO";
const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a provider against the public Yahoo endpoint.
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a provider against a custom endpoint (proxies, test servers).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0")
            .build()
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to initialize HTTP client: {}", e),
            })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url,
            encode(symbol)
        )
    }

    /// Convert a chart response into our Quote model.
    ///
    /// The current price is `regularMarketPrice`, falling back to the previous
    /// close. A missing or non-positive price is a validation failure so the
    /// caller degrades to its last-known price instead of valuing at zero.
    fn chart_to_quote(symbol: &str, response: YahooChartResponse) -> Result<Quote, MarketDataError> {
        if let Some(err) = response.chart.error {
            let description = err.description.unwrap_or_default();
            if err.code.as_deref() == Some("Not Found") {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: description,
            });
        }

        let meta = response
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .map(|result| result.meta)
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

        Self::meta_to_quote(symbol, meta)
    }

    fn meta_to_quote(symbol: &str, meta: YahooChartMeta) -> Result<Quote, MarketDataError> {
        let previous = meta.previous_close.or(meta.chart_previous_close);
        let current_price = meta
            .regular_market_price
            .filter(|p| *p > 0.0)
            .or(previous.filter(|p| *p > 0.0))
            .and_then(Decimal::from_f64)
            .ok_or_else(|| MarketDataError::ValidationFailed {
                message: format!("No valid price in chart meta for {}", symbol),
            })?;
        let previous_close = previous
            .and_then(Decimal::from_f64)
            .unwrap_or(current_price);

        let timestamp: DateTime<Utc> = meta
            .regular_market_time
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
            .unwrap_or_else(Utc::now);

        Ok(Quote {
            symbol: meta.symbol.unwrap_or_else(|| symbol.to_string()),
            current_price,
            previous_close,
            currency: meta.currency.unwrap_or_else(|| "USD".to_string()),
            timestamp,
            source: PROVIDER_ID.to_string(),
        })
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        debug!("Fetching latest quote for {} from Yahoo", symbol);

        let response = self
            .client
            .get(self.chart_url(symbol))
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MarketDataError::Timeout {
                        provider: PROVIDER_ID.to_string(),
                    }
                } else {
                    MarketDataError::Network(e)
                }
            })?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Yahoo rate limited the quote request for {}", symbol);
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            StatusCode::NOT_FOUND => {
                return Err(MarketDataError::SymbolNotFound(symbol.to_string()));
            }
            status if !status.is_success() => {
                return Err(MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("HTTP {} for {}", status, symbol),
                });
            }
            _ => {}
        }

        let data: YahooChartResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: format!("Failed to parse chart response: {}", e),
                })?;

        Self::chart_to_quote(symbol, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> YahooChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_chart_to_quote_uses_regular_market_price() {
        let response = parse(
            r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","currency":"USD",
                "regularMarketPrice":175.5,"previousClose":170.0,
                "regularMarketTime":1700000000}}],"error":null}}"#,
        );
        let quote = YahooProvider::chart_to_quote("AAPL", response).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.current_price, dec!(175.5));
        assert_eq!(quote.previous_close, dec!(170));
        assert_eq!(quote.currency, "USD");
        assert_eq!(quote.source, "YAHOO");
        assert_eq!(quote.timestamp.timestamp(), 1700000000);
    }

    #[test]
    fn test_chart_to_quote_falls_back_to_previous_close() {
        let response = parse(
            r#"{"chart":{"result":[{"meta":{"symbol":"005930.KS","currency":"KRW",
                "chartPreviousClose":74000}}],"error":null}}"#,
        );
        let quote = YahooProvider::chart_to_quote("005930.KS", response).unwrap();
        assert_eq!(quote.current_price, dec!(74000));
        assert_eq!(quote.previous_close, dec!(74000));
        assert_eq!(quote.currency, "KRW");
    }

    #[test]
    fn test_chart_to_quote_without_price_fails_validation() {
        let response = parse(r#"{"chart":{"result":[{"meta":{"symbol":"XYZ"}}],"error":null}}"#);
        let err = YahooProvider::chart_to_quote("XYZ", response).unwrap_err();
        assert!(matches!(err, MarketDataError::ValidationFailed { .. }));
    }

    #[test]
    fn test_chart_error_not_found() {
        let response = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found",
                "description":"No data found, symbol may be delisted"}}}"#,
        );
        let err = YahooProvider::chart_to_quote("NOPE", response).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(s) if s == "NOPE"));
    }

    #[test]
    fn test_empty_result_is_symbol_not_found() {
        let response = parse(r#"{"chart":{"result":[],"error":null}}"#);
        let err = YahooProvider::chart_to_quote("EMPTY", response).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let provider =
            YahooProvider::with_base_url("http://localhost:9999/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            provider.chart_url("KRW=X"),
            "http://localhost:9999/v8/finance/chart/KRW%3DX?interval=1d&range=1d"
        );
    }

    #[test]
    fn test_provider_id() {
        let provider = YahooProvider::new().unwrap();
        assert_eq!(provider.id(), "YAHOO");
    }
}
