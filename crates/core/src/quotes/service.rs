use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use myfolio_market_data::MarketDataProvider;

use super::QuoteBatch;
use crate::constants::USD_KRW_SYMBOL;
use crate::fx::ExchangeRate;

#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    /// Fetches the latest quote for each distinct ticker, concurrently.
    ///
    /// Never fails as a whole: per-ticker failures are logged and reported in
    /// [`QuoteBatch::failed`].
    async fn fetch_quotes(&self, tickers: &[String]) -> QuoteBatch;

    /// Live USD/KRW rate, or the configured default when it cannot be fetched.
    async fn fetch_exchange_rate(&self) -> ExchangeRate;
}

pub struct QuoteService {
    provider: Arc<dyn MarketDataProvider>,
    default_exchange_rate: Decimal,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn MarketDataProvider>, default_exchange_rate: Decimal) -> Self {
        Self {
            provider,
            default_exchange_rate,
        }
    }
}

/// Trims tickers and drops blanks and duplicates, keeping first-seen order.
fn distinct_tickers(tickers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tickers
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn fetch_quotes(&self, tickers: &[String]) -> QuoteBatch {
        let tickers = distinct_tickers(tickers);
        debug!(
            "Fetching {} quotes from {}",
            tickers.len(),
            self.provider.id()
        );

        let results = join_all(tickers.iter().map(|ticker| async move {
            (ticker, self.provider.get_latest_quote(ticker).await)
        }))
        .await;

        let mut batch = QuoteBatch::default();
        for (ticker, result) in results {
            match result {
                Ok(quote) => {
                    batch.quotes.insert(ticker.clone(), quote);
                }
                Err(e) => {
                    warn!(
                        "Quote fetch failed for {}: {}. Last-known price will be used.",
                        ticker, e
                    );
                    batch.failed.push(ticker.clone());
                }
            }
        }
        batch
    }

    async fn fetch_exchange_rate(&self) -> ExchangeRate {
        match self.provider.get_latest_quote(USD_KRW_SYMBOL).await {
            Ok(quote) if quote.current_price > Decimal::ZERO => {
                ExchangeRate::live(quote.current_price)
            }
            Ok(quote) => {
                warn!(
                    "Exchange rate quote {} carried non-positive rate {}. Using default {}.",
                    USD_KRW_SYMBOL, quote.current_price, self.default_exchange_rate
                );
                ExchangeRate::fallback(self.default_exchange_rate)
            }
            Err(e) => {
                warn!(
                    "Exchange rate fetch failed: {}. Using default {}.",
                    e, self.default_exchange_rate
                );
                ExchangeRate::fallback(self.default_exchange_rate)
            }
        }
    }
}
