//! Market data provider trait definitions.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Quote;

/// Trait for market data providers.
///
/// Implement this trait to add support for a new quote source. Failures are
/// per ticker: a provider must never fail a whole batch because one symbol is
/// unknown.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use myfolio_market_data::{MarketDataError, MarketDataProvider, Quote};
///
/// struct FixedProvider;
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
///         Ok(Quote::new(symbol, rust_decimal::Decimal::ONE, "USD", self.id()))
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider ("YAHOO", ...).
    ///
    /// Used for logging and as the `source` of produced quotes.
    fn id(&self) -> &'static str;

    /// Fetch the latest quote for a ticker.
    ///
    /// Exchange rates are ordinary tickers as well (e.g. `KRW=X` for USD/KRW).
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError>;
}
