//! Unit tests for the live valuation service.

use super::*;
use crate::errors::{DatabaseError, Error, Result};
use crate::fx::ExchangeRate;
use crate::positions::{Market, NewPosition, Position, PositionRepositoryTrait, PositionUpdate};
use crate::quotes::{QuoteBatch, QuoteServiceTrait};
use async_trait::async_trait;
use myfolio_market_data::Quote;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Implementations
// ============================================================================

struct MockPositionRepository {
    positions: Vec<Position>,
    price_updates: Mutex<Vec<HashMap<String, Decimal>>>,
    fail_price_update: bool,
}

impl MockPositionRepository {
    fn new(positions: Vec<Position>) -> Self {
        Self {
            positions,
            price_updates: Mutex::new(Vec::new()),
            fail_price_update: false,
        }
    }
}

#[async_trait]
impl PositionRepositoryTrait for MockPositionRepository {
    async fn create(&self, _new_position: NewPosition) -> Result<Position> {
        unimplemented!()
    }

    async fn update(&self, _position_update: PositionUpdate) -> Result<Position> {
        unimplemented!()
    }

    async fn delete(&self, _position_id: &str) -> Result<usize> {
        unimplemented!()
    }

    async fn update_current_prices(&self, _prices: &HashMap<String, Decimal>) -> Result<usize> {
        unimplemented!()
    }

    async fn update_current_prices_for_user(
        &self,
        _user_id: &str,
        prices: &HashMap<String, Decimal>,
    ) -> Result<usize> {
        if self.fail_price_update {
            return Err(Error::Database(DatabaseError::QueryFailed(
                "database is locked".to_string(),
            )));
        }
        self.price_updates.lock().unwrap().push(prices.clone());
        Ok(prices.len())
    }

    fn get_by_id(&self, _position_id: &str) -> Result<Position> {
        unimplemented!()
    }

    fn list(&self, user_id: &str) -> Result<Vec<Position>> {
        Ok(self
            .positions
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    fn list_user_ids(&self) -> Result<Vec<String>> {
        unimplemented!()
    }
}

struct MockQuoteService {
    prices: HashMap<String, Decimal>,
    rate: ExchangeRate,
}

#[async_trait]
impl QuoteServiceTrait for MockQuoteService {
    async fn fetch_quotes(&self, tickers: &[String]) -> QuoteBatch {
        let mut batch = QuoteBatch::default();
        for ticker in tickers {
            match self.prices.get(ticker) {
                Some(price) => {
                    batch
                        .quotes
                        .insert(ticker.clone(), Quote::new(ticker, *price, "USD", "MOCK"));
                }
                None => batch.failed.push(ticker.clone()),
            }
        }
        batch
    }

    async fn fetch_exchange_rate(&self) -> ExchangeRate {
        self.rate.clone()
    }
}

fn position(user: &str, ticker: &str, market: Market) -> Position {
    Position {
        id: format!("{}-{}", user, ticker),
        user_id: user.to_string(),
        ticker: ticker.to_string(),
        display_name: ticker.to_string(),
        quantity: 10,
        average_cost: dec!(100),
        current_price: dec!(110),
        market,
        category_id: Some(1),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_valuate_user_live_prices() {
    let repo = Arc::new(MockPositionRepository::new(vec![
        position("u1", "QQQ", Market::Foreign),
        position("u2", "SPY", Market::Foreign),
    ]));
    let quotes = Arc::new(MockQuoteService {
        prices: HashMap::from([("QQQ".to_string(), dec!(120))]),
        rate: ExchangeRate::live(dec!(1400)),
    });
    let service = ValuationService::new(repo.clone(), quotes);

    let report = service.valuate_user("u1").await.unwrap();

    assert_eq!(report.valuation.status, ValuationStatus::Live);
    assert_eq!(report.valuation.total_value, dec!(1680000));
    assert_eq!(report.valuation.total_cost, dec!(1400000));
    assert_eq!(report.exchange_rate.rate, dec!(1400));

    let updates = repo.price_updates.lock().unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0]["QQQ"], dec!(120));
}

#[tokio::test]
async fn test_valuate_user_total_quote_failure_degrades_to_stale() {
    let repo = Arc::new(MockPositionRepository::new(vec![position(
        "u1",
        "QQQ",
        Market::Foreign,
    )]));
    let quotes = Arc::new(MockQuoteService {
        prices: HashMap::new(),
        rate: ExchangeRate::fallback(dec!(1300)),
    });
    let service = ValuationService::new(repo.clone(), quotes);

    let report = service.valuate_user("u1").await.unwrap();

    assert_eq!(report.valuation.status, ValuationStatus::Stale);
    assert_eq!(report.valuation.stale_tickers, vec!["QQQ".to_string()]);
    // 10 × 110 × 1300
    assert_eq!(report.valuation.total_value, dec!(1430000));
    assert!(report.exchange_rate.is_fallback());
    assert!(repo.price_updates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_valuate_user_without_positions_is_empty() {
    let repo = Arc::new(MockPositionRepository::new(vec![]));
    let quotes = Arc::new(MockQuoteService {
        prices: HashMap::new(),
        rate: ExchangeRate::live(dec!(1350)),
    });
    let service = ValuationService::new(repo, quotes);

    let report = service.valuate_user("nobody").await.unwrap();

    assert!(report.valuation.is_empty());
    assert_eq!(report.valuation.total_value, Decimal::ZERO);
}

#[tokio::test]
async fn test_valuate_user_propagates_persistence_failure() {
    let mut repo = MockPositionRepository::new(vec![position("u1", "QQQ", Market::Foreign)]);
    repo.fail_price_update = true;
    let quotes = Arc::new(MockQuoteService {
        prices: HashMap::from([("QQQ".to_string(), dec!(120))]),
        rate: ExchangeRate::live(dec!(1300)),
    });
    let service = ValuationService::new(Arc::new(repo), quotes);

    let err = service.valuate_user("u1").await.unwrap_err();

    assert!(err.is_persistence_failure());
}
