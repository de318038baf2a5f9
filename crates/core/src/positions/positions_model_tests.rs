use super::*;
use crate::categories::Category;
use crate::errors::{Error, ValidationError};
use rust_decimal_macros::dec;

fn new_position() -> NewPosition {
    NewPosition {
        id: None,
        user_id: "user-1".to_string(),
        ticker: "QQQ".to_string(),
        display_name: "Invesco QQQ".to_string(),
        quantity: 10,
        average_cost: dec!(350),
        current_price: dec!(400),
        market: Market::Foreign,
        category_id: Some(1),
    }
}

#[test]
fn test_valid_new_position_passes() {
    assert!(new_position().validate().is_ok());
}

#[test]
fn test_empty_ticker_is_rejected() {
    let mut position = new_position();
    position.ticker = "  ".to_string();
    assert!(matches!(
        position.validate(),
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
}

#[test]
fn test_missing_user_is_rejected() {
    let mut position = new_position();
    position.user_id = String::new();
    assert!(matches!(
        position.validate(),
        Err(Error::Validation(ValidationError::MissingField(_)))
    ));
}

#[test]
fn test_negative_prices_are_rejected() {
    let mut position = new_position();
    position.average_cost = dec!(-1);
    assert!(position.validate().is_err());

    let mut position = new_position();
    position.current_price = dec!(-0.01);
    assert!(position.validate().is_err());
}

#[test]
fn test_zero_quantity_and_zero_cost_are_allowed() {
    let mut position = new_position();
    position.quantity = 0;
    position.average_cost = dec!(0);
    assert!(position.validate().is_ok());
}

#[test]
fn test_update_requires_id() {
    let update = PositionUpdate {
        id: None,
        ticker: "SPY".to_string(),
        display_name: "SPDR S&P 500".to_string(),
        quantity: 1,
        average_cost: dec!(500),
        current_price: dec!(510),
        market: Market::Foreign,
        category_id: Some(2),
    };
    assert!(update.validate().is_err());

    let update = PositionUpdate {
        id: Some("p-1".to_string()),
        ..update
    };
    assert!(update.validate().is_ok());
}

#[test]
fn test_market_parsing_and_currency() {
    assert_eq!("domestic".parse::<Market>().unwrap(), Market::Domestic);
    assert_eq!("FOREIGN".parse::<Market>().unwrap(), Market::Foreign);
    assert!("NYSE".parse::<Market>().is_err());

    assert_eq!(Market::Domestic.currency(), "KRW");
    assert_eq!(Market::Foreign.currency(), "USD");
}

#[test]
fn test_market_serializes_screaming_case() {
    let json = serde_json::to_string(&Market::Domestic).unwrap();
    assert_eq!(json, "\"DOMESTIC\"");
}

#[test]
fn test_position_category_resolution() {
    let position = Position {
        id: "p-1".to_string(),
        user_id: "user-1".to_string(),
        ticker: "005930.KS".to_string(),
        display_name: "Samsung Electronics".to_string(),
        quantity: 3,
        average_cost: dec!(70000),
        current_price: dec!(75000),
        market: Market::Domestic,
        category_id: Some(9),
    };
    assert_eq!(position.category(), Category::Uncategorized);
}
