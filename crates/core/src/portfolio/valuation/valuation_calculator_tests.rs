use super::*;
use crate::positions::{Market, Position};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

fn position(ticker: &str, quantity: u64, avg: Decimal, price: Decimal, market: Market) -> Position {
    Position {
        id: format!("pos-{}", ticker),
        user_id: "user-1".to_string(),
        ticker: ticker.to_string(),
        display_name: ticker.to_string(),
        quantity,
        average_cost: avg,
        current_price: price,
        market,
        category_id: None,
    }
}

#[test]
fn test_valuate_uses_fresh_quote() {
    let p = position("QQQ", 10, dec!(350), dec!(380), Market::Foreign);

    let vp = valuate(&p, Some(dec!(400)));

    assert_eq!(vp.price, dec!(400));
    assert_eq!(vp.price_source, PriceSource::Live);
    assert_eq!(vp.market_value, dec!(4000));
    assert_eq!(vp.investment, dec!(3500));
    assert_eq!(vp.profit, dec!(500));
    assert_eq!(vp.profit_rate.round_dp(4), dec!(14.2857));
}

#[test]
fn test_valuate_falls_back_to_stored_price() {
    let p = position("QQQ", 10, dec!(350), dec!(380), Market::Foreign);

    let vp = valuate(&p, None);
    assert_eq!(vp.price, dec!(380));
    assert_eq!(vp.price_source, PriceSource::LastKnown);
    assert_eq!(vp.market_value, dec!(3800));

    let vp = valuate(&p, Some(Decimal::ZERO));
    assert_eq!(vp.price_source, PriceSource::LastKnown);
}

#[test]
fn test_valuate_zero_investment_has_zero_rate() {
    let p = position("GIFT", 5, dec!(0), dec!(100), Market::Domestic);

    let vp = valuate(&p, None);

    assert_eq!(vp.investment, Decimal::ZERO);
    assert_eq!(vp.profit, dec!(500));
    assert_eq!(vp.profit_rate, Decimal::ZERO);
}

#[test]
fn test_valuate_zero_quantity() {
    let p = position("SOLD", 0, dec!(100), dec!(120), Market::Domestic);

    let vp = valuate(&p, Some(dec!(130)));

    assert_eq!(vp.market_value, Decimal::ZERO);
    assert_eq!(vp.profit_rate, Decimal::ZERO);
}

#[test]
fn test_portfolio_mixed_markets() {
    // 10 × 70,000 KRW = 700,000 value, 650,000 cost
    // 10 × 100 USD × 1300 = 1,300,000 value, 1,170,000 cost
    let positions = vec![
        position("005930.KS", 10, dec!(65000), dec!(70000), Market::Domestic),
        position("SPY", 10, dec!(90), dec!(100), Market::Foreign),
    ];

    let valuation = valuate_portfolio(&positions, &HashMap::new(), dec!(1300));

    assert_eq!(valuation.total_value, dec!(2000000));
    assert_eq!(valuation.total_cost, dec!(1820000));
    assert_eq!(valuation.total_profit, dec!(180000));
    assert_eq!(valuation.status, ValuationStatus::Stale);
    assert_eq!(valuation.stale_tickers, vec!["005930.KS", "SPY"]);
}

#[test]
fn test_portfolio_totals_scenario() {
    let positions = vec![
        position("069500.KS", 100, dec!(9500), dec!(9800), Market::Domestic),
        position("QQQ", 10, dec!(100), dec!(110), Market::Foreign),
        position("360750.KS", 40, dec!(10000), dec!(10000), Market::Domestic),
    ];
    let prices = HashMap::from([
        ("069500.KS".to_string(), dec!(10000)),
        ("QQQ".to_string(), dec!(125)),
        ("360750.KS".to_string(), dec!(10000)),
    ]);

    let valuation = valuate_portfolio(&positions, &prices, dec!(1300));

    // 1,000,000 + 1,625,000 + 400,000 against 950,000 + 1,300,000 + 400,000
    assert_eq!(valuation.total_value, dec!(3025000));
    assert_eq!(valuation.total_cost, dec!(2650000));
    assert_eq!(valuation.total_profit, dec!(375000));
    assert_eq!(valuation.profit_rate.round_dp(2), dec!(14.15));
    assert_eq!(valuation.status, ValuationStatus::Live);
    assert!(valuation.stale_tickers.is_empty());
}

#[test]
fn test_padded_stored_ticker_still_gets_the_live_price() {
    let positions = vec![position(" QQQ ", 10, dec!(350), dec!(380), Market::Foreign)];
    let mut prices = HashMap::new();
    prices.insert("QQQ".to_string(), dec!(400));

    let valuation = valuate_portfolio(&positions, &prices, dec!(1300));

    assert_eq!(valuation.positions[0].price, dec!(400));
    assert_eq!(valuation.positions[0].price_source, PriceSource::Live);
    assert!(valuation.stale_tickers.is_empty());
    assert_eq!(valuation.status, ValuationStatus::Live);
}

#[test]
fn test_empty_portfolio() {
    let valuation = valuate_portfolio(&[], &HashMap::new(), dec!(1300));

    assert_eq!(valuation.status, ValuationStatus::Empty);
    assert!(valuation.is_empty());
    assert_eq!(valuation.total_value, Decimal::ZERO);
    assert_eq!(valuation.profit_rate, Decimal::ZERO);
}

#[test]
fn test_totals_helper() {
    let positions = vec![position("A", 1, dec!(10), dec!(12), Market::Domestic)];
    let valuation = valuate_portfolio(&positions, &HashMap::new(), dec!(1300));

    let totals = valuation.totals();
    assert_eq!(totals.total_value, dec!(12));
    assert_eq!(totals.total_cost, dec!(10));
}
