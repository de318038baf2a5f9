use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{PortfolioValuation, PriceSource, ValuationStatus, ValuedPosition};
use crate::fx::to_reporting_currency;
use crate::positions::Position;

/// `profit / investment × 100`, or 0 when nothing was invested.
pub fn profit_rate(profit: Decimal, investment: Decimal) -> Decimal {
    if investment.is_zero() {
        return Decimal::ZERO;
    }
    profit / investment * Decimal::ONE_HUNDRED
}

/// Values a single position.
///
/// Uses `current_price` when it is a positive fresh quote, otherwise the
/// position's stored price (stale but available).
pub fn valuate(position: &Position, current_price: Option<Decimal>) -> ValuedPosition {
    let (price, price_source) = match current_price {
        Some(price) if price > Decimal::ZERO => (price, PriceSource::Live),
        _ => (position.current_price, PriceSource::LastKnown),
    };

    let quantity = Decimal::from(position.quantity);
    let market_value = quantity * price;
    let investment = quantity * position.average_cost;
    let profit = market_value - investment;

    ValuedPosition {
        position: position.clone(),
        price,
        price_source,
        market_value,
        investment,
        profit,
        profit_rate: profit_rate(profit, investment),
    }
}

/// Values every position against a ticker to price map.
///
/// Price map keys are trimmed tickers, as produced by the quote service.
pub fn valuate_positions(
    positions: &[Position],
    prices: &HashMap<String, Decimal>,
) -> Vec<ValuedPosition> {
    positions
        .iter()
        .map(|p| valuate(p, prices.get(p.ticker.trim()).copied()))
        .collect()
}

/// Sums valued positions into reporting-currency value and cost.
pub fn total_in_reporting_currency(
    valued_positions: &[ValuedPosition],
    exchange_rate: Decimal,
) -> (Decimal, Decimal) {
    valued_positions
        .iter()
        .fold((Decimal::ZERO, Decimal::ZERO), |(value, cost), vp| {
            let market = vp.position.market;
            (
                value + to_reporting_currency(vp.market_value, market, exchange_rate),
                cost + to_reporting_currency(vp.investment, market, exchange_rate),
            )
        })
}

/// Values a whole portfolio and reports which tickers were priced from stale data.
pub fn valuate_portfolio(
    positions: &[Position],
    prices: &HashMap<String, Decimal>,
    exchange_rate: Decimal,
) -> PortfolioValuation {
    let valued = valuate_positions(positions, prices);
    let (total_value, total_cost) = total_in_reporting_currency(&valued, exchange_rate);
    let total_profit = total_value - total_cost;

    let mut stale_tickers: Vec<String> = Vec::new();
    for vp in valued
        .iter()
        .filter(|vp| vp.price_source == PriceSource::LastKnown)
    {
        if !stale_tickers.contains(&vp.position.ticker) {
            stale_tickers.push(vp.position.ticker.clone());
        }
    }

    let status = if valued.is_empty() {
        ValuationStatus::Empty
    } else if stale_tickers.is_empty() {
        ValuationStatus::Live
    } else {
        ValuationStatus::Stale
    };

    debug!(
        "Valued {} positions: value {} cost {} ({:?})",
        valued.len(),
        total_value,
        total_cost,
        status
    );

    PortfolioValuation {
        positions: valued,
        total_value,
        total_cost,
        total_profit,
        profit_rate: profit_rate(total_profit, total_cost),
        exchange_rate,
        stale_tickers,
        status,
    }
}
