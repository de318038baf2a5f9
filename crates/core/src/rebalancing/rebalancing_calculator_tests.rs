use super::*;
use crate::categories::Category;
use crate::portfolio::valuation::{valuate, ValuedPosition};
use crate::positions::{Market, Position};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const RATE: Decimal = dec!(1300);

fn holding(
    ticker: &str,
    category_id: Option<i32>,
    quantity: u64,
    average_cost: Decimal,
    price: Decimal,
    market: Market,
) -> ValuedPosition {
    valuate(
        &Position {
            id: format!("pos-{}", ticker),
            user_id: "u1".to_string(),
            ticker: ticker.to_string(),
            display_name: ticker.to_string(),
            quantity,
            average_cost,
            current_price: price,
            market,
            category_id,
        },
        None,
    )
}

/// 1,000,000 portfolio split 60 / 25 / 15.
fn sixty_twenty_five_fifteen() -> Vec<ValuedPosition> {
    vec![
        holding("NQ-A", Some(1), 40, dec!(9000), dec!(10000), Market::Domestic),
        holding("NQ-B", Some(1), 20, dec!(11000), dec!(10000), Market::Domestic),
        holding("SP-A", Some(2), 25, dec!(9000), dec!(10000), Market::Domestic),
        holding("DIV-A", Some(3), 15, dec!(9500), dec!(10000), Market::Domestic),
    ]
}

fn targets() -> RebalancingTarget {
    RebalancingTarget::new(50, 30, 20)
}

// ============================================================================
// Category diffs
// ============================================================================

#[test]
fn test_category_diffs_scenario() {
    let diffs = calculate_category_diffs(&sixty_twenty_five_fifteen(), &targets(), RATE);

    assert_eq!(diffs.len(), 3);
    assert_eq!(diffs[0].category, Category::Nasdaq100);
    assert_eq!(diffs[0].current_value, dec!(600000));
    assert_eq!(diffs[0].target_value, dec!(500000));
    assert_eq!(diffs[0].diff, dec!(-100000));
    assert_eq!(diffs[0].action, TradeAction::Sell);
    assert_eq!(diffs[0].current_percent, dec!(60));
    assert_eq!(diffs[0].target_percent, dec!(50));

    assert_eq!(diffs[1].diff, dec!(50000));
    assert_eq!(diffs[1].action, TradeAction::Buy);
    assert_eq!(diffs[2].diff, dec!(50000));
    assert_eq!(diffs[2].action, TradeAction::Buy);
}

#[test]
fn test_targets_not_summing_to_100_are_used_literally() {
    let diffs = calculate_category_diffs(
        &sixty_twenty_five_fifteen(),
        &RebalancingTarget::new(50, 30, 30),
        RATE,
    );

    assert_eq!(diffs[2].target_value, dec!(300000));
    assert_eq!(diffs[2].diff, dec!(150000));
}

#[test]
fn test_uncategorized_counts_toward_total_only() {
    let positions = vec![
        holding("NQ", Some(1), 50, dec!(10000), dec!(10000), Market::Domestic),
        holding("MISC", None, 50, dec!(10000), dec!(10000), Market::Domestic),
    ];

    let diffs = calculate_category_diffs(&positions, &RebalancingTarget::new(100, 0, 0), RATE);

    assert!(diffs.iter().all(|d| d.category != Category::Uncategorized));
    assert_eq!(diffs[0].current_value, dec!(500000));
    assert_eq!(diffs[0].target_value, dec!(1000000));
    assert_eq!(diffs[0].diff, dec!(500000));
}

// ============================================================================
// Suggestions
// ============================================================================

#[test]
fn test_suggestions_scenario() {
    let suggestions = compute_suggestions(&sixty_twenty_five_fifteen(), &targets(), RATE);

    assert_eq!(suggestions.len(), 3);

    // NQ-B has the lower profit rate, so it is trimmed
    assert_eq!(suggestions[0].ticker, "NQ-B");
    assert_eq!(suggestions[0].action, TradeAction::Sell);
    assert_eq!(suggestions[0].quantity, 10);
    assert_eq!(suggestions[0].amount, dec!(100000));
    assert_eq!(suggestions[0].trade_value, dec!(100000));

    assert_eq!(suggestions[1].ticker, "SP-A");
    assert_eq!(suggestions[1].action, TradeAction::Buy);
    assert_eq!(suggestions[1].quantity, 5);

    assert_eq!(suggestions[2].ticker, "DIV-A");
    assert_eq!(suggestions[2].quantity, 5);
}

#[test]
fn test_buy_picks_highest_profit_rate() {
    let positions = vec![
        holding("NQ-LOW", Some(1), 10, dec!(10000), dec!(10000), Market::Domestic),
        holding("NQ-HIGH", Some(1), 10, dec!(5000), dec!(10000), Market::Domestic),
        holding("SP", Some(2), 80, dec!(10000), dec!(10000), Market::Domestic),
    ];

    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(50, 50, 0), RATE);

    let buy = suggestions
        .iter()
        .find(|s| s.action == TradeAction::Buy)
        .unwrap();
    assert_eq!(buy.ticker, "NQ-HIGH");
    assert_eq!(buy.quantity, 30);
}

#[test]
fn test_equal_profit_rates_pick_first_listed() {
    let positions = vec![
        holding("FIRST", Some(1), 10, dec!(10000), dec!(10000), Market::Domestic),
        holding("SECOND", Some(1), 10, dec!(10000), dec!(10000), Market::Domestic),
        holding("SP", Some(2), 80, dec!(10000), dec!(10000), Market::Domestic),
    ];

    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(50, 50, 0), RATE);

    assert_eq!(suggestions[0].ticker, "FIRST");
}

#[test]
fn test_no_op_when_already_on_target() {
    let positions = vec![
        holding("NQ", Some(1), 50, dec!(9000), dec!(10000), Market::Domestic),
        holding("SP", Some(2), 30, dec!(9000), dec!(10000), Market::Domestic),
        holding("DIV", Some(3), 20, dec!(9000), dec!(10000), Market::Domestic),
    ];

    assert!(compute_suggestions(&positions, &targets(), RATE).is_empty());
}

#[test]
fn test_sell_is_capped_at_held_quantity() {
    let positions = vec![
        holding("NQ-SMALL", Some(1), 2, dec!(20000), dec!(10000), Market::Domestic),
        holding("NQ-BIG", Some(1), 58, dec!(5000), dec!(10000), Market::Domestic),
        holding("SP", Some(2), 40, dec!(10000), dec!(10000), Market::Domestic),
    ];

    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(0, 100, 0), RATE);

    let sell = suggestions
        .iter()
        .find(|s| s.action == TradeAction::Sell)
        .unwrap();
    assert_eq!(sell.ticker, "NQ-SMALL");
    assert_eq!(sell.quantity, 2);
    assert_eq!(sell.amount, dec!(600000));
    assert_eq!(sell.trade_value, dec!(20000));
}

#[test]
fn test_less_than_one_share_is_suppressed() {
    let positions = vec![
        holding("NQ", Some(1), 50, dec!(10000), dec!(10000), Market::Domestic),
        holding("SP", Some(2), 1, dec!(490000), dec!(495000), Market::Domestic),
    ];

    // total 995,000; target 50% each: NQ sells 2,500, SP buys 2,500
    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(50, 50, 0), RATE);

    assert!(suggestions.is_empty());
}

#[test]
fn test_foreign_quantity_uses_normalized_price() {
    let positions = vec![
        holding("QQQ", Some(1), 10, dec!(10), dec!(10), Market::Foreign),
        holding("SPY", Some(2), 10, dec!(10), dec!(10), Market::Foreign),
        holding("KR-DIV", Some(3), 10, dec!(5000), dec!(5000), Market::Domestic),
    ];

    // 130,000 + 130,000 + 50,000 = 310,000. Nasdaq target 100% buys 180,000
    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(100, 0, 0), RATE);

    let buy = suggestions.iter().find(|s| s.ticker == "QQQ").unwrap();
    // 180,000 / (10 × 1300) = 13.85 -> 13 shares
    assert_eq!(buy.quantity, 13);
    assert_eq!(buy.current_price, dec!(10));
    assert_eq!(buy.trade_value, dec!(169000));
}

#[test]
fn test_category_without_members_gets_no_suggestion() {
    let positions = vec![holding(
        "NQ",
        Some(1),
        100,
        dec!(10000),
        dec!(10000),
        Market::Domestic,
    )];

    let suggestions = compute_suggestions(&positions, &targets(), RATE);

    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].action, TradeAction::Sell);
}

#[test]
fn test_zero_price_member_is_skipped() {
    let positions = vec![
        holding("NQ", Some(1), 10, dec!(10000), dec!(0), Market::Domestic),
        holding("SP", Some(2), 10, dec!(10000), dec!(10000), Market::Domestic),
    ];

    let suggestions = compute_suggestions(&positions, &RebalancingTarget::new(50, 50, 0), RATE);

    assert!(suggestions.iter().all(|s| s.ticker != "NQ"));
}

struct AlwaysLast;

impl SelectionPolicy for AlwaysLast {
    fn select<'a>(
        &self,
        candidates: &[&'a ValuedPosition],
        _action: TradeAction,
    ) -> Option<&'a ValuedPosition> {
        candidates.last().copied()
    }
}

#[test]
fn test_selection_policy_is_replaceable() {
    let engine = RebalancingEngine::default().with_policy(Box::new(AlwaysLast));

    let suggestions = engine.compute_suggestions(&sixty_twenty_five_fifteen(), &targets(), RATE);

    assert_eq!(suggestions[0].ticker, "NQ-B");
    let positions = vec![
        holding("NQ-B", Some(1), 20, dec!(11000), dec!(10000), Market::Domestic),
        holding("NQ-A", Some(1), 40, dec!(9000), dec!(10000), Market::Domestic),
        holding("SP-A", Some(2), 25, dec!(9000), dec!(10000), Market::Domestic),
        holding("DIV-A", Some(3), 15, dec!(9500), dec!(10000), Market::Domestic),
    ];
    let suggestions = engine.compute_suggestions(&positions, &targets(), RATE);
    assert_eq!(suggestions[0].ticker, "NQ-A");
}

// ============================================================================
// Simulation
// ============================================================================

#[test]
fn test_simulation_costs_and_projection() {
    let simulation = simulate(&sixty_twenty_five_fifteen(), &targets(), RATE);

    // sell 100,000 × 0.00245 + two buys of 50,000 × 0.00015
    assert_eq!(simulation.total_trading_cost, dec!(260));
    assert_eq!(simulation.current_total_value, dec!(1000000));
    assert_eq!(simulation.projected_total_value, dec!(999740));

    let projected = &simulation.projected_allocations;
    assert_eq!(projected.len(), 3);
    assert_eq!(projected[0].category, Category::Nasdaq100);
    assert_eq!(projected[0].value, dec!(499870));
    assert_eq!(projected[0].percentage, dec!(50));
    assert_eq!(projected[2].value, dec!(199948));
}

#[test]
fn test_simulation_costs_the_full_suggested_amount() {
    // 3,000,000 vs 7,000,000 at 50/50: buy 2,000,000 of A (one share of 1,500,000),
    // sell 2,000,000 of B (two shares)
    let positions = vec![
        holding("A", Some(1), 2, dec!(1500000), dec!(1500000), Market::Domestic),
        holding("B", Some(2), 7, dec!(1000000), dec!(1000000), Market::Domestic),
    ];
    let targets = RebalancingTarget::new(50, 50, 0);

    let simulation = simulate(&positions, &targets, RATE);

    let buy = simulation
        .suggestions
        .iter()
        .find(|s| s.action == TradeAction::Buy)
        .unwrap();
    assert_eq!(buy.amount, dec!(2000000));
    assert_eq!(buy.quantity, 1);
    assert_eq!(buy.trade_value, dec!(1500000));
    // 2,000,000 × 0.00015 + 2,000,000 × 0.00245
    assert_eq!(simulation.total_trading_cost, dec!(5200));
    assert_eq!(simulation.projected_total_value, dec!(9994800));
}

#[test]
fn test_simulation_can_cost_executable_trade_value() {
    let positions = vec![
        holding("A", Some(1), 2, dec!(1500000), dec!(1500000), Market::Domestic),
        holding("B", Some(2), 7, dec!(1000000), dec!(1000000), Market::Domestic),
    ];
    let engine = RebalancingEngine::default().with_cost_basis(CostBasis::TradeValue);

    let simulation = engine.simulate(&positions, &RebalancingTarget::new(50, 50, 0), RATE);

    // 1,500,000 × 0.00015 + 2,000,000 × 0.00245
    assert_eq!(simulation.total_trading_cost, dec!(5125));
}

#[test]
fn test_simulation_uses_overridden_costs() {
    let engine = RebalancingEngine::new(TradingCosts::new(dec!(0), dec!(0)).unwrap());

    let simulation = engine.simulate(&sixty_twenty_five_fifteen(), &targets(), RATE);

    assert_eq!(simulation.total_trading_cost, Decimal::ZERO);
    assert_eq!(simulation.projected_total_value, dec!(1000000));
}

#[test]
fn test_simulation_does_not_touch_holdings() {
    let positions = sixty_twenty_five_fifteen();
    let before = positions.clone();

    let _ = simulate(&positions, &targets(), RATE);

    assert_eq!(positions, before);
}

#[test]
fn test_empty_portfolio() {
    let simulation = simulate(&[], &targets(), RATE);

    assert!(simulation.suggestions.is_empty());
    assert_eq!(simulation.total_trading_cost, Decimal::ZERO);
    assert_eq!(simulation.projected_total_value, Decimal::ZERO);
    assert!(simulation
        .category_diffs
        .iter()
        .all(|d| d.action == TradeAction::None));
}

#[test]
fn test_presets_and_defaults() {
    assert_eq!(RebalancingTarget::default(), RebalancingTarget::new(50, 30, 20));
    for preset in RebalancingPreset::ALL {
        assert_eq!(preset.targets().total(), 100);
    }
    assert_eq!(
        RebalancingPreset::Growth.targets(),
        RebalancingTarget::new(70, 20, 10)
    );
    assert_eq!(RebalancingTarget::new(60, 30, 30).total(), 120);
    assert_eq!(
        RebalancingTarget::default().percent_for(Category::Uncategorized),
        None
    );
}
