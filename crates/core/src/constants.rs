use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Reporting currency every aggregate is expressed in
pub const REPORTING_CURRENCY: &str = "KRW";

/// Currency of FOREIGN market prices
pub const FOREIGN_CURRENCY: &str = "USD";

/// Quote symbol for the USD/KRW rate (KRW per one USD)
pub const USD_KRW_SYMBOL: &str = "KRW=X";

/// Fallback USD/KRW rate when no live rate is available
pub const DEFAULT_EXCHANGE_RATE: Decimal = dec!(1300);

/// Brokerage commission applied to both buys and sells (0.015%)
pub const DEFAULT_COMMISSION_RATE: Decimal = dec!(0.00015);

/// Securities transaction tax applied to sells only (0.23%)
pub const DEFAULT_TRANSACTION_TAX_RATE: Decimal = dec!(0.0023);

/// Minimum value move (reporting currency) that justifies rewriting today's snapshot
pub const SNAPSHOT_VALUE_EPSILON: Decimal = dec!(0.01);

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
