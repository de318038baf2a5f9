use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

/// Timezone the snapshot calendar follows.
/// Snapshots are dated by the domestic market's calendar day.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::Asia::Seoul;

/// Converts a UTC instant to a valuation date in the given timezone.
///
/// This is the single source of truth for converting instants to domain dates.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Today's date in the default valuation timezone.
pub fn valuation_date_today() -> NaiveDate {
    valuation_date_from_utc(Utc::now(), DEFAULT_VALUATION_TZ)
}
