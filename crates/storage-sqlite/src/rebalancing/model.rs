use chrono::NaiveDateTime;
use diesel::prelude::*;

use myfolio_core::rebalancing::RebalancingTarget;

/// One row per user; absent row means the defaults apply.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::rebalancing_targets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RebalancingTargetDB {
    pub user_id: String,
    pub nasdaq100: i32,
    pub sp500: i32,
    pub dividend: i32,
    pub updated_at: NaiveDateTime,
}

impl RebalancingTargetDB {
    pub fn from_domain(
        user_id: &str,
        target: &RebalancingTarget,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            nasdaq100: target.nasdaq100,
            sp500: target.sp500,
            dividend: target.dividend,
            updated_at,
        }
    }
}

impl From<RebalancingTargetDB> for RebalancingTarget {
    fn from(db: RebalancingTargetDB) -> Self {
        RebalancingTarget::new(db.nasdaq100, db.sp500, db.dividend)
    }
}
