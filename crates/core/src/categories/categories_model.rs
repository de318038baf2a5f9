use serde::{Deserialize, Serialize};
use std::fmt;

/// Investment category a position can belong to.
///
/// The set is closed. Positions carry an optional small integer id; anything
/// outside the catalog resolves to [`Category::Uncategorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Nasdaq100,
    Sp500,
    Dividend,
    Uncategorized,
}

impl Category {
    /// Categories that can carry a rebalancing target, in display order.
    pub const TARGETABLE: [Category; 3] = [Category::Nasdaq100, Category::Sp500, Category::Dividend];

    /// Resolves a stored category id.
    pub fn from_id(id: Option<i32>) -> Self {
        match id {
            Some(1) => Category::Nasdaq100,
            Some(2) => Category::Sp500,
            Some(3) => Category::Dividend,
            _ => Category::Uncategorized,
        }
    }

    /// Stored id, `None` for the uncategorized bucket.
    pub fn id(&self) -> Option<i32> {
        match self {
            Category::Nasdaq100 => Some(1),
            Category::Sp500 => Some(2),
            Category::Dividend => Some(3),
            Category::Uncategorized => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Nasdaq100 => "Nasdaq 100",
            Category::Sp500 => "S&P 500",
            Category::Dividend => "Dividend",
            Category::Uncategorized => "Uncategorized",
        }
    }

    pub fn is_targetable(&self) -> bool {
        !matches!(self, Category::Uncategorized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
