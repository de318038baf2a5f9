use super::TradeAction;
use crate::portfolio::valuation::ValuedPosition;

/// Picks which member of a category a category-level trade is routed to.
pub trait SelectionPolicy: Send + Sync {
    fn select<'a>(
        &self,
        candidates: &[&'a ValuedPosition],
        action: TradeAction,
    ) -> Option<&'a ValuedPosition>;
}

/// Momentum heuristic: buy more of the best performer, trim the worst.
///
/// Ranks by profit rate only. Not a portfolio-optimal allocator. Ties go to
/// the candidate listed first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MomentumSelection;

impl SelectionPolicy for MomentumSelection {
    fn select<'a>(
        &self,
        candidates: &[&'a ValuedPosition],
        action: TradeAction,
    ) -> Option<&'a ValuedPosition> {
        if action == TradeAction::None {
            return None;
        }
        candidates.iter().copied().fold(None, |picked, candidate| match picked {
            None => Some(candidate),
            Some(current) => {
                let better = match action {
                    TradeAction::Buy => candidate.profit_rate > current.profit_rate,
                    _ => candidate.profit_rate < current.profit_rate,
                };
                Some(if better { candidate } else { current })
            }
        })
    }
}
