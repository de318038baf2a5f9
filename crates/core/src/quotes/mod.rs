//! Quote fetching for valuation.
//!
//! Price refresh is an explicit two-step pull: [`QuoteServiceTrait::fetch_quotes`]
//! produces a [`QuoteBatch`] whose price map is then handed to the valuation
//! calculator. Nothing in the engine calls a provider directly.

mod model;
mod service;

pub use model::QuoteBatch;
pub use service::{QuoteService, QuoteServiceTrait};
