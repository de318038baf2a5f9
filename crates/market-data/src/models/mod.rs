//! Market data models
//!
//! - `quote` - Latest quote for a ticker (Quote)

mod quote;

pub use quote::Quote;
