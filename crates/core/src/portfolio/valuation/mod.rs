pub mod valuation_calculator;
pub mod valuation_model;
pub mod valuation_service;

pub use valuation_calculator::*;
pub use valuation_model::*;
pub use valuation_service::{ValuationService, ValuationServiceTrait};

#[cfg(test)]
mod valuation_calculator_tests;

#[cfg(test)]
mod valuation_service_tests;
