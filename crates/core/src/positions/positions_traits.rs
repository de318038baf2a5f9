//! Repository and service traits for positions.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::{NewPosition, Position, PositionUpdate};
use crate::errors::Result;

/// Trait defining the contract for position repository operations.
#[async_trait]
pub trait PositionRepositoryTrait: Send + Sync {
    async fn create(&self, new_position: NewPosition) -> Result<Position>;
    async fn update(&self, position_update: PositionUpdate) -> Result<Position>;
    async fn delete(&self, position_id: &str) -> Result<usize>;

    /// Overwrites the last-known price of every position holding one of the tickers.
    async fn update_current_prices(&self, prices: &HashMap<String, Decimal>) -> Result<usize>;

    /// Same as [`update_current_prices`](Self::update_current_prices), limited
    /// to the positions owned by `user_id`.
    async fn update_current_prices_for_user(
        &self,
        user_id: &str,
        prices: &HashMap<String, Decimal>,
    ) -> Result<usize>;

    fn get_by_id(&self, position_id: &str) -> Result<Position>;
    fn list(&self, user_id: &str) -> Result<Vec<Position>>;

    /// Users owning at least one position.
    fn list_user_ids(&self) -> Result<Vec<String>>;
}

/// Trait defining the contract for position service operations.
#[async_trait]
pub trait PositionServiceTrait: Send + Sync {
    async fn create_position(&self, new_position: NewPosition) -> Result<Position>;
    async fn update_position(&self, position_update: PositionUpdate) -> Result<Position>;
    async fn delete_position(&self, position_id: &str) -> Result<()>;
    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>>;
}
