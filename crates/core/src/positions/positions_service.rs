use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

use super::{NewPosition, Position, PositionRepositoryTrait, PositionServiceTrait, PositionUpdate};
use crate::errors::{DatabaseError, Error, Result};

/// Service for managing positions.
pub struct PositionService {
    repository: Arc<dyn PositionRepositoryTrait>,
}

impl PositionService {
    pub fn new(repository: Arc<dyn PositionRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PositionServiceTrait for PositionService {
    async fn create_position(&self, new_position: NewPosition) -> Result<Position> {
        new_position.validate()?;
        debug!(
            "Creating position {} for user {}",
            new_position.ticker, new_position.user_id
        );
        self.repository.create(new_position).await
    }

    async fn update_position(&self, position_update: PositionUpdate) -> Result<Position> {
        position_update.validate()?;
        self.repository.update(position_update).await
    }

    async fn delete_position(&self, position_id: &str) -> Result<()> {
        let deleted = self.repository.delete(position_id).await?;
        if deleted == 0 {
            return Err(Error::Database(DatabaseError::NotFound(format!(
                "Position {}",
                position_id
            ))));
        }
        Ok(())
    }

    fn get_positions(&self, user_id: &str) -> Result<Vec<Position>> {
        self.repository.list(user_id)
    }
}
