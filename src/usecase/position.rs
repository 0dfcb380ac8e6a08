//! Position usecase

use std::sync::Arc;

use crate::domain::{OperationContext, Position};
use crate::error::AppResult;
use crate::repository::PositionRepository;

use super::PositionRequest;

pub struct PositionUsecase {
    repository: Arc<dyn PositionRepository>,
}

impl PositionUsecase {
    pub fn new(repository: Arc<dyn PositionRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_id(&self, ctx: &OperationContext, id: i64) -> AppResult<Position> {
        Ok(self.repository.find_by_id(ctx, id).await?)
    }

    pub async fn fetch_position(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<Position>> {
        Ok(self.repository.fetch(ctx, limit, offset).await?)
    }

    pub async fn destroy_position(&self, ctx: &OperationContext, id: i64) -> AppResult<()> {
        Ok(self.repository.delete(ctx, id).await?)
    }

    /// Replace name and salary of an existing position.
    ///
    /// The lookup error is returned as-is and no update is attempted.
    pub async fn edit_position(
        &self,
        ctx: &OperationContext,
        id: i64,
        request: PositionRequest,
    ) -> AppResult<Position> {
        self.repository.find_by_id(ctx, id).await?;

        Ok(self
            .repository
            .update_by_id(ctx, id, Position::from(request))
            .await?)
    }

    pub async fn store_position(
        &self,
        ctx: &OperationContext,
        request: PositionRequest,
    ) -> AppResult<Position> {
        Ok(self.repository.create(ctx, Position::from(request)).await?)
    }
}
