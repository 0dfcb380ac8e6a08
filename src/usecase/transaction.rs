//! Transaction usecase
//!
//! Paginated history of company balance movements.

use std::sync::Arc;

use axum::http::StatusCode;

use crate::domain::{OperationContext, Transaction};
use crate::repository::TransactionRepository;

use super::{with_status, StatusResult};

pub struct TransactionUsecase {
    repository: Arc<dyn TransactionRepository>,
}

impl TransactionUsecase {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    pub async fn fetch(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> StatusResult<Vec<Transaction>> {
        with_status(
            self.repository.fetch(ctx, limit, offset).await,
            StatusCode::INTERNAL_SERVER_ERROR,
        )
    }
}
