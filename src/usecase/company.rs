//! Company usecase
//!
//! Company profile and balance top-up. Repository errors are passed through
//! untouched; only the HTTP status is decided here.

use std::sync::Arc;

use axum::http::StatusCode;

use crate::domain::{Company, OperationContext};
use crate::repository::CompanyRepository;

use super::{with_status, CompanyRequest, StatusResult, TopupCompanyBalance};

pub struct CompanyUsecase {
    repository: Arc<dyn CompanyRepository>,
}

impl CompanyUsecase {
    pub fn new(repository: Arc<dyn CompanyRepository>) -> Self {
        Self { repository }
    }

    /// Fetch the company profile; any failure is answered with 404
    pub async fn get_company_info(&self, ctx: &OperationContext) -> StatusResult<Company> {
        tracing::debug!(correlation_id = ?ctx.correlation_id, "Loading company info");

        with_status(self.repository.get(ctx).await, StatusCode::NOT_FOUND)
    }

    /// Upsert the company profile from the request fields
    pub async fn create_or_update_company(
        &self,
        ctx: &OperationContext,
        request: CompanyRequest,
    ) -> StatusResult<Company> {
        let company = Company::from(request);

        with_status(
            self.repository.create_or_update(ctx, company).await,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    }

    /// Credit the company balance. Amount validation belongs to the repository.
    pub async fn topup_balance(
        &self,
        ctx: &OperationContext,
        request: TopupCompanyBalance,
    ) -> StatusResult<Company> {
        tracing::info!(
            amount = %request.balance,
            correlation_id = ?ctx.correlation_id,
            "Topping up company balance"
        );

        with_status(
            self.repository.add_balance(ctx, request.balance).await,
            StatusCode::UNPROCESSABLE_ENTITY,
        )
    }
}
