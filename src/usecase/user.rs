//! User usecase
//!
//! Employee management and salary withdrawal. Composes the user, position
//! and company repositories.

use std::sync::Arc;

use crate::domain::{DomainError, OperationContext, User};
use crate::error::{AppError, AppResult};
use crate::repository::{CompanyRepository, PositionRepository, UserRepository};

use super::{UserRequest, WithdrawRequest};

/// Note recorded on the debit transaction of a salary withdrawal
pub fn withdraw_note(user_name: &str) -> String {
    format!("{} withdraw salary ", user_name)
}

pub struct UserUsecase {
    users: Arc<dyn UserRepository>,
    positions: Arc<dyn PositionRepository>,
    company: Arc<dyn CompanyRepository>,
}

impl UserUsecase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        positions: Arc<dyn PositionRepository>,
        company: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            users,
            positions,
            company,
        }
    }

    pub async fn get_by_id(&self, ctx: &OperationContext, id: i64) -> AppResult<User> {
        Ok(self.users.find_by_id(ctx, id).await?)
    }

    pub async fn fetch_user(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<User>> {
        Ok(self.users.fetch(ctx, limit, offset).await?)
    }

    pub async fn destroy_user(&self, ctx: &OperationContext, id: i64) -> AppResult<()> {
        Ok(self.users.delete(ctx, id).await?)
    }

    /// Overwrite an existing user with the request fields.
    pub async fn edit_user(
        &self,
        ctx: &OperationContext,
        id: i64,
        request: UserRequest,
    ) -> AppResult<User> {
        self.users.find_by_id(ctx, id).await?;

        Ok(self.users.update_by_id(ctx, id, User::from(request)).await?)
    }

    /// Create a user after checking that the referenced position exists.
    pub async fn store_user(&self, ctx: &OperationContext, request: UserRequest) -> AppResult<User> {
        if let Err(err) = self.positions.find_by_id(ctx, request.position_id).await {
            if err.is_not_found() {
                tracing::warn!(
                    position_id = request.position_id,
                    correlation_id = ?ctx.correlation_id,
                    "Rejected user with unknown position"
                );
                return Err(DomainError::InvalidPositionId.into());
            }
            return Err(err.into());
        }

        Ok(self.users.create(ctx, User::from(request)).await?)
    }

    /// Pay out the user's salary from the company balance.
    ///
    /// The debit only happens once the user is loaded and the secret id
    /// matches.
    pub async fn withdraw_salary(
        &self,
        ctx: &OperationContext,
        request: WithdrawRequest,
    ) -> AppResult<()> {
        let user = self.users.find_by_id(ctx, request.id).await?;

        // Secret ids are credentials: exact, case-sensitive match only
        if user.secret_id != request.secret_id {
            tracing::warn!(
                user_id = user.id,
                correlation_id = ?ctx.correlation_id,
                "Salary withdrawal rejected: secret id mismatch"
            );
            return Err(DomainError::InvalidSecretId.into());
        }

        let salary = user.salary().ok_or_else(|| {
            AppError::Internal(format!("position of user {} was not loaded", user.id))
        })?;

        self.company
            .debit_balance(ctx, salary, &withdraw_note(&user.name))
            .await?;

        tracing::info!(
            user_id = user.id,
            amount = %salary,
            correlation_id = ?ctx.correlation_id,
            "Salary withdrawn"
        );

        Ok(())
    }
}
