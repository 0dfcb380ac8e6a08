//! Repository module
//!
//! Persistence ports for the payroll entities. The usecases only ever see
//! these traits; `postgres` holds the production adapters.

mod error;
pub mod postgres;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{Company, OperationContext, Position, Transaction, User};

pub use error::{RepositoryError, RepositoryResult};

/// Note recorded with every balance top-up
pub const TOPUP_NOTE: &str = "topup balance";

/// Access to the (single) company record and its balance.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn get(&self, ctx: &OperationContext) -> RepositoryResult<Company>;

    /// Insert the company if none exists yet, otherwise overwrite it.
    async fn create_or_update(
        &self,
        ctx: &OperationContext,
        company: Company,
    ) -> RepositoryResult<Company>;

    /// Credit the balance and record a credit transaction.
    async fn add_balance(&self, ctx: &OperationContext, amount: Decimal)
        -> RepositoryResult<Company>;

    /// Debit the balance and record a debit transaction carrying `note`.
    ///
    /// Both effects happen atomically or not at all.
    async fn debit_balance(
        &self,
        ctx: &OperationContext,
        amount: Decimal,
        note: &str,
    ) -> RepositoryResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    async fn find_by_id(&self, ctx: &OperationContext, id: i64) -> RepositoryResult<Position>;

    async fn fetch(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Position>>;

    async fn create(&self, ctx: &OperationContext, position: Position)
        -> RepositoryResult<Position>;

    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: i64,
        position: Position,
    ) -> RepositoryResult<Position>;

    async fn delete(&self, ctx: &OperationContext, id: i64) -> RepositoryResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Load a user with its position resolved.
    async fn find_by_id(&self, ctx: &OperationContext, id: i64) -> RepositoryResult<User>;

    async fn fetch(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<User>>;

    async fn create(&self, ctx: &OperationContext, user: User) -> RepositoryResult<User>;

    async fn update_by_id(
        &self,
        ctx: &OperationContext,
        id: i64,
        user: User,
    ) -> RepositoryResult<User>;

    async fn delete(&self, ctx: &OperationContext, id: i64) -> RepositoryResult<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Newest transactions first.
    async fn fetch(
        &self,
        ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Transaction>>;
}
