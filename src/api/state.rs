//! Shared application state
//!
//! The usecases the handlers dispatch to, built once at startup.

use std::sync::Arc;

use sqlx::PgPool;

use crate::repository::postgres::{
    PgCompanyRepository, PgPositionRepository, PgTransactionRepository, PgUserRepository,
};
use crate::repository::{
    CompanyRepository, PositionRepository, TransactionRepository, UserRepository,
};
use crate::usecase::{CompanyUsecase, PositionUsecase, TransactionUsecase, UserUsecase};

pub struct AppState {
    pub company: CompanyUsecase,
    pub position: PositionUsecase,
    pub user: UserUsecase,
    pub transaction: TransactionUsecase,
}

impl AppState {
    /// Wire the usecases over any set of repositories.
    pub fn new(
        company: Arc<dyn CompanyRepository>,
        positions: Arc<dyn PositionRepository>,
        users: Arc<dyn UserRepository>,
        transactions: Arc<dyn TransactionRepository>,
    ) -> Self {
        Self {
            company: CompanyUsecase::new(company.clone()),
            position: PositionUsecase::new(positions.clone()),
            user: UserUsecase::new(users, positions, company),
            transaction: TransactionUsecase::new(transactions),
        }
    }

    /// Production wiring over the Postgres repositories.
    pub fn from_pool(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgCompanyRepository::new(pool.clone())),
            Arc::new(PgPositionRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgTransactionRepository::new(pool)),
        )
    }
}
