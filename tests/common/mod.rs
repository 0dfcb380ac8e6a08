//! Common test utilities
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use self_payroll::api::{self, AppState};
use self_payroll::domain::{Company, OperationContext, Position, Transaction, TransactionType, User};
use self_payroll::repository::{
    CompanyRepository, PositionRepository, RepositoryError, RepositoryResult,
    TransactionRepository, UserRepository, TOPUP_NOTE,
};

// =========================================================================
// In-memory repositories
// =========================================================================

#[derive(Default)]
struct Tables {
    company: Option<Company>,
    positions: Vec<Position>,
    users: Vec<User>,
    transactions: Vec<Transaction>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn record(&mut self, amount: Decimal, note: &str, kind: TransactionType) {
        let id = self.next_id();
        let now = Utc::now();
        self.transactions.push(Transaction {
            id,
            amount,
            note: note.to_string(),
            kind,
            created_at: now,
            updated_at: now,
        });
    }

    fn resolve(&self, mut user: User) -> User {
        user.position = self
            .positions
            .iter()
            .find(|p| p.id == user.position_id)
            .cloned();
        user
    }
}

/// Every repository trait over one shared set of in-memory tables.
///
/// Follows the Postgres adapters' contracts: singleton company, not-found
/// errors, positive balance movements and `limit <= 0` meaning no limit.
#[derive(Default, Clone)]
pub struct InMemoryRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn company(&self) -> Option<Company> {
        self.tables.lock().unwrap().company.clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.tables.lock().unwrap().transactions.clone()
    }
}

fn paginate<T: Clone>(items: &[T], limit: i64, offset: i64) -> Vec<T> {
    let skipped = items.iter().skip(offset.max(0) as usize);
    if limit > 0 {
        skipped.take(limit as usize).cloned().collect()
    } else {
        skipped.cloned().collect()
    }
}

fn ensure_positive(amount: Decimal) -> RepositoryResult<()> {
    if amount <= Decimal::ZERO {
        return Err(RepositoryError::InvalidAmount(format!(
            "amount must be positive (got {})",
            amount
        )));
    }
    Ok(())
}

#[async_trait]
impl CompanyRepository for InMemoryRepository {
    async fn get(&self, _ctx: &OperationContext) -> RepositoryResult<Company> {
        self.company()
            .ok_or_else(|| RepositoryError::not_found("company", "singleton"))
    }

    async fn create_or_update(
        &self,
        _ctx: &OperationContext,
        company: Company,
    ) -> RepositoryResult<Company> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();

        let saved = match tables.company.take() {
            Some(existing) => Company {
                id: existing.id,
                created_at: existing.created_at,
                updated_at: now,
                ..company
            },
            None => Company {
                id: tables.next_id(),
                created_at: now,
                updated_at: now,
                ..company
            },
        };

        tables.company = Some(saved.clone());
        Ok(saved)
    }

    async fn add_balance(
        &self,
        _ctx: &OperationContext,
        amount: Decimal,
    ) -> RepositoryResult<Company> {
        ensure_positive(amount)?;

        let mut tables = self.tables.lock().unwrap();
        let company = tables
            .company
            .as_mut()
            .ok_or_else(|| RepositoryError::not_found("company", "singleton"))?;

        company.balance += amount;
        company.updated_at = Utc::now();
        let updated = company.clone();

        tables.record(amount, TOPUP_NOTE, TransactionType::Credit);
        Ok(updated)
    }

    async fn debit_balance(
        &self,
        _ctx: &OperationContext,
        amount: Decimal,
        note: &str,
    ) -> RepositoryResult<()> {
        ensure_positive(amount)?;

        let mut tables = self.tables.lock().unwrap();
        let company = tables
            .company
            .as_mut()
            .ok_or_else(|| RepositoryError::not_found("company", "singleton"))?;

        if company.balance < amount {
            return Err(RepositoryError::InsufficientBalance);
        }

        company.balance -= amount;
        company.updated_at = Utc::now();

        tables.record(amount, note, TransactionType::Debit);
        Ok(())
    }
}

#[async_trait]
impl PositionRepository for InMemoryRepository {
    async fn find_by_id(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<Position> {
        let tables = self.tables.lock().unwrap();
        tables
            .positions
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("position", id))
    }

    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Position>> {
        let tables = self.tables.lock().unwrap();
        Ok(paginate(&tables.positions, limit, offset))
    }

    async fn create(
        &self,
        _ctx: &OperationContext,
        position: Position,
    ) -> RepositoryResult<Position> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let saved = Position {
            id: tables.next_id(),
            created_at: now,
            updated_at: now,
            ..position
        };
        tables.positions.push(saved.clone());
        Ok(saved)
    }

    async fn update_by_id(
        &self,
        _ctx: &OperationContext,
        id: i64,
        position: Position,
    ) -> RepositoryResult<Position> {
        let mut tables = self.tables.lock().unwrap();
        let existing = tables
            .positions
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepositoryError::not_found("position", id))?;

        existing.name = position.name;
        existing.salary = position.salary;
        existing.updated_at = Utc::now();
        Ok(existing.clone())
    }

    async fn delete(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.positions.len();
        tables.positions.retain(|p| p.id != id);
        if tables.positions.len() == before {
            return Err(RepositoryError::not_found("position", id));
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn find_by_id(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<User> {
        let tables = self.tables.lock().unwrap();
        let user = tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("user", id))?;
        Ok(tables.resolve(user))
    }

    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(paginate(&tables.users, limit, offset)
            .into_iter()
            .map(|u| tables.resolve(u))
            .collect())
    }

    async fn create(&self, _ctx: &OperationContext, user: User) -> RepositoryResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let saved = User {
            id: tables.next_id(),
            position: None,
            created_at: now,
            updated_at: now,
            ..user
        };
        tables.users.push(saved.clone());
        Ok(saved)
    }

    async fn update_by_id(
        &self,
        _ctx: &OperationContext,
        id: i64,
        user: User,
    ) -> RepositoryResult<User> {
        let mut tables = self.tables.lock().unwrap();
        let existing = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::not_found("user", id))?;

        *existing = User {
            id,
            position: None,
            created_at: existing.created_at,
            updated_at: Utc::now(),
            ..user
        };
        Ok(existing.clone())
    }

    async fn delete(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<()> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        if tables.users.len() == before {
            return Err(RepositoryError::not_found("user", id));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for InMemoryRepository {
    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Transaction>> {
        let tables = self.tables.lock().unwrap();
        let newest_first: Vec<Transaction> = tables.transactions.iter().rev().cloned().collect();
        Ok(paginate(&newest_first, limit, offset))
    }
}

/// Full application router over a fresh in-memory store
pub fn test_app() -> (Router, InMemoryRepository) {
    let repo = InMemoryRepository::new();
    let shared = Arc::new(repo.clone());
    let state = AppState::new(shared.clone(), shared.clone(), shared.clone(), shared);

    (api::build_router(Arc::new(state)), repo)
}

// =========================================================================
// Postgres
// =========================================================================

/// Setup test database - create the tables and truncate them
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("Failed to create schema");
    }

    sqlx::query("TRUNCATE TABLE transactions, users, positions, companies RESTART IDENTITY CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        balance NUMERIC NOT NULL DEFAULT 0,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS positions (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        salary NUMERIC NOT NULL CHECK (salary >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        secret_id TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT NOT NULL,
        address TEXT NOT NULL,
        position_id BIGINT NOT NULL REFERENCES positions (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id BIGSERIAL PRIMARY KEY,
        amount NUMERIC NOT NULL,
        note TEXT NOT NULL,
        type TEXT NOT NULL CHECK (type IN ('debit', 'credit')),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
];
