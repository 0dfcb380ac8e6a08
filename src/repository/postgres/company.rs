//! Company repository (Postgres)
//!
//! Balance mutations update `companies` and append to `transactions` in one
//! database transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres};

use crate::domain::{Company, OperationContext, TransactionType};
use crate::repository::{CompanyRepository, RepositoryError, RepositoryResult, TOPUP_NOTE};

#[derive(Debug, sqlx::FromRow)]
struct CompanyRow {
    id: i64,
    name: String,
    address: String,
    balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            balance: row.balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a balance movement inside the caller's transaction
    async fn record_transaction(
        tx: &mut sqlx::Transaction<'_, Postgres>,
        amount: Decimal,
        note: &str,
        kind: TransactionType,
    ) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (amount, note, type)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(amount)
        .bind(note)
        .bind(kind.as_str())
        .execute(&mut **tx)
        .await?;

        Ok(())
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
impl CompanyRepository for PgCompanyRepository {
    async fn get(&self, _ctx: &OperationContext) -> RepositoryResult<Company> {
        let row: Option<CompanyRow> = sqlx::query_as(
            r#"
            SELECT id, name, address, balance, created_at, updated_at
            FROM companies
            ORDER BY id
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(Company::from)
            .ok_or_else(|| RepositoryError::not_found("company", "singleton"))
    }

    async fn create_or_update(
        &self,
        ctx: &OperationContext,
        company: Company,
    ) -> RepositoryResult<Company> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<i64> =
            sqlx::query_scalar("SELECT id FROM companies ORDER BY id LIMIT 1 FOR UPDATE")
                .fetch_optional(&mut *tx)
                .await?;

        let row: CompanyRow = match existing {
            Some(id) => {
                sqlx::query_as(
                    r#"
                    UPDATE companies
                    SET name = $2, address = $3, balance = $4, updated_at = NOW()
                    WHERE id = $1
                    RETURNING id, name, address, balance, created_at, updated_at
                    "#,
                )
                .bind(id)
                .bind(&company.name)
                .bind(&company.address)
                .bind(company.balance)
                .fetch_one(&mut *tx)
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"
                    INSERT INTO companies (name, address, balance)
                    VALUES ($1, $2, $3)
                    RETURNING id, name, address, balance, created_at, updated_at
                    "#,
                )
                .bind(&company.name)
                .bind(&company.address)
                .bind(company.balance)
                .fetch_one(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;

        tracing::debug!(
            company_id = row.id,
            created = existing.is_none(),
            correlation_id = ?ctx.correlation_id,
            "Company saved"
        );

        Ok(row.into())
    }

    async fn add_balance(
        &self,
        ctx: &OperationContext,
        amount: Decimal,
    ) -> RepositoryResult<Company> {
        ensure_positive(amount)?;

        let mut tx = self.pool.begin().await?;

        let row: Option<CompanyRow> = sqlx::query_as(
            r#"
            UPDATE companies
            SET balance = balance + $1, updated_at = NOW()
            WHERE id = (SELECT id FROM companies ORDER BY id LIMIT 1)
            RETURNING id, name, address, balance, created_at, updated_at
            "#,
        )
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await?;

        let row = row.ok_or_else(|| RepositoryError::not_found("company", "singleton"))?;

        Self::record_transaction(&mut tx, amount, TOPUP_NOTE, TransactionType::Credit).await?;

        tx.commit().await?;

        tracing::debug!(
            amount = %amount,
            balance = %row.balance,
            correlation_id = ?ctx.correlation_id,
            "Company balance credited"
        );

        Ok(row.into())
    }

    async fn debit_balance(
        &self,
        ctx: &OperationContext,
        amount: Decimal,
        note: &str,
    ) -> RepositoryResult<()> {
        ensure_positive(amount)?;

        let mut tx = self.pool.begin().await?;

        // Conditional update keeps the balance check and the debit atomic
        let debited: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE companies
            SET balance = balance - $1, updated_at = NOW()
            WHERE id = (SELECT id FROM companies ORDER BY id LIMIT 1)
              AND balance >= $1
            RETURNING id
            "#,
        )
        .bind(amount)
        .fetch_optional(&mut *tx)
        .await?;

        if debited.is_none() {
            let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM companies)")
                .fetch_one(&mut *tx)
                .await?;

            return Err(if exists {
                RepositoryError::InsufficientBalance
            } else {
                RepositoryError::not_found("company", "singleton")
            });
        }

        Self::record_transaction(&mut tx, amount, note, TransactionType::Debit).await?;

        tx.commit().await?;

        tracing::debug!(
            amount = %amount,
            note = note,
            correlation_id = ?ctx.correlation_id,
            "Company balance debited"
        );

        Ok(())
    }
}
