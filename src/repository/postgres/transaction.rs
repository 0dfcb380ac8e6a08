//! Transaction repository (Postgres)
//!
//! Read side only; rows are written by the company repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::page;
use crate::domain::{OperationContext, Transaction, TransactionType};
use crate::repository::{RepositoryError, RepositoryResult, TransactionRepository};

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    amount: Decimal,
    note: String,
    #[sqlx(rename = "type")]
    kind: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = RepositoryError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let kind: TransactionType = row.kind.parse().map_err(RepositoryError::Database)?;

        Ok(Self {
            id: row.id,
            amount: row.amount,
            note: row.note,
            kind,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PgTransactionRepository {
    pool: PgPool,
}

impl PgTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionRepository for PgTransactionRepository {
    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Transaction>> {
        let (limit, offset) = page(limit, offset);

        let rows: Vec<TransactionRow> = sqlx::query_as(
            r#"
            SELECT id, amount, note, type, created_at, updated_at
            FROM transactions
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(kind: &str) -> TransactionRow {
        TransactionRow {
            id: 1,
            amount: dec!(100000),
            note: "user withdraw salary ".to_string(),
            kind: kind.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_with_known_type_converts() {
        let transaction = Transaction::try_from(row("debit")).unwrap();
        assert_eq!(transaction.kind, TransactionType::Debit);
        assert_eq!(transaction.amount, dec!(100000));
    }

    #[test]
    fn test_row_with_unknown_type_is_a_database_error() {
        let err = Transaction::try_from(row("refund")).unwrap_err();
        assert!(matches!(err, RepositoryError::Database(_)));
    }
}
