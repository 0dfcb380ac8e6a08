//! Position repository (Postgres)

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::page;
use crate::domain::{OperationContext, Position};
use crate::repository::{PositionRepository, RepositoryError, RepositoryResult};

#[derive(Debug, sqlx::FromRow)]
struct PositionRow {
    id: i64,
    name: String,
    salary: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PositionRow> for Position {
    fn from(row: PositionRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            salary: row.salary,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgPositionRepository {
    pool: PgPool,
}

impl PgPositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PositionRepository for PgPositionRepository {
    async fn find_by_id(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<Position> {
        let row: Option<PositionRow> = sqlx::query_as(
            r#"
            SELECT id, name, salary, created_at, updated_at
            FROM positions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Position::from)
            .ok_or_else(|| RepositoryError::not_found("position", id))
    }

    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<Position>> {
        let (limit, offset) = page(limit, offset);

        let rows: Vec<PositionRow> = sqlx::query_as(
            r#"
            SELECT id, name, salary, created_at, updated_at
            FROM positions
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Position::from).collect())
    }

    async fn create(
        &self,
        ctx: &OperationContext,
        position: Position,
    ) -> RepositoryResult<Position> {
        let row: PositionRow = sqlx::query_as(
            r#"
            INSERT INTO positions (name, salary)
            VALUES ($1, $2)
            RETURNING id, name, salary, created_at, updated_at
            "#,
        )
        .bind(&position.name)
        .bind(position.salary)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(position_id = row.id, correlation_id = ?ctx.correlation_id, "Position created");

        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        _ctx: &OperationContext,
        id: i64,
        position: Position,
    ) -> RepositoryResult<Position> {
        let row: Option<PositionRow> = sqlx::query_as(
            r#"
            UPDATE positions
            SET name = $2, salary = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, salary, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&position.name)
        .bind(position.salary)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Position::from)
            .ok_or_else(|| RepositoryError::not_found("position", id))
    }

    async fn delete(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<()> {
        let rows_affected = sqlx::query("DELETE FROM positions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(RepositoryError::not_found("position", id));
        }

        Ok(())
    }
}
