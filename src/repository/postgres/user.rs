//! User repository (Postgres)
//!
//! Lookups join `positions` so the returned user carries its position.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use super::page;
use crate::domain::{OperationContext, Position, User};
use crate::repository::{RepositoryError, RepositoryResult, UserRepository};

const USER_WITH_POSITION: &str = r#"
    SELECT
        u.id, u.secret_id, u.name, u.email, u.phone, u.address, u.position_id,
        u.created_at, u.updated_at,
        p.name AS position_name,
        p.salary AS position_salary,
        p.created_at AS position_created_at,
        p.updated_at AS position_updated_at
    FROM users u
    LEFT JOIN positions p ON p.id = u.position_id
"#;

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    secret_id: String,
    name: String,
    email: String,
    phone: String,
    address: String,
    position_id: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[sqlx(default)]
    position_name: Option<String>,
    #[sqlx(default)]
    position_salary: Option<Decimal>,
    #[sqlx(default)]
    position_created_at: Option<DateTime<Utc>>,
    #[sqlx(default)]
    position_updated_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let position = match (
            row.position_name,
            row.position_salary,
            row.position_created_at,
            row.position_updated_at,
        ) {
            (Some(name), Some(salary), Some(created_at), Some(updated_at)) => Some(Position {
                id: row.position_id,
                name,
                salary,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            secret_id: row.secret_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            position_id: row.position_id,
            position,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<User> {
        let query = format!("{} WHERE u.id = $1", USER_WITH_POSITION);

        let row: Option<UserRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::from)
            .ok_or_else(|| RepositoryError::not_found("user", id))
    }

    async fn fetch(
        &self,
        _ctx: &OperationContext,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<Vec<User>> {
        let (limit, offset) = page(limit, offset);
        let query = format!("{} ORDER BY u.id LIMIT $1 OFFSET $2", USER_WITH_POSITION);

        let rows: Vec<UserRow> = sqlx::query_as(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn create(&self, ctx: &OperationContext, user: User) -> RepositoryResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO users (secret_id, name, email, phone, address, position_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, secret_id, name, email, phone, address, position_id,
                      created_at, updated_at
            "#,
        )
        .bind(&user.secret_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.position_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(user_id = row.id, correlation_id = ?ctx.correlation_id, "User created");

        Ok(row.into())
    }

    async fn update_by_id(
        &self,
        _ctx: &OperationContext,
        id: i64,
        user: User,
    ) -> RepositoryResult<User> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            UPDATE users
            SET secret_id = $2, name = $3, email = $4, phone = $5, address = $6,
                position_id = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, secret_id, name, email, phone, address, position_id,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&user.secret_id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.position_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::from)
            .ok_or_else(|| RepositoryError::not_found("user", id))
    }

    async fn delete(&self, _ctx: &OperationContext, id: i64) -> RepositoryResult<()> {
        let rows_affected = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(RepositoryError::not_found("user", id));
        }

        Ok(())
    }
}
