//! Postgres adapters
//!
//! sqlx-backed implementations of the repository traits.

mod company;
mod position;
mod transaction;
mod user;

pub use company::PgCompanyRepository;
pub use position::PgPositionRepository;
pub use transaction::PgTransactionRepository;
pub use user::PgUserRepository;

/// Translate usecase pagination into `LIMIT`/`OFFSET` binds.
///
/// A non-positive limit binds `NULL`, which Postgres treats as no limit.
pub(crate) fn page(limit: i64, offset: i64) -> (Option<i64>, i64) {
    let limit = if limit > 0 { Some(limit) } else { None };
    (limit, offset.max(0))
}
