//! Usecases module
//!
//! Application operations. Each usecase validates a decoded request,
//! coordinates one or more repositories and reports the outcome to the
//! transport layer.

mod company;
mod position;
mod requests;
mod transaction;
mod user;


use axum::http::StatusCode;

use crate::error::AppError;
use crate::repository::RepositoryResult;

pub use company::CompanyUsecase;
pub use position::PositionUsecase;
pub use requests::*;
pub use transaction::TransactionUsecase;
pub use user::{withdraw_note, UserUsecase};

/// Outcome of a usecase that also decides the HTTP status to answer with.
pub type StatusResult<T> = Result<(T, StatusCode), (StatusCode, AppError)>;

/// Attach the success status (200) or the operation's failure status to a
/// repository result, leaving the value or error itself untouched.
pub(crate) fn with_status<T>(result: RepositoryResult<T>, failure: StatusCode) -> StatusResult<T> {
    match result {
        Ok(value) => Ok((value, StatusCode::OK)),
        Err(err) => Err((failure, AppError::Repository(err))),
    }
}
