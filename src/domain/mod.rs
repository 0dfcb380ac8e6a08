//! Domain module
//!
//! Core payroll types and business errors.

pub mod context;
pub mod error;
pub mod models;

pub use context::OperationContext;
pub use error::DomainError;
pub use models::{Company, Position, Transaction, TransactionType, User};
