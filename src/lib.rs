//! self_payroll Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repository;
pub mod usecase;

pub use config::Config;
pub use domain::{DomainError, OperationContext};
pub use error::{AppError, AppResult};
