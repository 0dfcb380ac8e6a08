//! Request definitions
//!
//! Decoded inputs of the usecases and the field mapping from each request
//! onto the entity handed to the repositories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{Company, Position, User};

/// Create or overwrite the company profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRequest {
    pub name: String,
    pub address: String,
    pub balance: Decimal,
}

impl From<CompanyRequest> for Company {
    fn from(request: CompanyRequest) -> Self {
        Company::unsaved(request.name, request.address, request.balance)
    }
}

/// Credit the company balance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopupCompanyBalance {
    pub balance: Decimal,
}

/// Create or edit a position
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionRequest {
    pub name: String,
    pub salary: Decimal,
}

impl From<PositionRequest> for Position {
    fn from(request: PositionRequest) -> Self {
        Position::unsaved(request.name, request.salary)
    }
}

/// Create or edit an employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub secret_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub position_id: i64,
}

impl From<UserRequest> for User {
    fn from(request: UserRequest) -> Self {
        User {
            id: 0,
            secret_id: request.secret_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            position_id: request.position_id,
            position: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }
}

/// Withdraw the salary of an employee, authorized by their secret id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub id: i64,
    pub secret_id: String,
}

impl WithdrawRequest {
    pub fn new(id: i64, secret_id: impl Into<String>) -> Self {
        Self {
            id,
            secret_id: secret_id.into(),
        }
    }
}
