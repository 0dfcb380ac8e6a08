//! Domain Error Types
//!
//! Business rule violations raised by the usecases themselves, independent
//! of the storage and web layers.

use thiserror::Error;

/// Payroll business rule violations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The position referenced by a new employee does not exist
    #[error("position id not valid ")]
    InvalidPositionId,

    /// The secret id supplied for a salary withdrawal does not match
    #[error("secret id not valid")]
    InvalidSecretId,
}

impl DomainError {
    /// Short machine-readable code used in error responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPositionId => "invalid_position_id",
            Self::InvalidSecretId => "invalid_secret_id",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_position_message_keeps_trailing_space() {
        assert_eq!(
            DomainError::InvalidPositionId.to_string(),
            "position id not valid "
        );
    }

    #[test]
    fn test_invalid_secret_message() {
        let err = DomainError::InvalidSecretId;
        assert_eq!(err.to_string(), "secret id not valid");
        assert_eq!(err.code(), "invalid_secret_id");
    }
}
