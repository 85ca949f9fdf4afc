use thiserror::Error;

use crate::access::{Operation, Role};

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Role {role} is not allowed to {operation}")]
    Forbidden { role: Role, operation: Operation },

    /// Covers both unknown and malformed identifiers
    #[error("{0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl DomainError {
    pub fn not_found(raw: &str) -> Self {
        Self::NotFound(format!("No device type found for identifier {raw}"))
    }

    pub fn storage(e: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_message() {
        let err = DomainError::Forbidden {
            role: Role::User,
            operation: Operation::Create,
        };
        assert_eq!(err.to_string(), "Role USER is not allowed to create");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            DomainError::not_found("abc").to_string(),
            "No device type found for identifier abc"
        );
    }
}
