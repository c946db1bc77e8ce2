//! Password policy domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the password policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Policy with the given identifier or key was not found
    #[error("Password policy not found: {0}")]
    NotFound(String),

    /// Attempted to create a policy whose key is already taken
    #[error("Duplicate password policy key: {0}")]
    DuplicateKey(String),

    /// A write request failed validation
    #[error("Password policy validation failed: {0}")]
    ValidationFailed(String),
}

impl PolicyError {
    /// Creates a NotFound error from any identifier
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PolicyError::NotFound(id.to_string())
    }

    /// Creates a ValidationFailed error from collected messages
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PolicyError::ValidationFailed(errors.join("; "))
    }
}

impl From<PolicyError> for PortError {
    fn from(error: PolicyError) -> Self {
        match error {
            PolicyError::NotFound(id) => PortError::not_found("PasswordPolicy", id),
            PolicyError::DuplicateKey(key) => {
                PortError::conflict(format!("password policy key '{}' already exists", key))
            }
            PolicyError::ValidationFailed(message) => PortError::validation(message),
        }
    }
}
