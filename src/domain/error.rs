//! Domain error taxonomy

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Malformed or missing input, scoped to a single field.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// A state-transition guard, capacity check or tenant-ownership
    /// check rejected the operation.
    #[error("{0}")]
    BusinessRule(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Standard message for a rejected status transition.
    pub fn invalid_transition(entity: &'static str, current: &str, attempted: &str) -> Self {
        Self::BusinessRule(format!(
            "{} cannot transition to {} (current status: {})",
            entity, attempted, current
        ))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
