//! Schema error types.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised by schema element parsing and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The text is not a valid attribute description.
    #[error("invalid attribute description: {0}")]
    InvalidAttributeDescription(String),

    /// No matching rule is registered under the given identifier.
    #[error("unknown matching rule: {0}")]
    UnknownMatchingRule(String),
}

impl SchemaError {
    /// Creates an invalid-attribute-description error.
    #[must_use]
    pub fn invalid_attribute(detail: impl Into<String>) -> Self {
        Self::InvalidAttributeDescription(detail.into())
    }

    /// Creates an unknown-matching-rule error.
    #[must_use]
    pub fn unknown_rule(id: impl Into<String>) -> Self {
        Self::UnknownMatchingRule(id.into())
    }
}
