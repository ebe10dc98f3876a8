//! Error types for sqlcmd

use thiserror::Error;

/// Result type alias for sqlcmd operations
pub type CommandResult<T> = Result<T, CommandError>;

/// Error types for command generation
#[derive(Debug, Error)]
pub enum CommandError {
    /// The entity type's mapping cannot produce the requested statement
    /// (no primary key, a key without a value, a degenerate clause).
    #[error("Mapping error for '{entity}': {message}")]
    Mapping { entity: String, message: String },

    /// The entity's current data would produce a statement binding nothing.
    #[error("Data error for '{entity}': {message}")]
    Data { entity: String, message: String },

    /// The operation is not provided by the active dialect.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// A table, column, or property name is not a usable SQL identifier.
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    /// A value could not be converted to the type a property expects.
    #[error("Conversion error: expected {expected}, found {found}")]
    Conversion { expected: String, found: String },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl CommandError {
    /// Create a mapping error for an entity type
    pub fn mapping(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create a data error for an entity type
    pub fn data(entity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Data {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported-operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(message: impl Into<String>) -> Self {
        Self::InvalidIdentifier(message.into())
    }

    /// Create a conversion error
    pub fn conversion(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Conversion {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Check if this is a mapping error
    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping { .. })
    }

    /// Check if this is a data error
    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// Check if this is an unsupported-operation error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
