//! Error types for relsql.

use thiserror::Error;

use crate::transpiler::Role;

/// The main error type for building, compiling and executing queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A node was compiled in a role it does not support.
    #[error("{node} is not a valid {role}")]
    Capability { role: Role, node: String },

    /// A SELECT was compiled without any projected fields.
    #[error("No fields projected")]
    EmptyProjection,

    /// A field lookup against a table or subquery found no match.
    #[error("Unknown field '{field}' on {table}")]
    UnknownField { table: String, field: String },

    /// A schema lookup found no table or link table by that name.
    #[error("Unknown table: '{0}'")]
    UnknownTable(String),

    /// Failed to parse a filter or ordering term.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create a capability error for `node` attempted in `role`.
    pub fn capability(role: Role, node: impl ToString) -> Self {
        Self::Capability {
            role,
            node: node.to_string(),
        }
    }

    /// Create an unknown field error.
    pub fn unknown_field(table: impl ToString, field: impl Into<String>) -> Self {
        Self::UnknownField {
            table: table.to_string(),
            field: field.into(),
        }
    }

    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type alias for relsql operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_capability_display() {
        let err = QueryError::capability(Role::Join, "Const(3)");
        assert_eq!(err.to_string(), "Const(3) is not a valid join");
    }

    #[test]
    fn test_unknown_field_display() {
        let err = QueryError::unknown_field("Table(user)", "email");
        assert_eq!(err.to_string(), "Unknown field 'email' on Table(user)");
    }
}
