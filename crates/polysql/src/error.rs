//! Error types for polysql

use crate::dialect::Dialect;
use thiserror::Error;

/// Result type alias for polysql operations
pub type ExprResult<T> = Result<T, ExprError>;

/// Error types for rendering and finalizing expressions
#[derive(Debug, Error)]
pub enum ExprError {
    /// A required child expression (or the finalized tree itself) is missing
    #[error("nil expression at {at}")]
    NilExpression { at: &'static str },

    /// Placeholder markers and supplied expressions/arguments disagree
    #[error(
        "argument count mismatch at {at}: {placeholders} placeholder(s), {arguments} argument(s) in '{sql}'"
    )]
    ArgumentCountMismatch {
        at: &'static str,
        sql: String,
        placeholders: usize,
        arguments: usize,
    },

    /// Placeholder scheme string could not be parsed
    #[error("invalid placeholder scheme: {0}")]
    InvalidPlaceholder(String),

    /// No placeholder scheme is registered for the dialect
    #[error("unknown dialect: {0}")]
    UnknownDialect(Dialect),

    /// Configuration could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    /// Error raised by a caller-defined expression
    #[error("{0}")]
    Custom(String),
}

impl ExprError {
    /// Create an error from a caller-defined expression.
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    pub(crate) fn mismatch(
        at: &'static str,
        sql: impl Into<String>,
        placeholders: usize,
        arguments: usize,
    ) -> Self {
        Self::ArgumentCountMismatch {
            at,
            sql: sql.into(),
            placeholders,
            arguments,
        }
    }

    /// Check if this is a nil expression error
    pub fn is_nil_expression(&self) -> bool {
        matches!(self, Self::NilExpression { .. })
    }

    /// Check if this is an argument count mismatch
    pub fn is_argument_count_mismatch(&self) -> bool {
        matches!(self, Self::ArgumentCountMismatch { .. })
    }
}
