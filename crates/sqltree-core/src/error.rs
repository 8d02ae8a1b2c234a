//! Error types for rendering.

/// Errors that can occur while rendering a statement or expression.
///
/// Every error is raised synchronously by the render call that detected it.
/// Construction of trees never fails; names and shapes are only checked
/// when they are emitted.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An identifier (or a free-form keyword used in identifier position)
    /// failed the injection guard.
    #[error("Invalid identifier {name:?}: {reason}")]
    InvalidIdentifier {
        /// The rejected name.
        name: String,
        /// Why the name was rejected.
        reason: &'static str,
    },

    /// The statement has a structurally invalid combination of clauses.
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    /// A value of the wrong shape was placed where an expression was required.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The shape the position requires.
        expected: &'static str,
        /// The shape that was supplied.
        found: String,
    },

    /// A dialect configuration document could not be parsed.
    #[error("Invalid dialect configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn invalid_identifier(name: &str, reason: &'static str) -> Self {
        Self::InvalidIdentifier {
            name: String::from(name),
            reason,
        }
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedStatement(message.into())
    }
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
