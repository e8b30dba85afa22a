use bindshape_parser::ParseError;
use thiserror::Error;

/// Errors that abort transpilation of a template.
///
/// Recoverable template mistakes (a missing `items` attribute, an invalid
/// alias name) are reported through the problem log instead and leave the
/// transpiler running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranspileError {
    #[error("Failed to parse binding expression '{expression}'")]
    Expression {
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error("No transpiler registered for node '{node_name}'")]
    MissingHandler { node_name: String },

    #[error("Internal invariant violated: {0}")]
    Internal(String),
}

impl TranspileError {
    pub fn expression(expression: impl Into<String>, source: ParseError) -> Self {
        Self::Expression {
            expression: expression.into(),
            source,
        }
    }

    pub fn missing_handler(node_name: impl Into<String>) -> Self {
        Self::MissingHandler {
            node_name: node_name.into(),
        }
    }
}

pub type TranspileResult<T> = Result<T, TranspileError>;
