use bindshape_parser::ParseError;
use thiserror::Error;

/// Errors that abort analysis of the template currently being processed.
/// Recoverable findings go to the shared problem log instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("Failed to parse binding expression '{expression}'")]
    Expression {
        expression: String,
        #[source]
        source: ParseError,
    },

    #[error("Internal invariant violated: {0}")]
    Internal(String),
}

impl InferenceError {
    pub fn expression(expression: impl Into<String>, source: ParseError) -> Self {
        Self::Expression {
            expression: expression.into(),
            source,
        }
    }
}

pub type InferenceResult<T> = Result<T, InferenceError>;
