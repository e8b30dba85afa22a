use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// Fatal syntax errors for one binding expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unterminated string literal at {pos}")]
    UnterminatedStringLiteral { pos: usize },

    #[error("Unexpected character at {pos}")]
    UnexpectedCharacter { pos: usize },

    #[error("Unexpected token at {pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of expression at {pos}")]
    UnexpectedEnd { pos: usize },

    #[error("Unexpected trailing input at {pos}: found {found}")]
    TrailingTokens { pos: usize, found: String },

    #[error("A wildcard may only end an expression (at {pos})")]
    MisplacedWildcard { pos: usize },

    #[error("A call result cannot be invoked again (at {pos})")]
    ChainedCall { pos: usize },

    #[error("A call passed as an argument must itself take arguments (at {pos})")]
    ArgumentlessNestedCall { pos: usize },
}

impl ParseError {
    pub fn unterminated_string_literal(pos: usize) -> Self {
        Self::UnterminatedStringLiteral { pos }
    }

    pub fn unexpected_character(pos: usize) -> Self {
        Self::UnexpectedCharacter { pos }
    }

    pub fn unexpected_token(pos: usize, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedToken {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_end(pos: usize) -> Self {
        Self::UnexpectedEnd { pos }
    }

    pub fn trailing_tokens(pos: usize, found: impl Into<String>) -> Self {
        Self::TrailingTokens {
            pos,
            found: found.into(),
        }
    }

    pub fn misplaced_wildcard(pos: usize) -> Self {
        Self::MisplacedWildcard { pos }
    }

    pub fn chained_call(pos: usize) -> Self {
        Self::ChainedCall { pos }
    }

    pub fn argumentless_nested_call(pos: usize) -> Self {
        Self::ArgumentlessNestedCall { pos }
    }
}
