use serde::{Deserialize, Serialize};
use std::fmt;

/// Binding-expression AST node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expression {
    /// Bare name (`user`)
    Identifier { name: String },

    /// Number, quoted string, or boolean, kept as raw source text
    Literal { value: String },

    /// One `.name` step off a base; `a.b.c` nests left
    PropertyAccess {
        base: Box<Expression>,
        name: String,
    },

    /// `callee(args...)`; the callee is an identifier or dotted path
    MethodCall {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },

    /// Leading `!`
    Negation { operand: Box<Expression> },

    /// Trailing `.*`: observe deep mutations under the base path
    WildcardPath { base: Box<Expression> },
}

impl Expression {
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier { name: name.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal {
            value: value.into(),
        }
    }

    pub fn property_access(base: Expression, name: impl Into<String>) -> Self {
        Self::PropertyAccess {
            base: Box::new(base),
            name: name.into(),
        }
    }

    pub fn method_call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Self::MethodCall {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn negation(operand: Expression) -> Self {
        Self::Negation {
            operand: Box::new(operand),
        }
    }

    pub fn wildcard_path(base: Expression) -> Self {
        Self::WildcardPath {
            base: Box::new(base),
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Self::Literal { .. })
    }

    /// The expression with any leading negation and trailing wildcard
    /// markers removed, leaving the bare path or call.
    pub fn unwrapped(&self) -> &Expression {
        match self {
            Self::Negation { operand } => operand.unwrapped(),
            Self::WildcardPath { base } => base.unwrapped(),
            other => other,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier { name } => write!(f, "{}", name),
            Self::Literal { value } => write!(f, "{}", value),
            Self::PropertyAccess { base, name } => write!(f, "{}.{}", base, name),
            Self::MethodCall { callee, arguments } => {
                write!(f, "{}(", callee)?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
            Self::Negation { operand } => write!(f, "!{}", operand),
            Self::WildcardPath { base } => write!(f, "{}.*", base),
        }
    }
}
