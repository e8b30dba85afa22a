use crate::error::{ParseError, ParseResult};
use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Token types for the binding-expression language.
///
/// Quoted strings are consumed verbatim to the matching quote. Any run of
/// characters that is not whitespace, a quote, or one of the one-character
/// tokens is classified after collection: `true`/`false` exactly is a
/// boolean, a run that reads as a number is a number, anything else is an
/// identifier (so `123abc` is an identifier and `-1` is a number).
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token<'src> {
    #[regex(r#""[^"]*""#, |lex| lex.slice())]
    #[regex(r"'[^']*'", |lex| lex.slice())]
    StringLiteral(&'src str),

    #[token("true", |lex| lex.slice())]
    #[token("false", |lex| lex.slice())]
    BooleanLiteral(&'src str),

    #[regex(r"-?[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice(), priority = 3)]
    NumberLiteral(&'src str),

    #[token("[")]
    OpenSquareBracket,

    #[token("]")]
    CloseSquareBracket,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[token(".")]
    Period,

    #[token("!")]
    Exclamation,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,

    #[regex(r#"[^ \t\n\r\[\]().!,*'"]+"#, |lex| lex.slice(), priority = 1)]
    Identifier(&'src str),
}

impl<'src> fmt::Display for Token<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StringLiteral(s) => write!(f, "string {}", s),
            Token::BooleanLiteral(b) => write!(f, "boolean {}", b),
            Token::NumberLiteral(n) => write!(f, "number {}", n),
            Token::OpenSquareBracket => write!(f, "["),
            Token::CloseSquareBracket => write!(f, "]"),
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Period => write!(f, "."),
            Token::Exclamation => write!(f, "!"),
            Token::Comma => write!(f, ","),
            Token::Star => write!(f, "*"),
            Token::Identifier(s) => write!(f, "identifier '{}'", s),
        }
    }
}

/// Tokenize one expression string.
///
/// The only way lexing can fail is a quote with no matching close, which
/// is fatal for the expression.
pub fn tokenize(source: &str) -> ParseResult<Vec<(Token, Range<usize>)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                let slice = lexer.slice();
                if slice.starts_with('"') || slice.starts_with('\'') {
                    return Err(ParseError::unterminated_string_literal(span.start));
                }
                return Err(ParseError::unexpected_character(span.start));
            }
        }
    }
    Ok(tokens)
}
