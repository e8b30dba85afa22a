use crate::ast::Expression;
use crate::error::{ParseError, ParseResult};
use crate::token::{tokenize, Token};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A parsed binding expression plus the native-event name split off a
/// `::event` suffix (`value::input` reads `value` and listens to `input`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedBinding {
    pub expression: Expression,
    pub event: Option<String>,
}

/// Recursive-descent parser for one binding expression.
///
/// Grammar:
///
/// ```text
/// expr := '!'? term
/// term := path ('(' args ')')? ('.' Identifier)* ('.' '*')?
/// path := Identifier ('.' Identifier)*
/// args := (expr (',' expr)*)?
/// ```
///
/// A chain carries at most one call, a wildcard only in terminal position,
/// and a call passed as an argument must itself take at least one argument
/// (an argumentless inner call has no paths to observe, so it can never
/// re-evaluate).
pub struct ExpressionParser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    source_len: usize,
}

impl<'src> ExpressionParser<'src> {
    pub fn new(source: &'src str) -> ParseResult<Self> {
        Ok(Self {
            tokens: tokenize(source)?,
            pos: 0,
            source_len: source.len(),
        })
    }

    /// Parse the whole token stream as one expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        let expression = self.parse_negatable()?;
        if let Some((token, span)) = self.peek() {
            return Err(ParseError::trailing_tokens(span.start, token.to_string()));
        }
        Ok(expression)
    }

    fn parse_negatable(&mut self) -> ParseResult<Expression> {
        if self.match_token(&Token::Exclamation) {
            let operand = self.parse_term()?;
            return Ok(Expression::negation(operand));
        }
        self.parse_term()
    }

    fn parse_term(&mut self) -> ParseResult<Expression> {
        match self.advance() {
            Some((Token::StringLiteral(value), _))
            | Some((Token::BooleanLiteral(value), _))
            | Some((Token::NumberLiteral(value), _)) => Ok(Expression::literal(value)),
            Some((Token::Identifier(name), _)) => {
                let root = Expression::identifier(name);
                self.parse_path(root)
            }
            Some((token, span)) => Err(ParseError::unexpected_token(
                span.start,
                "an identifier or a literal",
                token.to_string(),
            )),
            None => Err(ParseError::unexpected_end(self.source_len)),
        }
    }

    /// Extends `root` with property steps, at most one call, and an
    /// optional terminal wildcard.
    fn parse_path(&mut self, root: Expression) -> ParseResult<Expression> {
        let mut expression = root;
        let mut called = false;
        loop {
            match self.peek() {
                Some((Token::OpenParen, span)) => {
                    if called {
                        return Err(ParseError::chained_call(span.start));
                    }
                    self.advance();
                    let arguments = self.parse_arguments()?;
                    expression = Expression::method_call(expression, arguments);
                    called = true;
                }
                Some((Token::Period, _)) => {
                    self.advance();
                    match self.advance() {
                        Some((Token::Identifier(name), _)) => {
                            expression = Expression::property_access(expression, name);
                        }
                        Some((Token::Star, _)) => {
                            let wildcard = Expression::wildcard_path(expression);
                            if let Some((Token::Period | Token::OpenParen, span)) = self.peek() {
                                return Err(ParseError::misplaced_wildcard(span.start));
                            }
                            return Ok(wildcard);
                        }
                        Some((token, span)) => {
                            return Err(ParseError::unexpected_token(
                                span.start,
                                "a property name or '*'",
                                token.to_string(),
                            ));
                        }
                        None => return Err(ParseError::unexpected_end(self.source_len)),
                    }
                }
                _ => return Ok(expression),
            }
        }
    }

    /// Parses a call's argument list; the opening parenthesis is already
    /// consumed and the closing one is consumed here.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();
        if self.match_token(&Token::CloseParen) {
            return Ok(arguments);
        }
        loop {
            let start = self.peek_start();
            let argument = self.parse_negatable()?;
            if let Expression::MethodCall {
                arguments: inner, ..
            } = argument.unwrapped()
            {
                if inner.is_empty() {
                    return Err(ParseError::argumentless_nested_call(start));
                }
            }
            arguments.push(argument);
            match self.advance() {
                Some((Token::Comma, _)) => {}
                Some((Token::CloseParen, _)) => return Ok(arguments),
                Some((token, span)) => {
                    return Err(ParseError::unexpected_token(
                        span.start,
                        "',' or ')'",
                        token.to_string(),
                    ));
                }
                None => return Err(ParseError::unexpected_end(self.source_len)),
            }
        }
    }

    fn peek(&self) -> Option<&(Token<'src>, Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_start(&self) -> usize {
        self.peek()
            .map(|(_, span)| span.start)
            .unwrap_or(self.source_len)
    }

    fn advance(&mut self) -> Option<(Token<'src>, Range<usize>)> {
        let entry = self.tokens.get(self.pos).cloned();
        if entry.is_some() {
            self.pos += 1;
        }
        entry
    }

    fn match_token(&mut self, expected: &Token) -> bool {
        if self.peek().map(|(token, _)| token) == Some(expected) {
            self.pos += 1;
            return true;
        }
        false
    }
}

/// Parse one binding expression.
pub fn parse(source: &str) -> ParseResult<Expression> {
    ExpressionParser::new(source)?.parse_expression()
}

/// Parse a binding expression, splitting off a native-event `::name`
/// suffix first.
pub fn parse_binding_expression(source: &str) -> ParseResult<ParsedBinding> {
    let (base, event) = match source.find("::") {
        Some(index) => (&source[..index], Some(source[index + 2..].to_string())),
        None => (source, None),
    };
    Ok(ParsedBinding {
        expression: parse(base)?,
        event,
    })
}
